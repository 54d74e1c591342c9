//! # API Facade
//!
//! [`ZosUtil`] is the single entry point for callers. It owns a host, an
//! authorizer and the configuration, and dispatches to the command functions
//! in `commands/`.
//!
//! ## Typed calls
//!
//! The eight operations are plain methods: `get_tag`, `set_tag`, `clear_tag`,
//! `set_text`, `set_binary`, `set_mixed`, `apf_enable`, `apf_disable`, plus
//! `apf_status` for reading the APF bit back.
//!
//! ## Dynamic calls
//!
//! Embedders that forward loosely typed arguments (a scripting binding, a job
//! runner reading step definitions) use [`ZosUtil::invoke`] with an
//! [`Operation`] and a slice of [`Param`]s. Arity is checked there:
//!
//! - `SetTag` takes at most one `Ccsid` and at most one `TextFlag`
//! - every other operation takes no parameters at all
//!
//! so `invoke(ClearTag, path, &[Param::Ccsid(1047)])` is an invalid argument
//! rather than a quiet retag.
//!
//! Both routes resolve a missing CCSID the same way, from
//! `UtilConfig::default_ccsid`: `set_tag(p, TagOptions::default())` and
//! `invoke(SetTag, p, &[])` write the same tag.
//!
//! ## Generic Over Host
//!
//! - Production: `ZosUtil<SystemHost, GroupAuthorizer>` via [`ZosUtil::system`]
//! - Testing: `ZosUtil<MemHost, StaticAuthorizer>`

use crate::auth::{Authorizer, GroupAuthorizer};
use crate::commands::{self, Outcome};
use crate::config::UtilConfig;
use crate::error::{Result, ZosError};
use crate::host::{HostAttributes, SystemHost};
use crate::model::{ApfAttribute, FileTag, TagOptions};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub struct ZosUtil<H: HostAttributes, A: Authorizer> {
    host: H,
    auth: A,
    config: UtilConfig,
}

impl ZosUtil<SystemHost, GroupAuthorizer> {
    /// The platform host, authorizing APF changes against `config.apf_group`.
    pub fn system(config: UtilConfig) -> Self {
        let auth = GroupAuthorizer::new(config.apf_group.clone());
        Self::new(SystemHost::default(), auth, config)
    }
}

impl<H: HostAttributes, A: Authorizer> ZosUtil<H, A> {
    pub fn new(host: H, auth: A, config: UtilConfig) -> Self {
        Self { host, auth, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &UtilConfig {
        &self.config
    }

    pub fn get_tag(&self, path: impl AsRef<Path>) -> Result<FileTag> {
        commands::tag::get(&self.host, path.as_ref())
    }

    /// Write a full tag. A missing CCSID becomes `config.default_ccsid`.
    pub fn set_tag(&self, path: impl AsRef<Path>, options: TagOptions) -> Result<()> {
        commands::tag::set_with_default(
            &self.host,
            path.as_ref(),
            options,
            self.config.default_ccsid,
        )
    }

    pub fn clear_tag(&self, path: impl AsRef<Path>) -> Result<()> {
        commands::tag::clear(&self.host, path.as_ref())
    }

    pub fn set_text(&self, path: impl AsRef<Path>) -> Result<()> {
        commands::tag::set_text(&self.host, path.as_ref(), self.config.default_ccsid)
    }

    pub fn set_binary(&self, path: impl AsRef<Path>) -> Result<()> {
        commands::tag::set_binary(&self.host, path.as_ref())
    }

    pub fn set_mixed(&self, path: impl AsRef<Path>) -> Result<()> {
        commands::tag::set_mixed(&self.host, path.as_ref(), self.config.default_ccsid)
    }

    pub fn apf_enable(&self, path: impl AsRef<Path>) -> Result<()> {
        commands::apf::enable(&self.host, &self.auth, path.as_ref())
    }

    pub fn apf_disable(&self, path: impl AsRef<Path>) -> Result<()> {
        commands::apf::disable(&self.host, &self.auth, path.as_ref())
    }

    pub fn apf_status(&self, path: impl AsRef<Path>) -> Result<ApfAttribute> {
        commands::apf::status(&self.host, path.as_ref())
    }

    /// Run `op` with loosely typed parameters, checking them first.
    pub fn invoke(
        &self,
        op: Operation,
        path: impl AsRef<Path>,
        params: &[Param],
    ) -> Result<Outcome> {
        let path = path.as_ref();
        if op != Operation::SetTag && !params.is_empty() {
            return Err(ZosError::invalid(format!(
                "{}() takes only a path, got {} extra parameter{}",
                op,
                params.len(),
                if params.len() == 1 { "" } else { "s" }
            )));
        }

        match op {
            Operation::GetTag => self.get_tag(path).map(Outcome::Tag),
            Operation::SetTag => {
                let options = collect_tag_params(TagOptions::new(), params)?;
                self.set_tag(path, options).map(|_| Outcome::Unit)
            }
            Operation::ClearTag => self.clear_tag(path).map(|_| Outcome::Unit),
            Operation::SetText => self.set_text(path).map(|_| Outcome::Unit),
            Operation::SetBinary => self.set_binary(path).map(|_| Outcome::Unit),
            Operation::SetMixed => self.set_mixed(path).map(|_| Outcome::Unit),
            Operation::ApfEnable => self.apf_enable(path).map(|_| Outcome::Unit),
            Operation::ApfDisable => self.apf_disable(path).map(|_| Outcome::Unit),
            Operation::ApfStatus => self.apf_status(path).map(Outcome::Apf),
        }
    }
}

fn collect_tag_params(mut options: TagOptions, params: &[Param]) -> Result<TagOptions> {
    let mut seen_ccsid = false;
    let mut seen_text = false;
    for param in params {
        match *param {
            Param::Ccsid(ccsid) => {
                if seen_ccsid {
                    return Err(ZosError::invalid("ccsid given more than once"));
                }
                seen_ccsid = true;
                options = options.ccsid(ccsid);
            }
            Param::TextFlag(text) => {
                if seen_text {
                    return Err(ZosError::invalid("text flag given more than once"));
                }
                seen_text = true;
                options = options.text(text);
            }
        }
    }
    Ok(options)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetTag,
    SetTag,
    ClearTag,
    SetText,
    SetBinary,
    SetMixed,
    ApfEnable,
    ApfDisable,
    ApfStatus,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::GetTag,
        Operation::SetTag,
        Operation::ClearTag,
        Operation::SetText,
        Operation::SetBinary,
        Operation::SetMixed,
        Operation::ApfEnable,
        Operation::ApfDisable,
        Operation::ApfStatus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetTag => "get_tag",
            Operation::SetTag => "set_tag",
            Operation::ClearTag => "clear_tag",
            Operation::SetText => "set_text",
            Operation::SetBinary => "set_binary",
            Operation::SetMixed => "set_mixed",
            Operation::ApfEnable => "apf_enable",
            Operation::ApfDisable => "apf_disable",
            Operation::ApfStatus => "apf_status",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ZosError;

    /// Accepts the snake-case names above and the classic USS utility names
    /// (`chtag`, `untag`, `tag_text`, ...).
    fn from_str(s: &str) -> Result<Self> {
        let op = match s.trim() {
            "get_tag" | "get_tag_info" => Operation::GetTag,
            "set_tag" | "chtag" => Operation::SetTag,
            "clear_tag" | "untag" => Operation::ClearTag,
            "set_text" | "tag_text" => Operation::SetText,
            "set_binary" | "tag_binary" => Operation::SetBinary,
            "set_mixed" | "tag_mixed" => Operation::SetMixed,
            "apf_enable" | "enable_apf" => Operation::ApfEnable,
            "apf_disable" | "disable_apf" => Operation::ApfDisable,
            "apf_status" => Operation::ApfStatus,
            other => return Err(ZosError::invalid(format!("unknown operation '{}'", other))),
        };
        Ok(op)
    }
}

/// A loosely typed parameter for [`ZosUtil::invoke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Ccsid(i64),
    TextFlag(bool),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticAuthorizer;
    use crate::error::ErrorKind;
    use crate::host::memory::fixtures::HostFixture;
    use crate::host::memory::MemHost;

    fn api(host: &MemHost) -> ZosUtil<&MemHost, StaticAuthorizer> {
        ZosUtil::new(host, StaticAuthorizer::allow(), UtilConfig::default())
    }

    #[test]
    fn test_operation_names_parse() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
        assert_eq!("chtag".parse::<Operation>().unwrap(), Operation::SetTag);
        assert_eq!("untag".parse::<Operation>().unwrap(), Operation::ClearTag);
        assert_eq!(
            "get_tag_info".parse::<Operation>().unwrap(),
            Operation::GetTag
        );
        assert_eq!(
            "enable_apf".parse::<Operation>().unwrap(),
            Operation::ApfEnable
        );
        let err = "retag".parse::<Operation>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_clear_with_extra_param_is_invalid() {
        let fx = HostFixture::new().with_tag("f", FileTag::new(819, true));
        let p = fx.dir.path().join("f");
        let api = api(&fx.host);

        for extra in [Param::Ccsid(1047), Param::TextFlag(false), Param::Ccsid(0)] {
            let err = api.invoke(Operation::ClearTag, &p, &[extra]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(api.get_tag(&p).unwrap(), FileTag::new(819, true));
    }

    #[test]
    fn test_only_set_tag_accepts_params() {
        let fx = HostFixture::new();
        let p = fx.file("f");
        let api = api(&fx.host);

        for op in Operation::ALL {
            let result = api.invoke(op, &p, &[Param::Ccsid(1047)]);
            if op == Operation::SetTag {
                assert!(result.is_ok());
            } else {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
            }
        }
    }

    #[test]
    fn test_set_tag_params() {
        let fx = HostFixture::new();
        let p = fx.file("f");
        let api = api(&fx.host);

        api.invoke(Operation::SetTag, &p, &[]).unwrap();
        assert_eq!(
            api.invoke(Operation::GetTag, &p, &[]).unwrap(),
            Outcome::Tag(FileTag::new(819, true))
        );

        api.invoke(
            Operation::SetTag,
            &p,
            &[Param::TextFlag(false), Param::Ccsid(1047)],
        )
        .unwrap();
        assert_eq!(api.get_tag(&p).unwrap(), FileTag::new(1047, false));

        let err = api
            .invoke(Operation::SetTag, &p, &[Param::Ccsid(1), Param::Ccsid(2)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = api
            .invoke(Operation::SetTag, &p, &[Param::Ccsid(70000)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(api.get_tag(&p).unwrap(), FileTag::new(1047, false));
    }

    #[test]
    fn test_configured_default_ccsid() {
        let fx = HostFixture::new();
        let p = fx.file("f");
        let config = UtilConfig {
            default_ccsid: 1047,
            ..UtilConfig::default()
        };
        let api = ZosUtil::new(&fx.host, StaticAuthorizer::allow(), config);

        api.set_tag(&p, TagOptions::default()).unwrap();
        assert_eq!(api.get_tag(&p).unwrap(), FileTag::new(1047, true));

        api.set_tag(&p, TagOptions::new().ccsid(1208)).unwrap();
        assert_eq!(api.get_tag(&p).unwrap(), FileTag::new(1208, true));

        api.set_binary(&p).unwrap();
        api.set_text(&p).unwrap();
        assert_eq!(api.get_tag(&p).unwrap(), FileTag::new(1047, true));
    }

    #[test]
    fn test_typed_and_dynamic_set_tag_agree() {
        let fx = HostFixture::new();
        let typed = fx.file("typed");
        let dynamic = fx.file("dynamic");
        let config = UtilConfig {
            default_ccsid: 1047,
            ..UtilConfig::default()
        };
        let api = ZosUtil::new(&fx.host, StaticAuthorizer::allow(), config);

        api.set_tag(&typed, TagOptions::default()).unwrap();
        api.invoke(Operation::SetTag, &dynamic, &[]).unwrap();
        assert_eq!(api.get_tag(&typed).unwrap(), FileTag::new(1047, true));
        assert_eq!(api.get_tag(&dynamic).unwrap(), api.get_tag(&typed).unwrap());

        api.set_tag(&typed, TagOptions::new().text(false)).unwrap();
        api.invoke(Operation::SetTag, &dynamic, &[Param::TextFlag(false)])
            .unwrap();
        assert_eq!(api.get_tag(&typed).unwrap(), FileTag::new(1047, false));
        assert_eq!(api.get_tag(&dynamic).unwrap(), api.get_tag(&typed).unwrap());
    }

    #[test]
    fn test_path_with_nul_is_invalid_for_every_operation() {
        let host = MemHost::new();
        let api = api(&host);

        let err = api.get_tag("/a\0b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        for op in Operation::ALL {
            let err = api.invoke(op, "/a\0b", &[]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{}", op);
        }
        assert_eq!(host.writes(), 0);
    }

    #[test]
    fn test_apf_status_outcome() {
        let fx = HostFixture::new();
        let p = fx.file("prog");
        let api = api(&fx.host);

        api.invoke(Operation::ApfEnable, &p, &[]).unwrap();
        let outcome = api.invoke(Operation::ApfStatus, &p, &[]).unwrap();
        assert_eq!(outcome.apf(), Some(ApfAttribute { enabled: true }));
        assert_eq!(outcome.tag(), None);
    }

    #[test]
    fn test_system_host_uses_config_group() {
        let config = UtilConfig {
            apf_group: "SYS1APF".to_string(),
            ..UtilConfig::default()
        };
        let api = ZosUtil::system(config);
        assert_eq!(api.config().apf_group, "SYS1APF");
    }
}

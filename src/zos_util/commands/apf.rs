//! APF-authorized attribute commands.
//!
//! Changes are gated by an [`Authorizer`]; a refusal is returned before any
//! host request. Only a malformed path is reported ahead of a refusal. Enabling an enabled file (or disabling a disabled one) is a
//! plain success.

use super::check_path;
use crate::auth::{Authorization, Authorizer};
use crate::error::{Result, ZosError};
use crate::host::HostAttributes;
use crate::model::ApfAttribute;
use std::path::Path;

pub fn enable<H: HostAttributes, A: Authorizer>(host: &H, auth: &A, path: &Path) -> Result<()> {
    write(host, auth, path, true)
}

pub fn disable<H: HostAttributes, A: Authorizer>(host: &H, auth: &A, path: &Path) -> Result<()> {
    write(host, auth, path, false)
}

pub fn status<H: HostAttributes>(host: &H, path: &Path) -> Result<ApfAttribute> {
    check_path(path)?;
    let enabled = host
        .read_apf(path)
        .map_err(|e| ZosError::from_host(path, e))?;
    Ok(ApfAttribute { enabled })
}

fn write<H: HostAttributes, A: Authorizer>(
    host: &H,
    auth: &A,
    path: &Path,
    enabled: bool,
) -> Result<()> {
    check_path(path)?;
    if let Authorization::Denied(reason) = auth.authorize_apf() {
        log::warn!("APF change on {} refused: {}", path.display(), reason);
        return Err(ZosError::denied(path, reason));
    }

    log::debug!(
        "{} APF attribute on {}",
        if enabled { "setting" } else { "clearing" },
        path.display()
    );
    host.write_apf(path, enabled).map_err(|e| {
        log::warn!("APF change on {} failed: {}", path.display(), e);
        ZosError::from_host(path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticAuthorizer;
    use crate::error::ErrorKind;
    use crate::host::memory::fixtures::HostFixture;

    #[test]
    fn test_enable_is_idempotent() {
        let fx = HostFixture::new();
        let p = fx.file("prog");
        let auth = StaticAuthorizer::allow();

        enable(&fx.host, &auth, &p).unwrap();
        enable(&fx.host, &auth, &p).unwrap();
        assert!(status(&fx.host, &p).unwrap().enabled);

        disable(&fx.host, &auth, &p).unwrap();
        assert!(!status(&fx.host, &p).unwrap().enabled);
        disable(&fx.host, &auth, &p).unwrap();
        assert!(!status(&fx.host, &p).unwrap().enabled);
    }

    #[test]
    fn test_denied_caller_changes_nothing() {
        let fx = HostFixture::new();
        let p = fx.file("prog");
        fx.host.write_apf(&p, true).unwrap();
        let writes = fx.host.writes();
        let auth = StaticAuthorizer::deny("not in group APF");

        let err = disable(&fx.host, &auth, &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        let err = enable(&fx.host, &auth, &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        assert_eq!(fx.host.writes(), writes);
        assert!(status(&fx.host, &p).unwrap().enabled);
    }

    #[test]
    fn test_host_refusal_is_permission_denied() {
        let fx = HostFixture::new();
        let p = fx.file("prog");
        fx.host.set_simulate_write_errno(Some(libc::EPERM));

        let err = enable(&fx.host, &StaticAuthorizer::allow(), &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(!status(&fx.host, &p).unwrap().enabled);
    }

    #[test]
    fn test_missing_file() {
        let fx = HostFixture::new();
        let p = fx.dir.path().join("missing");
        let err = enable(&fx.host, &StaticAuthorizer::allow(), &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_nul_in_path_is_invalid() {
        let fx = HostFixture::new();
        let p = Path::new("/a\0b");
        let writes = fx.host.writes();

        for auth in [StaticAuthorizer::allow(), StaticAuthorizer::deny("not in group APF")] {
            assert_eq!(
                enable(&fx.host, &auth, p).unwrap_err().kind(),
                ErrorKind::InvalidArgument
            );
            assert_eq!(
                disable(&fx.host, &auth, p).unwrap_err().kind(),
                ErrorKind::InvalidArgument
            );
        }
        assert_eq!(
            status(&fx.host, p).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(fx.host.writes(), writes);
    }

    #[test]
    fn test_apf_does_not_touch_tag() {
        let fx = HostFixture::new();
        let p = fx.file("prog");
        fx.host
            .write_tag(&p, crate::model::FileTag::new(1047, true))
            .unwrap();
        enable(&fx.host, &StaticAuthorizer::allow(), &p).unwrap();
        assert_eq!(
            fx.host.read_tag(&p).unwrap(),
            crate::model::FileTag::new(1047, true)
        );
    }
}

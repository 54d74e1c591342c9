use crate::ccsid::{self, BINARY, UNTAGGED};
use crate::error::{Result, ZosError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A file tag: the CCSID of the content plus the text flag.
///
/// Values read from the host are taken as they are. Values built by callers go
/// through [`TagOptions::validate`], which rejects the sentinels paired with
/// `text = true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileTag {
    pub ccsid: u16,
    pub text: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagKind {
    Untagged,
    Binary,
    Text,
    Mixed,
}

impl FileTag {
    pub fn new(ccsid: u16, text: bool) -> Self {
        Self { ccsid, text }
    }

    pub fn kind(&self) -> TagKind {
        match (self.ccsid, self.text) {
            (UNTAGGED, _) => TagKind::Untagged,
            (BINARY, _) => TagKind::Binary,
            (_, true) => TagKind::Text,
            (_, false) => TagKind::Mixed,
        }
    }

    pub fn is_untagged(&self) -> bool {
        self.ccsid == UNTAGGED
    }
}

impl fmt::Display for FileTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ccsid::name_of(self.ccsid) {
            Some(name) => write!(f, "{}", name)?,
            None => write!(f, "CCSID {}", self.ccsid)?,
        }
        if ccsid::is_text_encoding(self.ccsid) {
            write!(f, " T={}", if self.text { "on" } else { "off" })?;
        }
        Ok(())
    }
}

impl From<FileTag> for (u16, bool) {
    fn from(tag: FileTag) -> Self {
        (tag.ccsid, tag.text)
    }
}

/// The APF-authorized extended attribute of a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApfAttribute {
    pub enabled: bool,
}

/// Parameters for a full tag write.
///
/// The text flag defaults to `true`. The CCSID is optional until the options
/// are resolved: [`TagOptions::resolve`] fills a missing one from the caller's
/// default, [`TagOptions::validate`] from ISO8859-1. The CCSID is held as `i64`
/// so that values outside `0..=65535` reach validation instead of being
/// truncated.
///
/// ```
/// use zos_util::model::{FileTag, TagOptions};
///
/// let tag = TagOptions::new().ccsid(1047).validate().unwrap();
/// assert_eq!(tag, FileTag::new(1047, true));
///
/// assert_eq!(TagOptions::new().resolve(1208).unwrap(), FileTag::new(1208, true));
/// assert!(TagOptions::new().ccsid(70000).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOptions {
    ccsid: Option<i64>,
    text: bool,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            ccsid: None,
            text: true,
        }
    }
}

impl TagOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ccsid(mut self, ccsid: impl Into<i64>) -> Self {
        self.ccsid = Some(ccsid.into());
        self
    }

    pub fn text(mut self, text: bool) -> Self {
        self.text = text;
        self
    }

    /// The CCSID given by the caller, if any.
    pub fn requested_ccsid(&self) -> Option<i64> {
        self.ccsid
    }

    /// Check the requested pair, using ISO8859-1 when no CCSID was given.
    pub fn validate(&self) -> Result<FileTag> {
        self.resolve(ccsid::DEFAULT_TEXT)
    }

    /// Check the requested pair and turn it into a [`FileTag`], using
    /// `default_ccsid` when no CCSID was given.
    pub fn resolve(&self, default_ccsid: u16) -> Result<FileTag> {
        let requested = self.ccsid.unwrap_or(i64::from(default_ccsid));
        let ccsid = u16::try_from(requested).map_err(|_| {
            ZosError::invalid(format!(
                "CCSID {} is outside the range 0-65535",
                requested
            ))
        })?;

        if self.text && !ccsid::is_text_encoding(ccsid) {
            return Err(ZosError::invalid(format!(
                "CCSID {} ({}) cannot carry the text flag",
                ccsid,
                ccsid::name_of(ccsid).unwrap_or("reserved")
            )));
        }

        Ok(FileTag { ccsid, text: self.text })
    }
}

impl From<FileTag> for TagOptions {
    fn from(tag: FileTag) -> Self {
        Self {
            ccsid: Some(i64::from(tag.ccsid)),
            text: tag.text,
        }
    }
}

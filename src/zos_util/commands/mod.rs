use crate::error::{Result, ZosError};
use crate::model::{ApfAttribute, FileTag};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

pub mod apf;
pub mod tag;

/// Reject paths that cannot be passed to the system as C strings. Runs before
/// any host call so every host reports the same error.
pub(crate) fn check_path(path: &Path) -> Result<()> {
    if path.as_os_str().as_bytes().contains(&0) {
        return Err(ZosError::invalid(format!(
            "path {:?} contains a NUL byte",
            path
        )));
    }
    Ok(())
}

/// What a dynamically invoked operation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unit,
    Tag(FileTag),
    Apf(ApfAttribute),
}

impl Outcome {
    pub fn tag(&self) -> Option<FileTag> {
        match self {
            Outcome::Tag(tag) => Some(*tag),
            _ => None,
        }
    }

    pub fn apf(&self) -> Option<ApfAttribute> {
        match self {
            Outcome::Apf(attr) => Some(*attr),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_check_path() {
        assert!(check_path(Path::new("/u/user/f")).is_ok());
        assert!(check_path(Path::new("relative")).is_ok());
        assert!(check_path(Path::new("")).is_ok());

        for bad in ["/a\0b", "\0", "/u/f\0"] {
            let err = check_path(Path::new(bad)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{:?}", bad);
        }
    }
}

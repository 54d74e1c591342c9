use super::HostAttributes;
use crate::model::FileTag;
use std::io;
use std::path::Path;

/// Host for platforms without file tags or APF attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedHost;

impl UnsupportedHost {
    pub fn new() -> Self {
        Self
    }

    fn unsupported(what: &str) -> io::Error {
        io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{} requires z/OS UNIX System Services", what),
        )
    }
}

impl HostAttributes for UnsupportedHost {
    fn read_tag(&self, _path: &Path) -> io::Result<FileTag> {
        Err(Self::unsupported("reading file tags"))
    }

    fn write_tag(&self, _path: &Path, _tag: FileTag) -> io::Result<()> {
        Err(Self::unsupported("changing file tags"))
    }

    fn read_apf(&self, _path: &Path) -> io::Result<bool> {
        Err(Self::unsupported("reading the APF attribute"))
    }

    fn write_apf(&self, _path: &Path, _enabled: bool) -> io::Result<()> {
        Err(Self::unsupported("changing the APF attribute"))
    }
}

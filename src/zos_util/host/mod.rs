//! # Host Layer
//!
//! The services never touch the file system themselves. Everything they need
//! from the host is behind the [`HostAttributes`] trait: one read and one write
//! for the file tag, one read and one write for the APF attribute.
//!
//! ## Implementations
//!
//! - [`zos::ZosHost`]: the real thing, built only for `target_os = "zos"`.
//!   Reads go through `stat()`, writes through `__chattr()` with just the
//!   relevant change mask set, so a tag write never touches the APF bit and
//!   vice versa.
//! - [`unsupported::UnsupportedHost`]: every other platform. All calls fail
//!   with [`std::io::ErrorKind::Unsupported`].
//! - [`memory::MemHost`]: per-path records in memory, for tests and for
//!   embedders that want to dry-run tagging decisions.
//!
//! [`SystemHost`] names whichever of the first two applies to the build target.
//! The byte layouts `ZosHost` exchanges with the system live in `layout`,
//! which builds everywhere.
//!
//! ## Error contract
//!
//! Hosts report raw `io::Error`s, ideally carrying the errno. Translation into
//! the public taxonomy happens once, in [`crate::error::ZosError::from_host`].

use crate::model::FileTag;
use std::io;
use std::path::Path;

pub(crate) mod layout;
pub mod memory;
#[cfg(not(target_os = "zos"))]
pub mod unsupported;
#[cfg(target_os = "zos")]
pub mod zos;

#[cfg(target_os = "zos")]
pub type SystemHost = zos::ZosHost;
#[cfg(not(target_os = "zos"))]
pub type SystemHost = unsupported::UnsupportedHost;

/// Raw access to the per-file metadata kept by the host.
///
/// Each method is exactly one host request. Implementations must apply a
/// write completely or not at all.
pub trait HostAttributes {
    /// Read the current tag of `path`.
    fn read_tag(&self, path: &Path) -> io::Result<FileTag>;

    /// Replace both fields of the tag of `path` in one request.
    fn write_tag(&self, path: &Path, tag: FileTag) -> io::Result<()>;

    /// Read the APF-authorized bit of `path`.
    fn read_apf(&self, path: &Path) -> io::Result<bool>;

    /// Set or clear the APF-authorized bit of `path`.
    fn write_apf(&self, path: &Path, enabled: bool) -> io::Result<()>;
}

impl<H: HostAttributes + ?Sized> HostAttributes for &H {
    fn read_tag(&self, path: &Path) -> io::Result<FileTag> {
        (**self).read_tag(path)
    }

    fn write_tag(&self, path: &Path, tag: FileTag) -> io::Result<()> {
        (**self).write_tag(path, tag)
    }

    fn read_apf(&self, path: &Path) -> io::Result<bool> {
        (**self).read_apf(path)
    }

    fn write_apf(&self, path: &Path, enabled: bool) -> io::Result<()> {
        (**self).write_apf(path, enabled)
    }
}

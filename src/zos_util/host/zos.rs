//! z/OS UNIX host: `stat()` for reads, `__chattr()` for writes.
//!
//! Struct layouts and request builders live in [`super::layout`].

use super::layout::{RawAttrib, RawStat};
use super::HostAttributes;
use crate::model::FileTag;
use libc::{c_char, c_int, c_void};
use std::ffi::CString;
use std::io;
use std::mem;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

extern "C" {
    fn __chattr(path: *const c_char, attr: *mut c_void, attrlen: c_int) -> c_int;
    fn stat(path: *const c_char, buf: *mut RawStat) -> c_int;
}

fn c_path(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::from_raw_os_error(libc::EINVAL))
}

/// The host for builds targeting z/OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZosHost;

impl ZosHost {
    pub fn new() -> Self {
        Self
    }

    fn stat(&self, path: &Path) -> io::Result<RawStat> {
        let c = c_path(path)?;
        let mut st = RawStat::default();
        let rc = unsafe { stat(c.as_ptr(), &mut st) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(st)
    }

    fn chattr(&self, path: &Path, mut attr: RawAttrib) -> io::Result<()> {
        let c = c_path(path)?;
        let rc = unsafe {
            __chattr(
                c.as_ptr(),
                &mut attr as *mut RawAttrib as *mut c_void,
                mem::size_of::<RawAttrib>() as c_int,
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl HostAttributes for ZosHost {
    fn read_tag(&self, path: &Path) -> io::Result<FileTag> {
        Ok(self.stat(path)?.tag())
    }

    fn write_tag(&self, path: &Path, tag: FileTag) -> io::Result<()> {
        self.chattr(path, RawAttrib::tag_change(tag))
    }

    fn read_apf(&self, path: &Path) -> io::Result<bool> {
        Ok(self.stat(path)?.apf())
    }

    fn write_apf(&self, path: &Path, enabled: bool) -> io::Result<()> {
        self.chattr(path, RawAttrib::apf_change(enabled))
    }
}

//! Byte layouts exchanged with z/OS UNIX.
//!
//! `attrib_t` (input to `__chattr()`) and `struct stat` as declared in
//! `<sys/stat.h>` with `_OPEN_SYS_FILE_EXT`, field by field, following the
//! `BPXYATT` / `BPXYSTAT` mappings the callable services read. Every field is
//! fixed width so the offsets below hold on any build target; the `const`
//! assertions fail the build if a field is added, dropped or resized.
//!
//! z/OS is big-endian and allocates bit-fields from the most significant bit
//! down, so the n-th declared one-bit field is `1 << (31 - n)`.
//!
//! Only `ZosHost` sends these to the system; the request builders and
//! conversions live here so they are tested everywhere.

// Full flag tables are kept; only ZosHost reads the builders.
#![allow(dead_code)]

use crate::model::FileTag;
use std::mem;

/// `struct file_tag`: `ft_ccsid`, then `ft_txtflag:1, ft_deferred:1, ft_rsvflags:14`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RawFileTag {
    pub ft_ccsid: u16,
    pub ft_flags: u16,
}

pub(crate) const FT_TXTFLAG: u16 = 1 << 15;
pub(crate) const FT_DEFERRED: u16 = 1 << 14;

impl From<RawFileTag> for FileTag {
    fn from(raw: RawFileTag) -> Self {
        FileTag {
            ccsid: raw.ft_ccsid,
            text: raw.ft_flags & FT_TXTFLAG != 0,
        }
    }
}

impl From<FileTag> for RawFileTag {
    fn from(tag: FileTag) -> Self {
        RawFileTag {
            ft_ccsid: tag.ccsid,
            ft_flags: if tag.text { FT_TXTFLAG } else { 0 },
        }
    }
}

const fn bit(n: u32) -> u32 {
    1 << (31 - n)
}

// attrib_t change flags, in declaration order.
pub(crate) const ATT_MODECHG: u32 = bit(0);
pub(crate) const ATT_OWNERCHG: u32 = bit(1);
pub(crate) const ATT_SETGEN: u32 = bit(2);
pub(crate) const ATT_TRUNC: u32 = bit(3);
pub(crate) const ATT_ATIMECHG: u32 = bit(4);
pub(crate) const ATT_ATIMETOD: u32 = bit(5);
pub(crate) const ATT_MTIMECHG: u32 = bit(6);
pub(crate) const ATT_MTIMETOD: u32 = bit(7);
pub(crate) const ATT_MAAUDIT: u32 = bit(8);
pub(crate) const ATT_MUAUDIT: u32 = bit(9);
pub(crate) const ATT_CTIMECHG: u32 = bit(10);
pub(crate) const ATT_CTIMETOD: u32 = bit(11);
pub(crate) const ATT_REFTIMECHG: u32 = bit(12);
pub(crate) const ATT_REFTIMETOD: u32 = bit(13);
pub(crate) const ATT_FILEFMTCHG: u32 = bit(14);
pub(crate) const ATT_FILETAGCHG: u32 = bit(15);
pub(crate) const ATT_SECLABELCHG: u32 = bit(16);

// General attribute bits, shared by att_genmask, att_genvalue and
// st_genvalue: att_sharelib, att_noshareas, att_apfauth, att_progctl.
pub(crate) const GEN_SHARELIB: u32 = bit(0);
pub(crate) const GEN_NOSHAREAS: u32 = bit(1);
pub(crate) const GEN_APFAUTH: u32 = bit(2);
pub(crate) const GEN_PROGCTL: u32 = bit(3);

/// `attrib_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RawAttrib {
    pub att_flags: u32,
    pub att_mode: u32,
    pub att_uid: u32,
    pub att_gid: u32,
    pub att_genmask: u32,
    pub att_genvalue: u32,
    pub att_size: i64,
    pub att_atime: i32,
    pub att_mtime: i32,
    pub att_auditoraudit: i32,
    pub att_useraudit: i32,
    pub att_ctime: i32,
    pub att_reftime: i32,
    pub att_filefmt: u8,
    pub att_res01: [u8; 3],
    pub att_filetag: RawFileTag,
    pub att_res02: [u8; 8],
}

const _: () = assert!(mem::size_of::<RawAttrib>() == 72);
const _: () = assert!(mem::offset_of!(RawAttrib, att_genmask) == 16);
const _: () = assert!(mem::offset_of!(RawAttrib, att_size) == 24);
const _: () = assert!(mem::offset_of!(RawAttrib, att_filefmt) == 56);
const _: () = assert!(mem::offset_of!(RawAttrib, att_filetag) == 60);

impl RawAttrib {
    /// A request that changes only the file tag.
    pub fn tag_change(tag: FileTag) -> Self {
        Self {
            att_flags: ATT_FILETAGCHG,
            att_filetag: tag.into(),
            ..Self::default()
        }
    }

    /// A request that changes only the APF-authorized bit.
    pub fn apf_change(enabled: bool) -> Self {
        Self {
            att_flags: ATT_SETGEN,
            att_genmask: GEN_APFAUTH,
            att_genvalue: if enabled { GEN_APFAUTH } else { 0 },
            ..Self::default()
        }
    }
}

/// `struct stat`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawStat {
    pub st_mode: u32,
    pub st_ino: u32,
    pub st_dev: u32,
    pub st_nlink: u32,
    pub st_uid: u32,
    pub st_gid: u32,
    pub st_size: i64,
    pub st_atime: i32,
    pub st_mtime: i32,
    pub st_ctime: i32,
    pub st_rdev: u32,
    pub st_auditoraudit: i32,
    pub st_useraudit: i32,
    pub st_blksize: i32,
    pub st_createtime: i32,
    pub st_auditid: [u32; 4],
    pub st_res01: u32,
    pub st_tag: RawFileTag,
    pub st_blocks: i32,
    pub st_genvalue: u32,
    pub st_reftime: i32,
    pub st_fid: [u8; 8],
    pub st_filefmt: u8,
    pub st_fspflag2: u8,
    pub st_res02: [u8; 2],
    pub st_ctimemsec: i32,
    pub st_seclabel: [u8; 8],
    pub st_res03: [u8; 4],
    pub st_res04: [u8; 64],
}

const _: () = assert!(mem::size_of::<RawStat>() == 192);
const _: () = assert!(mem::offset_of!(RawStat, st_size) == 24);
const _: () = assert!(mem::offset_of!(RawStat, st_auditid) == 64);
const _: () = assert!(mem::offset_of!(RawStat, st_tag) == 84);
const _: () = assert!(mem::offset_of!(RawStat, st_genvalue) == 92);

impl Default for RawStat {
    fn default() -> Self {
        // SAFETY: integers and byte arrays only; all-zero is a valid value.
        unsafe { mem::zeroed() }
    }
}

impl RawStat {
    pub fn tag(&self) -> FileTag {
        self.st_tag.into()
    }

    pub fn apf(&self) -> bool {
        self.st_genvalue & GEN_APFAUTH != 0
    }
}

//! File tag commands.
//!
//! - `get`: read the current tag
//! - `set`: replace the whole tag in one host write; `set_with_default`
//!   does the same with a caller-chosen CCSID for options that name none
//! - `clear`: reset to untagged
//! - `set_text` / `set_mixed`: flip the text flag, keeping a usable CCSID
//! - `set_binary`: tag as binary
//!
//! Every operation checks the path first, and every mutation validates first and then issues exactly one write, so a
//! rejected request never reaches the host and a failed write leaves the
//! previous tag in place.

use super::check_path;
use crate::ccsid;
use crate::error::{Result, ZosError};
use crate::host::HostAttributes;
use crate::model::{FileTag, TagOptions};
use std::path::Path;

pub fn get<H: HostAttributes>(host: &H, path: &Path) -> Result<FileTag> {
    check_path(path)?;
    host.read_tag(path)
        .map_err(|e| ZosError::from_host(path, e))
}

pub fn set<H: HostAttributes>(host: &H, path: &Path, options: TagOptions) -> Result<()> {
    set_with_default(host, path, options, ccsid::DEFAULT_TEXT)
}

pub fn set_with_default<H: HostAttributes>(
    host: &H,
    path: &Path,
    options: TagOptions,
    default_ccsid: u16,
) -> Result<()> {
    check_path(path)?;
    let tag = options.resolve(default_ccsid)?;
    write(host, path, tag)
}

pub fn clear<H: HostAttributes>(host: &H, path: &Path) -> Result<()> {
    check_path(path)?;
    write(host, path, ccsid::untagged())
}

pub fn set_binary<H: HostAttributes>(host: &H, path: &Path) -> Result<()> {
    check_path(path)?;
    write(host, path, ccsid::binary())
}

/// Mark the content as uniformly encoded text.
///
/// The current CCSID is kept when it names an encoding; untagged and binary
/// files fall back to `default_ccsid`.
pub fn set_text<H: HostAttributes>(host: &H, path: &Path, default_ccsid: u16) -> Result<()> {
    let ccsid = current_or_default(host, path, default_ccsid)?;
    set(host, path, TagOptions::new().ccsid(ccsid).text(true))
}

/// Mark the content as mixed text and binary. Same CCSID rule as [`set_text`].
pub fn set_mixed<H: HostAttributes>(host: &H, path: &Path, default_ccsid: u16) -> Result<()> {
    let ccsid = current_or_default(host, path, default_ccsid)?;
    set(host, path, TagOptions::new().ccsid(ccsid).text(false))
}

fn current_or_default<H: HostAttributes>(host: &H, path: &Path, default_ccsid: u16) -> Result<u16> {
    let current = get(host, path)?;
    if ccsid::is_text_encoding(current.ccsid) {
        Ok(current.ccsid)
    } else {
        Ok(default_ccsid)
    }
}

fn write<H: HostAttributes>(host: &H, path: &Path, tag: FileTag) -> Result<()> {
    log::debug!("tagging {} as {}", path.display(), tag);
    host.write_tag(path, tag).map_err(|e| {
        log::warn!("tagging {} failed: {}", path.display(), e);
        ZosError::from_host(path, e)
    })
}

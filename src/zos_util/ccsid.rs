//! Well-known coded character set identifiers.
//!
//! Two values are reserved by the file system rather than naming an encoding:
//!
//! - [`UNTAGGED`] (0): the file has no tag at all
//! - [`BINARY`] (65535): the content is binary and the encoding is irrelevant
//!
//! Every other value in `1..=65534` names a text encoding.

use crate::model::FileTag;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const UNTAGGED: u16 = 0;
pub const US_ASCII: u16 = 367;
pub const IBM_037: u16 = 37;
pub const ISO8859_1: u16 = 819;
pub const IBM_1047: u16 = 1047;
pub const UTF_8: u16 = 1208;
pub const BINARY: u16 = 65535;

/// The encoding used when a caller does not name one.
pub const DEFAULT_TEXT: u16 = ISO8859_1;

/// Names as reported by the USS tooling, in lookup order.
const KNOWN: &[(u16, &str)] = &[
    (UNTAGGED, "untagged"),
    (IBM_037, "IBM-037"),
    (US_ASCII, "US-ASCII"),
    (ISO8859_1, "ISO8859-1"),
    (IBM_1047, "IBM-1047"),
    (UTF_8, "UTF-8"),
    (BINARY, "binary"),
];

static BY_NAME: Lazy<HashMap<String, u16>> = Lazy::new(|| {
    KNOWN
        .iter()
        .map(|(id, name)| (name.to_ascii_lowercase(), *id))
        .collect()
});

/// Display name for a well-known CCSID.
pub fn name_of(ccsid: u16) -> Option<&'static str> {
    KNOWN
        .iter()
        .find(|(id, _)| *id == ccsid)
        .map(|(_, name)| *name)
}

/// Case-insensitive lookup of a well-known encoding name.
pub fn by_name(name: &str) -> Option<u16> {
    BY_NAME.get(&name.trim().to_ascii_lowercase()).copied()
}

/// True for the values that name an actual text encoding.
pub fn is_text_encoding(ccsid: u16) -> bool {
    ccsid != UNTAGGED && ccsid != BINARY
}

/// Pure text in `ccsid`.
pub fn text(ccsid: u16) -> FileTag {
    FileTag {
        ccsid,
        text: is_text_encoding(ccsid),
    }
}

/// Mixed text and binary content in `ccsid`.
pub fn mixed(ccsid: u16) -> FileTag {
    FileTag { ccsid, text: false }
}

pub fn binary() -> FileTag {
    FileTag {
        ccsid: BINARY,
        text: false,
    }
}

pub fn untagged() -> FileTag {
    FileTag::default()
}

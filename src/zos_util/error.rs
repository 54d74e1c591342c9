//! Error taxonomy and the host error mapper.
//!
//! Every host call in this crate returns a plain [`std::io::Error`]. The
//! services never inspect those directly; they hand them to
//! [`ZosError::from_host`], which is the single place where errno values are
//! turned into an [`ErrorKind`] callers can branch on.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The four failure classes exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter was out of range, not allowed, or of the wrong type.
    InvalidArgument,
    /// The target path does not exist.
    NotFound,
    /// The caller may not read or change the metadata.
    PermissionDenied,
    /// Anything else the host reported.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::NotFound => "not found",
            ErrorKind::PermissionDenied => "permission denied",
            ErrorKind::Io => "I/O error",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ZosError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No such file or directory: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied: {}: {reason}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ZosError {
    /// Translate a host failure on `path` into the public taxonomy.
    ///
    /// `ENOENT` and `ENOTDIR` become [`ErrorKind::NotFound`], `EPERM` and
    /// `EACCES` become [`ErrorKind::PermissionDenied`], everything else is
    /// [`ErrorKind::Io`]. The original error is kept as the source.
    pub fn from_host(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match (err.raw_os_error(), err.kind()) {
            (Some(libc::ENOENT | libc::ENOTDIR), _) | (None, io::ErrorKind::NotFound) => {
                ZosError::NotFound { path, source: err }
            }
            (Some(libc::EPERM | libc::EACCES), _) | (None, io::ErrorKind::PermissionDenied) => {
                ZosError::PermissionDenied {
                    path,
                    reason: err.to_string(),
                    source: Some(err),
                }
            }
            _ => ZosError::Io { path, source: err },
        }
    }

    /// A refusal decided before any host request was made.
    pub fn denied(path: &Path, reason: impl Into<String>) -> Self {
        ZosError::PermissionDenied {
            path: path.to_path_buf(),
            reason: reason.into(),
            source: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ZosError::InvalidArgument(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ZosError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ZosError::NotFound { .. } => ErrorKind::NotFound,
            ZosError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            ZosError::Io { .. } | ZosError::Config(_) | ZosError::Serialization(_) => {
                ErrorKind::Io
            }
        }
    }

    /// The path the failure refers to, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ZosError::NotFound { path, .. }
            | ZosError::PermissionDenied { path, .. }
            | ZosError::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZosError>;

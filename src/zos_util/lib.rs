//! # zos-util Architecture
//!
//! zos-util reads and changes two pieces of per-file metadata kept by z/OS
//! UNIX: the **file tag** (CCSID plus text flag) and the **APF-authorized**
//! extended attribute. It does in-process what `chtag` and `extattr` do from
//! the shell.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - ZosUtil facade, typed methods and dynamic `invoke`       │
//! │  - Applies configuration (default CCSID, APF group)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, presets, authorization check                 │
//! │  - One host request per mutation                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host Layer (host/)                                         │
//! │  - HostAttributes trait                                     │
//! │  - ZosHost (z/OS), UnsupportedHost, MemHost (testing)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tags
//!
//! A tag is `(ccsid, text)`. CCSID 0 means untagged and 65535 means binary;
//! neither may carry the text flag. Any other CCSID names an encoding, with
//! `text = false` meaning mixed text and binary content.
//!
//! ```
//! use zos_util::{FileTag, MemHost, StaticAuthorizer, TagOptions, UtilConfig, ZosUtil};
//!
//! let host = MemHost::new();
//! host.touch("/u/ibmuser/hello.c");
//! let api = ZosUtil::new(host, StaticAuthorizer::allow(), UtilConfig::default());
//!
//! api.set_tag("/u/ibmuser/hello.c", TagOptions::new().ccsid(1047)).unwrap();
//! assert_eq!(api.get_tag("/u/ibmuser/hello.c").unwrap(), FileTag::new(1047, true));
//!
//! api.clear_tag("/u/ibmuser/hello.c").unwrap();
//! assert!(api.get_tag("/u/ibmuser/hello.c").unwrap().is_untagged());
//! ```
//!
//! ## Errors
//!
//! All operations return [`Result`]; [`ZosError::kind`] gives one of four
//! [`ErrorKind`]s so callers can branch. Nothing is retried.
//!
//! ## Concurrency
//!
//! Calls are synchronous and take no locks. Concurrent writes to the same path
//! are last-writer-wins; calls on different paths are independent.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade
//! - [`commands`]: Tag and APF operations
//! - [`host`]: Host metadata access
//! - [`auth`]: APF authorization decisions
//! - [`ccsid`]: Well-known CCSIDs and presets
//! - [`model`]: `FileTag`, `ApfAttribute`, `TagOptions`
//! - [`config`]: Configuration
//! - [`error`]: Error types

pub mod api;
pub mod auth;
pub mod ccsid;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod model;

pub use api::{Operation, Param, ZosUtil};
pub use auth::{Authorization, Authorizer, GroupAuthorizer, StaticAuthorizer};
pub use commands::Outcome;
pub use config::UtilConfig;
pub use error::{ErrorKind, Result, ZosError};
pub use host::memory::MemHost;
pub use host::{HostAttributes, SystemHost};
pub use model::{ApfAttribute, FileTag, TagKind, TagOptions};

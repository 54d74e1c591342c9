//! Authorization for APF attribute changes.
//!
//! Only superusers and members of a designated group (by default `APF`) may
//! flip the APF-authorized bit. The services do not look that up themselves;
//! they ask an [`Authorizer`] and act on its yes/no answer. The host still has
//! the final word: a granted caller can be refused by the security product, and
//! that refusal surfaces as a normal permission error.

use std::ffi::CString;
use std::io;

/// The answer an [`Authorizer`] gives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied(String),
}

impl Authorization {
    pub fn is_granted(&self) -> bool {
        matches!(self, Authorization::Granted)
    }
}

pub trait Authorizer {
    /// Decide whether the calling process may change the APF attribute.
    fn authorize_apf(&self) -> Authorization;
}

impl<A: Authorizer + ?Sized> Authorizer for &A {
    fn authorize_apf(&self) -> Authorization {
        (**self).authorize_apf()
    }
}

/// A fixed answer, for tests and for callers that already checked.
#[derive(Debug, Clone)]
pub struct StaticAuthorizer(Authorization);

impl StaticAuthorizer {
    pub fn allow() -> Self {
        Self(Authorization::Granted)
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self(Authorization::Denied(reason.into()))
    }
}

impl Authorizer for StaticAuthorizer {
    fn authorize_apf(&self) -> Authorization {
        self.0.clone()
    }
}

/// Effective identity of the calling process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub euid: u32,
    pub egid: u32,
    pub groups: Vec<u32>,
}

impl Identity {
    pub fn current() -> io::Result<Self> {
        // SAFETY: these calls have no preconditions.
        let euid = unsafe { libc::geteuid() } as u32;
        let egid = unsafe { libc::getegid() } as u32;

        let count = unsafe { libc::getgroups(0, std::ptr::null_mut()) };
        if count < 0 {
            return Err(io::Error::last_os_error());
        }
        let mut groups: Vec<libc::gid_t> = vec![0; count as usize];
        let count = unsafe { libc::getgroups(count, groups.as_mut_ptr()) };
        if count < 0 {
            return Err(io::Error::last_os_error());
        }
        groups.truncate(count as usize);

        Ok(Self {
            euid,
            egid,
            groups: groups.into_iter().map(|g| g as u32).collect(),
        })
    }

    pub fn is_superuser(&self) -> bool {
        self.euid == 0
    }

    pub fn in_group(&self, gid: u32) -> bool {
        self.egid == gid || self.groups.contains(&gid)
    }
}

/// Resolve a group name to its gid. `Ok(None)` when the group does not exist.
pub fn lookup_group(name: &str) -> io::Result<Option<u32>> {
    let c_name = CString::new(name)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "group name contains NUL"))?;

    let mut buf_len = 1024usize;
    loop {
        let mut grp: libc::group = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::group = std::ptr::null_mut();
        let mut buf: Vec<libc::c_char> = vec![0; buf_len];

        let rc = unsafe {
            libc::getgrnam_r(
                c_name.as_ptr(),
                &mut grp,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };

        if rc == libc::ERANGE && buf_len < 1 << 20 {
            buf_len *= 2;
            continue;
        }
        // Some NSS backends report a missing entry as an error.
        if matches!(rc, libc::ENOENT | libc::ESRCH) {
            return Ok(None);
        }
        if rc != 0 {
            return Err(io::Error::from_raw_os_error(rc));
        }
        if result.is_null() {
            return Ok(None);
        }
        return Ok(Some(grp.gr_gid as u32));
    }
}

/// Grants superusers and members of a named group.
#[derive(Debug, Clone)]
pub struct GroupAuthorizer {
    group: String,
}

impl GroupAuthorizer {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// The decision itself, given an identity and the group's gid.
    pub fn decide(&self, identity: &Identity, gid: Option<u32>) -> Authorization {
        if identity.is_superuser() {
            return Authorization::Granted;
        }
        match gid {
            Some(gid) if identity.in_group(gid) => Authorization::Granted,
            Some(_) => Authorization::Denied(format!(
                "uid {} is not a member of group {}",
                identity.euid, self.group
            )),
            None => Authorization::Denied(format!("group {} does not exist", self.group)),
        }
    }
}

impl Default for GroupAuthorizer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_APF_GROUP)
    }
}

impl Authorizer for GroupAuthorizer {
    fn authorize_apf(&self) -> Authorization {
        let identity = match Identity::current() {
            Ok(id) => id,
            Err(e) => return Authorization::Denied(format!("cannot determine caller: {}", e)),
        };
        if identity.is_superuser() {
            return Authorization::Granted;
        }
        match lookup_group(&self.group) {
            Ok(gid) => self.decide(&identity, gid),
            Err(e) => Authorization::Denied(format!("cannot look up group {}: {}", self.group, e)),
        }
    }
}

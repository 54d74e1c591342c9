use super::HostAttributes;
use crate::model::FileTag;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, Default)]
struct Record {
    tag: FileTag,
    apf: bool,
}

/// In-memory host.
///
/// A path "exists" if it was registered with [`MemHost::touch`] or exists on
/// the real file system; its metadata always lives here. State sits behind
/// mutexes so the host is `Sync` and can be shared across threads.
#[derive(Debug, Default)]
pub struct MemHost {
    records: Mutex<HashMap<PathBuf, Record>>,
    virtual_files: Mutex<HashSet<PathBuf>>,
    simulate_errno: Mutex<Option<i32>>,
    simulate_write_errno: Mutex<Option<i32>>,
    writes: AtomicUsize,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking test thread must not poison the host for the others.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file that exists only in this host.
    pub fn touch(&self, path: impl AsRef<Path>) {
        lock(&self.virtual_files).insert(path.as_ref().to_path_buf());
    }

    /// Forget a file and its metadata.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        lock(&self.virtual_files).remove(path);
        lock(&self.records).remove(path);
    }

    /// Fail every following call with `errno` until reset with `None`.
    pub fn set_simulate_errno(&self, errno: Option<i32>) {
        *lock(&self.simulate_errno) = errno;
    }

    /// Fail only writes with `errno` until reset with `None`.
    pub fn set_simulate_write_errno(&self, errno: Option<i32>) {
        *lock(&self.simulate_write_errno) = errno;
    }

    /// Number of writes that reached the metadata.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn exists(&self, path: &Path) -> bool {
        lock(&self.virtual_files).contains(path) || path.exists()
    }

    fn check_read(&self, path: &Path) -> io::Result<()> {
        if let Some(errno) = *lock(&self.simulate_errno) {
            return Err(io::Error::from_raw_os_error(errno));
        }
        if !self.exists(path) {
            return Err(io::Error::from_raw_os_error(libc::ENOENT));
        }
        Ok(())
    }

    fn check_write(&self, path: &Path) -> io::Result<()> {
        self.check_read(path)?;
        if let Some(errno) = *lock(&self.simulate_write_errno) {
            return Err(io::Error::from_raw_os_error(errno));
        }
        Ok(())
    }

    fn record(&self, path: &Path) -> Record {
        lock(&self.records).get(path).copied().unwrap_or_default()
    }

    fn update(&self, path: &Path, f: impl FnOnce(&mut Record)) {
        let mut records = lock(&self.records);
        f(records.entry(path.to_path_buf()).or_default());
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl HostAttributes for MemHost {
    fn read_tag(&self, path: &Path) -> io::Result<FileTag> {
        self.check_read(path)?;
        Ok(self.record(path).tag)
    }

    fn write_tag(&self, path: &Path, tag: FileTag) -> io::Result<()> {
        self.check_write(path)?;
        self.update(path, |r| r.tag = tag);
        Ok(())
    }

    fn read_apf(&self, path: &Path) -> io::Result<bool> {
        self.check_read(path)?;
        Ok(self.record(path).apf)
    }

    fn write_apf(&self, path: &Path, enabled: bool) -> io::Result<()> {
        self.check_write(path)?;
        self.update(path, |r| r.apf = enabled);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// A `MemHost` backed by a real temporary directory.
    pub struct HostFixture {
        pub host: MemHost,
        pub dir: tempfile::TempDir,
    }

    impl Default for HostFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HostFixture {
        pub fn new() -> Self {
            Self {
                host: MemHost::new(),
                dir: tempfile::tempdir().expect("failed to create temp dir"),
            }
        }

        /// Create an empty real file and return its path.
        pub fn file(&self, name: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, b"").expect("failed to create fixture file");
            path
        }

        pub fn with_tag(self, name: &str, tag: FileTag) -> Self {
            let path = self.file(name);
            self.host.write_tag(&path, tag).expect("fixture tag write");
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::HostFixture;
    use super::*;

    #[test]
    fn test_fresh_file_is_untagged_and_not_apf() {
        let fx = HostFixture::new();
        let p = fx.file("fresh");
        assert_eq!(fx.host.read_tag(&p).unwrap(), FileTag::default());
        assert!(!fx.host.read_apf(&p).unwrap());
    }

    #[test]
    fn test_missing_file_is_enoent() {
        let fx = HostFixture::new();
        let err = fx.host.read_tag(&fx.dir.path().join("nope")).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOENT));
    }

    #[test]
    fn test_virtual_files() {
        let host = MemHost::new();
        let p = Path::new("/virtual/prog");
        assert!(host.read_tag(p).is_err());

        host.touch(p);
        host.write_tag(p, FileTag::new(1047, true)).unwrap();
        assert_eq!(host.read_tag(p).unwrap(), FileTag::new(1047, true));

        host.remove(p);
        assert!(host.read_tag(p).is_err());
    }

    #[test]
    fn test_tag_and_apf_are_independent() {
        let fx = HostFixture::new().with_tag("f", FileTag::new(819, true));
        let p = fx.dir.path().join("f");
        fx.host.write_apf(&p, true).unwrap();
        assert_eq!(fx.host.read_tag(&p).unwrap(), FileTag::new(819, true));
        fx.host.write_tag(&p, FileTag::default()).unwrap();
        assert!(fx.host.read_apf(&p).unwrap());
    }

    #[test]
    fn test_simulated_write_errno_leaves_record_untouched() {
        let fx = HostFixture::new().with_tag("f", FileTag::new(1047, true));
        let p = fx.dir.path().join("f");
        let before = fx.host.writes();

        fx.host.set_simulate_write_errno(Some(libc::EBUSY));
        let err = fx.host.write_tag(&p, FileTag::new(819, false)).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EBUSY));
        assert_eq!(fx.host.read_tag(&p).unwrap(), FileTag::new(1047, true));
        assert_eq!(fx.host.writes(), before);

        fx.host.set_simulate_write_errno(None);
        fx.host.write_tag(&p, FileTag::new(819, false)).unwrap();
        assert_eq!(fx.host.writes(), before + 1);
    }

    #[test]
    fn test_simulated_errno_fails_reads_too() {
        let fx = HostFixture::new();
        let p = fx.file("f");
        fx.host.set_simulate_errno(Some(libc::EACCES));
        assert_eq!(
            fx.host.read_tag(&p).unwrap_err().raw_os_error(),
            Some(libc::EACCES)
        );
    }
}

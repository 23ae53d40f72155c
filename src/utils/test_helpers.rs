#[cfg(unix)]
use std::path::{Path, PathBuf};
use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/// Installs a test-writer tracing subscriber filtered by `RUST_LOG`, once per test binary.
pub fn setup_test_logging() {
    LOGGING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Returns true when the current process runs as root (UID 0), which can
/// enumerate directories regardless of their mode bits.
#[inline]
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: libc call has no side effects; used for testing only.
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Removes all permissions from a directory until dropped, so the temp dir
/// can still be cleaned up when an assertion fails.
#[cfg(unix)]
pub struct LockedDir {
    path: PathBuf,
}

#[cfg(unix)]
impl LockedDir {
    pub fn new(path: &Path) -> std::io::Result<Self> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o000))?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(unix)]
impl Drop for LockedDir {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o755));
    }
}

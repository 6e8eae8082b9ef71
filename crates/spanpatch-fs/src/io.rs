//! Text reads and atomic writes with file locking

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Tuning for [`write_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying the advisory lock before giving up.
    pub lock_timeout: Duration,
    /// Flush the staging file to disk before the rename.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// Read a file fully as UTF-8 text.
///
/// The handle is dropped before this returns, so a following write never
/// overlaps with an open read handle.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let bytes = fs::read(&native_path).map_err(|e| Error::io(&native_path, e))?;
    tracing::debug!(path = %path, bytes = bytes.len(), "read file");

    String::from_utf8(bytes).map_err(|e| Error::Decoding {
        path: native_path,
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

/// Write content atomically to a file with locking.
///
/// The content goes to `.<name>.<pid>.tmp` next to the target and is renamed
/// over it, so readers see either the old file or the new one. An advisory
/// lock on `.<name>.spanpatch.lock` serializes concurrent writers; acquisition
/// retries with exponential backoff until `config.lock_timeout` runs out. The
/// lock file is removed afterwards only if this call created it.
///
/// A symlinked target is written through: the file it points to is replaced
/// and the link stays a link.
///
/// An existing target must be writable by the caller. Its permissions are
/// carried over to the replacement file.
pub fn write_atomic(
    path: &NormalizedPath,
    content: &[u8],
    config: RobustnessConfig,
) -> Result<()> {
    let path = &resolve_symlink(path)?;
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let existing_permissions = match fs::metadata(&native_path) {
        Ok(meta) => {
            // Same check the target would get if it were opened for writing in place.
            OpenOptions::new()
                .write(true)
                .open(&native_path)
                .map_err(|e| Error::io(&native_path, e))?;
            Some(meta.permissions())
        }
        Err(_) => None,
    };

    let lock_path = path.lock_sibling().to_native();
    let (lock_file, created_lock) = open_lock_file(&lock_path)?;
    if let Err(e) = acquire_lock(&lock_file, config.lock_timeout) {
        tracing::debug!(path = %path, error = %e, "lock not acquired");
        release_lock(lock_file, &lock_path, created_lock);
        return Err(Error::LockFailed { path: native_path });
    }

    let temp_path = path.temp_sibling(std::process::id()).to_native();
    let result = stage_and_rename(&temp_path, &native_path, content, config, existing_permissions);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    release_lock(lock_file, &lock_path, created_lock);

    if result.is_ok() {
        tracing::debug!(path = %path, bytes = content.len(), "wrote file atomically");
    }
    result
}

fn resolve_symlink(path: &NormalizedPath) -> Result<NormalizedPath> {
    let native_path = path.to_native();
    match fs::symlink_metadata(&native_path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let real = dunce::canonicalize(&native_path).map_err(|e| Error::io(&native_path, e))?;
            tracing::debug!(link = %path, resolved = %real.display(), "writing through symlink");
            Ok(NormalizedPath::new(real))
        }
        _ => Ok(path.clone()),
    }
}

/// Returns the lock file and whether this call created it.
fn open_lock_file(lock_path: &Path) -> Result<(File, bool)> {
    match OpenOptions::new().write(true).create_new(true).open(lock_path) {
        Ok(file) => Ok((file, true)),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => OpenOptions::new()
            .write(true)
            .open(lock_path)
            .map(|file| (file, false))
            .map_err(|e| Error::io(lock_path, e)),
        Err(e) => Err(Error::io(lock_path, e)),
    }
}

fn release_lock(lock_file: File, lock_path: &Path, created: bool) {
    let _ = FileExt::unlock(&lock_file);
    drop(lock_file);
    if created {
        let _ = fs::remove_file(lock_path);
    }
}

fn stage_and_rename(
    temp_path: &Path,
    native_path: &Path,
    content: &[u8],
    config: RobustnessConfig,
    permissions: Option<fs::Permissions>,
) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if config.enable_fsync {
        temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    }
    drop(temp_file);

    if let Some(permissions) = permissions {
        fs::set_permissions(temp_path, permissions).map_err(|e| Error::io(temp_path, e))?;
    }

    fs::rename(temp_path, native_path).map_err(|e| Error::io(native_path, e))
}

fn acquire_lock(file: &File, timeout: Duration) -> std::result::Result<(), std::io::Error> {
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(10))
        .with_max_interval(Duration::from_millis(250))
        .with_max_elapsed_time(Some(timeout))
        .build();

    backoff::retry(policy, || {
        file.try_lock_exclusive().map_err(backoff::Error::transient)
    })
    .map_err(|e| match e {
        backoff::Error::Permanent(err) => err,
        backoff::Error::Transient { err, .. } => err,
    })
}

//! Local filesystem adapter using std::fs.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, trace};
use uuid::Uuid;
use walkdir::WalkDir;

use larascaff_core::{
    application::{
        ApplicationError,
        ports::{FileLock, Filesystem},
    },
    error::{LarascaffError, LarascaffResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }

    /// Lock file guarding `path`.
    ///
    /// Lives in the system temp directory and is keyed on the canonical
    /// path, so every process agrees on it without touching the project.
    pub fn lock_path_for(path: &Path) -> PathBuf {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let key = Uuid::new_v5(&Uuid::NAMESPACE_URL, canonical.as_os_str().as_encoded_bytes());
        std::env::temp_dir().join(format!("larascaff-{}.lock", key.simple()))
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds an advisory lock until dropped.
struct LockedFile {
    file: File,
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> LarascaffResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> LarascaffResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| map_io_error(dir, e, "create directory"))?;

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| map_io_error(path, e, "create temp file"))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| map_io_error(path, e, "sync file"))?;

        // NamedTempFile is created 0600
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }

        tmp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        trace!(path = %path.display(), "wrote file");
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> LarascaffResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, dir: &Path) -> LarascaffResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                map_io_error(&path, io::Error::other(e), "list directory")
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn rename(&self, from: &Path, to: &Path) -> LarascaffResult<()> {
        if to.exists() {
            return Err(ApplicationError::AlreadyExists {
                path: to.to_path_buf(),
            }
            .into());
        }
        std::fs::rename(from, to).map_err(|e| map_io_error(to, e, "rename"))
    }

    fn remove_file(&self, path: &Path) -> LarascaffResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir_all(&self, path: &Path) -> LarascaffResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn lock_exclusive(&self, path: &Path) -> LarascaffResult<FileLock> {
        let lock_path = Self::lock_path_for(path);
        let lock_error = |e: io::Error| ApplicationError::LockFailed {
            path: path.to_path_buf(),
            reason: format!("{} ({})", e, lock_path.display()),
        };

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(lock_error)?;

        file.lock_exclusive().map_err(lock_error)?;
        debug!(path = %path.display(), lock = %lock_path.display(), "lock acquired");

        Ok(FileLock::new(LockedFile { file }))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> LarascaffError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

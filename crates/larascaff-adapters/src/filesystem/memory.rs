//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use larascaff_core::{
    application::{
        ApplicationError,
        ports::{FileLock, Filesystem},
    },
    error::LarascaffResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle while the service under
/// test owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    fail_on_write: Option<String>,
}

impl MemoryFilesystemInner {
    fn add_dir_all(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.directories.insert(ancestor.to_path_buf());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dir_all(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
    }

    /// Seed a directory.
    pub fn insert_dir(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.add_dir_all(path.as_ref());
        }
    }

    /// Make every later write to a path ending in `suffix` fail.
    pub fn fail_on_write(&self, suffix: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.fail_on_write = Some(suffix.into());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All directories, sorted.
    pub fn directories(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
            inner.fail_on_write = None;
        }
    }

    fn read(&self) -> LarascaffResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StateLockError.into())
    }

    fn write(&self) -> LarascaffResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StateLockError.into())
    }
}

fn not_found(path: &Path) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> LarascaffResult<()> {
        self.write()?.add_dir_all(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> LarascaffResult<()> {
        let mut inner = self.write()?;

        if let Some(suffix) = &inner.fail_on_write {
            if path.to_string_lossy().ends_with(suffix.as_str()) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Injected write failure".into(),
                }
                .into());
            }
        }

        if let Some(parent) = path.parent() {
            inner.add_dir_all(parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> LarascaffResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path).into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn list_files(&self, dir: &Path) -> LarascaffResult<Vec<PathBuf>> {
        Ok(self
            .read()?
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> LarascaffResult<()> {
        let mut inner = self.write()?;

        if inner.files.contains_key(to) || inner.directories.contains(to) {
            return Err(ApplicationError::AlreadyExists {
                path: to.to_path_buf(),
            }
            .into());
        }
        if !inner.files.contains_key(from) && !inner.directories.contains(from) {
            return Err(not_found(from).into());
        }

        let moved = |path: &Path| -> Option<PathBuf> {
            path.strip_prefix(from).ok().map(|rest| to.join(rest))
        };

        let files = std::mem::take(&mut inner.files);
        inner.files = files
            .into_iter()
            .map(|(path, content)| (moved(&path).unwrap_or(path), content))
            .collect();

        let directories = std::mem::take(&mut inner.directories);
        inner.directories = directories
            .into_iter()
            .map(|path| moved(&path).unwrap_or(path))
            .collect();

        if let Some(parent) = to.parent() {
            inner.add_dir_all(parent);
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> LarascaffResult<()> {
        self.write()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path).into())
    }

    fn remove_dir_all(&self, path: &Path) -> LarascaffResult<()> {
        let mut inner = self.write()?;

        if !inner.directories.contains(path) {
            return Err(not_found(path).into());
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn lock_exclusive(&self, _path: &Path) -> LarascaffResult<FileLock> {
        Ok(FileLock::new(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_moves_whole_subtree() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/p/.w.staging/src/A.php", "a");
        fs.insert_file("/p/.w.staging/README.md", "r");

        fs.rename(Path::new("/p/.w.staging"), Path::new("/p/w")).unwrap();

        assert_eq!(
            fs.files(),
            vec![PathBuf::from("/p/w/README.md"), PathBuf::from("/p/w/src/A.php")]
        );
        assert!(!fs.exists(Path::new("/p/.w.staging")));
        assert!(fs.exists(Path::new("/p/w/src")));
    }

    #[test]
    fn injected_failures_only_hit_matching_paths() {
        let fs = MemoryFilesystem::new();
        fs.fail_on_write("composer.json");

        assert!(fs.write_file(Path::new("/p/README.md"), "").is_ok());
        assert!(fs.write_file(Path::new("/p/composer.json"), "{}").is_err());
    }

    #[test]
    fn list_files_is_flat() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/p/src/AServiceProvider.php", "");
        fs.insert_file("/p/src/Facades/A.php", "");

        assert_eq!(
            fs.list_files(Path::new("/p/src")).unwrap(),
            vec![PathBuf::from("/p/src/AServiceProvider.php")]
        );
    }

    #[test]
    fn remove_dir_all_drops_contents() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/p/w/src/A.php", "a");
        fs.insert_file("/p/other.txt", "o");

        fs.remove_dir_all(Path::new("/p/w")).unwrap();

        assert_eq!(fs.files(), vec![PathBuf::from("/p/other.txt")]);
        assert!(fs.remove_dir_all(Path::new("/p/w")).is_err());
    }
}

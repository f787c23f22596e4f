use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Final file tree ready for materialization.
///
/// This is the output of blueprint rendering.
/// It contains no business logic, only data.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&mut self, path: RelativePath, content: String) {
        self.entries
            .push(FsEntry::File(FileToWrite { path, content }));
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries
            .push(FsEntry::Directory(DirectoryToCreate { path }));
    }

    pub fn with_file(mut self, path: RelativePath, content: impl Into<String>) -> Self {
        self.add_file(path, content.into());
        self
    }

    pub fn with_directory(mut self, path: RelativePath) -> Self {
        self.add_directory(path);
        self
    }

    /// Same entries materialised under another root (e.g. a staging
    /// directory).
    pub fn rebased(&self, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: self.entries.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidBlueprint(
                "Project structure is empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    /// Absolute paths of every file, in declaration order.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.files().map(|f| self.root.join(&f.path)).collect()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(path: &str) -> RelativePath {
        RelativePath::try_new(path).unwrap()
    }

    #[test]
    fn builds_correctly() {
        let structure = ProjectStructure::new("/tmp/pkg")
            .with_directory(rel("src"))
            .with_file(rel("src/Widgets.php"), "<?php");

        assert_eq!(structure.entry_count(), 2);
        assert_eq!(structure.files().count(), 1);
        assert_eq!(structure.directories().count(), 1);
        assert_eq!(
            structure.file_paths(),
            vec![PathBuf::from("/tmp/pkg/src/Widgets.php")]
        );
    }

    #[test]
    fn validates_duplicates() {
        let structure = ProjectStructure::new("/tmp/pkg")
            .with_file(rel("README.md"), "")
            .with_file(rel("README.md"), "");

        assert!(matches!(
            structure.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn validates_empty() {
        assert!(ProjectStructure::new("/tmp/pkg").validate().is_err());
    }

    #[test]
    fn rebases_onto_new_root() {
        let structure = ProjectStructure::new("/tmp/pkg").with_file(rel("a.txt"), "a");
        let staged = structure.rebased("/tmp/.pkg.staging");

        assert_eq!(staged.root(), Path::new("/tmp/.pkg.staging"));
        assert_eq!(staged.file_paths(), vec![PathBuf::from("/tmp/.pkg.staging/a.txt")]);
    }
}

//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `larascaff-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{Blueprint, BlueprintKind, ProjectStructure, RenderContext};
use crate::error::LarascaffResult;

/// Scoped exclusive lock. Released when dropped.
///
/// Adapters wrap whatever keeps their lock alive (an open, locked file for
/// the local filesystem) and hand it back inside this guard.
pub struct FileLock {
    _guard: Box<dyn Send>,
}

impl FileLock {
    pub fn new(guard: impl Send + 'static) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl fmt::Debug for FileLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FileLock")
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `larascaff_adapters::filesystem::LocalFilesystem` (production)
/// - `larascaff_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> LarascaffResult<()>;

    /// Write content to a file, creating parent directories.
    ///
    /// Readers never observe a partially written file: content goes to a
    /// temporary sibling which is then renamed over `path`.
    fn write_file(&self, path: &Path, content: &str) -> LarascaffResult<()>;

    fn read_to_string(&self, path: &Path) -> LarascaffResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Regular files directly inside `dir`, sorted by path.
    fn list_files(&self, dir: &Path) -> LarascaffResult<Vec<PathBuf>>;

    /// Move a file or directory. `to` must not exist.
    fn rename(&self, from: &Path, to: &Path) -> LarascaffResult<()>;

    fn remove_file(&self, path: &Path) -> LarascaffResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> LarascaffResult<()>;

    /// Block until this process holds the exclusive lock for `path`.
    fn lock_exclusive(&self, path: &Path) -> LarascaffResult<FileLock>;
}

/// Port for the blueprint catalog.
///
/// Implemented by:
/// - `larascaff_adapters::blueprints::BuiltinBlueprints`
#[cfg_attr(test, mockall::automock)]
pub trait BlueprintSource: Send + Sync {
    /// Assemble the blueprint for `kind`.
    ///
    /// The context supplies the package names that feature-dependent
    /// fragments (service provider wiring, `composer.json`) are built from.
    fn blueprint(&self, kind: &BlueprintKind, context: &RenderContext) -> LarascaffResult<Blueprint>;
}

/// Port for blueprint rendering.
///
/// Implemented by:
/// - `larascaff_adapters::renderer::SimpleRenderer` (variable substitution)
#[cfg_attr(test, mockall::automock)]
pub trait BlueprintRenderer: Send + Sync {
    /// Render a blueprint into a project structure.
    ///
    /// # Arguments
    ///
    /// * `blueprint` - The blueprint to render
    /// * `context` - Variable substitution context
    /// * `output_root` - Root directory for output paths
    fn render(
        &self,
        blueprint: &Blueprint,
        context: &RenderContext,
        output_root: &Path,
    ) -> LarascaffResult<ProjectStructure>;
}

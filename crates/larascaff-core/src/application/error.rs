//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// What a [`ApplicationError::NotFound`] was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    ProjectManifest,
    PackageManifest,
    PackageDirectory,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ProjectManifest => "Project composer.json",
            Self::PackageManifest => "Package composer.json",
            Self::PackageDirectory => "Package directory",
        })
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A required file or directory is missing.
    #[error("{what} not found at {path}")]
    NotFound { what: Missing, path: PathBuf },

    /// The target of a scaffold already exists.
    #[error("{path} already exists")]
    AlreadyExists { path: PathBuf },

    /// A manifest on disk could not be parsed or has the wrong shape.
    #[error("Invalid manifest {path}: {reason}")]
    InvalidManifestFile { path: PathBuf, reason: String },

    /// Blueprint rendering failed.
    #[error("Blueprint rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The exclusive lock guarding a manifest could not be taken.
    #[error("Could not lock {path}: {reason}")]
    LockFailed { path: PathBuf, reason: String },

    /// In-process state lock poisoned (memory adapters).
    #[error("Internal state lock poisoned")]
    StateLockError,

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { what, path } => match what {
                Missing::ProjectManifest => vec![
                    format!("No composer.json at {}", path.display()),
                    "Run the command from your Laravel project root, or pass --project-root".into(),
                    "Use --no-link to skip updating the project manifest".into(),
                ],
                Missing::PackageDirectory => vec![
                    format!("Missing: {}", path.display()),
                    "Create the package first: larascaff package <vendor/name>".into(),
                ],
                Missing::PackageManifest => vec![
                    format!("Missing: {}", path.display()),
                    "The package needs a composer.json before it can be extended".into(),
                ],
            },
            Self::AlreadyExists { path } => vec![
                format!("Refusing to overwrite: {}", path.display()),
                "Remove it first or choose a different package name".into(),
            ],
            Self::InvalidManifestFile { path, .. } => vec![
                format!("Fix the JSON in {}", path.display()),
                "Validate the file with: composer validate".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::LockFailed { .. } => vec![
                "Another larascaff process may be updating the same manifest".into(),
                "Try again in a moment".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Partial output may remain at {}", path.display()),
                "Remove it manually before retrying".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::AlreadyExists { .. } | Self::InvalidManifestFile { .. } => {
                ErrorCategory::Validation
            }
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::LockFailed { .. }
            | Self::StateLockError
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}

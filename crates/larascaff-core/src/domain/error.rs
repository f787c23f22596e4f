// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports and logs can keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Invalid arguments
    // ========================================================================
    #[error("Invalid package identifier '{input}': expected 'vendor/name'")]
    MissingSeparator { input: String },

    #[error("Invalid package identifier '{input}': {segment} must not be empty")]
    EmptySegment { input: String, segment: &'static str },

    #[error("Invalid package identifier '{input}': {segment} '{value}' would escape the packages directory")]
    PathTraversal {
        input: String,
        segment: &'static str,
        value: String,
    },

    #[error("Invalid package identifier '{input}': {reason}")]
    InvalidSegment { input: String, reason: String },

    #[error("Invalid value for {feature}: {reason}")]
    InvalidFeature { feature: &'static str, reason: String },

    // ========================================================================
    // Manifest documents
    // ========================================================================
    #[error("Invalid manifest: {reason}")]
    InvalidManifest { reason: String },

    // ========================================================================
    // Blueprints and rendered structures
    // ========================================================================
    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),

    #[error("Blueprint '{name}' has no content")]
    EmptyBlueprint { name: String },

    #[error("Duplicate path in blueprint: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the target directory: {path}")]
    ParentTraversalNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingSeparator { .. } | Self::EmptySegment { .. } => vec![
                "Package identifiers look like 'vendor/name'".into(),
                "Example: larascaff package acme/widgets".into(),
            ],
            Self::PathTraversal { .. } | Self::InvalidSegment { .. } => vec![
                "Use plain slugs for vendor and name (letters, digits, '-', '_', '.')".into(),
                "Packages are always created under packages/<vendor>/<name>".into(),
            ],
            Self::InvalidFeature { feature, .. } => vec![
                format!("Check the value passed to {feature}"),
                "Resource names look like 'Post' or 'blog-post'".into(),
            ],
            Self::InvalidManifest { reason } => vec![
                format!("composer.json problem: {reason}"),
                "Validate the file with: composer validate".into(),
            ],
            Self::EmptyBlueprint { name } => vec![
                format!("Blueprint '{name}' is corrupted"),
                "Please report this issue".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingSeparator { .. }
            | Self::EmptySegment { .. }
            | Self::PathTraversal { .. }
            | Self::InvalidSegment { .. }
            | Self::InvalidFeature { .. }
            | Self::InvalidManifest { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}

//! Application layer for Larascaff.
//!
//! This layer contains:
//! - **Services**: use case orchestration (ScaffoldService, ManifestService)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    MANIFEST_FILE, ManifestOutcome, ManifestService, ScaffoldPlan, ScaffoldReport,
    ScaffoldRequest, ScaffoldService,
};

pub use ports::{BlueprintRenderer, BlueprintSource, FileLock, Filesystem};

pub use error::{ApplicationError, Missing};

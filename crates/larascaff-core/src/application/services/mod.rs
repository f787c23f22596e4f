//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a package" or "link a package".

pub mod manifest_service;
pub mod scaffold_service;

pub use manifest_service::{MANIFEST_FILE, ManifestOutcome, ManifestService};
pub use scaffold_service::{ScaffoldPlan, ScaffoldReport, ScaffoldRequest, ScaffoldService};

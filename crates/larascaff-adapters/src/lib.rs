//! Infrastructure adapters for Larascaff.
//!
//! This crate implements the ports defined in `larascaff-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod blueprints;
pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use blueprints::BuiltinBlueprints;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;

//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `larascaff-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: atomic writes, reads, directory listing, exclusive locks
//!   - `BlueprintSource`: built-in blueprint catalog
//!   - `BlueprintRenderer`: placeholder rendering into a `ProjectStructure`
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{BlueprintRenderer, BlueprintSource, FileLock, Filesystem};

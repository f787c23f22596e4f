pub mod blueprint;
pub mod common;
pub mod manifest;
pub mod package;
pub mod project_structure;

pub use crate::domain::DomainError;
pub use blueprint::{Blueprint, RenderContext};
pub use manifest::Manifest;
pub use package::{Authorship, PackageId, PackageNames};
pub use project_structure::ProjectStructure;

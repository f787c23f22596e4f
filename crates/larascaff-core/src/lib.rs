//! Larascaff Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Larascaff
//! Laravel package scaffolder, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          larascaff-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, ManifestService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, BlueprintSource, Renderer) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    larascaff-adapters (Infrastructure)  │
//! │ (LocalFilesystem, BuiltinBlueprints...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (PackageId, Manifest, Blueprint, ...)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use larascaff_core::prelude::*;
//!
//! # fn run(service: ScaffoldService) -> LarascaffResult<()> {
//! let request = ScaffoldRequest {
//!     project_root: "/srv/app".into(),
//!     package: PackageId::parse("acme/widgets")?,
//!     authorship: Authorship::placeholder(2026),
//!     link: true,
//! };
//! let report = service.scaffold(&request, &BlueprintKind::Package(PackageFeatures::all()))?;
//! println!("{} files", report.created.len());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ManifestOutcome, ManifestService, ScaffoldPlan, ScaffoldReport, ScaffoldRequest,
        ScaffoldService,
        ports::{BlueprintRenderer, BlueprintSource, FileLock, Filesystem},
    };
    pub use crate::domain::{
        Authorship, Blueprint, BlueprintKind, Manifest, PackageFeatures, PackageId, PackageNames,
        PluginFeatures, ProjectStructure, RenderContext, ResourceName, TestingFeatures,
    };
    pub use crate::error::{LarascaffError, LarascaffResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

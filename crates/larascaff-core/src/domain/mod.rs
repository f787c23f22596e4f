// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Larascaff.
//!
//! This module contains pure logic with no I/O. Reading manifests, writing
//! files and taking locks are handled via ports defined in the application
//! layer.
//!
//! ## Contents
//!
//! - **naming**: case conversion (`plugin-name` → `PluginName`)
//! - **entities**: package identity, manifests, blueprints, rendered structures
//! - **value_objects**: feature switches and blueprint kinds
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: no filesystem, clock or environment access
//! - **Deterministic**: the copyright year is passed in, never read
//! - **Immutable values**: domain objects are Clone + PartialEq where it matters
pub mod entities;
pub mod error;
pub mod naming;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    blueprint::{
        Blueprint, BlueprintBuilder, BlueprintNode, DirectorySpec, FileSpec, RenderContext,
        TemplateContent, TemplateSource,
    },
    common::RelativePath,
    manifest::{DependencySection, EditMode, Manifest, ManifestEdit, PATH_CONSTRAINT, to_pretty_json},
    package::{Authorship, PACKAGES_DIR, PackageId, PackageNames},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    BlueprintKind, PackageFeatures, PluginFeatures, ResourceName, TestingFeatures,
};

pub use naming::{normalize_slug, to_kebab_case, to_pascal_case, to_snake_case, to_studly_case};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Identity flowing into rendered names
    // ========================================================================

    #[test]
    fn package_identity_drives_template_names() {
        let id = PackageId::parse("acme-corp/filament_blog").unwrap();
        let ctx = RenderContext::new(PackageNames::derive(&id), Authorship::placeholder(2030));

        assert_eq!(
            ctx.render("{{PACKAGE_FULL}} {{PHP_NAMESPACE}}\\{{CLASS_NAME}}ServiceProvider {{ENV_PREFIX}}_ENABLED"),
            "acme-corp/filament-blog AcmeCorp\\FilamentBlog\\FilamentBlogServiceProvider FILAMENT_BLOG_ENABLED"
        );
    }

    #[test]
    fn validator_checks_blueprints_and_structures() {
        let blueprint = Blueprint::builder("one").literal("README.md", "# hi").build().unwrap();
        assert!(DomainValidator::validate_blueprint(&blueprint).is_ok());
        assert!(DomainValidator::validate_project_structure(&ProjectStructure::new("/tmp")).is_err());
    }
}

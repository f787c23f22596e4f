use crate::domain::{
    entities::{Blueprint, ProjectStructure},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_blueprint(blueprint: &Blueprint) -> Result<(), DomainError> {
        blueprint.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}

//! Built-in blueprint catalog.
//!
//! Template sources are compiled into the binary with `include_str!` from
//! `templates/`; feature-dependent fragments are rendered here and handed to
//! the renderer as blueprint variables.

mod package;
mod plugin;
mod shared;
mod testing;
mod workbench;

use larascaff_core::{
    application::ports::BlueprintSource,
    domain::{Blueprint, BlueprintKind, RenderContext},
    error::LarascaffResult,
};
use tracing::{debug, instrument};

/// The blueprints that ship with Larascaff.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinBlueprints;

impl BuiltinBlueprints {
    pub fn new() -> Self {
        Self
    }
}

impl BlueprintSource for BuiltinBlueprints {
    #[instrument(skip_all, fields(kind = %kind))]
    fn blueprint(&self, kind: &BlueprintKind, context: &RenderContext) -> LarascaffResult<Blueprint> {
        let blueprint = match kind {
            BlueprintKind::Package(features) => package::blueprint(features, context)?,
            BlueprintKind::Plugin(features) => plugin::blueprint(features, context)?,
            BlueprintKind::Workbench => workbench::blueprint()?,
            BlueprintKind::Testing(features) => testing::blueprint(features, context)?,
        };

        debug!(
            nodes = blueprint.nodes.len(),
            edits = blueprint.manifest_edits.len(),
            "Blueprint assembled"
        );
        Ok(blueprint)
    }
}

//! Simple variable substitution renderer.

use std::path::Path;

use larascaff_core::{
    application::{ApplicationError, ports::BlueprintRenderer},
    domain::{Blueprint, BlueprintNode, ProjectStructure, RelativePath, RenderContext, TemplateContent},
    error::LarascaffResult,
};
use tracing::{instrument, trace};

/// Simple renderer using `{{KEY}}` substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl BlueprintRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(blueprint = blueprint.name))]
    fn render(
        &self,
        blueprint: &Blueprint,
        context: &RenderContext,
        output_root: &Path,
    ) -> LarascaffResult<ProjectStructure> {
        blueprint.validate()?;

        let context = context.clone().with_variables(&blueprint.variables);
        let mut structure = ProjectStructure::new(output_root);

        for node in &blueprint.nodes {
            let path = render_path(node.path(), &context)?;
            match node {
                BlueprintNode::File(spec) => {
                    let content = match &spec.content {
                        TemplateContent::Literal(source) => source.as_str().to_string(),
                        TemplateContent::Parameterized(source) => context.render(source.as_str()),
                    };
                    trace!(path = %path, bytes = content.len(), "rendered file");
                    structure.add_file(path, content);
                }
                BlueprintNode::Directory(_) => structure.add_directory(path),
            }
        }

        structure.validate()?;
        Ok(structure)
    }
}

fn render_path(path: &str, context: &RenderContext) -> LarascaffResult<RelativePath> {
    let rendered = context.render(path);
    if rendered.contains("{{") {
        return Err(ApplicationError::RenderingFailed {
            reason: format!("unresolved placeholder in path '{rendered}'"),
        }
        .into());
    }
    Ok(RelativePath::try_new(rendered)?)
}

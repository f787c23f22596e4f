//! Command handlers.
//!
//! Each handler translates parsed arguments into a core request, calls the
//! scaffold service and renders the returned plan or report. No business
//! logic lives here.

pub mod completions;
pub mod config;
pub mod init;
pub mod link;
pub mod package;
pub mod plugin;
pub mod testing;
pub mod workbench;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Datelike;
use tracing::{debug, info};

use larascaff_adapters::{BuiltinBlueprints, LocalFilesystem, SimpleRenderer};
use larascaff_core::prelude::*;

use crate::{
    cli::TargetArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Wire the production adapters into a scaffold service.
pub(crate) fn scaffold_service() -> ScaffoldService {
    ScaffoldService::new(
        Box::new(BuiltinBlueprints::new()),
        Box::new(SimpleRenderer::new()),
        Arc::new(LocalFilesystem::new()),
    )
}

/// `--project-root`, then `defaults.project_root`, then the working directory.
pub(crate) fn resolve_project_root(flag: Option<&Path>, config: &AppConfig) -> CliResult<PathBuf> {
    if let Some(root) = flag.or(config.defaults.project_root.as_deref()) {
        return Ok(root.to_path_buf());
    }
    std::env::current_dir().with_cli_context(|| "Failed to determine the current directory")
}

/// Author from config, placeholder values otherwise; the year is today's.
pub(crate) fn authorship(config: &AppConfig) -> Authorship {
    let year = chrono::Local::now().year();
    Authorship::new(
        config
            .author
            .name
            .clone()
            .unwrap_or_else(|| Authorship::DEFAULT_NAME.into()),
        config
            .author
            .email
            .clone()
            .unwrap_or_else(|| Authorship::DEFAULT_EMAIL.into()),
        year,
    )
}

/// Run one blueprint end to end: build the request, plan or scaffold, print.
///
/// `next_steps` receives the parsed package and returns the lines printed
/// after a successful scaffold.
pub(crate) fn run_blueprint<F>(
    kind: BlueprintKind,
    target: &TargetArgs,
    link: bool,
    config: &AppConfig,
    output: &OutputManager,
    next_steps: F,
) -> CliResult<()>
where
    F: FnOnce(&PackageId) -> Vec<String>,
{
    let request = ScaffoldRequest {
        project_root: resolve_project_root(target.project_root.as_deref(), config)?,
        package: PackageId::parse(&target.package)?,
        authorship: authorship(config),
        link,
    };
    debug!(
        blueprint = kind.as_str(),
        package = %request.package,
        root = %request.project_root.display(),
        link,
        "Request resolved"
    );

    let service = scaffold_service();

    if target.dry_run {
        let plan = service.plan(&request, &kind)?;
        return show_plan(&plan, &request.project_root, output);
    }

    output.header(&format!("Scaffolding {} {}...", kind.as_str(), request.package))?;
    let report = service.scaffold(&request, &kind)?;
    info!(package = %report.package, files = report.created.len(), "Scaffold written");

    show_report(&report, &request.project_root, output)?;

    let steps = next_steps(&request.package);
    if !steps.is_empty() {
        output.print("")?;
        output.print("Next steps:")?;
        for (index, step) in steps.iter().enumerate() {
            output.print(&format!("  {}. {step}", index + 1))?;
        }
    }
    Ok(())
}

fn show_plan(plan: &ScaffoldPlan, root: &Path, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(plan)?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: {} {} would create {} files in {}",
        plan.blueprint,
        plan.package,
        plan.files.len(),
        relative(&plan.target_dir, root),
    ))?;
    for file in &plan.files {
        output.item(&relative(file, root))?;
    }
    for warning in &plan.warnings {
        output.warning(warning)?;
    }
    output.info("Nothing was written.")?;
    Ok(())
}

fn show_report(report: &ScaffoldReport, root: &Path, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    for file in &report.created {
        output.item(&relative(file, root))?;
    }
    for warning in &report.warnings {
        output.warning(warning)?;
    }

    let manifest = report
        .manifest_path
        .as_deref()
        .map(|p| relative(p, root))
        .unwrap_or_else(|| "composer.json".into());
    match report.manifest {
        ManifestOutcome::Updated => output.success(&format!("Updated {manifest}"))?,
        ManifestOutcome::Unchanged => output.info(&format!("{manifest} already up to date"))?,
        ManifestOutcome::Skipped => {}
    }

    output.success(&format!(
        "Created {} {} ({} files) in {}",
        report.blueprint,
        report.package,
        report.created.len(),
        relative(&report.target_dir, root),
    ))?;
    Ok(())
}

/// `path` relative to the project root when it lies inside it.
pub(crate) fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_configured_root() {
        let mut config = AppConfig::default();
        config.defaults.project_root = Some(PathBuf::from("/from/config"));

        assert_eq!(
            resolve_project_root(Some(Path::new("/from/flag")), &config).unwrap(),
            PathBuf::from("/from/flag")
        );
        assert_eq!(
            resolve_project_root(None, &config).unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn authorship_falls_back_to_placeholders() {
        let mut config = AppConfig::default();
        config.author.name = Some("Ada Lovelace".into());

        let author = authorship(&config);
        assert_eq!(author.name, "Ada Lovelace");
        assert_eq!(author.email, Authorship::DEFAULT_EMAIL);
        assert!(author.year >= 2024);
    }

    #[test]
    fn relative_strips_the_project_root() {
        let root = Path::new("/srv/app");
        assert_eq!(relative(Path::new("/srv/app/packages/acme/widgets"), root), "packages/acme/widgets");
        assert_eq!(relative(Path::new("/elsewhere/file"), root), "/elsewhere/file");
    }
}

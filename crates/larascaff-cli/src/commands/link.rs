//! `larascaff link`: register a local package as a path repository.

use serde_json::json;
use tracing::{debug, instrument};

use larascaff_core::application::MANIFEST_FILE;
use larascaff_core::prelude::{ManifestOutcome, PackageId};

use crate::{cli::LinkArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(package = %args.package))]
pub fn execute(args: LinkArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let package = PackageId::parse(&args.package)?;
    let root = super::resolve_project_root(args.project_root.as_deref(), config)?;
    let manifest = root.join(MANIFEST_FILE);

    let package_dir = package.directory_in(&root);
    let missing_dir = !package_dir.is_dir();
    if missing_dir {
        debug!(dir = %package_dir.display(), "Linking a package directory that does not exist");
    }

    let outcome = super::scaffold_service().link(&root, &package)?;

    if output.is_json() {
        output.json(&json!({
            "package": package.full_name(),
            "manifest_path": manifest,
            "manifest": outcome,
        }))?;
        return Ok(());
    }

    if missing_dir {
        output.warning(&format!(
            "{} does not exist yet; composer update will fail until it does",
            super::relative(&package_dir, &root)
        ))?;
    }
    match outcome {
        ManifestOutcome::Updated => {
            output.success(&format!("Linked {package} in {}", manifest.display()))?;
            output.print("")?;
            output.print("Next steps:")?;
            output.print("  1. Run: composer update")?;
        }
        _ => output.info(&format!("{package} is already linked in {}", manifest.display()))?,
    }
    Ok(())
}

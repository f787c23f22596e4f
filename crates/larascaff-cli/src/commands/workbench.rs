//! `larascaff workbench`: add Orchestra Workbench to an existing package.

use tracing::instrument;

use larascaff_core::prelude::{BlueprintKind, PackageId};

use crate::{cli::WorkbenchArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(package = %args.target.package))]
pub fn execute(args: WorkbenchArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    super::run_blueprint(
        BlueprintKind::Workbench,
        &args.target,
        false,
        config,
        output,
        next_steps,
    )
}

fn next_steps(package: &PackageId) -> Vec<String> {
    vec![
        format!("Install dependencies: cd {} && composer update", package.repository_url()),
        "Serve the workbench: composer serve".into(),
        "Visit http://127.0.0.1:8000 in your browser".into(),
    ]
}

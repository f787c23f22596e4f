//! `larascaff testing`: add a Pest harness to an existing package.

use tracing::instrument;

use larascaff_core::prelude::{BlueprintKind, PackageId, TestingFeatures};

use crate::{cli::TestingArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(package = %args.target.package))]
pub fn execute(args: TestingArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let features = TestingFeatures {
        coverage: args.with_coverage,
        ci: args.with_ci,
    };

    super::run_blueprint(
        BlueprintKind::Testing(features),
        &args.target,
        false,
        config,
        output,
        |package| next_steps(package, features),
    )
}

fn next_steps(package: &PackageId, features: TestingFeatures) -> Vec<String> {
    let mut steps = vec![
        format!("Install dependencies: cd {} && composer install", package.repository_url()),
        "Run tests: vendor/bin/pest".to_string(),
    ];
    if features.coverage {
        steps.push("Run with coverage: composer test-coverage".into());
    }
    if features.ci {
        steps.push("Commit .github/workflows/tests.yml to run the suite on every push".into());
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_follow_features() {
        let package = PackageId::parse("acme/widgets").unwrap();
        assert_eq!(next_steps(&package, TestingFeatures::default()).len(), 2);

        let all = next_steps(&package, TestingFeatures { coverage: true, ci: true });
        assert!(all.iter().any(|s| s.contains("test-coverage")));
        assert!(all.iter().any(|s| s.contains("tests.yml")));
    }
}

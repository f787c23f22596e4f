//! `larascaff package`: create a Laravel package.

use tracing::instrument;

use larascaff_core::prelude::{BlueprintKind, PackageFeatures, PackageId};

use crate::{cli::PackageArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(package = %args.target.package))]
pub fn execute(args: PackageArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let features = features(&args);
    let link = !args.no_link && config.defaults.link;

    super::run_blueprint(
        BlueprintKind::Package(features),
        &args.target,
        link,
        config,
        output,
        |package| next_steps(package, features),
    )
}

fn features(args: &PackageArgs) -> PackageFeatures {
    let selected = PackageFeatures {
        routes: args.with_routes,
        views: args.with_views,
        migrations: args.with_migrations,
        commands: args.with_commands,
        playwright: args.with_playwright,
    };
    if args.all {
        selected.union(PackageFeatures::all())
    } else {
        selected
    }
}

fn next_steps(package: &PackageId, features: PackageFeatures) -> Vec<String> {
    let dir = package.repository_url();
    let mut steps = vec!["Run: composer update".to_string()];
    if features.commands {
        steps.push(format!("Install: php artisan {}:install", package.name()));
    }
    steps.push(format!(
        "Publish config: php artisan vendor:publish --tag={}-config",
        package.name()
    ));
    steps.push(format!("Run tests: cd {dir} && composer install && vendor/bin/pest"));
    steps.push(format!("Serve workbench: cd {dir} && composer serve"));
    if features.playwright {
        steps.push(format!("Browser tests: cd {dir} && npm install && npx playwright test"));
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TargetArgs;

    fn args() -> PackageArgs {
        PackageArgs {
            target: TargetArgs {
                package: "acme/widgets".into(),
                project_root: None,
                dry_run: false,
            },
            with_routes: false,
            with_views: false,
            with_migrations: false,
            with_commands: false,
            with_playwright: false,
            all: false,
            no_link: false,
        }
    }

    #[test]
    fn all_keeps_playwright_opt_in() {
        let all = features(&PackageArgs { all: true, ..args() });
        assert_eq!(all, PackageFeatures::all());
        assert!(!all.playwright);

        let with_browser = features(&PackageArgs {
            all: true,
            with_playwright: true,
            ..args()
        });
        assert!(with_browser.playwright && with_browser.routes);
    }

    #[test]
    fn install_step_only_with_commands() {
        let package = PackageId::parse("acme/widgets").unwrap();
        let plain = next_steps(&package, PackageFeatures::default());
        assert!(plain.iter().all(|s| !s.contains("widgets:install")));

        let with_commands = next_steps(&package, PackageFeatures::all());
        assert!(with_commands.contains(&"Install: php artisan widgets:install".to_string()));
        assert!(with_commands.iter().any(|s| s.contains("cd packages/acme/widgets")));
    }
}

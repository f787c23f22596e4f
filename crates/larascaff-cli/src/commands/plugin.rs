//! `larascaff plugin`: create a Filament panel plugin.

use tracing::instrument;

use larascaff_core::prelude::{BlueprintKind, PackageId, PackageNames, PluginFeatures, ResourceName};

use crate::{cli::PluginArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(package = %args.target.package))]
pub fn execute(args: PluginArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let features = PluginFeatures {
        resource: args.with_resource.as_deref().map(ResourceName::parse).transpose()?,
        page: args.with_page,
        widget: args.with_widget,
        pest: !args.no_pest,
    };
    let pest = features.pest;
    let link = !args.no_link && config.defaults.link;

    super::run_blueprint(
        BlueprintKind::Plugin(features),
        &args.target,
        link,
        config,
        output,
        |package| next_steps(package, pest),
    )
}

fn next_steps(package: &PackageId, pest: bool) -> Vec<String> {
    let names = PackageNames::derive(package);
    let mut steps = vec![
        "Run: composer update".to_string(),
        format!(
            "Register the plugin in your panel provider: ->plugins([\\{}\\{}Plugin::make()])",
            names.php_namespace, names.class_name
        ),
        format!("Publish config: php artisan vendor:publish --tag={}-config", package.name()),
    ];
    if pest {
        steps.push(format!(
            "Run tests: cd {} && composer install && vendor/bin/pest",
            package.repository_url()
        ));
    }
    steps
}

//! `plugin`: a Filament panel plugin built on spatie/laravel-package-tools.

use std::collections::BTreeSet;

use larascaff_core::domain::{
    Authorship, Blueprint, DomainError, PackageNames, PluginFeatures, RenderContext,
};
use serde_json::{Value, json};

use super::shared::{self, PEST_PLUGIN};

const PLUGIN: &str = include_str!("../../templates/plugin/Plugin.php");
const SERVICE_PROVIDER: &str = include_str!("../../templates/plugin/ServiceProvider.php");
const TESTS_MIXIN: &str = include_str!("../../templates/plugin/TestsPluginName.php");
const FACADE: &str = include_str!("../../templates/plugin/Facade.php");
const CONFIG: &str = include_str!("../../templates/plugin/config.php");
const MESSAGES: &str = include_str!("../../templates/plugin/messages.php");
const README: &str = include_str!("../../templates/plugin/README.md");
const README_RESOURCES: &str = include_str!("../../templates/plugin/README.resources.md");
const GITIGNORE: &str = include_str!("../../templates/plugin/gitignore");

const RESOURCE: &str = include_str!("../../templates/plugin/resource/Resource.php");
const LIST_RECORDS: &str = include_str!("../../templates/plugin/resource/ListRecords.php");
const CREATE_RECORD: &str = include_str!("../../templates/plugin/resource/CreateRecord.php");
const EDIT_RECORD: &str = include_str!("../../templates/plugin/resource/EditRecord.php");

const SETTINGS_PAGE: &str = include_str!("../../templates/plugin/SettingsPage.php");
const SETTINGS_VIEW: &str = include_str!("../../templates/plugin/settings.blade.php");
const STATS_WIDGET: &str = include_str!("../../templates/plugin/StatsOverviewWidget.php");

const PHPUNIT_XML: &str = include_str!("../../templates/plugin/phpunit.xml");
const PEST_PHP: &str = include_str!("../../templates/plugin/Pest.php");
const TEST_CASE: &str = include_str!("../../templates/plugin/TestCase.php");
const EXAMPLE_TEST: &str = include_str!("../../templates/plugin/ExampleTest.php");

const RESOURCE_DIR: &str = "src/Resources/{{RESOURCE_CLASS}}Resource";

pub(super) fn blueprint(features: &PluginFeatures, ctx: &RenderContext) -> Result<Blueprint, DomainError> {
    let names = ctx.names();
    let namespace = &names.php_namespace;

    let mut uses = BTreeSet::from([
        "use Filament\\Contracts\\Plugin;".to_string(),
        "use Filament\\Panel;".to_string(),
    ]);
    let mut resources = Vec::new();
    let mut pages = Vec::new();
    let mut widgets = Vec::new();

    if let Some(resource) = &features.resource {
        uses.insert(format!("use {namespace}\\Resources\\{resource}Resource;"));
        resources.push(format!("Resources\\{resource}Resource::class"));
    }
    if features.page {
        uses.insert(format!("use {namespace}\\Pages\\SettingsPage;"));
        pages.push("Pages\\SettingsPage::class".to_string());
    }
    if features.widget {
        uses.insert(format!("use {namespace}\\Widgets\\StatsOverviewWidget;"));
        widgets.push("Widgets\\StatsOverviewWidget::class".to_string());
    }

    let readme_resources = match &features.resource {
        Some(resource) => ctx
            .clone()
            .with_variable("RESOURCE_CLASS", resource.as_str())
            .render(README_RESOURCES),
        None => String::new(),
    };

    let builder = Blueprint::builder("plugin")
        .literal("composer.json", shared::composer_json(&manifest(names, ctx.author(), features.pest))?)
        .template("src/{{CLASS_NAME}}Plugin.php", PLUGIN)
        .variable("PLUGIN_USES", uses.into_iter().collect::<Vec<_>>().join("\n"))
        .variable("PLUGIN_RESOURCES", registrations(&resources, "resources"))
        .variable("PLUGIN_PAGES", registrations(&pages, "pages"))
        .variable("PLUGIN_WIDGETS", registrations(&widgets, "widgets"))
        .template("src/{{CLASS_NAME}}ServiceProvider.php", SERVICE_PROVIDER)
        .template("src/TestsPluginName.php", TESTS_MIXIN)
        .template("src/Facades/{{CLASS_NAME}}.php", FACADE)
        .template("config/{{PACKAGE}}.php", CONFIG)
        .template("resources/lang/en/messages.php", MESSAGES)
        .template("README.md", README)
        .variable("README_RESOURCES", readme_resources)
        .literal(".gitignore", GITIGNORE)
        .template("LICENSE", shared::LICENSE)
        .keep("database/migrations")
        .keep("stubs")
        .keep("src/Commands")
        .keep("src/Livewire");

    let builder = match &features.resource {
        Some(resource) => builder
            .variable("RESOURCE_CLASS", resource.as_str())
            .template(format!("{RESOURCE_DIR}.php"), RESOURCE)
            .template(format!("{RESOURCE_DIR}/Pages/List{{{{RESOURCE_CLASS}}}}s.php"), LIST_RECORDS)
            .template(format!("{RESOURCE_DIR}/Pages/Create{{{{RESOURCE_CLASS}}}}.php"), CREATE_RECORD)
            .template(format!("{RESOURCE_DIR}/Pages/Edit{{{{RESOURCE_CLASS}}}}.php"), EDIT_RECORD),
        None => builder.keep("src/Resources"),
    };

    builder
        .when(features.page, |b| {
            b.template("src/Pages/SettingsPage.php", SETTINGS_PAGE)
                .template("resources/views/pages/settings.blade.php", SETTINGS_VIEW)
        })
        .when(!features.page, |b| b.keep("src/Pages").directory("resources/views/pages"))
        .when(features.widget, |b| {
            b.template("src/Widgets/StatsOverviewWidget.php", STATS_WIDGET)
        })
        .when(!features.widget, |b| b.keep("src/Widgets"))
        .when(features.pest, |b| {
            b.literal("phpunit.xml", PHPUNIT_XML)
                .template("tests/Pest.php", PEST_PHP)
                .template("tests/TestCase.php", TEST_CASE)
                .template("tests/Unit/ExampleTest.php", EXAMPLE_TEST)
                .keep("tests/Feature")
        })
        .build()
}

/// Body of a `->resources([...])`-style list in the Plugin class.
fn registrations(entries: &[String], kind: &str) -> String {
    if entries.is_empty() {
        format!("// Add your {kind} here")
    } else {
        entries.join(",\n                ")
    }
}

fn manifest(names: &PackageNames, author: &Authorship, pest: bool) -> Value {
    let namespace = &names.php_namespace;
    let class = &names.class_name;

    let mut composer = json!({
        "name": names.full_name,
        "description": format!("A Filament plugin: {class}"),
        "type": "library",
        "license": "MIT",
        "authors": [
            {
                "name": author.name,
                "email": author.email
            }
        ],
        "require": {
            "php": "^8.2",
            "filament/filament": "^3.0|^4.0",
            "illuminate/support": "^11.0|^12.0",
            "livewire/livewire": "^3.6",
            "spatie/laravel-package-tools": "^1.18"
        },
        "autoload": {
            "psr-4": {
                format!("{namespace}\\"): "src/"
            }
        },
        "extra": {
            "laravel": {
                "providers": [
                    format!("{namespace}\\{class}ServiceProvider")
                ]
            }
        },
        "minimum-stability": "dev",
        "prefer-stable": true
    });

    if pest {
        if let Some(document) = composer.as_object_mut() {
            document.insert(
                "require-dev".into(),
                json!({
                    "orchestra/testbench": "^10.0|^11.0",
                    "pestphp/pest": "^3.0|^4.0",
                    "pestphp/pest-plugin-laravel": "^3.0|^4.0",
                    "pestphp/pest-plugin-livewire": "^3.0|^4.0"
                }),
            );
            document.insert(
                "autoload-dev".into(),
                json!({ "psr-4": { format!("{namespace}\\Tests\\"): "tests/" } }),
            );
            document.insert(
                "scripts".into(),
                json!({ "test": "pest", "test-coverage": "pest --coverage" }),
            );
            document.insert(
                "config".into(),
                json!({ "allow-plugins": { PEST_PLUGIN: true } }),
            );
        }
    }

    composer
}

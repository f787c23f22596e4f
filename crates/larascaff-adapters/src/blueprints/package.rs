//! `package`: a new Laravel package with tests, Workbench and CI.

use larascaff_core::domain::{
    Authorship, Blueprint, DomainError, PackageFeatures, PackageNames, RenderContext,
};
use serde_json::{Map, Value, json};

use super::shared::{self, PEST_PLUGIN, PEST_REQUIREMENTS, WORKBENCH_NAMESPACES};

const SERVICE_PROVIDER: &str = include_str!("../../templates/package/ServiceProvider.php");
const MAIN_CLASS: &str = include_str!("../../templates/package/MainClass.php");
const FACADE: &str = include_str!("../../templates/package/Facade.php");
const INSTALL_COMMAND: &str = include_str!("../../templates/package/InstallCommand.php");
const CONFIG: &str = include_str!("../../templates/package/config.php");
const MESSAGES: &str = include_str!("../../templates/package/messages.php");
const WEB_ROUTES: &str = include_str!("../../templates/package/web.php");
const API_ROUTES: &str = include_str!("../../templates/package/api.php");
const EXAMPLE_TEST: &str = include_str!("../../templates/package/ExampleTest.php");
const README: &str = include_str!("../../templates/package/README.md");
const GITIGNORE: &str = include_str!("../../templates/package/gitignore");
const GITATTRIBUTES: &str = include_str!("../../templates/package/gitattributes");

const PLAYWRIGHT_CONFIG: &str = include_str!("../../templates/package/playwright/playwright.config.ts");
const PLAYWRIGHT_SPEC: &str = include_str!("../../templates/package/playwright/example.spec.ts");
const PLAYWRIGHT_README: &str = include_str!("../../templates/package/playwright/README.section.md");

// Service provider fragments, spliced in after the config publishing block.
const USES_INSTALL_COMMAND: &str = "\nuse {{PHP_NAMESPACE}}\\Commands\\InstallCommand;";

const BOOT_ROUTES: &str = "

        $this->loadRoutesFrom(__DIR__ . '/../routes/web.php');
        $this->loadRoutesFrom(__DIR__ . '/../routes/api.php');";

const BOOT_VIEWS: &str = "

        $this->loadViewsFrom(__DIR__ . '/../resources/views', '{{PACKAGE}}');

        if ($this->app->runningInConsole()) {
            $this->publishes([
                __DIR__ . '/../resources/views' => resource_path('views/vendor/{{PACKAGE}}'),
            ], '{{PACKAGE}}-views');
        }";

const BOOT_MIGRATIONS: &str = "

        if ($this->app->runningInConsole()) {
            $this->publishesMigrations([
                __DIR__ . '/../database/migrations' => database_path('migrations'),
            ], '{{PACKAGE}}-migrations');
        }";

const REGISTER_COMMANDS: &str = "

        if ($this->app->runningInConsole()) {
            $this->commands([
                InstallCommand::class,
            ]);
        }";

pub(super) fn blueprint(features: &PackageFeatures, ctx: &RenderContext) -> Result<Blueprint, DomainError> {
    let names = ctx.names();
    let fragment = |enabled: bool, source: &str| {
        if enabled { ctx.render(source) } else { String::new() }
    };

    let boot = [
        fragment(features.routes, BOOT_ROUTES),
        fragment(features.views, BOOT_VIEWS),
        fragment(features.migrations, BOOT_MIGRATIONS),
    ]
    .concat();

    let package_json = playwright_package_json()?;

    let builder = Blueprint::builder("package")
        .literal("composer.json", shared::composer_json(&manifest(names, ctx.author()))?)
        .template("src/{{CLASS_NAME}}ServiceProvider.php", SERVICE_PROVIDER)
        .variable("PROVIDER_USES", fragment(features.commands, USES_INSTALL_COMMAND))
        .variable("PROVIDER_BOOT", boot)
        .variable("PROVIDER_COMMANDS", fragment(features.commands, REGISTER_COMMANDS))
        .template("src/{{CLASS_NAME}}.php", MAIN_CLASS)
        .template("src/Facades/{{CLASS_NAME}}.php", FACADE)
        .template("config/{{PACKAGE}}.php", CONFIG)
        .template("lang/en/messages.php", MESSAGES)
        .when(features.routes, |b| {
            b.template("routes/web.php", WEB_ROUTES)
                .template("routes/api.php", API_ROUTES)
        })
        .when(features.views, |b| b.keep("resources/views"))
        .when(features.migrations, |b| {
            b.keep("database/factories").keep("database/migrations")
        })
        .when(features.commands, |b| {
            b.template("src/Commands/InstallCommand.php", INSTALL_COMMAND)
        })
        // Pest
        .literal("phpunit.xml", shared::PHPUNIT_XML)
        .template("tests/Pest.php", shared::PEST_PHP)
        .template("tests/TestCase.php", shared::TEST_CASE)
        .template("tests/Unit/ExampleTest.php", EXAMPLE_TEST)
        .keep("tests/Feature");

    let builder = shared::workbench_tree(builder, features.routes, features.commands, features.views)
        .when(features.playwright, |b| {
            b.literal("playwright.config.ts", PLAYWRIGHT_CONFIG)
                .literal("package.json", package_json)
                .literal("tests/Browser/example.spec.ts", PLAYWRIGHT_SPEC)
        })
        .template(".github/workflows/tests.yml", shared::TESTS_WORKFLOW)
        .variable("COVERAGE_FLAGS", "")
        .variable("COVERAGE_STEP", "")
        .template("README.md", README)
        .variable("README_PLAYWRIGHT", fragment(features.playwright, PLAYWRIGHT_README))
        .literal(".gitignore", GITIGNORE)
        .literal(".gitattributes", GITATTRIBUTES)
        .template("LICENSE", shared::LICENSE);

    builder.build()
}

fn playwright_package_json() -> Result<String, DomainError> {
    let value = json!({
        "private": true,
        "scripts": {
            "test:browser": "playwright test"
        },
        "devDependencies": {
            "@playwright/test": "^1.50"
        }
    });
    shared::npm_json(&value)
}

fn manifest(names: &PackageNames, author: &Authorship) -> Value {
    let namespace = &names.php_namespace;
    let class = &names.class_name;

    let mut require_dev = Map::new();
    for (package, constraint) in PEST_REQUIREMENTS {
        require_dev.insert(package.into(), json!(constraint));
    }

    let mut dev_autoload = Map::new();
    dev_autoload.insert(format!("{namespace}\\Tests\\"), json!("tests/"));
    for (dev_namespace, path) in WORKBENCH_NAMESPACES {
        dev_autoload.insert(dev_namespace.into(), json!(path));
    }

    let mut scripts = Map::new();
    for (name, command) in shared::workbench_scripts().into_iter().chain(shared::test_scripts()) {
        scripts.insert(name.into(), command);
    }

    json!({
        "name": names.full_name,
        "description": format!("A Laravel package: {class}"),
        "type": "library",
        "license": "MIT",
        "authors": [
            {
                "name": author.name,
                "email": author.email
            }
        ],
        "require": {
            "php": "^8.3",
            "illuminate/support": "^12.0"
        },
        "require-dev": require_dev,
        "autoload": {
            "psr-4": {
                format!("{namespace}\\"): "src/"
            }
        },
        "autoload-dev": {
            "psr-4": dev_autoload
        },
        "extra": {
            "laravel": {
                "providers": [
                    format!("{namespace}\\{class}ServiceProvider")
                ],
                "aliases": {
                    class.as_str(): format!("{namespace}\\Facades\\{class}")
                }
            }
        },
        "scripts": scripts,
        "config": {
            "allow-plugins": {
                PEST_PLUGIN: true
            }
        },
        "minimum-stability": "dev",
        "prefer-stable": true
    })
}

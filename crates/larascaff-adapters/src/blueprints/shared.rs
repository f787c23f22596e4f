//! Files and manifest fragments shared by several blueprints.

use larascaff_core::domain::{BlueprintBuilder, DomainError, EditMode, ManifestEdit, to_pretty_json};
use serde_json::{Value, json};

pub(super) const LICENSE: &str = include_str!("../../templates/shared/LICENSE");
pub(super) const PHPUNIT_XML: &str = include_str!("../../templates/shared/phpunit.xml");
pub(super) const PEST_PHP: &str = include_str!("../../templates/shared/Pest.php");
pub(super) const TEST_CASE: &str = include_str!("../../templates/shared/TestCase.php");
pub(super) const TESTS_WORKFLOW: &str = include_str!("../../templates/shared/tests.yml");

const TESTBENCH_YAML: &str = include_str!("../../templates/shared/workbench/testbench.yaml");
const WORKBENCH_PROVIDER: &str =
    include_str!("../../templates/shared/workbench/WorkbenchServiceProvider.php");
const DATABASE_SEEDER: &str = include_str!("../../templates/shared/workbench/DatabaseSeeder.php");
const WELCOME_VIEW: &str = include_str!("../../templates/shared/workbench/welcome.blade.php");
const WORKBENCH_ROUTES: &str = include_str!("../../templates/shared/workbench/web.php");

pub(super) const TESTBENCH: (&str, &str) = ("orchestra/testbench", "^10.0");

/// Dev requirements of a Pest + Testbench test suite.
pub(super) const PEST_REQUIREMENTS: [(&str, &str); 4] = [
    TESTBENCH,
    ("pestphp/pest", "^4.0"),
    ("pestphp/pest-plugin-laravel", "^4.0"),
    ("orchestra/pest-plugin-testbench", "^4.0"),
];

pub(super) const PEST_PLUGIN: &str = "pestphp/pest-plugin";

pub(super) const WORKBENCH_NAMESPACES: [(&str, &str); 3] = [
    ("Workbench\\App\\", "workbench/app/"),
    ("Workbench\\Database\\Seeders\\", "workbench/database/seeders/"),
    ("Workbench\\Database\\Factories\\", "workbench/database/factories/"),
];

/// Composer scripts driving Orchestra Workbench.
pub(super) fn workbench_scripts() -> [(&'static str, Value); 5] {
    [
        ("post-autoload-dump", json!(["@clear", "@prepare"])),
        (
            "clear",
            json!("@php vendor/bin/testbench package:purge-skeleton --ansi"),
        ),
        ("prepare", json!("@php vendor/bin/testbench package:discover --ansi")),
        ("build", json!("@php vendor/bin/testbench workbench:build --ansi")),
        (
            "serve",
            json!([
                "Composer\\Config::disableProcessTimeout",
                "@build",
                "@php vendor/bin/testbench serve --ansi"
            ]),
        ),
    ]
}

pub(super) fn test_scripts() -> [(&'static str, Value); 2] {
    [
        ("test", json!("pest")),
        ("test-coverage", json!("pest --coverage")),
    ]
}

/// Edits that wire Workbench into an existing manifest.
pub(super) fn workbench_edits(mode: EditMode) -> Vec<ManifestEdit> {
    let (package, constraint) = TESTBENCH;
    let mut edits = vec![ManifestEdit::require_dev(package, constraint, mode)];
    edits.extend(
        WORKBENCH_NAMESPACES
            .iter()
            .map(|(namespace, path)| ManifestEdit::dev_autoload(namespace, path, mode)),
    );
    edits.extend(
        workbench_scripts()
            .into_iter()
            .map(|(name, command)| ManifestEdit::script(name, command, mode)),
    );
    edits
}

/// `composer.json` text: 4-space indent, trailing newline.
pub(super) fn composer_json(value: &Value) -> Result<String, DomainError> {
    let mut text = to_pretty_json(value, b"    ")?;
    text.push('\n');
    Ok(text)
}

/// npm-style JSON: 2-space indent, trailing newline.
pub(super) fn npm_json(value: &Value) -> Result<String, DomainError> {
    let mut text = to_pretty_json(value, b"  ")?;
    text.push('\n');
    Ok(text)
}

pub(super) const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// `testbench.yaml` plus the `workbench/` skeleton app.
pub(super) fn workbench_tree(
    builder: BlueprintBuilder,
    web: bool,
    commands: bool,
    views: bool,
) -> BlueprintBuilder {
    builder
        .template("testbench.yaml", TESTBENCH_YAML)
        .variable("DISCOVERS_WEB", bool_str(web))
        .variable("DISCOVERS_COMMANDS", bool_str(commands))
        .variable("DISCOVERS_VIEWS", bool_str(views))
        .literal(
            "workbench/app/Providers/WorkbenchServiceProvider.php",
            WORKBENCH_PROVIDER,
        )
        .literal("workbench/database/seeders/DatabaseSeeder.php", DATABASE_SEEDER)
        .template("workbench/resources/views/welcome.blade.php", WELCOME_VIEW)
        .literal("workbench/routes/web.php", WORKBENCH_ROUTES)
        .keep("workbench/app/Models")
        .keep("workbench/database/factories")
        .keep("workbench/database/migrations")
}

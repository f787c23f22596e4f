//! `testing`: add a Pest + Testbench suite to an existing package.

use larascaff_core::domain::{Blueprint, DomainError, EditMode, ManifestEdit, RenderContext, TestingFeatures};

use super::shared::{self, PEST_PLUGIN, PEST_REQUIREMENTS};

const EXAMPLE_TEST: &str = include_str!("../../templates/testing/ExampleTest.php");
const CODECOV_STEP: &str = include_str!("../../templates/testing/codecov.step.yml");

const COVERAGE_FLAGS: &str = " --coverage --coverage-clover coverage.xml";

/// Expects `SERVICE_PROVIDER` in the context.
pub(super) fn blueprint(features: &TestingFeatures, ctx: &RenderContext) -> Result<Blueprint, DomainError> {
    let namespace = &ctx.names().php_namespace;

    let mut edits: Vec<ManifestEdit> = PEST_REQUIREMENTS
        .iter()
        .map(|(package, constraint)| ManifestEdit::require_dev(package, constraint, EditMode::Overwrite))
        .collect();
    edits.push(ManifestEdit::dev_autoload(
        &format!("{namespace}\\Tests\\"),
        "tests/",
        EditMode::Overwrite,
    ));
    edits.extend(
        shared::test_scripts()
            .into_iter()
            .map(|(name, command)| ManifestEdit::script(name, command, EditMode::Overwrite)),
    );
    edits.push(ManifestEdit::allow_plugin(PEST_PLUGIN));

    let builder = Blueprint::builder("testing")
        .literal("phpunit.xml", shared::PHPUNIT_XML)
        .template("tests/Pest.php", shared::PEST_PHP)
        .template("tests/TestCase.php", shared::TEST_CASE)
        .template("tests/Unit/ExampleTest.php", EXAMPLE_TEST)
        .keep("tests/Feature")
        .when(features.ci, |b| {
            b.template(".github/workflows/tests.yml", shared::TESTS_WORKFLOW)
                .variable("COVERAGE_FLAGS", if features.coverage { COVERAGE_FLAGS } else { "" })
                .variable("COVERAGE_STEP", if features.coverage { CODECOV_STEP } else { "" })
        });

    edits
        .into_iter()
        .fold(builder, |b, edit| b.manifest_edit(edit))
        .build()
}

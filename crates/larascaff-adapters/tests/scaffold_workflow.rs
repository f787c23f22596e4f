//! End-to-end scaffolds through the real catalog and renderer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use larascaff_adapters::{BuiltinBlueprints, LocalFilesystem, MemoryFilesystem, SimpleRenderer};
use larascaff_core::application::{ApplicationError, Missing};
use larascaff_core::prelude::*;

const PROJECT_MANIFEST: &str = "{\n    \"name\": \"laravel/laravel\",\n    \"require\": {\n        \"php\": \"^8.3\"\n    }\n}\n";

const BARE_PACKAGE_MANIFEST: &str = r#"{
    "name": "acme/widgets",
    "autoload": {
        "psr-4": {
            "Acme\\Widgets\\": "src/"
        }
    }
}
"#;

fn service(fs: &MemoryFilesystem) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(BuiltinBlueprints::new()),
        Box::new(SimpleRenderer::new()),
        Arc::new(fs.clone()),
    )
}

fn request(root: impl Into<PathBuf>, link: bool) -> ScaffoldRequest {
    ScaffoldRequest {
        project_root: root.into(),
        package: PackageId::parse("acme/widgets").unwrap(),
        authorship: Authorship::new("Ada Lovelace", "ada@example.com", 2026),
        link,
    }
}

fn seeded_project() -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    fs.insert_file("/app/composer.json", PROJECT_MANIFEST);
    fs
}

fn seeded_bare_package() -> MemoryFilesystem {
    let fs = seeded_project();
    fs.insert_file("/app/packages/acme/widgets/composer.json", BARE_PACKAGE_MANIFEST);
    fs
}

// ============================================================================
// package
// ============================================================================

#[test]
fn package_with_all_features_is_created_and_linked() {
    let fs = seeded_project();
    let report = service(&fs)
        .scaffold(&request("/app", true), &BlueprintKind::Package(PackageFeatures::all()))
        .unwrap();

    assert_eq!(report.manifest, ManifestOutcome::Updated);
    assert_eq!(report.php_namespace, "Acme\\Widgets");

    let provider = fs
        .read_file("/app/packages/acme/widgets/src/WidgetsServiceProvider.php")
        .unwrap();
    assert!(provider.contains("use Acme\\Widgets\\Commands\\InstallCommand;"));
    assert!(provider.contains("$this->loadRoutesFrom(__DIR__ . '/../routes/web.php');"));
    assert!(provider.contains("], 'widgets-views');"));
    assert!(provider.contains("InstallCommand::class,"));
    assert!(!provider.contains("{{"));

    let root = fs.read_file("/app/composer.json").unwrap();
    assert!(root.contains("\"url\": \"packages/acme/widgets\""));
    assert!(root.contains("\"acme/widgets\": \"@dev\""));
    assert!(root.ends_with("}\n"));

    let license = fs.read_file("/app/packages/acme/widgets/LICENSE").unwrap();
    assert!(license.contains("Copyright (c) 2026 Ada Lovelace"));

    for created in &report.created {
        assert!(fs.exists(created), "missing {}", created.display());
    }
    assert!(
        fs.directories()
            .iter()
            .all(|dir| !dir.to_string_lossy().contains(".staging-"))
    );
}

#[test]
fn minimal_package_workflow_keeps_github_expressions() {
    let fs = seeded_project();
    service(&fs)
        .scaffold(&request("/app", false), &BlueprintKind::Package(PackageFeatures::default()))
        .unwrap();

    let workflow = fs
        .read_file("/app/packages/acme/widgets/.github/workflows/tests.yml")
        .unwrap();
    assert!(workflow.contains("php-version: ${{ matrix.php }}"));
    assert!(workflow.contains("run: vendor/bin/pest --ci\n"));
    assert!(!fs.exists(Path::new("/app/packages/acme/widgets/routes")));
    assert_eq!(fs.read_file("/app/composer.json").unwrap(), PROJECT_MANIFEST);
}

#[test]
fn existing_package_directory_is_never_overwritten() {
    let fs = seeded_project();
    fs.insert_file("/app/packages/acme/widgets/README.md", "mine");

    let err = service(&fs)
        .scaffold(&request("/app", true), &BlueprintKind::Package(PackageFeatures::default()))
        .unwrap_err();

    assert!(matches!(
        err,
        LarascaffError::Application(ApplicationError::AlreadyExists { .. })
    ));
    assert_eq!(fs.read_file("/app/packages/acme/widgets/README.md").unwrap(), "mine");
    assert_eq!(fs.read_file("/app/composer.json").unwrap(), PROJECT_MANIFEST);
}

#[test]
fn missing_project_manifest_fails_before_writing() {
    let fs = MemoryFilesystem::new();
    fs.insert_dir("/app");

    let err = service(&fs)
        .scaffold(&request("/app", true), &BlueprintKind::Package(PackageFeatures::default()))
        .unwrap_err();

    assert!(matches!(
        err,
        LarascaffError::Application(ApplicationError::NotFound {
            what: Missing::ProjectManifest,
            ..
        })
    ));
    assert!(fs.files().is_empty());
}

#[test]
fn failed_link_removes_the_new_package() {
    let fs = seeded_project();
    fs.fail_on_write("/app/composer.json");

    let err = service(&fs)
        .scaffold(&request("/app", true), &BlueprintKind::Package(PackageFeatures::default()))
        .unwrap_err();

    assert!(matches!(
        err,
        LarascaffError::Application(ApplicationError::FilesystemError { .. })
    ));
    assert!(!fs.exists(Path::new("/app/packages/acme/widgets")));
    assert!(!fs.exists(Path::new("/app/packages")));
    assert_eq!(fs.files(), vec![PathBuf::from("/app/composer.json")]);
}

#[test]
fn failed_link_keeps_an_existing_vendor_directory() {
    let fs = seeded_project();
    fs.insert_file("/app/packages/acme/gadgets/composer.json", "{}\n");
    fs.fail_on_write("/app/composer.json");

    assert!(
        service(&fs)
            .scaffold(&request("/app", true), &BlueprintKind::Package(PackageFeatures::default()))
            .is_err()
    );
    assert!(!fs.exists(Path::new("/app/packages/acme/widgets")));
    assert!(fs.exists(Path::new("/app/packages/acme/gadgets/composer.json")));
}

#[test]
fn unlinkable_project_manifest_fails_before_writing() {
    let fs = MemoryFilesystem::new();
    fs.insert_file("/app/composer.json", "{\"require\": []}\n");

    let err = service(&fs)
        .scaffold(&request("/app", true), &BlueprintKind::Package(PackageFeatures::default()))
        .unwrap_err();

    assert!(matches!(
        err,
        LarascaffError::Application(ApplicationError::InvalidManifestFile { .. })
    ));
    assert!(!fs.exists(Path::new("/app/packages")));
    assert_eq!(fs.read_file("/app/composer.json").unwrap(), "{\"require\": []}\n");
}

#[test]
fn failed_write_leaves_no_partial_package() {
    let fs = seeded_project();
    fs.fail_on_write("LICENSE");

    assert!(
        service(&fs)
            .scaffold(&request("/app", true), &BlueprintKind::Package(PackageFeatures::default()))
            .is_err()
    );
    assert_eq!(fs.files(), vec![PathBuf::from("/app/composer.json")]);
    assert!(!fs.exists(Path::new("/app/packages")));
}

#[test]
fn dry_run_plan_writes_nothing() {
    let fs = seeded_project();
    let plan = service(&fs)
        .plan(&request("/app", true), &BlueprintKind::Package(PackageFeatures::all()))
        .unwrap();

    assert!(plan.files.contains(&PathBuf::from(
        "/app/packages/acme/widgets/src/Commands/InstallCommand.php"
    )));
    assert_eq!(fs.files(), vec![PathBuf::from("/app/composer.json")]);

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["blueprint"], "package");
    assert!(json.get("structure").is_none());
}

// ============================================================================
// plugin
// ============================================================================

#[test]
fn plugin_with_resource_page_and_widget() {
    let fs = seeded_project();
    let features = PluginFeatures {
        resource: Some(ResourceName::parse("post").unwrap()),
        page: true,
        widget: true,
        pest: true,
    };
    let mut req = request("/app", true);
    req.package = PackageId::parse("acme/filament-blog").unwrap();

    service(&fs).scaffold(&req, &BlueprintKind::Plugin(features)).unwrap();

    let base = Path::new("/app/packages/acme/filament-blog");
    let list = fs
        .read_file(base.join("src/Resources/PostResource/Pages/ListPosts.php"))
        .unwrap();
    assert!(list.contains("class ListPosts extends ListRecords"));
    assert!(list.contains("namespace Acme\\FilamentBlog\\Resources\\PostResource\\Pages;"));

    let view = fs
        .read_file(base.join("resources/views/pages/settings.blade.php"))
        .unwrap();
    assert!(view.contains("{{ __('filament-blog::messages.settings.heading') }}"));

    let plugin = fs.read_file(base.join("src/FilamentBlogPlugin.php")).unwrap();
    assert!(plugin.contains("return 'filament-blog';"));
    assert!(plugin.contains("Widgets\\StatsOverviewWidget::class"));

    let config = fs.read_file(base.join("config/filament-blog.php")).unwrap();
    assert!(config.contains("env('FILAMENT_BLOG_ENABLED', true)"));
}

// ============================================================================
// workbench / testing
// ============================================================================

#[test]
fn workbench_extends_a_bare_package_once() {
    let fs = seeded_bare_package();
    let svc = service(&fs);

    let report = svc
        .scaffold(&request("/app", false), &BlueprintKind::Workbench)
        .unwrap();
    assert_eq!(report.manifest, ManifestOutcome::Updated);

    let manifest = Manifest::parse(
        &fs.read_file("/app/packages/acme/widgets/composer.json").unwrap(),
    )
    .unwrap();
    assert_eq!(manifest.get("require-dev").unwrap()["orchestra/testbench"], "^10.0");
    assert!(manifest.get("scripts").unwrap()["serve"].is_array());

    let err = svc
        .scaffold(&request("/app", false), &BlueprintKind::Workbench)
        .unwrap_err();
    assert!(matches!(
        err,
        LarascaffError::Application(ApplicationError::AlreadyExists { .. })
    ));
}

#[test]
fn workbench_requires_the_package_manifest() {
    let fs = seeded_project();
    fs.insert_dir("/app/packages/acme/widgets");

    let err = service(&fs)
        .scaffold(&request("/app", false), &BlueprintKind::Workbench)
        .unwrap_err();

    assert!(matches!(
        err,
        LarascaffError::Application(ApplicationError::NotFound {
            what: Missing::PackageManifest,
            ..
        })
    ));
}

#[test]
fn testing_discovers_the_service_provider() {
    let fs = seeded_bare_package();
    fs.insert_file("/app/packages/acme/widgets/src/Widgets.php", "<?php");
    fs.insert_file(
        "/app/packages/acme/widgets/src/CustomServiceProvider.php",
        "<?php",
    );

    let report = service(&fs)
        .scaffold(
            &request("/app", false),
            &BlueprintKind::Testing(TestingFeatures {
                coverage: true,
                ci: true,
            }),
        )
        .unwrap();

    assert!(report.warnings.is_empty());
    let test = fs
        .read_file("/app/packages/acme/widgets/tests/Unit/ExampleTest.php")
        .unwrap();
    assert!(test.contains("\\Acme\\Widgets\\CustomServiceProvider::class"));

    let workflow = fs
        .read_file("/app/packages/acme/widgets/.github/workflows/tests.yml")
        .unwrap();
    assert!(workflow.contains("--ci --coverage --coverage-clover coverage.xml"));
    assert!(workflow.contains("codecov/codecov-action"));
}

#[test]
fn failed_testing_scaffold_is_rolled_back() {
    let fs = seeded_bare_package();
    fs.fail_on_write("tests/TestCase.php");

    assert!(
        service(&fs)
            .scaffold(&request("/app", false), &BlueprintKind::Testing(TestingFeatures::default()))
            .is_err()
    );

    assert!(!fs.exists(Path::new("/app/packages/acme/widgets/tests")));
    assert!(!fs.exists(Path::new("/app/packages/acme/widgets/phpunit.xml")));
    assert_eq!(
        fs.read_file("/app/packages/acme/widgets/composer.json").unwrap(),
        BARE_PACKAGE_MANIFEST
    );
}

// ============================================================================
// local filesystem
// ============================================================================

#[test]
fn package_and_link_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("composer.json"), PROJECT_MANIFEST).unwrap();

    let svc = ScaffoldService::new(
        Box::new(BuiltinBlueprints::new()),
        Box::new(SimpleRenderer::new()),
        Arc::new(LocalFilesystem::new()),
    );

    svc.scaffold(&request(dir.path(), true), &BlueprintKind::Package(PackageFeatures::default()))
        .unwrap();

    let package_manifest =
        std::fs::read_to_string(dir.path().join("packages/acme/widgets/composer.json")).unwrap();
    assert!(package_manifest.starts_with("{\n    \"name\": \"acme/widgets\",\n"));

    let root = std::fs::read_to_string(dir.path().join("composer.json")).unwrap();
    assert!(root.contains("\"options\": {\n                \"symlink\": true\n            }"));

    let package = PackageId::parse("acme/widgets").unwrap();
    assert_eq!(svc.link(dir.path(), &package).unwrap(), ManifestOutcome::Unchanged);
    assert_eq!(std::fs::read_to_string(dir.path().join("composer.json")).unwrap(), root);

    let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("packages/acme"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("widgets")]);
}

//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Derive names (and, for existing packages, read what they declare)
//! 2. Assemble and render the blueprint
//! 3. Write to the filesystem transactionally
//! 4. Patch the affected `composer.json`

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, Missing,
        ports::{BlueprintRenderer, BlueprintSource, Filesystem},
        services::manifest_service::{MANIFEST_FILE, ManifestOutcome, ManifestService},
    },
    domain::{
        Authorship, BlueprintKind, DomainValidator as validator, FsEntry, ManifestEdit,
        PackageId, PackageNames, ProjectStructure, RenderContext,
    },
    error::LarascaffResult,
};

/// Input to every scaffold use case.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    /// Laravel application root; packages live under `<root>/packages`.
    pub project_root: PathBuf,
    pub package: PackageId,
    pub authorship: Authorship,
    /// Register new packages in the project's `composer.json`.
    pub link: bool,
}

/// Everything a scaffold would do, computed without writing.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldPlan {
    pub blueprint: &'static str,
    pub package: String,
    pub php_namespace: String,
    pub target_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
    pub warnings: Vec<String>,
    #[serde(skip)]
    structure: ProjectStructure,
    #[serde(skip)]
    manifest_edits: Vec<ManifestEdit>,
}

/// Outcome of a completed scaffold.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub blueprint: &'static str,
    pub package: String,
    pub php_namespace: String,
    pub target_dir: PathBuf,
    pub created: Vec<PathBuf>,
    pub manifest: ManifestOutcome,
    pub manifest_path: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ScaffoldReport {
    fn from_plan(plan: ScaffoldPlan, manifest: ManifestOutcome, manifest_path: Option<PathBuf>) -> Self {
        Self {
            blueprint: plan.blueprint,
            package: plan.package,
            php_namespace: plan.php_namespace,
            target_dir: plan.target_dir,
            created: plan.files,
            manifest,
            manifest_path,
            warnings: plan.warnings,
        }
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    source: Box<dyn BlueprintSource>,
    renderer: Box<dyn BlueprintRenderer>,
    filesystem: Arc<dyn Filesystem>,
    manifests: ManifestService,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        source: Box<dyn BlueprintSource>,
        renderer: Box<dyn BlueprintRenderer>,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            source,
            renderer,
            manifests: ManifestService::new(Arc::clone(&filesystem)),
            filesystem,
        }
    }

    pub fn manifests(&self) -> &ManifestService {
        &self.manifests
    }

    /// Compute the files a scaffold would create. Writes nothing.
    ///
    /// For blueprints that extend an existing package this reads the
    /// package's `composer.json`, so a missing package fails here already.
    #[instrument(skip_all, fields(blueprint = %kind, package = %request.package))]
    pub fn plan(&self, request: &ScaffoldRequest, kind: &BlueprintKind) -> LarascaffResult<ScaffoldPlan> {
        let target_dir = request.package.directory_in(&request.project_root);
        let mut names = PackageNames::derive(&request.package);
        let mut warnings = Vec::new();
        let mut service_provider = None;

        if !kind.creates_package() {
            if !self.filesystem.exists(&target_dir) {
                return Err(ApplicationError::NotFound {
                    what: Missing::PackageDirectory,
                    path: target_dir,
                }
                .into());
            }

            let manifest_path = target_dir.join(MANIFEST_FILE);
            let manifest = self.manifests.load(&manifest_path, Missing::PackageManifest)?;

            match manifest.src_namespace() {
                Some(namespace) => names = names.with_php_namespace(namespace),
                None => warnings.push(format!(
                    "{} maps no PSR-4 namespace to src/, using {}",
                    manifest_path.display(),
                    names.php_namespace
                )),
            }

            if matches!(kind, BlueprintKind::Testing(_)) {
                service_provider =
                    Some(self.discover_service_provider(&target_dir, &names, &mut warnings)?);
            }
        }

        let php_namespace = names.php_namespace.clone();
        let mut context = RenderContext::new(names, request.authorship.clone());
        if let Some(provider) = service_provider {
            context = context.with_variable("SERVICE_PROVIDER", provider);
        }

        let blueprint = self.source.blueprint(kind, &context)?;
        validator::validate_blueprint(&blueprint)?;

        let structure = self.renderer.render(&blueprint, &context, &target_dir)?;
        validator::validate_project_structure(&structure)?;

        debug!(entries = structure.entry_count(), "Blueprint rendered");

        Ok(ScaffoldPlan {
            blueprint: kind.as_str(),
            package: request.package.full_name(),
            php_namespace,
            files: structure.file_paths(),
            directories: structure
                .directories()
                .map(|d| target_dir.join(&d.path))
                .collect(),
            target_dir,
            warnings,
            structure,
            manifest_edits: blueprint.manifest_edits,
        })
    }

    /// Run a scaffold to completion.
    ///
    /// Never overwrites: an existing package directory (for new packages) or
    /// an existing file (for extensions) aborts before anything is written.
    /// On failure, everything this call created is removed again.
    #[instrument(skip_all, fields(blueprint = %kind, package = %request.package))]
    pub fn scaffold(&self, request: &ScaffoldRequest, kind: &BlueprintKind) -> LarascaffResult<ScaffoldReport> {
        info!("Scaffolding {} {}", kind, request.package);

        let plan = self.plan(request, kind)?;
        for warning in &plan.warnings {
            warn!("{warning}");
        }

        let report = if kind.creates_package() {
            self.create_package(request, plan)?
        } else {
            self.extend_package(plan)?
        };

        info!(files = report.created.len(), manifest = %report.manifest, "Scaffold completed successfully");
        Ok(report)
    }

    /// Link an existing package into the project manifest.
    pub fn link(&self, project_root: &Path, package: &PackageId) -> LarascaffResult<ManifestOutcome> {
        self.manifests.link(project_root, package)
    }

    // -------------------------------------------------------------------------
    // New packages
    // -------------------------------------------------------------------------

    fn create_package(&self, request: &ScaffoldRequest, plan: ScaffoldPlan) -> LarascaffResult<ScaffoldReport> {
        let target = plan.target_dir.clone();

        if self.filesystem.exists(&target) {
            return Err(ApplicationError::AlreadyExists { path: target }.into());
        }

        let project_manifest = request.project_root.join(MANIFEST_FILE);
        if request.link {
            self.manifests.check_link(&request.project_root, &request.package)?;
        }

        let staging = staging_dir_for(&target);
        // `packages/` and `packages/<vendor>/` may not exist yet
        let created_parent = target
            .parent()
            .and_then(|parent| self.outermost_missing(parent, &request.project_root));
        debug!(staging = %staging.display(), "Staging package");

        let committed = self
            .write_structure(&plan.structure.rebased(&staging))
            .and_then(|()| self.filesystem.rename(&staging, &target));

        if let Err(e) = committed {
            warn!(error = %e, "Write failed, attempting rollback");
            self.discard_dir(created_parent.as_deref().unwrap_or(&staging));
            return Err(e);
        }

        let manifest = if request.link {
            match self.manifests.link(&request.project_root, &request.package) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(error = %e, "Linking failed, removing package");
                    self.discard_dir(created_parent.as_deref().unwrap_or(&target));
                    return Err(e);
                }
            }
        } else {
            ManifestOutcome::Skipped
        };

        let manifest_path = request.link.then_some(project_manifest);
        Ok(ScaffoldReport::from_plan(plan, manifest, manifest_path))
    }

    /// Outermost missing ancestor of `dir` that still lies below `root`.
    fn outermost_missing(&self, dir: &Path, root: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .take_while(|ancestor| {
                *ancestor != root && ancestor.starts_with(root) && !self.filesystem.exists(ancestor)
            })
            .last()
            .map(Path::to_path_buf)
    }

    fn write_structure(&self, structure: &ProjectStructure) -> LarascaffResult<()> {
        self.filesystem.create_dir_all(structure.root())?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&structure.root().join(&dir.path))?;
                }
                FsEntry::File(file) => {
                    let path = structure.root().join(&file.path);
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.write_file(&path, &file.content)?;
                }
            }
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Existing packages
    // -------------------------------------------------------------------------

    fn extend_package(&self, plan: ScaffoldPlan) -> LarascaffResult<ScaffoldReport> {
        if let Some(existing) = plan.files.iter().find(|path| self.filesystem.exists(path)) {
            return Err(ApplicationError::AlreadyExists {
                path: existing.clone(),
            }
            .into());
        }

        let manifest_path = plan.target_dir.join(MANIFEST_FILE);
        let mut created = Created::default();

        let result = self.write_tracked(&plan.structure, &mut created).and_then(|()| {
            self.manifests
                .update(&manifest_path, Missing::PackageManifest, |manifest| {
                    manifest.apply_all(&plan.manifest_edits)
                })
        });

        match result {
            Ok(outcome) => Ok(ScaffoldReport::from_plan(plan, outcome, Some(manifest_path))),
            Err(e) => {
                warn!(error = %e, "Scaffold failed, attempting rollback");
                self.undo(&created);
                Err(e)
            }
        }
    }

    fn write_tracked(&self, structure: &ProjectStructure, created: &mut Created) -> LarascaffResult<()> {
        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.ensure_dir(&structure.root().join(&dir.path), created)?;
                }
                FsEntry::File(file) => {
                    let path = structure.root().join(&file.path);
                    if let Some(parent) = path.parent() {
                        self.ensure_dir(parent, created)?;
                    }
                    self.filesystem.write_file(&path, &file.content)?;
                    created.files.push(path);
                }
            }
        }
        Ok(())
    }

    /// Create `dir`, remembering the outermost directory that did not exist
    /// before.
    fn ensure_dir(&self, dir: &Path, created: &mut Created) -> LarascaffResult<()> {
        let outermost_missing = dir
            .ancestors()
            .take_while(|ancestor| !self.filesystem.exists(ancestor))
            .last()
            .map(Path::to_path_buf);

        if let Some(outermost) = outermost_missing {
            self.filesystem.create_dir_all(dir)?;
            created.dirs.push(outermost);
        }
        Ok(())
    }

    fn discover_service_provider(
        &self,
        package_dir: &Path,
        names: &PackageNames,
        warnings: &mut Vec<String>,
    ) -> LarascaffResult<String> {
        let src = package_dir.join("src");
        let found = if self.filesystem.exists(&src) {
            self.filesystem
                .list_files(&src)?
                .iter()
                .filter(|path| {
                    path.file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.ends_with("ServiceProvider.php"))
                })
                .find_map(|path| path.file_stem().and_then(|stem| stem.to_str()).map(String::from))
        } else {
            None
        };

        Ok(found.unwrap_or_else(|| {
            let derived = format!("{}ServiceProvider", names.class_name);
            warnings.push(format!(
                "No *ServiceProvider.php found in {}, assuming {}",
                src.display(),
                derived
            ));
            derived
        }))
    }

    // -------------------------------------------------------------------------
    // Rollback
    // -------------------------------------------------------------------------

    fn discard_dir(&self, dir: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(dir) {
            let e = ApplicationError::RollbackFailed {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            };
            warn!(error = %e, "Rollback failed");
        } else {
            info!(path = %dir.display(), "Rollback successful");
        }
    }

    fn undo(&self, created: &Created) {
        let loose_files = created
            .files
            .iter()
            .rev()
            .filter(|file| !created.dirs.iter().any(|dir| file.starts_with(dir)));

        for file in loose_files {
            if let Err(e) = self.filesystem.remove_file(file) {
                warn!(error = %e, path = %file.display(), "Rollback failed");
            }
        }
        for dir in created.dirs.iter().rev() {
            self.discard_dir(dir);
        }
    }
}

/// Paths created by one extend invocation.
#[derive(Debug, Default)]
struct Created {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

/// Hidden sibling of `target` that a new package is written into before
/// being renamed into place.
fn staging_dir_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staged = format!(".{}.staging-{}", name, Uuid::new_v4().simple());
    match target.parent() {
        Some(parent) => parent.join(staged),
        None => PathBuf::from(staged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{
        MockBlueprintRenderer, MockBlueprintSource, MockFilesystem,
    };
    use crate::domain::{Blueprint, PackageFeatures, RelativePath, TestingFeatures};
    use crate::error::LarascaffError;

    fn request(link: bool) -> ScaffoldRequest {
        ScaffoldRequest {
            project_root: PathBuf::from("/app"),
            package: PackageId::parse("acme/widgets").unwrap(),
            authorship: Authorship::placeholder(2026),
            link,
        }
    }

    fn readme_source() -> MockBlueprintSource {
        let mut source = MockBlueprintSource::new();
        source.expect_blueprint().returning(|kind, _| {
            Blueprint::builder(kind.as_str())
                .template("README.md", "# {{PACKAGE_FULL}}")
                .build()
                .map_err(Into::into)
        });
        source
    }

    fn readme_renderer() -> MockBlueprintRenderer {
        let mut renderer = MockBlueprintRenderer::new();
        renderer.expect_render().returning(|_, context, root| {
            Ok(ProjectStructure::new(root).with_file(
                RelativePath::try_new("README.md").unwrap(),
                context.render("# {{PACKAGE_FULL}} {{SERVICE_PROVIDER}}"),
            ))
        });
        renderer
    }

    fn service(fs: MockFilesystem) -> ScaffoldService {
        ScaffoldService::new(
            Box::new(readme_source()),
            Box::new(readme_renderer()),
            Arc::new(fs),
        )
    }

    #[test]
    fn plan_for_new_package_reads_nothing() {
        let fs = MockFilesystem::new();
        let plan = service(fs)
            .plan(&request(true), &BlueprintKind::Package(PackageFeatures::default()))
            .unwrap();

        assert_eq!(plan.blueprint, "package");
        assert_eq!(plan.php_namespace, "Acme\\Widgets");
        assert_eq!(plan.target_dir, PathBuf::from("/app/packages/acme/widgets"));
        assert_eq!(
            plan.files,
            vec![PathBuf::from("/app/packages/acme/widgets/README.md")]
        );
    }

    #[test]
    fn refuses_existing_package_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|path| path == Path::new("/app/packages/acme/widgets"))
            .returning(|_| true);
        // no write expectations: any write fails the test

        let err = service(fs)
            .scaffold(&request(false), &BlueprintKind::Package(PackageFeatures::default()))
            .unwrap_err();

        assert!(matches!(
            err,
            LarascaffError::Application(ApplicationError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn missing_project_manifest_aborts_before_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let err = service(fs)
            .scaffold(&request(true), &BlueprintKind::Package(PackageFeatures::default()))
            .unwrap_err();

        assert!(matches!(
            err,
            LarascaffError::Application(ApplicationError::NotFound {
                what: Missing::ProjectManifest,
                ..
            })
        ));
    }

    #[test]
    fn failed_write_discards_staging_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|path| path == Path::new("/app/packages/acme"));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(".widgets.staging-"))
            })
            .times(1)
            .returning(|_| Ok(()));

        let err = service(fs)
            .scaffold(&request(false), &BlueprintKind::Package(PackageFeatures::default()))
            .unwrap_err();

        assert!(matches!(
            err,
            LarascaffError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn failed_write_discards_the_packages_tree_it_created() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|path| path == Path::new("/app/packages"))
            .times(1)
            .returning(|_| Ok(()));

        assert!(
            service(fs)
                .scaffold(&request(false), &BlueprintKind::Package(PackageFeatures::default()))
                .is_err()
        );
    }

    #[test]
    fn unlinkable_project_manifest_aborts_before_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|path| path == Path::new("/app/composer.json"));
        fs.expect_read_to_string()
            .returning(|_| Ok(r#"{"require": []}"#.to_string()));
        // no write expectations: any write fails the test

        let err = service(fs)
            .scaffold(&request(true), &BlueprintKind::Package(PackageFeatures::default()))
            .unwrap_err();

        assert!(matches!(
            err,
            LarascaffError::Application(ApplicationError::InvalidManifestFile { .. })
        ));
    }

    #[test]
    fn extending_requires_the_package_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let err = service(fs)
            .plan(&request(false), &BlueprintKind::Workbench)
            .unwrap_err();

        assert!(matches!(
            err,
            LarascaffError::Application(ApplicationError::NotFound {
                what: Missing::PackageDirectory,
                ..
            })
        ));
    }

    #[test]
    fn testing_plan_uses_declared_namespace_and_discovered_provider() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_to_string().returning(|_| {
            Ok(r#"{"autoload": {"psr-4": {"Acme\\Gadgets\\": "src/"}}}"#.to_string())
        });
        fs.expect_list_files().returning(|dir| {
            Ok(vec![
                dir.join("Gadgets.php"),
                dir.join("GadgetsServiceProvider.php"),
            ])
        });

        let plan = service(fs)
            .plan(&request(false), &BlueprintKind::Testing(TestingFeatures::default()))
            .unwrap();

        assert_eq!(plan.php_namespace, "Acme\\Gadgets");
        assert!(plan.warnings.is_empty());
        let readme = &plan.structure.files().next().unwrap().content;
        assert!(readme.ends_with("GadgetsServiceProvider"));
    }

    #[test]
    fn testing_plan_warns_when_nothing_is_declared() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|path| !path.ends_with("src"));
        fs.expect_read_to_string()
            .returning(|_| Ok("{}".to_string()));

        let plan = service(fs)
            .plan(&request(false), &BlueprintKind::Testing(TestingFeatures::default()))
            .unwrap();

        assert_eq!(plan.php_namespace, "Acme\\Widgets");
        assert_eq!(plan.warnings.len(), 2);
        let readme = &plan.structure.files().next().unwrap().content;
        assert!(readme.ends_with("WidgetsServiceProvider"));
    }

    #[test]
    fn staging_dir_is_a_hidden_sibling() {
        let staging = staging_dir_for(Path::new("/app/packages/acme/widgets"));
        assert_eq!(staging.parent(), Some(Path::new("/app/packages/acme")));
        assert!(
            staging
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(".widgets.staging-")
        );
    }
}

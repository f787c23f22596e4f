//! Manifest Service - locked read-modify-write of `composer.json` files.

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, Missing, ports::Filesystem},
    domain::{DomainError, Manifest, PackageId},
    error::LarascaffResult,
};

/// File name of a Composer manifest.
pub const MANIFEST_FILE: &str = "composer.json";

/// What happened to a manifest during an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestOutcome {
    Updated,
    Unchanged,
    /// No manifest edit was requested (e.g. `--no-link`).
    Skipped,
}

impl std::fmt::Display for ManifestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Skipped => "skipped",
        })
    }
}

pub struct ManifestService {
    filesystem: Arc<dyn Filesystem>,
}

impl ManifestService {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Read and parse a manifest without locking it.
    pub fn load(&self, path: &Path, missing: Missing) -> LarascaffResult<Manifest> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::NotFound {
                what: missing,
                path: path.to_path_buf(),
            }
            .into());
        }

        let text = self.filesystem.read_to_string(path)?;
        Manifest::parse(&text).map_err(|e| invalid_manifest(path, e))
    }

    /// Edit a manifest under its exclusive lock.
    ///
    /// `edit` reports whether it changed the document; the file is only
    /// rewritten when it did.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn update<F>(&self, path: &Path, missing: Missing, edit: F) -> LarascaffResult<ManifestOutcome>
    where
        F: FnOnce(&mut Manifest) -> Result<bool, DomainError>,
    {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::NotFound {
                what: missing,
                path: path.to_path_buf(),
            }
            .into());
        }

        let _lock = self.filesystem.lock_exclusive(path)?;

        let mut manifest = self.load(path, missing)?;
        let changed = edit(&mut manifest).map_err(|e| invalid_manifest(path, e))?;

        if !changed {
            debug!("Manifest already up to date");
            return Ok(ManifestOutcome::Unchanged);
        }

        let text = manifest.to_pretty_string()?;
        self.filesystem.write_file(path, &text)?;

        info!("Manifest updated");
        Ok(ManifestOutcome::Updated)
    }

    /// Register `package` as a path repository of the project at
    /// `project_root` and require it at `@dev`.
    #[instrument(skip_all, fields(package = %package))]
    /// Dry-run [`Self::link`] on an in-memory copy, so a manifest that could
    /// not take the path dependency is rejected before anything is written.
    pub fn check_link(&self, project_root: &Path, package: &PackageId) -> LarascaffResult<()> {
        let path = project_root.join(MANIFEST_FILE);
        let mut manifest = self.load(&path, Missing::ProjectManifest)?;
        manifest
            .add_path_dependency(package)
            .map(|_| ())
            .map_err(|e| invalid_manifest(&path, e))
    }

    pub fn link(&self, project_root: &Path, package: &PackageId) -> LarascaffResult<ManifestOutcome> {
        let path = project_root.join(MANIFEST_FILE);
        self.update(&path, Missing::ProjectManifest, |manifest| {
            manifest.add_path_dependency(package)
        })
    }
}

pub(crate) fn invalid_manifest(path: &Path, error: DomainError) -> crate::error::LarascaffError {
    let reason = match error {
        DomainError::InvalidManifest { reason } => reason,
        other => other.to_string(),
    };
    ApplicationError::InvalidManifestFile {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FileLock;
    use crate::application::ports::output::MockFilesystem;
    use crate::error::LarascaffError;

    const PROJECT_MANIFEST: &str = "/app/composer.json";

    fn existing_manifest(content: &'static str) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_lock_exclusive()
            .times(1)
            .returning(|_| Ok(FileLock::new(())));
        fs.expect_read_to_string()
            .returning(move |_| Ok(content.to_string()));
        fs
    }

    fn acme_widgets() -> PackageId {
        PackageId::parse("acme/widgets").unwrap()
    }

    #[test]
    fn link_writes_path_repository_and_requirement() {
        let mut fs = existing_manifest("{\n    \"name\": \"laravel/laravel\"\n}\n");
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new(PROJECT_MANIFEST)
                    && content.contains("\"url\": \"packages/acme/widgets\"")
                    && content.contains("\"acme/widgets\": \"@dev\"")
                    && content.ends_with("}\n")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ManifestService::new(Arc::new(fs));
        let outcome = service.link(Path::new("/app"), &acme_widgets()).unwrap();

        assert_eq!(outcome, ManifestOutcome::Updated);
    }

    #[test]
    fn link_is_a_no_op_when_already_linked() {
        let fs = existing_manifest(
            r#"{
    "repositories": [
        {"type": "path", "url": "packages/acme/widgets", "options": {"symlink": true}}
    ],
    "require": {"acme/widgets": "@dev"}
}"#,
        );
        // no write_file expectation: any write fails the test

        let service = ManifestService::new(Arc::new(fs));
        let outcome = service.link(Path::new("/app"), &acme_widgets()).unwrap();

        assert_eq!(outcome, ManifestOutcome::Unchanged);
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let service = ManifestService::new(Arc::new(fs));
        let err = service.link(Path::new("/app"), &acme_widgets()).unwrap_err();

        assert!(matches!(
            err,
            LarascaffError::Application(ApplicationError::NotFound {
                what: Missing::ProjectManifest,
                ..
            })
        ));
    }

    #[test]
    fn malformed_manifest_is_reported_with_its_path() {
        let fs = existing_manifest("[1, 2, 3]");

        let service = ManifestService::new(Arc::new(fs));
        let err = service.link(Path::new("/app"), &acme_widgets()).unwrap_err();

        match err {
            LarascaffError::Application(ApplicationError::InvalidManifestFile { path, reason }) => {
                assert_eq!(path, Path::new(PROJECT_MANIFEST));
                assert!(reason.contains("top level must be an object"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrongly_typed_region_is_rejected_without_writing() {
        let fs = existing_manifest(r#"{"repositories": "nope"}"#);

        let service = ManifestService::new(Arc::new(fs));
        let err = service.link(Path::new("/app"), &acme_widgets()).unwrap_err();

        assert!(matches!(
            err,
            LarascaffError::Application(ApplicationError::InvalidManifestFile { .. })
        ));
    }

    #[test]
    fn update_keeps_missing_trailing_newline() {
        let mut fs = existing_manifest("{}");
        fs.expect_write_file()
            .withf(|_, content| content.ends_with('}'))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ManifestService::new(Arc::new(fs));
        let outcome = service
            .update(Path::new("/pkg/composer.json"), Missing::PackageManifest, |m| {
                m.apply(&crate::domain::ManifestEdit::allow_plugin("pestphp/pest-plugin"))
            })
            .unwrap();

        assert_eq!(outcome, ManifestOutcome::Updated);
    }

    #[test]
    fn outcome_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ManifestOutcome::Skipped).unwrap(),
            "\"skipped\""
        );
    }
}

//! `composer.json` documents and idempotent merges into them.
//!
//! A [`Manifest`] wraps the top-level JSON object and keeps its key order
//! (serde_json is built with `preserve_order`), so writing an untouched
//! document back reproduces it. Every mutation reports whether it changed
//! anything; callers only write when it did.
//!
//! ## Regions
//!
//! | Region                  | Shape                         | Uniqueness key |
//! |-------------------------|-------------------------------|----------------|
//! | `repositories`          | array of `{type,url,options}` | `url`          |
//! | `require`/`require-dev` | object name → constraint      | name           |
//! | `autoload-dev.psr-4`    | object namespace → path       | namespace      |
//! | `scripts`               | object name → command(s)      | name           |
//! | `config.allow-plugins`  | object plugin → bool          | plugin         |
//!
//! A region that exists with the wrong shape is reported as
//! [`DomainError::InvalidManifest`]; it is never replaced.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::domain::{entities::package::PackageId, error::DomainError};

/// Constraint recorded for path dependencies.
pub const PATH_CONSTRAINT: &str = "@dev";

/// How an edit treats a key that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Only add the key when it is absent.
    Insert,
    /// Set the key, replacing any existing value.
    Overwrite,
}

/// Dependency sections of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencySection {
    Require,
    RequireDev,
}

impl DependencySection {
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::RequireDev => "require-dev",
        }
    }
}

/// One declarative change to a manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestEdit {
    Requirement {
        section: DependencySection,
        package: String,
        constraint: String,
        mode: EditMode,
    },
    /// `autoload-dev.psr-4` mapping.
    DevAutoload {
        namespace: String,
        path: String,
        mode: EditMode,
    },
    Script {
        name: String,
        command: Value,
        mode: EditMode,
    },
    /// `config.allow-plugins.<plugin> = true`.
    AllowPlugin { plugin: String },
}

impl ManifestEdit {
    pub fn require_dev(package: &str, constraint: &str, mode: EditMode) -> Self {
        Self::Requirement {
            section: DependencySection::RequireDev,
            package: package.to_string(),
            constraint: constraint.to_string(),
            mode,
        }
    }

    pub fn dev_autoload(namespace: &str, path: &str, mode: EditMode) -> Self {
        Self::DevAutoload {
            namespace: namespace.to_string(),
            path: path.to_string(),
            mode,
        }
    }

    pub fn script(name: &str, command: impl Into<Value>, mode: EditMode) -> Self {
        Self::Script {
            name: name.to_string(),
            command: command.into(),
            mode,
        }
    }

    pub fn allow_plugin(plugin: &str) -> Self {
        Self::AllowPlugin {
            plugin: plugin.to_string(),
        }
    }
}

/// A parsed `composer.json` document.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    document: Map<String, Value>,
    trailing_newline: bool,
}

impl Manifest {
    /// Parse manifest text. The top level must be a JSON object.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(text).map_err(|e| DomainError::InvalidManifest {
            reason: format!("not valid JSON: {e}"),
        })?;
        let mut manifest = Self::from_value(value)?;
        manifest.trailing_newline = text.ends_with('\n');
        Ok(manifest)
    }

    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(document) => Ok(Self {
                document,
                trailing_newline: true,
            }),
            other => Err(DomainError::InvalidManifest {
                reason: format!("top level must be an object, found {}", kind_of(&other)),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.document)
    }

    /// Register `package` as a symlinked path repository and require it at
    /// `@dev`.
    ///
    /// Existing repository records with the same `url` and an existing
    /// `require` key are left untouched. Returns whether anything changed.
    pub fn add_path_dependency(&mut self, package: &PackageId) -> Result<bool, DomainError> {
        let url = package.repository_url();
        let mut changed = false;

        let repositories = array_entry(&mut self.document, "repositories")?;
        let registered = repositories
            .iter()
            .filter_map(Value::as_object)
            .any(|record| record.get("url").and_then(Value::as_str) == Some(url.as_str()));
        if !registered {
            repositories.push(json!({
                "type": "path",
                "url": url,
                "options": { "symlink": true },
            }));
            changed = true;
        }

        let require = object_entry(&mut self.document, DependencySection::Require.key())?;
        changed |= set_key(
            require,
            package.full_name(),
            Value::from(PATH_CONSTRAINT),
            EditMode::Insert,
        );

        Ok(changed)
    }

    /// Apply one edit. Returns whether the document changed.
    pub fn apply(&mut self, edit: &ManifestEdit) -> Result<bool, DomainError> {
        let changed = match edit {
            ManifestEdit::Requirement {
                section,
                package,
                constraint,
                mode,
            } => set_key(
                object_entry(&mut self.document, section.key())?,
                package.clone(),
                Value::from(constraint.as_str()),
                *mode,
            ),
            ManifestEdit::DevAutoload {
                namespace,
                path,
                mode,
            } => {
                let autoload = object_entry(&mut self.document, "autoload-dev")?;
                set_key(
                    object_entry(autoload, "psr-4")?,
                    namespace.clone(),
                    Value::from(path.as_str()),
                    *mode,
                )
            }
            ManifestEdit::Script {
                name,
                command,
                mode,
            } => set_key(
                object_entry(&mut self.document, "scripts")?,
                name.clone(),
                command.clone(),
                *mode,
            ),
            ManifestEdit::AllowPlugin { plugin } => {
                let config = object_entry(&mut self.document, "config")?;
                set_key(
                    object_entry(config, "allow-plugins")?,
                    plugin.clone(),
                    Value::Bool(true),
                    EditMode::Overwrite,
                )
            }
        };
        Ok(changed)
    }

    /// Apply edits in order. Returns whether any of them changed the document.
    pub fn apply_all<'a>(
        &mut self,
        edits: impl IntoIterator<Item = &'a ManifestEdit>,
    ) -> Result<bool, DomainError> {
        let mut changed = false;
        for edit in edits {
            changed |= self.apply(edit)?;
        }
        Ok(changed)
    }

    /// Namespace mapped to `src/` in `autoload.psr-4`, without the trailing
    /// separator.
    pub fn src_namespace(&self) -> Option<String> {
        self.document
            .get("autoload")?
            .get("psr-4")?
            .as_object()?
            .iter()
            .find(|(_, path)| matches!(path.as_str(), Some("src/" | "src")))
            .map(|(namespace, _)| namespace.trim_end_matches('\\').to_string())
    }

    /// Serialise with 4-space indentation and the source's trailing newline
    /// convention.
    pub fn to_pretty_string(&self) -> Result<String, DomainError> {
        let mut text = to_pretty_json(&self.document, b"    ")?;
        if self.trailing_newline {
            text.push('\n');
        }
        Ok(text)
    }
}

/// Pretty-print any serialisable value with the given indent.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T, indent: &[u8]) -> Result<String, DomainError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| DomainError::InvalidManifest {
            reason: format!("serialisation failed: {e}"),
        })?;
    String::from_utf8(buffer).map_err(|e| DomainError::InvalidManifest {
        reason: format!("serialisation produced invalid UTF-8: {e}"),
    })
}

fn set_key(map: &mut Map<String, Value>, key: String, value: Value, mode: EditMode) -> bool {
    let unchanged = match map.get(&key) {
        Some(_) if mode == EditMode::Insert => true,
        Some(existing) => *existing == value,
        None => false,
    };
    if unchanged {
        return false;
    }
    map.insert(key, value);
    true
}

fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>, DomainError> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let kind = kind_of(entry);
    entry.as_object_mut().ok_or_else(|| DomainError::InvalidManifest {
        reason: format!("'{key}' must be an object, found {kind}"),
    })
}

fn array_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Vec<Value>, DomainError> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    let kind = kind_of(entry);
    entry.as_array_mut().ok_or_else(|| DomainError::InvalidManifest {
        reason: format!("'{key}' must be an array, found {kind}"),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

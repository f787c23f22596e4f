//! Blueprint domain model and placeholder rendering.
//!
//! A blueprint is the declarative description of one scaffold: which
//! directories and files to create, the blueprint-local variables its
//! templates refer to, and the manifest edits that accompany it.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Blueprint                                               │
//! │  ├── name            "package", "plugin", ...            │
//! │  ├── nodes           Vec<BlueprintNode>                  │
//! │  │    ├── FileSpec (path, TemplateContent)               │
//! │  │    └── DirectorySpec (path)                           │
//! │  ├── variables       blueprint-local {{KEY}} values      │
//! │  └── manifest_edits  Vec<ManifestEdit>                   │
//! ├──────────────────────────────────────────────────────────┤
//! │  RenderContext                                           │
//! │  └── {{CLASS_NAME}} -> "Widgets"                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Paths are kept as strings until rendering because they may contain
//! placeholders (`src/{{CLASS_NAME}}ServiceProvider.php`); the renderer
//! validates the result as a [`RelativePath`](super::common::RelativePath).

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use crate::domain::{
    entities::{
        manifest::ManifestEdit,
        package::{Authorship, PackageNames},
    },
    error::DomainError,
};

/// Context for template rendering.
///
/// ## Built-in Variables
///
/// | Variable        | Example                  |
/// |-----------------|--------------------------|
/// | `VENDOR`        | `acme`                   |
/// | `PACKAGE`       | `widgets`                |
/// | `PACKAGE_FULL`  | `acme/widgets`           |
/// | `CLASS_NAME`    | `Widgets`                |
/// | `PHP_NAMESPACE` | `Acme\Widgets`           |
/// | `ENV_PREFIX`    | `WIDGETS`                |
/// | `PACKAGE_SNAKE` | `widgets`                |
/// | `AUTHOR_NAME`   | `Author Name`            |
/// | `AUTHOR_EMAIL`  | `author@example.com`     |
/// | `YEAR`          | `2026`                   |
#[derive(Debug, Clone)]
pub struct RenderContext {
    names: PackageNames,
    author: Authorship,
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new(names: PackageNames, author: Authorship) -> Self {
        let variables = [
            ("VENDOR", names.vendor.clone()),
            ("PACKAGE", names.package.clone()),
            ("PACKAGE_FULL", names.full_name.clone()),
            ("CLASS_NAME", names.class_name.clone()),
            ("PHP_NAMESPACE", names.php_namespace.clone()),
            ("ENV_PREFIX", names.env_prefix.clone()),
            ("PACKAGE_SNAKE", names.snake.clone()),
            ("AUTHOR_NAME", author.name.clone()),
            ("AUTHOR_EMAIL", author.email.clone()),
            ("YEAR", author.year.to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

        Self {
            names,
            author,
            variables,
        }
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn with_variables<'a>(
        mut self,
        variables: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        for (key, value) in variables {
            self.variables.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn names(&self) -> &PackageNames {
        &self.names
    }

    pub fn author(&self) -> &Authorship {
        &self.author
    }

    /// Replace `{{KEY}}` placeholders with known variables.
    ///
    /// Single left-to-right scan:
    ///
    /// - `{{UNKNOWN}}`, `{{ blade }}`, `${{ matrix.os }}` stay literal
    /// - substituted values are not scanned again
    /// - `{{{CLASS_NAME}}}` keeps the outer braces around the value
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let value = after
                .find("}}")
                .and_then(|end| self.variables.get(&after[..end]).map(|v| (end, v)));

            match value {
                Some((end, value)) => {
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    out.push('{');
                    rest = &rest[start + 1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

// ============================================================================
// Blueprint aggregate
// ============================================================================

/// Declarative description of one scaffold.
#[derive(Debug, Clone)]
pub struct Blueprint {
    pub name: &'static str,
    pub nodes: Vec<BlueprintNode>,
    pub variables: BTreeMap<String, String>,
    pub manifest_edits: Vec<ManifestEdit>,
}

impl Blueprint {
    pub fn builder(name: &'static str) -> BlueprintBuilder {
        BlueprintBuilder {
            blueprint: Blueprint {
                name,
                nodes: Vec::new(),
                variables: BTreeMap::new(),
                manifest_edits: Vec::new(),
            },
        }
    }

    /// Check the blueprint is non-empty and declares no path twice.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.nodes.is_empty() {
            return Err(DomainError::EmptyBlueprint {
                name: self.name.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.path()) {
                return Err(DomainError::DuplicatePath {
                    path: node.path().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileSpec> {
        self.nodes.iter().filter_map(|n| match n {
            BlueprintNode::File(f) => Some(f),
            BlueprintNode::Directory(_) => None,
        })
    }
}

/// Fluent construction of a [`Blueprint`].
#[derive(Debug)]
pub struct BlueprintBuilder {
    blueprint: Blueprint,
}

impl BlueprintBuilder {
    pub fn directory(mut self, path: impl Into<String>) -> Self {
        self.blueprint
            .nodes
            .push(BlueprintNode::Directory(DirectorySpec { path: path.into() }));
        self
    }

    /// Empty directory kept in version control with a `.gitkeep` file.
    pub fn keep(self, dir: &str) -> Self {
        self.file(format!("{dir}/.gitkeep"), TemplateContent::Literal("".into()))
    }

    pub fn file(mut self, path: impl Into<String>, content: TemplateContent) -> Self {
        self.blueprint.nodes.push(BlueprintNode::File(FileSpec {
            path: path.into(),
            content,
        }));
        self
    }

    /// File whose content contains `{{VARIABLE}}` placeholders.
    pub fn template(self, path: impl Into<String>, source: impl Into<TemplateSource>) -> Self {
        self.file(path, TemplateContent::Parameterized(source.into()))
    }

    /// File copied verbatim.
    pub fn literal(self, path: impl Into<String>, source: impl Into<TemplateSource>) -> Self {
        self.file(path, TemplateContent::Literal(source.into()))
    }

    /// Conditionally apply further builder steps.
    pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition { f(self) } else { self }
    }

    pub fn variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.blueprint.variables.insert(key.into(), value.into());
        self
    }

    pub fn manifest_edit(mut self, edit: ManifestEdit) -> Self {
        self.blueprint.manifest_edits.push(edit);
        self
    }

    pub fn build(self) -> Result<Blueprint, DomainError> {
        self.blueprint.validate()?;
        Ok(self.blueprint)
    }
}

/// A single node of a blueprint: a file or a directory.
#[derive(Debug, Clone)]
pub enum BlueprintNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl BlueprintNode {
    pub fn path(&self) -> &str {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileSpec {
    /// Path relative to the target directory; may contain placeholders.
    pub path: String,
    pub content: TemplateContent,
}

#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub path: String,
}

// ============================================================================
// Content Types
// ============================================================================

/// Content specification for a file.
///
/// `Literal` skips the renderer entirely; `Parameterized` is passed through
/// [`RenderContext::render`].
#[derive(Debug, Clone)]
pub enum TemplateContent {
    Literal(TemplateSource),
    Parameterized(TemplateSource),
}

/// Compile-time (`include_str!`) or generated content.
#[derive(Debug, Clone)]
pub struct TemplateSource(Cow<'static, str>);

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

//! Domain value objects: feature sets and blueprint kinds.
//!
//! # Design
//!
//! These are plain value types with equality-by-value and no identity.
//! Each feature set is the boolean switchboard of one command; a
//! [`BlueprintKind`] pairs a blueprint with the features it was asked for.

use crate::domain::{error::DomainError, naming::to_pascal_case};
use serde::Serialize;
use std::fmt;

// ── Package ──────────────────────────────────────────────────────────────────

/// Optional parts of a plain Laravel package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PackageFeatures {
    pub routes: bool,
    pub views: bool,
    pub migrations: bool,
    pub commands: bool,
    pub playwright: bool,
}

impl PackageFeatures {
    /// Routes, views, migrations and commands. Playwright stays opt-in.
    pub const fn all() -> Self {
        Self {
            routes: true,
            views: true,
            migrations: true,
            commands: true,
            playwright: false,
        }
    }

    /// `self` with every feature enabled in `other` switched on too.
    pub const fn union(self, other: Self) -> Self {
        Self {
            routes: self.routes || other.routes,
            views: self.views || other.views,
            migrations: self.migrations || other.migrations,
            commands: self.commands || other.commands,
            playwright: self.playwright || other.playwright,
        }
    }
}

// ── Filament plugin ──────────────────────────────────────────────────────────

/// A Filament resource class name derived from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let class = to_pascal_case(input.trim());
        let valid = class
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && class.chars().all(|c| c.is_ascii_alphanumeric());

        if !valid {
            return Err(DomainError::InvalidFeature {
                feature: "--with-resource",
                reason: format!("'{input}' is not a valid PHP class name"),
            });
        }
        Ok(Self(class))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional parts of a Filament panel plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginFeatures {
    pub resource: Option<ResourceName>,
    pub page: bool,
    pub widget: bool,
    pub pest: bool,
}

impl Default for PluginFeatures {
    fn default() -> Self {
        Self {
            resource: None,
            page: false,
            widget: false,
            pest: true,
        }
    }
}

// ── Testing harness ──────────────────────────────────────────────────────────

/// Optional parts of the Pest/Testbench harness added to an existing package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TestingFeatures {
    pub coverage: bool,
    pub ci: bool,
}

// ── Blueprint kinds ──────────────────────────────────────────────────────────

/// Which blueprint to scaffold, with its feature switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BlueprintKind {
    Package(PackageFeatures),
    Plugin(PluginFeatures),
    Workbench,
    Testing(TestingFeatures),
}

impl BlueprintKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Package(_) => "package",
            Self::Plugin(_) => "plugin",
            Self::Workbench => "workbench",
            Self::Testing(_) => "testing",
        }
    }

    /// Whether the blueprint creates the package directory (as opposed to
    /// extending one that already exists).
    pub const fn creates_package(&self) -> bool {
        matches!(self, Self::Package(_) | Self::Plugin(_))
    }
}

impl fmt::Display for BlueprintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_leaves_playwright_off() {
        let all = PackageFeatures::all();
        assert!(all.routes && all.views && all.migrations && all.commands);
        assert!(!all.playwright);
    }

    #[test]
    fn union_keeps_explicit_flags() {
        let explicit = PackageFeatures {
            playwright: true,
            ..Default::default()
        };
        let merged = explicit.union(PackageFeatures::all());
        assert!(merged.playwright && merged.routes);
    }

    #[test]
    fn resource_names_are_pascal_cased() {
        assert_eq!(ResourceName::parse("blog-post").unwrap().as_str(), "BlogPost");
        assert_eq!(ResourceName::parse("Post").unwrap().as_str(), "Post");
    }

    #[test]
    fn resource_names_must_be_php_identifiers() {
        assert!(ResourceName::parse("").is_err());
        assert!(ResourceName::parse("9lives").is_err());
        assert!(ResourceName::parse("post.php").is_err());
    }

    #[test]
    fn plugin_features_default_to_pest() {
        assert!(PluginFeatures::default().pest);
    }

    #[test]
    fn blueprint_kind_names() {
        assert_eq!(BlueprintKind::Workbench.to_string(), "workbench");
        assert!(BlueprintKind::Package(PackageFeatures::default()).creates_package());
        assert!(!BlueprintKind::Testing(TestingFeatures::default()).creates_package());
    }
}

//! Package identity and the names derived from it.
//!
//! A [`PackageId`] is the validated `vendor/name` pair a user types on the
//! command line. [`PackageNames`] holds everything generated code needs to
//! refer to the package:
//!
//! | Field           | `acme-corp/filament-blog`  |
//! |-----------------|----------------------------|
//! | `full_name`     | `acme-corp/filament-blog`  |
//! | `class_name`    | `FilamentBlog`             |
//! | `php_namespace` | `AcmeCorp\FilamentBlog`    |
//! | `env_prefix`    | `FILAMENT_BLOG`            |
//! | `snake`         | `filament_blog`            |
//! | `relative_dir`  | `packages/acme-corp/filament-blog` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    naming::{normalize_slug, to_pascal_case, to_snake_case, to_studly_case},
};

/// Directory (relative to the project root) holding local packages.
pub const PACKAGES_DIR: &str = "packages";

/// A validated `vendor/name` Composer package identifier.
///
/// The name segment is normalised to a lower-case kebab slug; the vendor
/// segment is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId {
    vendor: String,
    name: String,
}

impl PackageId {
    /// Parse `vendor/name`, splitting at the first `/`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let Some((vendor, name)) = input.split_once('/') else {
            return Err(DomainError::MissingSeparator {
                input: input.to_string(),
            });
        };

        check_segment(input, "vendor", vendor)?;
        check_segment(input, "name", name)?;

        Ok(Self {
            vendor: vendor.to_string(),
            name: normalize_slug(name),
        })
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `vendor/name`, the Composer package key.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.vendor, self.name)
    }

    /// `packages/<vendor>/<name>`, always with forward slashes.
    ///
    /// Used both as the path-repository URL and as the on-disk location.
    pub fn repository_url(&self) -> String {
        format!("{PACKAGES_DIR}/{}/{}", self.vendor, self.name)
    }

    /// Package directory under `project_root`.
    pub fn directory_in(&self, project_root: &Path) -> PathBuf {
        project_root
            .join(PACKAGES_DIR)
            .join(&self.vendor)
            .join(&self.name)
    }
}

fn check_segment(input: &str, segment: &'static str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::EmptySegment {
            input: input.to_string(),
            segment,
        });
    }
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(DomainError::PathTraversal {
            input: input.to_string(),
            segment,
            value: value.to_string(),
        });
    }
    if let Some(bad) = value
        .chars()
        .find(|c| c.is_whitespace() || c.is_control())
    {
        return Err(DomainError::InvalidSegment {
            input: input.to_string(),
            reason: format!("{segment} contains invalid character {bad:?}"),
        });
    }
    Ok(())
}

impl FromStr for PackageId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor, self.name)
    }
}

/// Every name generated code uses to refer to a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageNames {
    pub vendor: String,
    pub package: String,
    pub full_name: String,
    pub class_name: String,
    pub php_namespace: String,
    pub env_prefix: String,
    pub snake: String,
}

impl PackageNames {
    pub fn derive(id: &PackageId) -> Self {
        let class_name = to_pascal_case(id.name());
        let snake = to_snake_case(&class_name);

        Self {
            vendor: id.vendor().to_string(),
            package: id.name().to_string(),
            full_name: id.full_name(),
            php_namespace: format!("{}\\{}", to_studly_case(id.vendor()), class_name),
            env_prefix: snake.to_uppercase(),
            snake,
            class_name,
        }
    }

    /// Replace the derived namespace, e.g. with the one an existing
    /// package declares in its autoload section.
    pub fn with_php_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.php_namespace = namespace.into();
        self
    }
}

/// Who a generated package is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Authorship {
    pub name: String,
    pub email: String,
    pub year: i32,
}

impl Authorship {
    pub const DEFAULT_NAME: &'static str = "Author Name";
    pub const DEFAULT_EMAIL: &'static str = "author@example.com";

    pub fn new(name: impl Into<String>, email: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            year,
        }
    }

    /// Placeholder author for the given copyright year.
    pub fn placeholder(year: i32) -> Self {
        Self::new(Self::DEFAULT_NAME, Self::DEFAULT_EMAIL, year)
    }
}

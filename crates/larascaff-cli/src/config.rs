//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `LARASCAFF_<SECTION>__<KEY>`, e.g.
//!    `LARASCAFF_AUTHOR__EMAIL`
//! 3. Config file: `--config FILE`, or `config.toml` in the platform config dir
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "LARASCAFF";

/// Keys accepted by `config get` / `config set`.
pub const KEYS: [&str; 6] = [
    "author.name",
    "author.email",
    "defaults.project_root",
    "defaults.link",
    "output.no_color",
    "output.format",
];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Credited in generated composer.json, README and LICENSE files.
    pub author: AuthorConfig,
    /// Default values for scaffold commands.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub project_root: Option<PathBuf>,
    /// Register new packages in the project's composer.json.
    pub link: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            project_root: None,
            link: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// A file passed with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("defaults.link", defaults.defaults.link)?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has an invalid shape")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.larascaff.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "larascaff", "larascaff")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".larascaff.toml"))
    }

    /// The file `init` and `config set` write to.
    pub fn target_path(config_file: Option<&Path>) -> PathBuf {
        config_file.map_or_else(Self::config_path, Path::to_path_buf)
    }

    /// Read one dotted key. Unset optional keys read as an empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "author.name" => self.author.name.clone().unwrap_or_default(),
            "author.email" => self.author.email.clone().unwrap_or_default(),
            "defaults.project_root" => self
                .defaults
                .project_root
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "defaults.link" => self.defaults.link.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_link_packages() {
        let cfg = AppConfig::default();
        assert!(cfg.defaults.link);
        assert_eq!(cfg.output.format, "auto");
        assert!(cfg.author.name.is_none());
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&absent)).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("larascaff.toml");
        std::fs::write(
            &path,
            "[author]\nname = \"Ada Lovelace\"\n\n[defaults]\nlink = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.author.name.as_deref(), Some("Ada Lovelace"));
        assert!(!cfg.defaults.link);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let mut cfg = AppConfig::default();
        cfg.author.email = Some("ada@example.com".into());

        assert_eq!(cfg.get("author.email").as_deref(), Some("ada@example.com"));
        assert_eq!(cfg.get("author.name").as_deref(), Some(""));
        assert_eq!(cfg.get("defaults.link").as_deref(), Some("true"));
        assert!(cfg.get("does.not.exist").is_none());
    }

    #[test]
    fn every_key_is_readable() {
        let cfg = AppConfig::default();
        assert!(KEYS.iter().all(|key| cfg.get(key).is_some()));
    }

    #[test]
    fn target_path_prefers_explicit_file() {
        let explicit = Path::new("/tmp/custom.toml");
        assert_eq!(AppConfig::target_path(Some(explicit)), explicit);
        assert!(!AppConfig::target_path(None).as_os_str().is_empty());
    }
}

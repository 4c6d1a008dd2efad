//! Build configuration (`debkit.toml`).
//!
//! Every field has a default matching the Notolog Debian build, so a builder
//! directory without a config file works out of the box.

use crate::manifest::DependencyPin;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the builder directory.
pub const CONFIG_FILE_NAME: &str = "debkit.toml";

/// Errors that can occur when loading the build configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be deserialized into a valid config.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// Config file.
        path: PathBuf,
        /// TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration parsed from `debkit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// `[package]`: identity used in changelog and copyright output.
    pub package: PackageSettings,
    /// `[copyright]`: license aggregation settings.
    pub copyright: CopyrightSettings,
    /// `[prebuild]`: manifest pins.
    pub prebuild: PrebuildSettings,
    /// `[paths]`: per-file location overrides.
    pub paths: PathOverrides,
}

/// Identity of the Debian package being produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSettings {
    /// Debian source package name.
    pub name: String,
    /// `Name <email>` written in changelog trailers.
    pub maintainer: String,
    /// Changelog stanza urgency.
    pub urgency: Urgency,
    /// Changelog stanza target distribution.
    pub distribution: Distribution,
    /// `Upstream-Name` used when seeding a new copyright file.
    pub upstream_name: String,
    /// `Source` used when seeding a new copyright file.
    pub source: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            name: "notolog".to_string(),
            maintainer: "Notolog <dev@notolog.app>".to_string(),
            urgency: Urgency::default(),
            distribution: Distribution::default(),
            upstream_name: "Notolog".to_string(),
            source: "https://notolog.app".to_string(),
        }
    }
}

/// Changelog urgency field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Emergency,
    Critical,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Emergency => "emergency",
            Self::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Target distribution of a changelog stanza.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Development and testing; the usual choice for new packages.
    #[default]
    Unstable,
    /// Waiting to migrate to stable.
    Testing,
    /// Release-ready packages.
    Stable,
    /// Not ready for general use.
    Experimental,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unstable => "unstable",
            Self::Testing => "testing",
            Self::Stable => "stable",
            Self::Experimental => "experimental",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyrightSettings {
    /// Install prefix used in each `Files:` line.
    pub files_prefix: String,
}

impl Default for CopyrightSettings {
    fn default() -> Self {
        Self {
            files_prefix: "bundled/python-packages".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrebuildSettings {
    /// Dependency constraints forced into the manifest before bundling.
    #[serde(rename = "pin")]
    pub pins: Vec<DependencyPin>,
}

impl Default for PrebuildSettings {
    fn default() -> Self {
        Self {
            pins: vec![
                DependencyPin {
                    name: "tomli".to_string(),
                    constraint: "^2.0.1,<=2.0.1".to_string(),
                    replaces: Some("^2.0.1".to_string()),
                },
                DependencyPin {
                    name: "llama-cpp-python".to_string(),
                    constraint: "^0.3.8".to_string(),
                    replaces: None,
                },
            ],
        }
    }
}

/// Optional per-file overrides, relative to the builder directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOverrides {
    /// Overrides [`Layout::markdown_changelog`](crate::Layout::markdown_changelog).
    pub markdown_changelog: Option<PathBuf>,
    /// Overrides [`Layout::debian_changelog`](crate::Layout::debian_changelog).
    pub debian_changelog: Option<PathBuf>,
    /// Overrides [`Layout::base_copyright`](crate::Layout::base_copyright).
    pub base_copyright: Option<PathBuf>,
    /// Overrides [`Layout::generated_copyright`](crate::Layout::generated_copyright).
    pub generated_copyright: Option<PathBuf>,
    /// Overrides [`Layout::license_report`](crate::Layout::license_report).
    pub license_report: Option<PathBuf>,
    /// Overrides [`Layout::manifest`](crate::Layout::manifest).
    pub manifest: Option<PathBuf>,
    /// Overrides [`Layout::version_file`](crate::Layout::version_file).
    pub version_file: Option<PathBuf>,
}

impl BuildConfig {
    /// Load the configuration from `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid
    /// TOML conforming to the config schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML deserialization error on malformed input.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = BuildConfig::parse("").unwrap();
        assert_eq!(config, BuildConfig::default());
        assert_eq!(config.package.name, "notolog");
        assert_eq!(config.package.urgency.to_string(), "medium");
        assert_eq!(config.package.distribution.to_string(), "unstable");
        assert_eq!(config.prebuild.pins.len(), 2);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = BuildConfig::parse(
            r#"
[package]
distribution = "stable"
urgency = "high"

[[prebuild.pin]]
name = "requests"
constraint = "2.32.3"
"#,
        )
        .unwrap();

        assert_eq!(config.package.distribution, Distribution::Stable);
        assert_eq!(config.package.urgency, Urgency::High);
        assert_eq!(config.package.maintainer, "Notolog <dev@notolog.app>");
        assert_eq!(config.prebuild.pins.len(), 1);
        assert_eq!(config.prebuild.pins[0].name, "requests");
        assert!(config.prebuild.pins[0].replaces.is_none());
        assert_eq!(config.copyright.files_prefix, "bundled/python-packages");
    }

    #[test]
    fn unknown_distribution_is_rejected() {
        assert!(BuildConfig::parse("[package]\ndistribution = \"sid\"\n").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = BuildConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        let err = BuildConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}

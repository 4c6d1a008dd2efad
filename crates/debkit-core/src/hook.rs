//! Runtime package hook.
//!
//! The bundled binary calls [`run_package_hook`] once at startup. It makes
//! sure the application's settings record which distribution channel produced
//! the running binary, and never prevents the application from starting.

use debkit_schema::PackageType;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings key holding the package-type marker.
pub const PACKAGE_KEY: &str = "package";

/// Errors raised while reading or writing the settings.
#[derive(Error, Debug)]
pub enum HookError {
    /// The settings file could not be read or written.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Settings file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON.
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The settings file holds JSON other than an object.
    #[error("Settings file {0} is not a JSON object")]
    NotAnObject(PathBuf),
}

/// Access to the host application's persisted package setting.
pub trait PackageConfig {
    /// The stored package-type marker, `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be read.
    fn package(&self) -> Result<Option<String>, HookError>;

    /// Whether `stored` is a valid marker for this binary.
    fn validate(&self, stored: Option<&str>, expected: &PackageType) -> bool {
        stored.is_some_and(|value| value == expected.as_str())
    }

    /// Persist `marker` as the package type.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    fn setup_package(&mut self, marker: &PackageType) -> Result<(), HookError>;
}

/// Result of a hook run. Informational only; the hook never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The stored marker was already valid.
    AlreadyConfigured,
    /// The marker was written.
    Updated,
    /// Writing the marker failed; the error was logged.
    SetupFailed,
}

/// Check the stored package type and set it to `marker` if it differs.
///
/// A read failure counts as unset. A setup failure is logged and swallowed
/// so that the application still starts.
pub fn run_package_hook<C>(config: &mut C, marker: &PackageType) -> HookOutcome
where
    C: PackageConfig + ?Sized,
{
    tracing::info!("Startup hook executed before main application.");

    let stored = config.package().unwrap_or_else(|e| {
        tracing::warn!("Could not read package setting: {e}");
        None
    });

    if config.validate(stored.as_deref(), marker) {
        tracing::debug!("App package already set to '{marker}'");
        return HookOutcome::AlreadyConfigured;
    }

    match config.setup_package(marker) {
        Ok(()) => {
            tracing::debug!("App package set to '{marker}'");
            HookOutcome::Updated
        }
        Err(e) => {
            tracing::error!("Error occurred during init process: {e}");
            HookOutcome::SetupFailed
        }
    }
}

/// Settings stored as a JSON object on disk.
///
/// Keys other than [`PACKAGE_KEY`] are preserved on write.
#[derive(Debug, Clone)]
pub struct JsonSettings {
    path: PathBuf,
}

impl JsonSettings {
    /// Settings backed by the JSON file at `path`; it need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings object; a missing file is an empty object.
    fn load(&self) -> Result<Map<String, Value>, HookError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(HookError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(HookError::NotAnObject(self.path.clone())),
        }
    }
}

impl PackageConfig for JsonSettings {
    fn package(&self) -> Result<Option<String>, HookError> {
        Ok(self
            .load()?
            .get(PACKAGE_KEY)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn setup_package(&mut self, marker: &PackageType) -> Result<(), HookError> {
        let mut settings = self.load()?;
        settings.insert(
            PACKAGE_KEY.to_string(),
            Value::String(marker.as_str().to_string()),
        );

        let io_err = |source| HookError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(settings))?;
        fs::write(&self.path, content + "\n").map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// In-memory config that can be told to fail on setup.
    struct MemoryConfig {
        stored: Option<String>,
        fail_setup: bool,
        setups: usize,
    }

    impl PackageConfig for MemoryConfig {
        fn package(&self) -> Result<Option<String>, HookError> {
            Ok(self.stored.clone())
        }

        fn setup_package(&mut self, marker: &PackageType) -> Result<(), HookError> {
            self.setups += 1;
            if self.fail_setup {
                return Err(HookError::NotAnObject(PathBuf::from("memory")));
            }
            self.stored = Some(marker.to_string());
            Ok(())
        }
    }

    #[test]
    fn valid_marker_is_left_alone() {
        let mut config = MemoryConfig {
            stored: Some("bin".into()),
            fail_setup: false,
            setups: 0,
        };
        let outcome = run_package_hook(&mut config, &PackageType::bundled());

        assert_eq!(outcome, HookOutcome::AlreadyConfigured);
        assert_eq!(config.setups, 0);
    }

    #[test]
    fn mismatched_marker_is_updated() {
        let mut config = MemoryConfig {
            stored: Some("pip".into()),
            fail_setup: false,
            setups: 0,
        };
        let outcome = run_package_hook(&mut config, &PackageType::bundled());

        assert_eq!(outcome, HookOutcome::Updated);
        assert_eq!(config.stored.as_deref(), Some("bin"));
    }

    #[test]
    fn setup_failure_is_swallowed() {
        let mut config = MemoryConfig {
            stored: None,
            fail_setup: true,
            setups: 0,
        };
        let outcome = run_package_hook(&mut config, &PackageType::bundled());

        assert_eq!(outcome, HookOutcome::SetupFailed);
        assert_eq!(config.setups, 1);
    }

    #[test]
    fn json_settings_round_trip_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notolog").join("settings.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"theme": "dark", "package": "pip"}"#).unwrap();

        let mut settings = JsonSettings::new(&path);
        assert_eq!(settings.package().unwrap().as_deref(), Some("pip"));

        assert_eq!(
            run_package_hook(&mut settings, &PackageType::bundled()),
            HookOutcome::Updated
        );

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["package"], "bin");
        assert_eq!(saved["theme"], "dark");

        assert_eq!(
            run_package_hook(&mut settings, &PackageType::bundled()),
            HookOutcome::AlreadyConfigured
        );
    }

    #[test]
    fn missing_settings_file_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg").join("settings.json");
        let mut settings = JsonSettings::new(&path);

        assert_eq!(settings.package().unwrap(), None);
        assert_eq!(
            run_package_hook(&mut settings, &PackageType::bundled()),
            HookOutcome::Updated
        );
        assert!(path.exists());
    }

    #[test]
    fn corrupt_settings_do_not_abort() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let mut settings = JsonSettings::new(&path);
        assert!(matches!(settings.package(), Err(HookError::NotAnObject(_))));
        assert_eq!(
            run_package_hook(&mut settings, &PackageType::bundled()),
            HookOutcome::SetupFailed
        );
    }
}

//! Runtime hook command
//!
//! Runs the same check the bundled binary performs at startup. Always exits
//! successfully: a failed setup is reported, never fatal.

use crate::ui::Output;
use anyhow::{Result, bail};
use debkit_core::Reporter;
use debkit_core::hook::{HookOutcome, JsonSettings, run_package_hook};
use debkit_core::paths::default_settings_path;
use debkit_schema::PackageType;
use std::path::Path;

/// Application directory name used for the default settings location.
const APP_DIR: &str = "notolog";

pub fn hook(settings: Option<&Path>, marker: &str, quiet: bool) -> Result<()> {
    let output = Output::new(quiet);
    let marker: PackageType = marker.parse()?;

    let path = match settings {
        Some(path) => path.to_path_buf(),
        None => match default_settings_path(APP_DIR) {
            Some(path) => path,
            None => bail!("Could not determine the config directory. Pass --settings."),
        },
    };

    let mut config = JsonSettings::new(path);
    match run_package_hook(&mut config, &marker) {
        HookOutcome::AlreadyConfigured => {
            output.success(&format!("App package already set to '{marker}'"));
        }
        HookOutcome::Updated => {
            output.success(&format!(
                "App package set to '{marker}' in {}",
                config.path().display()
            ));
        }
        HookOutcome::SetupFailed => {
            output.warning(&format!(
                "Could not record app package in {}; continuing",
                config.path().display()
            ));
        }
    }
    Ok(())
}

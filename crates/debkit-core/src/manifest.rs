//! Pre-build manifest patching.
//!
//! Before the application is bundled its `pyproject.toml` gets a fixed set of
//! dependency pins, and its version is written to a plain text file that later
//! build steps read. Editing goes through `toml_edit`, so comments and key
//! order outside the pinned keys survive the round trip.

use crate::reporter::Reporter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml_edit::{DocumentMut, InlineTable, Item, Table, Value};

/// Table path holding the dependency constraints.
const DEPENDENCY_PATH: [&str; 3] = ["tool", "poetry", "dependencies"];

/// Errors that can occur while patching the manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest or version file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid TOML.
    #[error("Parse error: {0}")]
    Parse(#[from] toml_edit::TomlError),

    /// A key on the dependency path holds something other than a table.
    #[error("Expected `{0}` to be a table")]
    NotATable(String),

    /// Neither `tool.poetry.version` nor `project.version` is set.
    #[error("No version found in {0}")]
    MissingVersionField(PathBuf),
}

/// A dependency constraint forced into the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyPin {
    /// Dependency name under `tool.poetry.dependencies`.
    pub name: String,
    /// Constraint to write.
    pub constraint: String,
    /// Only patch when the current constraint is exactly this value.
    #[serde(default)]
    pub replaces: Option<String>,
}

/// What applying a pin did to the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinOutcome {
    /// The dependency already had the target constraint; nothing touched.
    AlreadyPinned,
    /// An existing constraint was overwritten.
    Patched { from: String },
    /// The dependency was not present and has been added.
    Added,
    /// The pin is conditional and the current value did not match.
    Skipped { found: Option<String> },
}

/// Summary of a pre-build patch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    /// Every pin with what applying it did, in configuration order.
    pub outcomes: Vec<(DependencyPin, PinOutcome)>,
    /// Version written to the version file.
    pub version: String,
}

/// Human-readable description of a pin result, used for logs and status lines.
#[derive(Debug)]
pub struct PinSummary<'a>(pub &'a DependencyPin, pub &'a PinOutcome);

impl fmt::Display for PinSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let PinSummary(pin, outcome) = self;
        match outcome {
            PinOutcome::AlreadyPinned => {
                write!(f, "{}: already pinned at {}", pin.name, pin.constraint)
            }
            PinOutcome::Patched { from } => {
                write!(f, "{}: patched {from} -> {}", pin.name, pin.constraint)
            }
            PinOutcome::Added => write!(f, "{}: added {}", pin.name, pin.constraint),
            PinOutcome::Skipped { found } => write!(
                f,
                "{}: left at {} (pin only replaces {})",
                pin.name,
                found.as_deref().unwrap_or("<absent>"),
                pin.replaces.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Parse manifest text into an editable document.
///
/// # Errors
///
/// Returns the TOML error on malformed input.
pub fn parse(content: &str) -> Result<DocumentMut, ManifestError> {
    Ok(content.parse::<DocumentMut>()?)
}

/// Force `pin` into `tool.poetry.dependencies`, creating the tables if needed.
///
/// # Errors
///
/// Returns [`ManifestError::NotATable`] if a key on the path is not a table.
pub fn apply_pin(doc: &mut DocumentMut, pin: &DependencyPin) -> Result<PinOutcome, ManifestError> {
    let mut item = doc.as_item_mut();
    for key in DEPENDENCY_PATH {
        item = child_table(item, key)?;
    }
    let table = item
        .as_table_like_mut()
        .ok_or_else(|| ManifestError::NotATable(DEPENDENCY_PATH[2].to_string()))?;

    let current = table.get(&pin.name).map(constraint_text);

    if current.as_deref() == Some(pin.constraint.as_str()) {
        return Ok(PinOutcome::AlreadyPinned);
    }
    if let Some(replaces) = &pin.replaces {
        if current.as_deref() != Some(replaces.as_str()) {
            return Ok(PinOutcome::Skipped { found: current });
        }
    }

    match table.get_mut(&pin.name) {
        Some(Item::Value(existing)) => {
            let decor = existing.decor().clone();
            *existing = Value::from(pin.constraint.as_str());
            *existing.decor_mut() = decor;
        }
        Some(item) => *item = toml_edit::value(pin.constraint.as_str()),
        None => {
            table.insert(&pin.name, toml_edit::value(pin.constraint.as_str()));
        }
    }

    Ok(match current {
        Some(from) => PinOutcome::Patched { from },
        None => PinOutcome::Added,
    })
}

/// The package version: `tool.poetry.version`, else `project.version`.
pub fn read_version(doc: &DocumentMut) -> Option<String> {
    let lookup = |path: &[&str]| {
        let mut item = doc.as_item();
        for key in path {
            item = item.get(*key)?;
        }
        item.as_str().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
    };

    lookup(&["tool", "poetry", "version"]).or_else(|| lookup(&["project", "version"]))
}

/// Apply `pins` to the manifest at `manifest_path`, write it back, then
/// write the package version (newline-terminated) to `version_path`.
///
/// The manifest is written even when the version is missing; the version file
/// is not.
///
/// # Errors
///
/// Returns [`ManifestError::MissingVersionField`] if the manifest has no
/// version, and I/O or parse errors for unreadable or malformed files.
pub fn patch_manifest(
    manifest_path: &Path,
    version_path: &Path,
    pins: &[DependencyPin],
    reporter: &dyn Reporter,
) -> Result<PatchReport, ManifestError> {
    let content = fs::read_to_string(manifest_path).map_err(|source| ManifestError::Read {
        path: manifest_path.to_path_buf(),
        source,
    })?;
    let mut doc = parse(&content)?;

    let mut outcomes = Vec::with_capacity(pins.len());
    for pin in pins {
        let outcome = apply_pin(&mut doc, pin)?;
        let summary = PinSummary(pin, &outcome).to_string();
        match outcome {
            PinOutcome::Skipped { .. } => tracing::warn!("{summary}"),
            _ => tracing::info!("{summary}"),
        }
        reporter.info(&summary);
        outcomes.push((pin.clone(), outcome));
    }

    write(manifest_path, &doc.to_string())?;

    let Some(version) = read_version(&doc) else {
        tracing::error!("No version found in {}", manifest_path.display());
        reporter.error(&format!("No version found in {}!", manifest_path.display()));
        return Err(ManifestError::MissingVersionField(manifest_path.to_path_buf()));
    };

    write(version_path, &format!("{version}\n"))?;
    reporter.success(&format!(
        "{} written with version: {version}",
        version_path.display()
    ));

    Ok(PatchReport { outcomes, version })
}

/// Child table `key` of `parent`, created when absent. Standard, dotted and
/// inline tables are all accepted; a new child matches its parent's style.
fn child_table<'a>(parent: &'a mut Item, key: &str) -> Result<&'a mut Item, ManifestError> {
    let not_a_table = || ManifestError::NotATable(key.to_string());

    if parent.get(key).is_none() {
        match parent {
            Item::Table(table) => {
                let mut child = Table::new();
                child.set_implicit(true);
                table.insert(key, Item::Table(child));
            }
            Item::Value(Value::InlineTable(table)) => {
                table.insert(key, Value::InlineTable(InlineTable::new()));
            }
            _ => return Err(not_a_table()),
        }
    }

    parent
        .get_mut(key)
        .filter(|item| item.is_table_like())
        .ok_or_else(not_a_table)
}

/// Constraint of a dependency entry: the string itself, or the inline
/// table / other value rendered as TOML.
fn constraint_text(item: &Item) -> String {
    item.as_str()
        .map_or_else(|| item.to_string().trim().to_string(), str::to_string)
}

fn write(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

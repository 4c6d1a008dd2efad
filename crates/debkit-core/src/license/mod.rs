//! Third-party license aggregation into `debian/copyright`.
//!
//! The license report is turned into one DEP-5 paragraph per bundled package.
//! The paragraphs are written to an intermediate file and then spliced into
//! the base copyright file below [`GENERATED_DELIMITER`], replacing whatever
//! a previous run generated there.

/// Copyright notice extraction.
pub mod copyright;
/// Per-package paragraph rendering.
pub mod entry;
/// License report table parsing.
pub mod report;

pub use copyright::{extract_copyright_block, read_copyright};
pub use entry::render_entry;
pub use report::parse_report;

use crate::config::{CopyrightSettings, PackageSettings};
use crate::reporter::Reporter;
use debkit_schema::{COPYRIGHT_FORMAT_URL, GENERATED_DELIMITER, LicenseTables};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while aggregating licenses.
#[derive(Error, Debug)]
pub enum LicenseError {
    /// A package's license text could not be read. Recovered per row.
    #[error("Could not read license file {path}: {source}")]
    UnreadableLicenseFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input or output file of the run could not be read or written.
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LicenseError {
    fn io(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Io {
            action,
            path,
            source,
        }
    }
}

/// Files touched by one aggregation run.
#[derive(Debug, Clone, Copy)]
pub struct CopyrightPaths<'a> {
    /// Markdown license report to read.
    pub report: &'a Path,
    /// Intermediate file receiving only the generated paragraphs.
    pub generated: &'a Path,
    /// Base `debian/copyright` receiving the generated section.
    pub base: &'a Path,
}

/// Render the paragraphs for every row with a known license, joined by a
/// newline.
pub fn render_report(report: &str, tables: &LicenseTables, files_prefix: &str) -> (String, usize) {
    let entries: Vec<String> = parse_report(report)
        .iter()
        .filter(|row| {
            let keep = row.has_known_license();
            if !keep {
                tracing::debug!("Skipping {} (license unknown)", row.name);
            }
            keep
        })
        .map(|row| render_entry(row, tables, files_prefix))
        .collect();

    let count = entries.len();
    (entries.join("\n"), count)
}

/// Replace the generated section of `base` with `generated`.
///
/// Anything from the delimiter line onward is dropped first, so applying the
/// same input twice gives the same result.
pub fn splice_generated(base: &str, generated: &str) -> String {
    let kept = strip_generated(base).trim();
    format!("{kept}\n\n{GENERATED_DELIMITER}\n\n{}\n", generated.trim())
}

/// The part of `base` that precedes the generated section.
fn strip_generated(base: &str) -> &str {
    base.match_indices(GENERATED_DELIMITER)
        .map(|(idx, _)| idx)
        .find(|&idx| idx == 0 || base[..idx].ends_with('\n'))
        .map_or(base, |idx| &base[..idx])
}

/// DEP-5 header used when no base copyright file exists yet.
pub fn seed_header(settings: &PackageSettings) -> String {
    format!(
        "Format: {COPYRIGHT_FORMAT_URL}\nUpstream-Name: {}\nSource: {}\n",
        settings.upstream_name, settings.source
    )
}

/// Regenerate the license paragraphs and splice them into the base file.
///
/// Returns the number of packages written.
///
/// # Errors
///
/// Returns an error if the report cannot be read or either output file
/// cannot be written. Unreadable per-package license texts are not errors.
pub fn generate_copyright(
    paths: CopyrightPaths<'_>,
    tables: &LicenseTables,
    package: &PackageSettings,
    settings: &CopyrightSettings,
    reporter: &dyn Reporter,
) -> Result<usize, LicenseError> {
    let report = fs::read_to_string(paths.report)
        .map_err(LicenseError::io("Failed to read license report", paths.report))?;

    let (generated, count) = render_report(&report, tables, &settings.files_prefix);
    tracing::info!("Rendered {count} license entries");

    write_with_parents(paths.generated, &generated)?;
    reporter.info(&format!(
        "License entries generated for {count} packages: {}",
        paths.generated.display()
    ));

    let base = if paths.base.exists() {
        fs::read_to_string(paths.base)
            .map_err(LicenseError::io("Failed to read base copyright", paths.base))?
    } else {
        tracing::warn!(
            "{} does not exist, seeding a new DEP-5 header",
            paths.base.display()
        );
        seed_header(package)
    };

    write_with_parents(paths.base, &splice_generated(&base, &generated))?;
    reporter.success(&format!(
        "{} updated with generated license entries.",
        paths.base.display()
    ));

    Ok(count)
}

fn write_with_parents(path: &Path, content: &str) -> Result<(), LicenseError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(LicenseError::io("Failed to create", parent))?;
    }
    fs::write(path, content).map_err(LicenseError::io("Failed to write", path))
}

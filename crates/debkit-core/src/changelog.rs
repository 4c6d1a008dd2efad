//! Markdown to Debian changelog conversion.
//!
//! Reads the newest `## [version] - YYYY-MM-DD` section of a Keep-a-Changelog
//! style document and prepends it to `debian/changelog` as a new stanza.

use crate::config::PackageSettings;
use crate::reporter::Reporter;
use chrono::NaiveDate;
use debkit_schema::{ChangelogEntry, Version};
use regex::Regex;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while converting the changelog.
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// The document has no `## [version] - date` heading.
    #[error("No valid version block found in changelog")]
    MissingSection,

    /// The heading's date is not a real calendar date.
    #[error("Invalid release date '{date}' for version {version}")]
    InvalidDate { version: String, date: String },

    /// Reading the Markdown or writing the Debian changelog failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The heading pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Extract the first (newest) version section.
///
/// The section body runs from the line after the heading up to the next line
/// starting with `## ` or the end of the document.
///
/// # Errors
///
/// Returns [`ChangelogError::MissingSection`] if no heading matches and
/// [`ChangelogError::InvalidDate`] if the heading's date does not parse.
pub fn parse_latest(markdown: &str) -> Result<ChangelogEntry, ChangelogError> {
    let content = markdown.replace("\r\n", "\n");
    let heading = Regex::new(
        r"(?m)^## \[(?P<version>[^\]]+)\] - (?P<date>\d{4}-\d{2}-\d{2})[ \t]*$",
    )?;

    let caps = heading
        .captures(&content)
        .ok_or(ChangelogError::MissingSection)?;
    let version = caps["version"].trim().to_string();
    let date_raw = &caps["date"];
    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").map_err(|_| {
        ChangelogError::InvalidDate {
            version: version.clone(),
            date: date_raw.to_string(),
        }
    })?;

    let heading_end = caps.get(0).map_or(content.len(), |m| m.end());
    let rest = &content[heading_end..];
    let body = rest.find("\n## ").map_or(rest, |idx| &rest[..idx]);

    Ok(ChangelogEntry {
        version: Version::new(&version),
        date,
        changes: body.trim().lines().map(str::to_string).collect(),
    })
}

/// Rewrite Markdown body lines as Debian changelog lines.
///
/// `- item` becomes `  * item`, `###` headings become a blank separator,
/// any other text becomes a four-space continuation. Blank lines are dropped.
pub fn convert_lines(changes: &[String]) -> Vec<String> {
    changes
        .iter()
        .filter_map(|line| {
            let stripped = line.trim();
            let converted = if let Some(item) = stripped.strip_prefix("- ") {
                format!("  * {item}")
            } else if stripped.starts_with("###") {
                String::new()
            } else if !stripped.is_empty() {
                format!("    {stripped}")
            } else {
                return None;
            };
            Some(converted.trim_end().to_string())
        })
        .collect()
}

/// Render one Debian changelog stanza for `entry`.
pub fn render_stanza(entry: &ChangelogEntry, settings: &PackageSettings) -> String {
    let body = convert_lines(&entry.changes).join("\n");
    format!(
        "{name} ({version}) {dist}; urgency={urgency}\n{body}\n\n -- {maintainer}  {timestamp}",
        name = settings.name,
        version = entry.version,
        dist = settings.distribution,
        urgency = settings.urgency,
        maintainer = settings.maintainer,
        timestamp = entry.debian_timestamp(),
    )
}

/// Put `stanza` in front of the existing changelog, newest first.
///
/// If the existing file already opens with a stanza for the same package and
/// version, that stanza is replaced rather than duplicated.
pub fn prepend(existing: Option<&str>, stanza: &str) -> String {
    let stanza = stanza.trim();
    let Some(existing) = existing else {
        return stanza.to_string();
    };

    let header = stanza.lines().next().unwrap_or_default();
    let rest = match stanza_key(header) {
        Some(key) if existing.trim_start().starts_with(key) => drop_first_stanza(existing),
        _ => existing,
    };

    if rest.trim().is_empty() {
        stanza.to_string()
    } else {
        format!("{stanza}\n\n{rest}")
    }
}

/// `package (version)` prefix of a stanza header line.
fn stanza_key(header: &str) -> Option<&str> {
    header.find(") ").map(|idx| &header[..=idx])
}

/// Everything after the first stanza: past its maintainer trailer, or from
/// the next stanza header when the trailer is missing.
fn drop_first_stanza(existing: &str) -> &str {
    let existing = existing.trim_start();
    let mut offset = 0;
    for (idx, line) in existing.split_inclusive('\n').enumerate() {
        // Stanza headers are the only lines starting in column zero.
        if idx > 0 && line.starts_with(|c: char| !c.is_whitespace()) {
            return &existing[offset..];
        }
        offset += line.len();
        if line.starts_with(" -- ") {
            return existing[offset..].trim_start();
        }
    }
    ""
}

/// Convert the newest section of `markdown_path` and prepend it to
/// `debian_path`.
///
/// # Errors
///
/// Returns an error if the Markdown cannot be read, has no version section,
/// or the Debian changelog cannot be written.
pub fn update_changelog(
    markdown_path: &Path,
    debian_path: &Path,
    settings: &PackageSettings,
    reporter: &dyn Reporter,
) -> Result<ChangelogEntry, ChangelogError> {
    let markdown = fs::read_to_string(markdown_path)?;
    let entry = parse_latest(&markdown)?;
    tracing::debug!(
        "Latest changelog section: {} ({}), {} lines",
        entry.version,
        entry.date,
        entry.changes.len()
    );

    let stanza = render_stanza(&entry, settings);
    let existing = if debian_path.exists() {
        Some(fs::read_to_string(debian_path)?)
    } else {
        None
    };

    if let Some(parent) = debian_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(debian_path, prepend(existing.as_deref(), &stanza))?;

    reporter.success(&format!(
        "Debian changelog updated with version {}",
        entry.version
    ));
    Ok(entry)
}

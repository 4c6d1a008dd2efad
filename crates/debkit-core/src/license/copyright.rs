//! Copyright notice extraction from license texts.

use super::LicenseError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// A line opening a copyright notice: one or more `Copyright`, `©` or `(c)`
/// markers followed by the holder text.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:copyright|©|\(c\))[:\s]*)+(.+)$")
        .expect("copyright marker pattern is valid")
});

/// Extract the first copyright block of a license text.
///
/// Collection starts at the first line carrying a copyright marker and stops
/// at the next blank line. Markers are stripped from every collected line that
/// starts with one. Lines are joined with `"\n "`, the continuation form used
/// in `debian/copyright`.
///
/// Returns `None` when the text has no copyright marker.
pub fn extract_copyright_block(text: &str) -> Option<String> {
    let mut collected: Vec<String> = Vec::new();

    for line in text.trim().lines() {
        let stripped = line.trim();

        if collected.is_empty() && !MARKER.is_match(stripped) {
            continue;
        }
        if stripped.is_empty() {
            break;
        }

        let cleaned = MARKER
            .captures(stripped)
            .and_then(|caps| caps.get(1))
            .map_or(stripped, |m| m.as_str().trim());
        collected.push(cleaned.to_string());
    }

    (!collected.is_empty()).then(|| collected.join("\n "))
}

/// Read `path` and extract its copyright block.
///
/// # Errors
///
/// Returns [`LicenseError::UnreadableLicenseFile`] if the file cannot be read.
pub fn read_copyright(path: &Path) -> Result<Option<String>, LicenseError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        LicenseError::UnreadableLicenseFile {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(extract_copyright_block(&text))
}

//! Markdown license report parsing.
//!
//! The report is the Markdown table printed by Python license tooling:
//!
//! ```text
//! | Name   | Version | License     | Author    | LicenseFile              |
//! |--------|---------|-------------|-----------|--------------------------|
//! | click  | 8.1.7   | BSD License | Pallets   | /venv/.../LICENSE.rst    |
//! ```

use debkit_schema::{LicenseRow, PackageName};
use std::path::PathBuf;

/// Minimum number of cells a data row needs.
const COLUMNS: usize = 5;

/// Parse every data row of the first license table in `text`.
///
/// Rows with too few cells or an empty name are skipped. Rows with unknown
/// licenses are kept; the aggregator decides what to drop.
pub fn parse_report(text: &str) -> Vec<LicenseRow> {
    let mut rows = Vec::new();
    let mut parsing = false;

    for line in text.lines() {
        let line = line.trim();

        if !parsing {
            parsing = line.starts_with("| Name") && line.contains("License");
            continue;
        }

        if !line.starts_with('|') || is_separator(line) {
            continue;
        }

        let cells: Vec<&str> = line.trim_matches('|').split('|').map(str::trim).collect();
        if cells.len() < COLUMNS {
            tracing::debug!("Skipping short report row: {line}");
            continue;
        }
        if cells[0].is_empty() {
            continue;
        }

        let author = if cells[3].is_empty() { "Unknown" } else { cells[3] };
        rows.push(LicenseRow {
            name: PackageName::new(cells[0]),
            version: cells[1].to_string(),
            license: cells[2].to_string(),
            author: author.to_string(),
            license_file: (!cells[4].is_empty()).then(|| PathBuf::from(cells[4])),
        });
    }

    rows
}

fn is_separator(line: &str) -> bool {
    line.starts_with("|----")
        || line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

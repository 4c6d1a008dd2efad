//! Rendering of a single `debian/copyright` paragraph.

use super::LicenseError;
use super::copyright::read_copyright;
use debkit_schema::{LicenseRow, LicenseTables};
use std::path::Path;

/// Sibling file holding the BSD half of a dual-licensed package.
const BSD_SIBLING: &str = "LICENSE.BSD";

/// Render the `Files:`/`Copyright:`/`License:` paragraph for one package.
///
/// License text policy, in order:
/// 1. a license with a system-provided text is referenced by path;
/// 2. otherwise a readable license file is inlined, one space per line;
/// 3. dual licenses additionally reference the system Apache text and inline
///    a sibling `LICENSE.BSD` when present (skipped after step 1).
///
/// Read failures are logged and the paragraph is emitted without that text.
pub fn render_entry(row: &LicenseRow, tables: &LicenseTables, files_prefix: &str) -> String {
    let license_file = row.license_file.as_deref().filter(|p| p.is_file());

    let copyright = license_file
        .and_then(|path| match read_copyright(path) {
            Ok(block) => block,
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        })
        .unwrap_or_else(|| row.author.clone());

    let spdx = tables.normalize(&row.name, &row.license);
    let prefix = files_prefix.trim_end_matches('/');

    let mut block = format!(
        "Files: {prefix}/{name}\nCopyright: {copyright}\nLicense: {spdx}\nLicense-Text:\n",
        name = row.name,
    );

    // Text source still available for the dual-license sibling lookup.
    let mut text_file = license_file;

    if let Some(system_path) = tables.system_path(&spdx) {
        block.push_str(&format!(" {system_path}\n"));
        text_file = None;
    } else if let Some(path) = license_file {
        match read_text(path) {
            Ok(Some(text)) => {
                block.push_str(&indent(&text));
                block.push('\n');
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Could not read license file for {}: {e}", row.name),
        }
    }

    if tables.is_dual(&spdx) {
        match tables.apache_path() {
            Some(apache) => block.push_str(&format!(
                "\n The full text of the Apache-2.0 license can be found at:\n {apache}\n"
            )),
            None => tracing::warn!("No system path for Apache-2.0; {} left without reference", row.name),
        }

        if let Some(path) = text_file {
            let bsd = path.with_file_name(BSD_SIBLING);
            if bsd.exists() {
                match read_text(&bsd) {
                    Ok(Some(text)) => block.push_str(&format!(
                        "\n The full BSD license text follows:\n\n{}\n",
                        indent(&text)
                    )),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Could not read BSD license file for {}: {e}", row.name);
                    }
                }
            }
        }
    }

    block
}

/// Trimmed file content, `None` when blank.
fn read_text(path: &Path) -> Result<Option<String>, LicenseError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        LicenseError::UnreadableLicenseFile {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Prefix every line with a single space.
fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!(" {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

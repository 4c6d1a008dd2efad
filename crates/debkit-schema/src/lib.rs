//! Shared types for debkit.
//!
//! Everything here is free of I/O: newtypes for package names, versions and
//! SPDX identifiers, the parsed changelog entry and license-report row, and the
//! static license lookup tables used when generating `debian/copyright`.

pub mod changelog;
pub mod license;
pub mod types;

// Re-exports
pub use changelog::ChangelogEntry;
pub use license::{LicenseRow, LicenseTables};
pub use types::*;

/// Delimiter line that opens the generated section of `debian/copyright`.
pub const GENERATED_DELIMITER: &str = "# === AUTO-GENERATED LICENSES ===";

/// DEP-5 format URL written at the top of a freshly seeded copyright file.
pub const COPYRIGHT_FORMAT_URL: &str =
    "https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/";

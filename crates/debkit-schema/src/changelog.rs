//! Parsed changelog entry.

use crate::types::Version;
use chrono::{NaiveDate, NaiveTime};

/// Format used for the maintainer trailer of a Debian changelog stanza.
pub const DEBIAN_TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// The newest section of a Markdown changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Version from the `## [version] - date` heading.
    pub version: Version,
    /// Release date from the heading.
    pub date: NaiveDate,
    /// Raw body lines of the section, in document order.
    pub changes: Vec<String>,
}

impl ChangelogEntry {
    /// RFC-2822 style timestamp for the release date at midnight UTC,
    /// e.g. `Mon, 02 Jun 2025 00:00:00 +0000`.
    pub fn debian_timestamp(&self) -> String {
        self.date
            .and_time(NaiveTime::default())
            .format(DEBIAN_TIMESTAMP_FORMAT)
            .to_string()
    }
}

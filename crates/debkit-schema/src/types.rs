//! Newtypes shared across the workspace.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// A third-party package name as it appears in the license report.
///
/// Unlike registry names this is stored verbatim: the per-package license
/// table is keyed case-sensitively (`MarkupSafe`, `PySide6_Essentials`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Create a new package name, trimming surrounding whitespace.
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_string())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for PackageName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for PackageName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for PackageName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PackageName {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

/// A release version string taken from a changelog heading or manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Create a new version from the given string (stored as-is).
    pub fn new(v: &str) -> Self {
        Self(v.to_string())
    }

    /// Return the version string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An SPDX license expression (`MIT`, `Apache-2.0 OR BSD-3-Clause`).
///
/// When neither lookup table knows a label the raw label is carried through
/// unchanged, so the value is not guaranteed to be a valid SPDX expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Spdx(String);

impl Spdx {
    /// Wrap a license identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Spdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Spdx {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Spdx {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Spdx {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Marker stored in the host application's settings naming the distribution
/// channel that produced the running binary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageType(String);

impl PackageType {
    /// Marker for the self-contained bundled binary.
    pub const BIN: &'static str = "bin";

    /// Create a marker from any string.
    pub fn new(marker: &str) -> Self {
        Self(marker.trim().to_string())
    }

    /// The marker used by the bundled binary shipped inside the Debian package.
    pub fn bundled() -> Self {
        Self::new(Self::BIN)
    }

    /// Return the marker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PackageType {
    fn default() -> Self {
        Self::bundled()
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PackageType {
    type Err = EmptyMarker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(EmptyMarker);
        }
        Ok(Self::new(s))
    }
}

/// Returned when parsing an empty package-type marker.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("package type marker must not be empty")]
pub struct EmptyMarker;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_name_keeps_case() {
        let name = PackageName::new("  MarkupSafe ");
        assert_eq!(name.as_str(), "MarkupSafe");
        assert_eq!(name, "MarkupSafe");
    }

    #[test]
    fn package_type_defaults_to_bundled_binary() {
        assert_eq!(PackageType::default().as_str(), "bin");
    }

    #[test]
    fn package_type_rejects_blank_marker() {
        assert!("   ".parse::<PackageType>().is_err());
        assert_eq!("deb".parse::<PackageType>().unwrap().as_str(), "deb");
    }
}

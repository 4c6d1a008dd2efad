//! License report rows and the static SPDX lookup tables.

use crate::types::{PackageName, Spdx};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Per-package SPDX mapping. Always consulted before the generic labels.
const PACKAGE_LICENSES: &[(&str, &str)] = &[
    ("PySide6_Essentials", "LGPL-3.0-or-later"),
    ("shiboken6", "LGPL-3.0-or-later"),
    ("cryptography", "Apache-2.0 AND BSD-3-Clause"),
    ("protobuf", "BSD-3-Clause"),
    ("packaging", "Apache-2.0 OR BSD-3-Clause"),
    ("click", "BSD-3-Clause"),
    ("MarkupSafe", "BSD-3-Clause"),
    ("Pygments", "BSD-2-Clause"),
    ("numpy", "BSD-3-Clause"),
    ("Markdown", "BSD-3-Clause"),
    ("Jinja2", "BSD-3-Clause"),
    ("emoji", "BSD-3-Clause"),
    ("flatbuffers", "Apache-2.0"),
    ("diskcache", "Apache-2.0"),
    ("poetry-core", "MIT"),
    ("build", "MIT"),
    ("coloredlogs", "MIT"),
    ("cffi", "MIT"),
    ("humanfriendly", "MIT"),
    ("iniconfig", "MIT"),
    ("pycparser", "BSD-3-Clause"),
    ("sympy", "BSD-3-Clause"),
    ("onnxruntime", "MIT"),
    ("onnxruntime-genai", "MIT"),
    ("qasync", "BSD-2-Clause"),
    ("pyproject_hooks", "MIT"),
    ("llama_cpp_python", "MIT"),
    ("pluggy", "MIT"),
    ("typing_extensions", "Python-2.0"),
];

/// Trove-classifier style labels reported by license tooling.
const GENERIC_LICENSES: &[(&str, &str)] = &[
    ("MIT License", "MIT"),
    ("BSD License", "BSD-3-Clause"),
    ("Apache Software License", "Apache-2.0"),
    ("Apache License 2.0", "Apache-2.0"),
    ("Python Software Foundation License", "Python-2.0"),
    ("GNU General Public License (GPL)", "GPL-3.0-or-later"),
    ("GNU Lesser General Public License (LGPL)", "LGPL-3.0-or-later"),
    ("Mozilla Public License 2.0 (MPL 2.0)", "MPL-2.0"),
    ("ISC License", "ISC"),
    ("Public Domain", "CC0-1.0"),
    ("UNKNOWN", "UNKNOWN"),
];

/// Licenses whose text ships with the base system under `common-licenses`.
const SYSTEM_LICENSE_PATHS: &[(&str, &str)] = &[
    ("Apache-2.0", "/usr/share/common-licenses/Apache-2.0"),
    ("LGPL-3.0-or-later", "/usr/share/common-licenses/GPL-3"),
];

/// Combinations that need both the Apache and the BSD text reproduced.
const DUAL_LICENSES: &[&str] = &["Apache-2.0 AND BSD-3-Clause", "Apache-2.0 OR BSD-3-Clause"];

/// Identifier of the system license referenced by dual-license blocks.
pub const APACHE_2_0: &str = "Apache-2.0";

/// One row of the third-party license report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRow {
    /// Package name (`Name` column).
    pub name: PackageName,
    /// Installed version (`Version` column).
    pub version: String,
    /// License label as reported (`License` column), trimmed.
    pub license: String,
    /// Author string, `Unknown` when the cell was empty. Used as the fallback
    /// copyright holder.
    pub author: String,
    /// Path to the package's license file, if the report lists one.
    pub license_file: Option<PathBuf>,
}

impl LicenseRow {
    /// Rows without a usable license label are left out of the copyright file.
    pub fn has_known_license(&self) -> bool {
        !self.license.is_empty() && !self.license.eq_ignore_ascii_case("UNKNOWN")
    }
}

/// Lookup tables used to normalize license labels and decide how license
/// texts are reproduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseTables {
    /// Package name to SPDX id.
    pub packages: BTreeMap<String, Spdx>,
    /// Generic license label to SPDX id.
    pub generic: BTreeMap<String, Spdx>,
    /// SPDX id to license text provided by the operating system.
    pub system_paths: BTreeMap<String, String>,
    /// SPDX expressions treated as dual licenses.
    pub dual: BTreeSet<String>,
}

impl Default for LicenseTables {
    fn default() -> Self {
        let pairs = |table: &[(&str, &str)]| {
            table
                .iter()
                .map(|(k, v)| ((*k).to_string(), Spdx::new(*v)))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            packages: pairs(PACKAGE_LICENSES),
            generic: pairs(GENERIC_LICENSES),
            system_paths: SYSTEM_LICENSE_PATHS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            dual: DUAL_LICENSES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl LicenseTables {
    /// Resolve the SPDX id for a package.
    ///
    /// The per-package table wins over the generic label table; when neither
    /// matches, the trimmed raw label is returned unchanged.
    pub fn normalize(&self, name: &str, raw: &str) -> Spdx {
        if let Some(spdx) = self.packages.get(name) {
            return spdx.clone();
        }
        let raw = raw.trim();
        self.generic
            .get(raw)
            .cloned()
            .unwrap_or_else(|| Spdx::new(raw))
    }

    /// Path of the system-provided license text for `spdx`, if any.
    pub fn system_path(&self, spdx: &Spdx) -> Option<&str> {
        self.system_paths.get(spdx.as_str()).map(String::as_str)
    }

    /// Whether `spdx` is one of the recognized dual-license combinations.
    pub fn is_dual(&self, spdx: &Spdx) -> bool {
        self.dual.contains(spdx.as_str())
    }

    /// System path of the Apache-2.0 text referenced by dual-license blocks.
    pub fn apache_path(&self) -> Option<&str> {
        self.system_paths.get(APACHE_2_0).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_label_falls_back() {
        let tables = LicenseTables::default();
        assert_eq!(tables.normalize("somepkg", "BSD License"), "BSD-3-Clause");
        assert_eq!(tables.normalize("somepkg", "  MIT License "), "MIT");
    }

    #[test]
    fn package_mapping_wins_over_label() {
        let tables = LicenseTables::default();
        assert_eq!(tables.normalize("Pygments", "BSD License"), "BSD-2-Clause");
        assert_eq!(tables.normalize("Pygments", "MIT License"), "BSD-2-Clause");
        assert_eq!(tables.normalize("Pygments", ""), "BSD-2-Clause");
    }

    #[test]
    fn unknown_label_passes_through() {
        let tables = LicenseTables::default();
        assert_eq!(
            tables.normalize("leftpad", " Artistic License "),
            "Artistic License"
        );
    }

    #[test]
    fn package_lookup_is_case_sensitive() {
        let tables = LicenseTables::default();
        assert_eq!(tables.normalize("markupsafe", "MIT License"), "MIT");
    }

    #[test]
    fn dual_and_system_paths() {
        let tables = LicenseTables::default();
        let dual = Spdx::new("Apache-2.0 OR BSD-3-Clause");
        assert!(tables.is_dual(&dual));
        assert!(tables.system_path(&dual).is_none());
        assert_eq!(
            tables.system_path(&Spdx::new("LGPL-3.0-or-later")),
            Some("/usr/share/common-licenses/GPL-3")
        );
        assert_eq!(
            tables.apache_path(),
            Some("/usr/share/common-licenses/Apache-2.0")
        );
    }

    #[test]
    fn unknown_rows_are_excluded() {
        let row = LicenseRow {
            name: PackageName::new("x"),
            version: "1.0".into(),
            license: "unknown".into(),
            author: "Unknown".into(),
            license_file: None,
        };
        assert!(!row.has_known_license());
    }
}

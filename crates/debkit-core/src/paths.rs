//! File layout of a packaging run.
//!
//! The builder directory holds the packaging sources (`debian/`, `build/`);
//! its parent is the project root with the application sources under `src/`.

use crate::config::PathOverrides;
use std::fmt;
use std::path::{Path, PathBuf};

/// Resolved locations of every input and output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Packaging directory all builder paths hang off.
    pub builder_dir: PathBuf,
    /// Project checkout: the parent of the builder directory.
    pub project_root: PathBuf,
    /// Markdown changelog: `<project>/src/CHANGELOG.md`
    pub markdown_changelog: PathBuf,
    /// Debian changelog: `<builder>/debian/changelog`
    pub debian_changelog: PathBuf,
    /// Base copyright file: `<project>/debian/copyright`
    pub base_copyright: PathBuf,
    /// Intermediate generated entries: `<builder>/build/copyright-generated`
    pub generated_copyright: PathBuf,
    /// License report table: `<builder>/build/reports/pip-licenses.md`
    pub license_report: PathBuf,
    /// Dependency manifest: `<project>/src/pyproject.toml`
    pub manifest: PathBuf,
    /// Version file: `<builder>/version.txt`
    pub version_file: PathBuf,
}

impl Layout {
    /// Resolve the default layout for `builder_dir`, applying any overrides.
    ///
    /// Relative overrides are taken relative to the builder directory.
    pub fn resolve(builder_dir: &Path, overrides: &PathOverrides) -> Self {
        let builder_dir = builder_dir.to_path_buf();
        let project_root = builder_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| builder_dir.clone(), Path::to_path_buf);

        let pick = |over: &Option<PathBuf>, default: PathBuf| match over {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => builder_dir.join(p),
            None => default,
        };

        Self {
            markdown_changelog: pick(
                &overrides.markdown_changelog,
                project_root.join("src").join("CHANGELOG.md"),
            ),
            debian_changelog: pick(
                &overrides.debian_changelog,
                builder_dir.join("debian").join("changelog"),
            ),
            base_copyright: pick(
                &overrides.base_copyright,
                project_root.join("debian").join("copyright"),
            ),
            generated_copyright: pick(
                &overrides.generated_copyright,
                builder_dir.join("build").join("copyright-generated"),
            ),
            license_report: pick(
                &overrides.license_report,
                builder_dir.join("build").join("reports").join("pip-licenses.md"),
            ),
            manifest: pick(
                &overrides.manifest,
                project_root.join("src").join("pyproject.toml"),
            ),
            version_file: pick(&overrides.version_file, builder_dir.join("version.txt")),
            builder_dir,
            project_root,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("builder dir", &self.builder_dir),
            ("project root", &self.project_root),
            ("markdown changelog", &self.markdown_changelog),
            ("debian changelog", &self.debian_changelog),
            ("base copyright", &self.base_copyright),
            ("generated copyright", &self.generated_copyright),
            ("license report", &self.license_report),
            ("manifest", &self.manifest),
            ("version file", &self.version_file),
        ];
        for (label, path) in rows {
            writeln!(f, "{label:<20} {}", path.display())?;
        }
        Ok(())
    }
}

/// Default settings file of the host application: `<config dir>/<app>/settings.json`.
///
/// Returns `None` when the platform has no per-user config directory.
pub fn default_settings_path(app: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(app).join("settings.json"))
}

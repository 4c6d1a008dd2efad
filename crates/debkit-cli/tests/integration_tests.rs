//! End-to-end tests driving the `debkit` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test context that lays out a project with a builder directory inside it.
struct TestContext {
    _temp_dir: TempDir,
    project: PathBuf,
    builder: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let project = temp_dir.path().join("notolog-debian");
        let builder = project.join("pyinstaller");
        fs::create_dir_all(&builder).expect("failed to create builder dir");

        Self {
            _temp_dir: temp_dir,
            project,
            builder,
        }
    }

    fn write(&self, path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn debkit(&self, args: &[&str]) -> Output {
        let bin_path = env!("CARGO_BIN_EXE_debkit");
        Command::new(bin_path)
            .arg("--builder-dir")
            .arg(&self.builder)
            .args(args)
            .env_remove("DEBKIT_BUILDER_DIR")
            .env("NO_COLOR", "1")
            .output()
            .expect("failed to run debkit")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.debkit(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_changelog_command() {
    let ctx = TestContext::new();
    ctx.write(
        &ctx.project.join("src/CHANGELOG.md"),
        "# Changelog\n\n## [1.1.6] - 2025-06-02\n\n### Added\n- Debian package\n\n## [1.1.5] - 2025-04-20\n- Old\n",
    );

    let output = ctx.debkit(&["changelog"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Debian changelog updated with version 1.1.6"));

    let written = fs::read_to_string(ctx.builder.join("debian/changelog")).unwrap();
    assert_eq!(
        written,
        "notolog (1.1.6) unstable; urgency=medium\n\n  * Debian package\n\n -- Notolog <dev@notolog.app>  Mon, 02 Jun 2025 00:00:00 +0000"
    );
}

#[test]
fn test_changelog_without_section_fails() {
    let ctx = TestContext::new();
    ctx.write(&ctx.project.join("src/CHANGELOG.md"), "# Changelog\n\nUnreleased work.\n");

    let output = ctx.debkit(&["changelog"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No valid version block found"));
    assert!(!ctx.builder.join("debian/changelog").exists());
}

#[test]
fn test_config_overrides_package_settings() {
    let ctx = TestContext::new();
    ctx.write(
        &ctx.builder.join("debkit.toml"),
        "[package]\ndistribution = \"stable\"\nurgency = \"low\"\nmaintainer = \"Jane <jane@example.org>\"\n",
    );
    ctx.write(
        &ctx.project.join("src/CHANGELOG.md"),
        "## [2.0.0] - 2025-01-15\n- Release\n",
    );

    let output = ctx.debkit(&["changelog"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let written = fs::read_to_string(ctx.builder.join("debian/changelog")).unwrap();
    assert!(written.starts_with("notolog (2.0.0) stable; urgency=low\n"));
    assert!(written.contains(" -- Jane <jane@example.org>  Wed, 15 Jan 2025"));
}

#[test]
fn test_copyright_command_is_repeatable() {
    let ctx = TestContext::new();
    let license = ctx.builder.join("venv/click/LICENSE.txt");
    ctx.write(&license, "Copyright 2014 Pallets\n\nRedistribution and use in source and binary forms...\n");
    ctx.write(
        &ctx.builder.join("build/reports/pip-licenses.md"),
        &format!(
            "| Name | Version | License | Author | LicenseFile |\n|------|---------|---------|--------|-------------|\n| click | 8.1.7 | BSD License | Armin | {} |\n| mystery | 0.1 | UNKNOWN | x | |\n",
            license.display()
        ),
    );
    ctx.write(
        &ctx.project.join("debian/copyright"),
        "Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/\nUpstream-Name: Notolog\n",
    );

    let output = ctx.debkit(&["copyright"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let first = fs::read_to_string(ctx.project.join("debian/copyright")).unwrap();
    assert!(first.contains(
        "Files: bundled/python-packages/click\nCopyright: 2014 Pallets\nLicense: BSD-3-Clause\nLicense-Text:\n Copyright 2014 Pallets\n"
    ));
    assert!(!first.contains("mystery"));

    let output = ctx.debkit(&["copyright"]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(ctx.project.join("debian/copyright")).unwrap(),
        first
    );
    assert!(ctx.builder.join("build/copyright-generated").exists());
}

#[test]
fn test_pre_build_writes_version_file() {
    let ctx = TestContext::new();
    ctx.write(
        &ctx.project.join("src/pyproject.toml"),
        "[tool.poetry]\nname = \"notolog\"\nversion = \"1.2.3\"\n\n[tool.poetry.dependencies]\ntomli = \"^2.0.1\"\n",
    );

    let output = ctx.debkit(&["pre-build"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        fs::read_to_string(ctx.builder.join("version.txt")).unwrap(),
        "1.2.3\n"
    );
    let manifest = fs::read_to_string(ctx.project.join("src/pyproject.toml")).unwrap();
    assert!(manifest.contains("tomli = \"^2.0.1,<=2.0.1\""));
    assert!(manifest.contains("llama-cpp-python = \"^0.3.8\""));

    let out = stdout(&output);
    assert!(out.contains("tomli: patched ^2.0.1 -> ^2.0.1,<=2.0.1"));
    assert!(out.contains("llama-cpp-python: added ^0.3.8"));

    let rerun = ctx.debkit(&["pre-build"]);
    assert!(rerun.status.success());
    assert!(stdout(&rerun).contains("tomli: already pinned at ^2.0.1,<=2.0.1"));
}

#[test]
fn test_pre_build_without_version_fails() {
    let ctx = TestContext::new();
    ctx.write(
        &ctx.project.join("src/pyproject.toml"),
        "[tool.poetry]\nname = \"notolog\"\n",
    );

    let output = ctx.debkit(&["pre-build"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No version found"));
    assert!(!ctx.builder.join("version.txt").exists());
}

#[test]
fn test_hook_sets_marker_once() {
    let ctx = TestContext::new();
    let settings = ctx.builder.join("settings.json");
    ctx.write(&settings, r#"{"theme": "dark"}"#);

    let output = ctx.debkit(&["hook", "--settings", settings.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("App package set to 'bin'"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&settings).unwrap()).unwrap();
    assert_eq!(saved["package"], "bin");
    assert_eq!(saved["theme"], "dark");

    let output = ctx.debkit(&["hook", "--settings", settings.to_str().unwrap()]);
    assert!(stdout(&output).contains("already set"));
}

#[test]
fn test_hook_never_fails() {
    let ctx = TestContext::new();
    let settings = ctx.builder.join("settings.json");
    ctx.write(&settings, "not json at all");

    let output = ctx.debkit(&["hook", "--settings", settings.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("continuing"));
}

#[test]
fn test_paths_command() {
    let ctx = TestContext::new();
    let output = ctx.debkit(&["paths"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("pip-licenses.md"));
    assert!(out.contains("version.txt"));
}

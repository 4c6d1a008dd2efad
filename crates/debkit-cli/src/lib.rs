//! debkit - Debian packaging helpers
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Build-time steps for shipping the Notolog editor as a Debian package
//! built around a bundled binary.
//!
//! # Steps
//!
//! - **changelog**: newest `CHANGELOG.md` section -> `debian/changelog` stanza.
//! - **copyright**: license report -> generated section of `debian/copyright`.
//! - **pre-build**: pin dependencies in `pyproject.toml`, write `version.txt`.
//! - **hook**: the startup package-type check, runnable against a settings file.
//!
//! # Directory Layout
//!
//! ```text
//! <project>/
//! ├── src/CHANGELOG.md
//! ├── src/pyproject.toml
//! ├── debian/copyright          # base file, generated section appended
//! └── <builder>/
//!     ├── debkit.toml           # optional configuration
//!     ├── debian/changelog
//!     ├── build/reports/pip-licenses.md
//!     ├── build/copyright-generated
//!     └── version.txt
//! ```

pub mod cmd;
pub mod context;
pub mod ui;

pub use context::Context;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "debkit")]
#[command(author, version, about = "debkit - Debian packaging helpers")]
pub struct Cli {
    /// Packaging directory; its parent is the project root
    #[arg(long, global = true, env = "DEBKIT_BUILDER_DIR", default_value = ".")]
    pub builder_dir: PathBuf,

    /// Configuration file (default: <builder-dir>/debkit.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Prepend the newest CHANGELOG.md section to debian/changelog
    Changelog,
    /// Regenerate third-party license entries in debian/copyright
    Copyright,
    /// Pin dependencies in the manifest and write the version file
    PreBuild,
    /// Run the startup package-type hook against a settings file
    Hook {
        /// Settings file (default: <config dir>/notolog/settings.json)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Package-type marker to enforce
        #[arg(long, default_value = debkit_schema::PackageType::BIN)]
        marker: String,
    },
    /// Show the resolved file layout
    Paths,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

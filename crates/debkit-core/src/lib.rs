//! Core library for debkit.
//!
//! Each module is one single-pass build step: read inputs fully, transform in
//! memory, write outputs once.

pub mod changelog;
pub mod config;
pub mod hook;
pub mod license;
pub mod manifest;
pub mod paths;
pub mod reporter;

pub use config::BuildConfig;
pub use paths::Layout;
pub use reporter::{NullReporter, Reporter};

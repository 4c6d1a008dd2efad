//! Shared command context.
//!
//! Groups the loaded configuration, the resolved file layout and the output
//! handle so every command gets them from one place.

use crate::ui::Output;
use anyhow::{Context as _, Result};
use debkit_core::config::CONFIG_FILE_NAME;
use debkit_core::{BuildConfig, Layout};
use std::path::Path;

#[derive(Debug)]
pub struct Context {
    pub config: BuildConfig,
    pub layout: Layout,
    pub output: Output,
}

impl Context {
    /// Resolve the builder directory, load `debkit.toml` and compute the layout.
    pub fn load(builder_dir: &Path, config: Option<&Path>, quiet: bool) -> Result<Self> {
        let builder_dir = builder_dir
            .canonicalize()
            .or_else(|_| std::path::absolute(builder_dir))
            .with_context(|| format!("Failed to resolve {}", builder_dir.display()))?;

        let config_path = config.map_or_else(
            || builder_dir.join(CONFIG_FILE_NAME),
            Path::to_path_buf,
        );
        let config = BuildConfig::load(&config_path)?;
        let layout = Layout::resolve(&builder_dir, &config.paths);
        tracing::debug!("Builder dir: {}", builder_dir.display());

        Ok(Self {
            config,
            layout,
            output: Output::new(quiet),
        })
    }
}

//! Changelog command

use crate::Context;
use anyhow::{Context as _, Result};
use debkit_core::changelog::update_changelog;

/// Prepend the newest Markdown changelog section to `debian/changelog`.
pub fn changelog(ctx: &Context) -> Result<()> {
    let layout = &ctx.layout;
    update_changelog(
        &layout.markdown_changelog,
        &layout.debian_changelog,
        &ctx.config.package,
        &ctx.output,
    )
    .with_context(|| {
        format!(
            "Failed to convert {} into {}",
            layout.markdown_changelog.display(),
            layout.debian_changelog.display()
        )
    })?;
    Ok(())
}

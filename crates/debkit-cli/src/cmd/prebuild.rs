//! Pre-build command

use crate::Context;
use anyhow::Result;
use debkit_core::manifest::patch_manifest;

/// Pin manifest dependencies and write the version file.
pub fn pre_build(ctx: &Context) -> Result<()> {
    let layout = &ctx.layout;
    let report = patch_manifest(
        &layout.manifest,
        &layout.version_file,
        &ctx.config.prebuild.pins,
        &ctx.output,
    )?;
    tracing::debug!(
        "Applied {} pins, version {}",
        report.outcomes.len(),
        report.version
    );
    Ok(())
}

//! Copyright command

use crate::Context;
use anyhow::{Context as _, Result};
use debkit_core::license::{CopyrightPaths, generate_copyright};
use debkit_schema::LicenseTables;

/// Regenerate the third-party license section of `debian/copyright`.
pub fn copyright(ctx: &Context) -> Result<()> {
    let layout = &ctx.layout;
    let paths = CopyrightPaths {
        report: &layout.license_report,
        generated: &layout.generated_copyright,
        base: &layout.base_copyright,
    };

    generate_copyright(
        paths,
        &LicenseTables::default(),
        &ctx.config.package,
        &ctx.config.copyright,
        &ctx.output,
    )
    .context("Failed to generate copyright file")?;
    Ok(())
}

//! Paths command

use crate::Context;

/// Print the resolved file layout.
pub fn paths(ctx: &Context) {
    ctx.output.plain(ctx.layout.to_string().trim_end());
}

use std::io::Write;

use crate::context::Context;
use crate::error::Result;

/// Print every build definition of the configured project as `name (id)`.
pub async fn list_builds(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let project = &ctx.config.project;
    let definitions = ctx.platform.get_definitions(project).await?;
    log::debug!("{} build definition(s) in {project}", definitions.len());

    for definition in &definitions {
        writeln!(out, "{definition}")?;
    }
    Ok(())
}

//! Serve the built site.

use anyhow::Result;
use shack_server::ServerConfig;

use super::ServeArgs;
use crate::context::Context;

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let mut config: ServerConfig = ctx.config.server.clone();
    if let Some(dist) = args.dist {
        config.dist_dir = ctx.resolve_path(&dist);
    }
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    ctx.output.debug(&format!(
        "serving {} on {}",
        config.dist_dir.display(),
        config.bind
    ));

    shack_server::serve(config).await?;
    Ok(())
}

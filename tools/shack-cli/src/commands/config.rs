//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShackConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(&path, force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[server]");
    ctx.output
        .kv("dist_dir", &ctx.config.server.dist_dir.display().to_string());
    ctx.output.kv("bind", &ctx.config.server.bind);

    ctx.output.info("[order]");
    ctx.output
        .kv("state_dir", &ctx.config.order.state_dir.display().to_string());

    Ok(())
}

fn init_config(path: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if config_path.extension().and_then(|e| e.to_str()) == Some("json") {
        ShackConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));
    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "created": config_path.display().to_string() }));
    }

    Ok(())
}

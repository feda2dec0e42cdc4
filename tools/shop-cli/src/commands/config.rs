//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    let api = ctx.config.api_config();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "path": ctx.config_path,
            "config": ctx.config,
            "effective_base_url": api.base_url,
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv(
        "base_url",
        ctx.config.api.base_url.as_deref().unwrap_or("(unset)"),
    );
    ctx.output.kv(
        "effective",
        if api.is_relative() {
            "(relative paths)"
        } else {
            &api.base_url
        },
    );
    ctx.output
        .kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("dir", &ctx.config.storage_dir().display().to_string());

    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);

    if !ctx.config.addresses.is_empty() {
        ctx.output.info("");
        ctx.output.info("Addresses:");
        for address in &ctx.config.addresses {
            let marker = if address.is_default { " (default)" } else { "" };
            ctx.output
                .list_item(&format!("{}: {}{}", address.id, address.one_line(), marker));
        }
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("shop.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

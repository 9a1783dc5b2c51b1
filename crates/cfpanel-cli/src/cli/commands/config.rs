//! `cfpanel config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::{render, OutputFormat};

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load()?;

    if let Some(text) = render(ctx.output_format, &config)? {
        println!("{text}");
        return Ok(());
    }

    let unset = || "(not set)".dimmed().to_string();

    println!("{}", "Current Configuration:".bold());
    println!();
    println!("  {} {}", "url:".bold(), config.url.unwrap_or_else(unset));
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or(OutputFormat::Pretty)
    );
    println!("  {} {}", "username:".bold(), config.username.unwrap_or_else(unset));
    println!(
        "  {} {}",
        "timeout_secs:".bold(),
        config
            .timeout_secs
            .map_or_else(unset, |secs| secs.to_string())
    );
    println!();
    println!("{}", format!("Effective backend: {}", ctx.url).dimmed());

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());
    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}

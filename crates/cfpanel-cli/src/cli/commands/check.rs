//! `cfpanel check` - Backend tool availability.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::output::{render, spinner};

pub async fn execute(ctx: Context) -> Result<()> {
    let (_, dashboard) = ctx.dashboard()?;

    let bar = spinner(ctx.output_format, "checking...");
    let result = dashboard.check().await;
    bar.finish_and_clear();
    let check = result?;

    if let Some(text) = render(ctx.output_format, &check)? {
        println!("{text}");
        return Ok(());
    }

    let status = |present: bool| {
        if present {
            "installed".green()
        } else {
            "missing".red()
        }
    };

    println!("{} {}", "Backend:".bold(), ctx.url.cyan());
    println!();
    println!("  {} {}", "cloudflared:".bold(), status(check.cloudflared));
    println!("  {} {}", "xray:".bold(), status(check.xray));
    println!("  {} {}", "data dir:".bold(), check.main_dir);

    if !check.is_ready() {
        println!();
        println!(
            "{}",
            "Some helpers are missing; tunnels or nodes will fail to start.".yellow()
        );
    }
    Ok(())
}

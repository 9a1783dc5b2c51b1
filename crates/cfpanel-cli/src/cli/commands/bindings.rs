//! `cfpanel list`, `run` and `delete` - Saved bindings.

use anyhow::Result;
use cfpanel::dashboard::{BindingRow, ListView};
use cfpanel::{Outcome, RowAction};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::cli::args::DomainArgs;
use crate::output::{render_rows, spinner};

#[derive(Tabled)]
struct Row<'a> {
    #[tabled(rename = "Domain")]
    domain: &'a str,
    #[tabled(rename = "Port")]
    local_port: &'a str,
    #[tabled(rename = "Actions")]
    actions: String,
}

pub async fn list(ctx: Context) -> Result<()> {
    let (_, dashboard) = ctx.dashboard()?;

    let bar = spinner(ctx.output_format, "loading...");
    let result = dashboard.on_page_load().await;
    bar.finish_and_clear();
    let outcome = result?;

    print_list(&ctx, &dashboard.view().await.list)?;
    if let Outcome::Refused = outcome {
        anyhow::bail!("Backend refused to list bindings");
    }
    Ok(())
}

pub async fn run(ctx: Context, args: DomainArgs) -> Result<()> {
    let (_, dashboard) = ctx.dashboard()?;
    dashboard.click_row(&args.domain, RowAction::Run).await?;
    Ok(())
}

pub async fn delete(ctx: Context, args: DomainArgs) -> Result<()> {
    let (_, dashboard) = ctx.dashboard()?;

    match dashboard.click_row(&args.domain, RowAction::Delete).await? {
        Outcome::Cancelled => {
            println!("{}", "Cancelled.".dimmed());
        }
        Outcome::Refused => anyhow::bail!("{} was not deleted", args.domain),
        _ if ctx.is_pretty() => {
            let view = dashboard.view().await;
            if !view.list.rows().is_empty() {
                println!();
                print_list(&ctx, &view.list)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Render the bindings area in the chosen format.
pub fn print_list(ctx: &Context, list: &ListView) -> Result<()> {
    let rows = match list {
        ListView::Loading => {
            println!("{}", "loading...".dimmed());
            return Ok(());
        }
        ListView::Raw(text) => {
            println!("{}", text.red());
            return Ok(());
        }
        ListView::Rows(rows) => rows,
    };

    if let Some(text) = render_rows(ctx.output_format, rows)? {
        println!("{text}");
        return Ok(());
    }

    if rows.is_empty() {
        println!("  No saved bindings.");
        println!();
        println!(
            "  Register one with: {} register <SUBDOMAIN> --zone <ZONE> --port <PORT>",
            "cfpanel".cyan()
        );
        return Ok(());
    }

    println!("{}", "Saved Bindings:".bold());
    let actions = BindingRow::ACTIONS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" / ");
    let table_rows: Vec<Row<'_>> = rows
        .iter()
        .map(|row| Row {
            domain: &row.domain,
            local_port: &row.local_port,
            actions: actions.clone(),
        })
        .collect();

    let table = Table::new(&table_rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}

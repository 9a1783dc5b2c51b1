//! `cfpanel zones` and `cfpanel register` - DNS zones and registration.

use anyhow::Result;
use cfpanel::{Dashboard, Outcome, Zone};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use super::bindings::print_list;
use super::{print_slot, Context};
use crate::cli::args::{RegisterArgs, TokenArgs};
use crate::output::{render_rows, spinner};

#[derive(Tabled)]
struct ZoneRow<'a> {
    #[tabled(rename = "Zone")]
    name: &'a str,
    #[tabled(rename = "Id")]
    id: &'a str,
}

pub async fn list(ctx: Context, args: TokenArgs) -> Result<()> {
    let (_, dashboard) = ctx.dashboard()?;
    let zones = load(&ctx, &dashboard, args.token.unwrap_or_default()).await?;

    if let Some(text) = render_rows(ctx.output_format, &zones)? {
        println!("{text}");
        return Ok(());
    }

    if zones.is_empty() {
        println!("  No zones loaded.");
        return Ok(());
    }

    println!("{}", "Zones:".bold());
    let rows: Vec<ZoneRow<'_>> = zones
        .iter()
        .map(|zone| ZoneRow {
            name: &zone.name,
            id: &zone.id,
        })
        .collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));
    Ok(())
}

pub async fn register(ctx: Context, args: RegisterArgs) -> Result<()> {
    let RegisterArgs {
        subdomain,
        zone,
        port,
        account_id,
        service_type,
        token,
    } = args;

    let (_, dashboard) = ctx.dashboard()?;
    dashboard
        .update_forms(move |forms| {
            forms.account_id = account_id;
            forms.subdomain = subdomain;
            forms.local_port = port;
            forms.service_type = service_type;
        })
        .await;

    load(&ctx, &dashboard, token.token.unwrap_or_default()).await?;
    if !dashboard.select_zone_named(&zone).await {
        anyhow::bail!("Zone {zone} is not visible to this token");
    }

    let bar = spinner(ctx.output_format, "processing...");
    let result = dashboard.register().await;
    bar.finish_and_clear();
    let outcome = result?;

    print_slot(&ctx, &dashboard.view().await.outputs.register)?;
    if let Outcome::Refused = outcome {
        anyhow::bail!("Registration failed");
    }

    if let Outcome::Scheduled(follow_up) = outcome {
        let bar = spinner(ctx.output_format, "reloading bindings...");
        follow_up.wait().await;
        bar.finish_and_clear();

        if ctx.is_pretty() {
            println!();
            print_list(&ctx, &dashboard.view().await.list)?;
        }
    }
    Ok(())
}

/// Load the token's zones into the dashboard and return them.
async fn load(ctx: &Context, dashboard: &Dashboard, token: String) -> Result<Vec<Zone>> {
    dashboard.update_forms(move |forms| forms.token = token).await;

    let bar = spinner(ctx.output_format, "loading zones...");
    let result = dashboard.load_zones().await;
    bar.finish_and_clear();

    match result? {
        Outcome::Blocked => anyhow::bail!("Pass --token or set CF_API_TOKEN"),
        Outcome::Refused => anyhow::bail!("Backend refused to list zones"),
        _ => {}
    }

    let view = dashboard.view().await;
    Ok(view
        .zones
        .zones()
        .iter()
        .map(|option| option.zone.clone())
        .collect())
}

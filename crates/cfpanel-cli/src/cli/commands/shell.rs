//! `cfpanel shell` - Interactive shell mode.
//!
//! One dashboard session lives for the whole shell, so zone selections and
//! delayed follow-ups behave as they do on the web page.

use anyhow::Result;
use cfpanel::dashboard::OutputSlot;
use cfpanel::{Dashboard, Outcome, RowAction};
use colored::Colorize;
use dialoguer::Password;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use super::bindings::print_list;
use super::{print_slot, save_session, Context};

const HELP: &str = "\
Session:
  login <user>           log in (password is prompted)
  logout                 end the session
  passwd                 change the password
Tunnels:
  temp [port]            start a temporary tunnel (default 8080)
  node <domain> [vmess|vless] [port] [path]
Zones and registration:
  token <token>          set the Cloudflare API token
  account <id>           set the Cloudflare account id
  zones                  load zones for the token
  select <zone>          pick a zone by name, id or number
  register <sub> <port> [type]
Bindings:
  list                   reload saved bindings
  run <domain>           start a binding's tunnel
  delete <domain>        delete a binding (asks first)
Other:
  check                  show backend helper status
  view                   dump the dashboard state as JSON
  help                   show this help
  exit                   leave the shell";

pub async fn execute(ctx: Context) -> Result<()> {
    println!("{} {}", "cfpanel".cyan().bold(), "interactive shell".bold());
    println!("Connected to {}.", ctx.url.bold());
    println!(
        "Type {} for commands, {} to quit.",
        "help".green(),
        "exit".red()
    );
    println!();

    let (client, dashboard) = ctx.dashboard()?;
    if let Err(e) = dashboard.on_page_load().await {
        println!("{}", format!("Could not load bindings: {e}").yellow());
    } else {
        print_list(&ctx, &dashboard.view().await.list)?;
    }

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("cfpanel> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = editor.add_history_entry(line) {
            debug!(error = %e, "history entry dropped");
        }

        match dispatch(&ctx, &dashboard, line).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("{} {e}", "Error:".red().bold()),
        }
    }

    save_session(&client)?;
    Ok(())
}

/// Run one shell line; returns false when the shell should exit.
async fn dispatch(ctx: &Context, dashboard: &Dashboard, line: &str) -> Result<bool> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let arg = |i: usize| words.get(i).copied().unwrap_or_default().to_string();

    match words[0] {
        "exit" | "quit" => return Ok(false),
        "help" | "?" => println!("{HELP}"),

        "login" => {
            let username = match words.get(1) {
                Some(name) => (*name).to_string(),
                None => anyhow::bail!("usage: login <user>"),
            };
            let password = Password::new().with_prompt("Password").interact()?;
            let reply = dashboard.login(&username, &password).await?;
            println!("{}", reply.compact());
        }
        "logout" => {
            dashboard.logout().await?;
            if let Some(location) = dashboard.view().await.location {
                println!("Logged out; log in again to continue ({location}).");
            }
        }
        "passwd" => {
            let old = Password::new().with_prompt("Current password").interact()?;
            let new = Password::new().with_prompt("New password").interact()?;
            dashboard.open_password_dialog().await;
            dashboard
                .update_forms(move |forms| {
                    forms.old_password = old;
                    forms.new_password = new;
                })
                .await;
            // The dialog closes on its own once the follow-up fires
            dashboard.change_password().await?;
            show(ctx, dashboard, OutputSlot::Password).await?;
        }

        "temp" => {
            let port = arg(1);
            dashboard.update_forms(move |forms| forms.temp_port = port).await;
            dashboard.start_temp_tunnel().await?;
            show(ctx, dashboard, OutputSlot::Temp).await?;
        }
        "node" => {
            let (domain, kind, port, path) = (arg(1), arg(2), arg(3), arg(4));
            dashboard
                .update_forms(move |forms| {
                    forms.node.domain = domain;
                    if kind.eq_ignore_ascii_case("vless") {
                        forms.node.node_type = "VLess".into();
                    } else if kind.eq_ignore_ascii_case("vmess") {
                        forms.node.node_type = "VMess".into();
                    }
                    if !port.is_empty() {
                        forms.node.port = port;
                    }
                    if !path.is_empty() {
                        forms.node.path = path;
                    }
                })
                .await;
            dashboard.start_node().await?;
            show(ctx, dashboard, OutputSlot::Node).await?;
        }

        "token" => {
            let token = arg(1);
            dashboard.update_forms(move |forms| forms.token = token).await;
        }
        "account" => {
            let account = arg(1);
            dashboard.update_forms(move |forms| forms.account_id = account).await;
        }
        "zones" => {
            dashboard.load_zones().await?;
            print_zone_options(dashboard).await;
        }
        "select" => {
            let needle = arg(1);
            if !select_zone(dashboard, &needle).await {
                anyhow::bail!("no zone matches {needle:?}");
            }
        }
        "register" => {
            let (subdomain, port, service) = (arg(1), arg(2), arg(3));
            dashboard
                .update_forms(move |forms| {
                    forms.subdomain = subdomain;
                    forms.local_port = port;
                    if !service.is_empty() {
                        forms.service_type = service;
                    }
                })
                .await;
            let outcome = dashboard.register().await?;
            if !matches!(outcome, Outcome::Blocked) {
                show(ctx, dashboard, OutputSlot::Register).await?;
            }
        }

        "list" | "reload" => {
            dashboard.reload_list().await?;
            print_list(ctx, &dashboard.view().await.list)?;
        }
        "check" => {
            let check = dashboard.check().await?;
            println!("{}", serde_json::to_string_pretty(&check)?);
        }
        "view" => {
            println!("{}", serde_json::to_string_pretty(&dashboard.view().await)?);
        }

        other => match other.parse::<RowAction>() {
            Ok(action) => {
                let Some(domain) = words.get(1) else {
                    anyhow::bail!("usage: {action} <domain>");
                };
                if let Outcome::Cancelled = dashboard.click_row(domain, action).await? {
                    println!("{}", "Cancelled.".dimmed());
                }
            }
            Err(_) => println!("Unknown command {other:?}; type {} for a list.", "help".green()),
        },
    }

    Ok(true)
}

async fn show(ctx: &Context, dashboard: &Dashboard, slot: OutputSlot) -> Result<()> {
    print_slot(ctx, dashboard.view().await.outputs.get(slot))
}

async fn print_zone_options(dashboard: &Dashboard) {
    let view = dashboard.view().await;
    for (i, option) in view.zones.options().iter().enumerate() {
        let marker = if option.key.is_some() && option.key == view.forms.zone {
            "*"
        } else {
            " "
        };
        println!("{marker} {i:>2}  {}", option.label);
    }
}

/// Select by dropdown position, then by name or id
async fn select_zone(dashboard: &Dashboard, needle: &str) -> bool {
    if let Ok(index) = needle.parse::<usize>() {
        let key = dashboard
            .view()
            .await
            .zones
            .options()
            .get(index)
            .and_then(|option| option.key);
        if key.is_some() {
            dashboard.select_zone(key).await;
            return true;
        }
    }
    dashboard.select_zone_named(needle).await
}

//! `cfpanel temp` and `cfpanel node` - Tunnels and proxy nodes.

use anyhow::Result;
use cfpanel::ShareLink;
use colored::Colorize;
use serde_json::Value;

use super::{print_slot, Context};
use crate::cli::args::{NodeArgs, TempArgs};
use crate::output::spinner;

pub async fn temp(ctx: Context, args: TempArgs) -> Result<()> {
    let (_, dashboard) = ctx.dashboard()?;
    if let Some(port) = args.port {
        dashboard.update_forms(move |forms| forms.temp_port = port).await;
    }

    let bar = spinner(ctx.output_format, "starting...");
    let result = dashboard.start_temp_tunnel().await;
    bar.finish_and_clear();

    result?;
    print_slot(&ctx, &dashboard.view().await.outputs.temp)
}

pub async fn node(ctx: Context, args: NodeArgs) -> Result<()> {
    let (_, dashboard) = ctx.dashboard()?;
    dashboard
        .update_forms(move |forms| {
            forms.node.node_type = args.kind.label().to_string();
            forms.node.domain = args.domain;
            forms.node.port = args.port;
            forms.node.path = args.path;
        })
        .await;

    let bar = spinner(ctx.output_format, "starting...");
    let result = dashboard.start_node().await;
    bar.finish_and_clear();

    result?;
    let output = dashboard.view().await.outputs.node;
    print_slot(&ctx, &output)?;

    if ctx.is_pretty() {
        if let Some(link) = share_link(&output) {
            print_share_link(&link);
        }
    }
    Ok(())
}

/// Decode the `link` of a successful node reply
fn share_link(output: &str) -> Option<ShareLink> {
    let reply: Value = serde_json::from_str(output).ok()?;
    reply.get("link")?.as_str()?.parse().ok()
}

fn print_share_link(link: &ShareLink) {
    println!();
    println!("{}", "Share link:".bold().underline());
    println!("  {} {}", "Protocol:".bold(), link.protocol.to_string().cyan());
    println!("  {} {}", "Host:".bold(), link.host);
    println!("  {} {}", "Port:".bold(), link.port);
    println!("  {} {}", "Path:".bold(), link.path);
    println!("  {} {}", "UUID:".bold(), link.id.dimmed());
    if let Some(sni) = &link.sni {
        println!("  {} {}", "SNI:".bold(), sni);
    }
    if let Some(name) = &link.name {
        println!("  {} {}", "Name:".bold(), name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link_from_vless_reply() {
        let output = r#"{
  "ok": true,
  "pid": 42,
  "link": "vless://0f6c7e2a-1111-2222-3333-444455556666@n.example.com:443?encryption=none&type=ws&security=tls&host=n.example.com&sni=n.example.com&path=%2Fws#CF-n.example.com"
}"#;
        let link = share_link(output).unwrap();
        assert_eq!(link.host, "n.example.com");
        assert_eq!(link.path, "/ws");
    }

    #[test]
    fn test_no_share_link_in_failure() {
        assert!(share_link(r#"{"ok": false, "error": "xray not found"}"#).is_none());
        assert!(share_link("request failed: connection refused").is_none());
    }
}

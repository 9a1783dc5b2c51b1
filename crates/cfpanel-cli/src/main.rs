//! cfpanel - command-line dashboard for a Cloudflare tunnel panel.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cfpanel_cli::run().await
}

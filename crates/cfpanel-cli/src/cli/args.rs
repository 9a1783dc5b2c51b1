//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Command-line dashboard for a Cloudflare tunnel panel
///
/// Start quick tunnels, register subdomains under your zones, and manage
/// saved bindings on a cfpanel backend.
///
/// Log in first with: cfpanel login
#[derive(Parser, Debug)]
#[command(name = "cfpanel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend URL (default http://127.0.0.1:5000)
    #[arg(short, long, env = "CFPANEL_URL", global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    pub assume_yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and save the session
    Login(LoginArgs),

    /// End the saved session
    Logout,

    /// Change the panel password
    Passwd(PasswdArgs),

    /// Start a temporary tunnel for a local port
    Temp(TempArgs),

    /// List the zones visible to a Cloudflare API token
    Zones(TokenArgs),

    /// Register a subdomain under one of your zones
    Register(RegisterArgs),

    /// List saved bindings
    List,

    /// Start the tunnel of a saved binding
    Run(DomainArgs),

    /// Delete a saved binding
    Delete(DomainArgs),

    /// Start a VMess/VLess node behind the tunnel
    Node(NodeArgs),

    /// Show which helper binaries the backend has
    Check,

    /// Start interactive shell mode
    Shell,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Session commands
// ============================================================================

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username (prompted if omitted and none is saved)
    pub username: Option<String>,

    /// Password (prompted if omitted)
    #[arg(short, long, env = "CFPANEL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct PasswdArgs {
    /// Current password (prompted if omitted)
    #[arg(long)]
    pub old: Option<String>,

    /// New password (prompted if omitted)
    #[arg(long)]
    pub new: Option<String>,
}

// ============================================================================
// Tunnel commands
// ============================================================================

#[derive(Args, Debug)]
pub struct TempArgs {
    /// Local port to expose (default 8080)
    #[arg(short, long)]
    pub port: Option<String>,
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Cloudflare API token
    #[arg(short, long, env = "CF_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Subdomain label to create (e.g. "app")
    pub subdomain: String,

    /// Zone name or id to register under
    #[arg(short, long)]
    pub zone: String,

    /// Local port the tunnel forwards to
    #[arg(short, long)]
    pub port: String,

    /// Cloudflare account id
    #[arg(short, long, env = "CF_ACCOUNT_ID")]
    pub account_id: String,

    /// Local service scheme
    #[arg(long = "type", default_value = "http")]
    pub service_type: String,

    #[command(flatten)]
    pub token: TokenArgs,
}

#[derive(Args, Debug)]
pub struct DomainArgs {
    /// Domain of the saved binding
    pub domain: String,
}

/// Node protocol
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Vmess,
    Vless,
}

impl NodeKind {
    /// Label the backend expects
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vmess => "VMess",
            Self::Vless => "VLess",
        }
    }
}

#[derive(Args, Debug)]
pub struct NodeArgs {
    /// Public domain used in the share link
    pub domain: String,

    /// Node protocol
    #[arg(long = "type", value_enum, default_value = "vmess")]
    pub kind: NodeKind,

    /// Local listen port
    #[arg(short, long, default_value = "8080")]
    pub port: String,

    /// WebSocket path
    #[arg(long, default_value = "/ws")]
    pub path: String,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (url, output_format, username, timeout_secs)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_register_flags() {
        let cli = Cli::try_parse_from([
            "cfpanel", "register", "app", "--zone", "example.com", "--port", "3000",
            "--account-id", "acc", "--token", "T",
        ])
        .unwrap();

        let Commands::Register(args) = cli.command else {
            panic!("expected register");
        };
        assert_eq!(args.subdomain, "app");
        assert_eq!(args.service_type, "http");
        assert_eq!(args.token.token.as_deref(), Some("T"));
    }

    #[test]
    fn test_node_defaults() {
        let cli = Cli::try_parse_from(["cfpanel", "node", "n.example.com", "--type", "vless"])
            .unwrap();

        let Commands::Node(args) = cli.command else {
            panic!("expected node");
        };
        assert_eq!(args.kind.label(), "VLess");
        assert_eq!(args.port, "8080");
        assert_eq!(args.path, "/ws");
    }
}

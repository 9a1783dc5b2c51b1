//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use cfpanel::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Flag or env first, then the config file
    let url = cli
        .url
        .or_else(|| config.url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Create context for commands
    let ctx = commands::Context {
        url,
        output_format: cli.output.or(config.output_format).unwrap_or_default(),
        verbose: cli.verbose,
        assume_yes: cli.assume_yes,
        timeout_secs: config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT.as_secs()),
        username: config.username,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Login(args) => commands::session::login(ctx, args).await,
        Commands::Logout => commands::session::logout(ctx).await,
        Commands::Passwd(args) => commands::session::passwd(ctx, args).await,
        Commands::Temp(args) => commands::tunnel::temp(ctx, args).await,
        Commands::Zones(args) => commands::zones::list(ctx, args).await,
        Commands::Register(args) => commands::zones::register(ctx, args).await,
        Commands::List => commands::bindings::list(ctx).await,
        Commands::Run(args) => commands::bindings::run(ctx, args).await,
        Commands::Delete(args) => commands::bindings::delete(ctx, args).await,
        Commands::Node(args) => commands::tunnel::node(ctx, args).await,
        Commands::Check => commands::check::execute(ctx).await,
        Commands::Shell => commands::shell::execute(ctx).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Log to stderr; `RUST_LOG` wins unless `-v` asks for debug.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .with_ansi(!no_color),
        )
        .with(filter)
        .init();
}

//! Shack CLI - run the Pizza Shack site and work with the order from a terminal.
//!
//! Commands:
//! - `shack serve` - Serve the built site
//! - `shack menu` - Print the menu
//! - `shack order` - Build, inspect and check out the saved order
//! - `shack config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, MenuArgs, OrderArgs, ServeArgs};

/// Shack CLI - Tony's Pizza Shack from the command line
#[derive(Parser)]
#[command(name = "shack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (repeat for debug logs)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the built single-page app
    Serve(ServeArgs),

    /// Print the menu
    Menu(MenuArgs),

    /// Work with the saved order
    Order(OrderArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose > 0, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run(args, &ctx).await,
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
///
/// `RUST_LOG` wins over the verbosity flag: 0 = warnings plus server
/// lifecycle, 1 = info, 2+ = debug.
fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn,shack_server=info"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

//! CLI command implementations.

pub mod config;
pub mod menu;
pub mod order;
pub mod serve;

use clap::{Args, Subcommand};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Build directory to serve (overrides config).
    #[arg(short, long)]
    pub dist: Option<String>,

    /// Address to listen on (overrides config).
    #[arg(short, long)]
    pub bind: Option<String>,
}

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Also list pizza sizes and toppings.
    #[arg(long)]
    pub options: bool,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: Option<OrderCommand>,
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Show the current order and its totals.
    Show,
    /// Add an item. Pizzas accept a size and toppings.
    Add {
        /// Menu item ID (see `shack menu`).
        item: String,

        /// Pizza size ID.
        #[arg(short, long)]
        size: Option<String>,

        /// Pizza topping ID (repeatable).
        #[arg(short, long = "topping")]
        toppings: Vec<String>,
    },
    /// Increase a line's quantity by one.
    Inc {
        /// Line ID (see `shack order show`).
        line: String,
    },
    /// Decrease a line's quantity by one, removing it at zero.
    Dec {
        /// Line ID (see `shack order show`).
        line: String,
    },
    /// Choose pickup or delivery.
    Mode {
        /// `pickup` or `delivery`.
        mode: String,
    },
    /// Replace the order notes.
    Notes {
        /// Notes text (empty to clear).
        #[arg(default_value = "")]
        text: String,
    },
    /// Empty the order.
    Clear,
    /// Place the order.
    Checkout,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// File to create; a `.json` path writes JSON.
        #[arg(default_value = "shack.toml")]
        path: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;
pub mod runner;

#[derive(Parser)]
#[command(name = "scrapeyard")]
#[command(version, about = "Crypto price and rental listing scrapers")]
#[command(
    long_about = "Quote cryptocurrency prices from coinmarketcap.com and extract rental listings (address, rent, type, bedrooms, bathrooms, square footage) for a ZIP code from trulia.com. With no command, runs the price report and then the rental report."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Path to a TOML config file
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Quote cryptocurrency prices
    Prices {
        /// Ticker symbols (e.g., BTC ETH); defaults to the configured list
        tickers: Vec<String>,
    },

    /// Discover and extract rental listings for a ZIP code
    Rentals {
        /// ZIP code to search; defaults to the configured ZIP
        #[arg(short, long)]
        zip: Option<String>,

        /// Also write the listings to this CSV file
        #[arg(short, long, value_name = "CSV")]
        export: Option<PathBuf>,
    },
}

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use scrapeyard::config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr; stdout carries the report
    let default_filter = if cli.verbose {
        "warn,scrapeyard=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    cli::runner::run(&cli, &config)
}

use anyhow::Result;
use tracing::info;

use scrapeyard::config::Config;
use scrapeyard::fetch::HttpFetcher;
use scrapeyard::pricing::{self, PriceQuote};
use scrapeyard::rentals::{self, export, Listing, RentalProgress};

use crate::cli::formatters;
use crate::cli::{Cli, Commands};

/// Execute the parsed command line against the loaded config
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Some(Commands::Prices { tickers }) => {
            let tickers = if tickers.is_empty() {
                config.tickers.clone()
            } else {
                tickers.clone()
            };
            let quotes = run_prices(config, &tickers, !cli.json)?;
            if cli.json {
                println!("{}", formatters::format_json(&quotes));
            }
            Ok(())
        }

        Some(Commands::Rentals { zip, export: csv_path }) => {
            let zip_code = zip.as_deref().unwrap_or(&config.zip_code);
            let listings = run_rentals(config, zip_code, !cli.json)?;
            if let Some(path) = csv_path {
                export::export_listings_csv(path, &listings)?;
            }
            if cli.json {
                println!("{}", formatters::format_json(&listings));
            }
            Ok(())
        }

        None => {
            let quotes = run_prices(config, &config.tickers, !cli.json)?;
            if !cli.json {
                println!();
            }
            let listings = run_rentals(config, &config.zip_code, !cli.json)?;
            if cli.json {
                println!("{}", formatters::format_full_run_json(&quotes, &listings));
            }
            Ok(())
        }
    }
}

/// Quote each ticker, printing one line per quote when `print` is set
fn run_prices(config: &Config, tickers: &[String], print: bool) -> Result<Vec<PriceQuote>> {
    let fetcher = HttpFetcher::new()?;
    pricing::run_price_report(&fetcher, &config.prices_base_url, tickers, |quote| {
        if print {
            println!("{}", formatters::format_quote_line(quote));
        }
    })
}

/// Discover listings for `zip_code` and extract them one by one, printing as
/// each completes when `print` is set
fn run_rentals(config: &Config, zip_code: &str, print: bool) -> Result<Vec<Listing>> {
    let fetcher = HttpFetcher::with_user_agent(&config.user_agent)?;
    let listings = rentals::scrape_listings(
        &fetcher,
        &config.rentals_base_url,
        zip_code,
        |progress| {
            if !print {
                return;
            }
            match progress {
                RentalProgress::Discovered(count) => {
                    println!("{}", formatters::format_discovery_count(count));
                }
                RentalProgress::Extracted { index, listing } => {
                    println!("{}", formatters::format_property_header(index));
                    println!("{}", formatters::format_listing_block(listing));
                    println!("\n");
                }
            }
        },
    )?;
    info!("Extracted {} listings for ZIP {}", listings.len(), zip_code);
    Ok(listings)
}

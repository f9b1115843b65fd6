// Pricing module - crypto spot prices scraped from coinmarketcap.com

pub mod coinmarketcap;

use anyhow::{Context, Result};
use scraper::Html;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, info};

use crate::error::LookupError;
use crate::fetch::PageSource;

/// Known ticker symbols and the slug coinmarketcap uses for them
const TICKER_LOOKUP: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("XRP", "ripple"),
    ("BCH", "bitcoin-cash"),
    ("BCC", "bitcoin-cash"),
    ("EOS", "eos"),
];

/// Tickers reported when none are given
pub const DEFAULT_TICKERS: &[&str] = &["BTC", "ETH", "XRP", "BCH", "EOS"];

/// Resolve a ticker to its page slug. Matching is exact.
pub fn slug_for(ticker: &str) -> Result<&'static str, LookupError> {
    TICKER_LOOKUP
        .iter()
        .find(|(symbol, _)| *symbol == ticker)
        .map(|(_, slug)| *slug)
        .ok_or_else(|| LookupError {
            ticker: ticker.to_string(),
        })
}

/// Outcome of a single price lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Price {
    /// Price text as it appears on the page
    Quoted(String),
    /// Page fetched but no price node found
    Missing,
    /// Ticker not in the lookup table; nothing was fetched
    Unknown(LookupError),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Quoted(value) => write!(f, "{}", value),
            Price::Missing => write!(f, "None"),
            Price::Unknown(err) => write!(f, "{}", err),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Price::Quoted(value) => serializer.serialize_str(value),
            Price::Missing => serializer.serialize_none(),
            Price::Unknown(err) => serializer.serialize_str(&err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub ticker: String,
    pub price: Price,
}

/// Quote one ticker. Unknown tickers never touch the network.
pub fn get_crypto_price(
    source: &dyn PageSource,
    base_url: &str,
    ticker: &str,
) -> Result<PriceQuote> {
    let slug = match slug_for(ticker) {
        Ok(slug) => slug,
        Err(err) => {
            debug!("{}", err);
            return Ok(PriceQuote {
                ticker: ticker.to_string(),
                price: Price::Unknown(err),
            });
        }
    };

    let url = coinmarketcap::price_page_url(base_url, slug);
    info!("Fetching price for {} from {}", ticker, url);
    let html = source
        .fetch(&url)
        .with_context(|| format!("Failed to fetch price page for {}", ticker))?;
    let document = Html::parse_document(&html);

    let price = match coinmarketcap::extract_price(&document) {
        Some(value) => Price::Quoted(value),
        None => Price::Missing,
    };

    Ok(PriceQuote {
        ticker: ticker.to_string(),
        price,
    })
}

/// Quote every ticker in order, handing each quote to `on_quote` as soon as
/// it is ready. The first fetch failure aborts the report.
pub fn run_price_report(
    source: &dyn PageSource,
    base_url: &str,
    tickers: &[String],
    mut on_quote: impl FnMut(&PriceQuote),
) -> Result<Vec<PriceQuote>> {
    let mut quotes = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        let quote = get_crypto_price(source, base_url, ticker)?;
        on_quote(&quote);
        quotes.push(quote);
    }
    Ok(quotes)
}

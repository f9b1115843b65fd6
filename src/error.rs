//! Error handling for scrapeyard
//!
//! Defines the typed errors of the scrapers and establishes a unified Result
//! type using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Failures that abort a scrape run
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("config error: {0}")]
    Config(String),
}

/// A ticker symbol with no known page slug
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ERROR: Ticker {ticker} not in TICKER_LOOKUP")]
pub struct LookupError {
    pub ticker: String,
}

/// A listing field whose node was found but whose text could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("{field}: cannot parse {raw:?}")]
    Invalid { field: &'static str, raw: String },

    #[error("{field}: {value} exceeds sanity bound {max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

/// Result type alias for scrape operations
pub type Result<T> = anyhow::Result<T>;

//! Scrapeyard - crypto price and rental listing scrapers
//!
//! Two independent pipelines built on the same fetch → parse → extract
//! shape: [`pricing`] quotes cryptocurrency prices from coinmarketcap.com,
//! and [`rentals`] discovers and extracts rental listings for a ZIP code
//! from trulia.com.

pub mod config;
pub mod error;
pub mod fetch;
pub mod pricing;
pub mod rentals;

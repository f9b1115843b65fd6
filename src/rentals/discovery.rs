// Listing discovery from the trulia.com search results page

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use tracing::info;

use super::first_class;
use crate::fetch::PageSource;

/// First class token of the anchor wrapping each search result tile
pub const LISTING_LINK_MARKER: &str = "tileLink";

static LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[class][href]").expect("valid link selector"));

/// Search results page for a ZIP code
pub fn search_url(base_url: &str, zip_code: &str) -> String {
    format!("{}/for_rent/{}_zip/", base_url.trim_end_matches('/'), zip_code)
}

/// Partial paths of every listing tile on a search page, deduplicated and sorted
pub fn extract_listing_paths(document: &Html) -> BTreeSet<String> {
    document
        .select(&LINKS)
        .filter(|a| first_class(a) == Some(LISTING_LINK_MARKER))
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

pub fn absolute_urls(base_url: &str, paths: &BTreeSet<String>) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    paths.iter().map(|path| format!("{}{}", base, path)).collect()
}

/// Fetch the search page for `zip_code` and return the absolute URL of every listing on it
pub fn get_property_list(
    source: &dyn PageSource,
    base_url: &str,
    zip_code: &str,
) -> Result<Vec<String>> {
    let url = search_url(base_url, zip_code);
    info!("Discovering listings for ZIP {} at {}", zip_code, url);

    let html = source
        .fetch(&url)
        .with_context(|| format!("Failed to fetch search page for ZIP {}", zip_code))?;
    let document = Html::parse_document(&html);

    let paths = extract_listing_paths(&document);
    let urls = absolute_urls(base_url, &paths);
    info!("Found {} properties for ZIP {}", urls.len(), zip_code);

    Ok(urls)
}

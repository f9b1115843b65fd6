// coinmarketcap.com currency pages
//
// The quoted USD price lives in the `data-usd` attribute of an id'd span.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

pub const DEFAULT_BASE_URL: &str = "https://coinmarketcap.com";

static PRICE_SPAN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span[id][data-usd]").expect("valid price selector"));

/// Build the currency page URL for a slug
pub fn price_page_url(base_url: &str, slug: &str) -> String {
    format!(
        "{}/currencies/{}/#markets",
        base_url.trim_end_matches('/'),
        slug
    )
}

/// Value of `data-usd` on the first span that also carries an `id`.
///
/// The text is passed through untouched; no numeric parsing happens here.
pub fn extract_price(document: &Html) -> Option<String> {
    document
        .select(&PRICE_SPAN)
        .next()
        .and_then(|span| span.value().attr("data-usd"))
        .map(str::to_string)
}

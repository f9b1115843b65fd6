// Field extraction for a single trulia.com listing page
//
// Each field comes from its own query. Where several nodes match, the last
// one in document order wins.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::{first_class, Field, Listing};
use crate::error::FieldParseError;
use crate::fetch::PageSource;

/// Rents above this are assumed to come from the wrong node, not a real listing
pub const RENT_CEILING: i64 = 5000;

/// First class token of the div holding the rent
pub const RENT_MARKER: &str = "mvn";

pub const HOME_MARKER: &str = "iconHome";
pub const BED_MARKER: &str = "iconBed";
pub const BATH_MARKER: &str = "iconBath";
pub const FLOORPLAN_MARKER: &str = "iconFloorplan";

static ADDRESS_DIV: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#address").expect("valid address selector"));
static UNCLASSED_SPAN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span:not([class])").expect("valid span selector"));
static CLASSED_DIV: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class]").expect("valid div selector"));
static CLASSED_SPAN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span[class]").expect("valid span selector"));
static CLASSED_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li[class]").expect("valid list item selector"));

/// Fetch a listing page and extract it
pub fn create_property(source: &dyn PageSource, url: &str) -> Result<Listing> {
    info!("Extracting listing {}", url);
    let html = source
        .fetch(url)
        .with_context(|| format!("Failed to fetch listing {}", url))?;
    let document = Html::parse_document(&html);
    Ok(extract_listing(url, &document))
}

/// Build a listing from a parsed page. Never fails: absent nodes leave fields missing.
pub fn extract_listing(url: &str, document: &Html) -> Listing {
    let listing = Listing {
        url: url.to_string(),
        address: extract_address(document),
        rent: extract_rent(document),
        property_type: icon_field(document, HOME_MARKER, |text| {
            Ok(strip_chars(text, 1, 0).to_string())
        }),
        bedrooms: icon_field(document, BED_MARKER, parse_bedrooms),
        bathrooms: icon_field(document, BATH_MARKER, parse_bathrooms),
        square_footage: icon_field(document, FLOORPLAN_MARKER, parse_square_footage),
    };

    for field in listing.rendered_fields() {
        if field.text.is_none() {
            debug!("{}: no {} on page", url, field.name);
        }
    }

    listing
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect()
}

fn extract_address(document: &Html) -> Field<String> {
    document
        .select(&ADDRESS_DIV)
        .filter_map(|div| div.select(&UNCLASSED_SPAN).last())
        .last()
        .map(|span| Field::Parsed(element_text(&span)))
        .unwrap_or_default()
}

fn extract_rent(document: &Html) -> Field<i64> {
    document
        .select(&CLASSED_DIV)
        .filter(|div| first_class(div) == Some(RENT_MARKER))
        .filter_map(|div| div.select(&CLASSED_SPAN).last())
        .last()
        .map(|span| Field::from(logged("rent", parse_rent(&element_text(&span)))))
        .unwrap_or_default()
}

fn icon_field<T>(
    document: &Html,
    marker: &str,
    parse: impl Fn(&str) -> Result<T, FieldParseError>,
) -> Field<T> {
    document
        .select(&CLASSED_ITEM)
        .filter(|li| first_class(li) == Some(marker))
        .last()
        .map(|li| Field::from(logged(marker, parse(&element_text(&li)))))
        .unwrap_or_default()
}

fn logged<T>(field: &str, result: Result<T, FieldParseError>) -> Result<T, FieldParseError> {
    if let Err(err) = &result {
        warn!("Field {} unusable: {}", field, err);
    }
    result
}

/// Drop `lead` characters from the front and `trail` from the back.
///
/// Counts characters, not bytes. Text too short for both cuts yields "".
pub fn strip_chars(text: &str, lead: usize, trail: usize) -> &str {
    let len = text.chars().count();
    let end = len.saturating_sub(trail);
    if lead >= end {
        return "";
    }
    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    &text[byte_at(lead)..byte_at(end)]
}

fn invalid(field: &'static str, raw: &str) -> FieldParseError {
    FieldParseError::Invalid {
        field,
        raw: raw.to_string(),
    }
}

/// `"$1,234"` -> 1234. Values above [`RENT_CEILING`] are rejected; there is
/// no lower bound, so `"$-5"` is -5.
pub fn parse_rent(text: &str) -> Result<i64, FieldParseError> {
    let digits = strip_chars(text.trim(), 1, 0).replace(',', "");
    let value: i64 = digits
        .trim()
        .parse()
        .map_err(|_| invalid("rent", text))?;
    if value > RENT_CEILING {
        return Err(FieldParseError::OutOfRange {
            field: "rent",
            value,
            max: RENT_CEILING,
        });
    }
    Ok(value)
}

/// `" 3 bds"` -> 3
pub fn parse_bedrooms(text: &str) -> Result<u32, FieldParseError> {
    strip_chars(text, 1, 4)
        .trim()
        .parse()
        .map_err(|_| invalid("num_bedrooms", text))
}

/// `" 1.5 baths"` -> 1.5. Exponent notation (`" 1e1 baths"`) is accepted too.
pub fn parse_bathrooms(text: &str) -> Result<Decimal, FieldParseError> {
    let number = strip_chars(text, 1, 5).trim();
    Decimal::from_str(number)
        .or_else(|_| Decimal::from_scientific(number))
        .map_err(|_| invalid("num_bathrooms", text))
}

/// `" 1,200 sqft"` -> 1200
pub fn parse_square_footage(text: &str) -> Result<u32, FieldParseError> {
    strip_chars(text, 1, 4)
        .replace(',', "")
        .trim()
        .parse()
        .map_err(|_| invalid("square_footage", text))
}

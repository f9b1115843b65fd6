//! Output formatting module for CLI display
//!
//! This module handles all report output formatting, separating
//! the concerns of extraction from presentation.

use colored::{ColoredString, Colorize};
use scrapeyard::pricing::{Price, PriceQuote};
use scrapeyard::rentals::Listing;
use serde::Serialize;

/// `Ticker: BTC, Price: 6123.45`
pub fn format_quote_line(quote: &PriceQuote) -> String {
    let price = match &quote.price {
        Price::Quoted(_) => quote.price.to_string(),
        Price::Missing => quote.price.to_string().yellow().to_string(),
        Price::Unknown(_) => quote.price.to_string().red().to_string(),
    };
    format!("Ticker: {}, Price: {}", quote.ticker, price)
}

pub fn format_discovery_count(count: usize) -> String {
    format!("found {} properties\n", count)
}

pub fn format_property_header(index: usize) -> String {
    format!("PROPERTY #{}", index + 1).bold().to_string()
}

/// Listing block: the URL, then one line per field found on the page
pub fn format_listing_block(listing: &Listing) -> String {
    let mut output = format!("url is {}", listing.url);
    for field in listing.rendered_fields() {
        if let Some(text) = &field.text {
            let value = style_field_value(text, field.malformed);
            output.push_str(&format!("\n{} is {}", field.name, value));
        }
    }
    output
}

/// Malformed fields are shown in red
fn style_field_value(text: &str, malformed: bool) -> ColoredString {
    if malformed {
        text.red()
    } else {
        text.normal()
    }
}

/// Pretty JSON for any report payload
pub fn format_json<T: Serialize + ?Sized>(payload: &T) -> String {
    serde_json::to_string_pretty(payload)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Combined JSON document for a run that scraped both prices and rentals
pub fn format_full_run_json(quotes: &[PriceQuote], listings: &[Listing]) -> String {
    #[derive(Serialize)]
    struct FullRun<'a> {
        prices: &'a [PriceQuote],
        rentals: &'a [Listing],
    }

    format_json(&FullRun {
        prices: quotes,
        rentals: listings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrapeyard::error::{FieldParseError, LookupError};
    use scrapeyard::rentals::Field;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn quote_lines() {
        plain();
        let quoted = PriceQuote {
            ticker: "BTC".to_string(),
            price: Price::Quoted("6123.45".to_string()),
        };
        assert_eq!(format_quote_line(&quoted), "Ticker: BTC, Price: 6123.45");

        let missing = PriceQuote {
            ticker: "EOS".to_string(),
            price: Price::Missing,
        };
        assert_eq!(format_quote_line(&missing), "Ticker: EOS, Price: None");

        let unknown = PriceQuote {
            ticker: "DOGE".to_string(),
            price: Price::Unknown(LookupError {
                ticker: "DOGE".to_string(),
            }),
        };
        assert_eq!(
            format_quote_line(&unknown),
            "Ticker: DOGE, Price: ERROR: Ticker DOGE not in TICKER_LOOKUP"
        );
    }

    #[test]
    fn listing_block_skips_missing_fields() {
        plain();
        let listing = Listing {
            url: "https://www.trulia.com/p/1".to_string(),
            address: Field::Parsed("12 Elm St".to_string()),
            rent: Field::Malformed(FieldParseError::Invalid {
                field: "rent",
                raw: "$abc".to_string(),
            }),
            property_type: Field::Missing,
            bedrooms: Field::Parsed(2),
            bathrooms: Field::Missing,
            square_footage: Field::Missing,
        };
        assert_eq!(
            format_listing_block(&listing),
            "url is https://www.trulia.com/p/1\naddress is 12 Elm St\nrent is ERROR\nnum_bedrooms is 2"
        );
    }

    #[test]
    fn only_malformed_fields_are_red() {
        assert_eq!(style_field_value("ERROR", true).fgcolor, Some(colored::Color::Red));
        assert_eq!(style_field_value("ERROR", false).fgcolor, None);
        assert_eq!(style_field_value("1200", false).fgcolor, None);
    }

    #[test]
    fn literal_error_address_is_a_value() {
        plain();
        let listing = Listing {
            url: "https://www.trulia.com/p/3".to_string(),
            address: Field::Parsed("ERROR".to_string()),
            rent: Field::Parsed(900),
            property_type: Field::Missing,
            bedrooms: Field::Missing,
            bathrooms: Field::Missing,
            square_footage: Field::Missing,
        };
        let fields = listing.rendered_fields();
        assert!(fields.iter().all(|f| !f.malformed));
        assert_eq!(
            format_listing_block(&listing),
            "url is https://www.trulia.com/p/3\naddress is ERROR\nrent is 900"
        );
    }

    #[test]
    fn header_is_one_based() {
        plain();
        assert_eq!(format_property_header(0), "PROPERTY #1");
        assert_eq!(format_discovery_count(2), "found 2 properties\n");
    }

    #[test]
    fn full_run_json_has_both_sections() {
        let json = format_full_run_json(&[], &[]);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["prices"].is_array());
        assert!(value["rentals"].is_array());
    }
}

//! Rental listing scraper
//!
//! Discovers listing pages for a ZIP code on trulia.com and extracts the
//! address, rent, property type, bedroom/bathroom counts and square footage
//! from each one. Every field is extracted independently: a malformed field
//! never affects its neighbours, and a missing node simply leaves the field
//! [`Field::Missing`].

pub mod discovery;
pub mod export;
pub mod listing;

use anyhow::Result;
use scraper::ElementRef;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::FieldParseError;
use crate::fetch::PageSource;

pub use discovery::get_property_list;
pub use listing::{create_property, extract_listing};

pub const DEFAULT_BASE_URL: &str = "https://www.trulia.com";

/// Green Bay, WI
pub const DEFAULT_ZIP_CODE: &str = "54302";

/// Rendering of a field that was present but unusable
pub const ERROR_MARKER: &str = "ERROR";

/// Result of extracting one listing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// No matching node on the page
    Missing,
    Parsed(T),
    /// Node found, text unusable
    Malformed(FieldParseError),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> From<Result<T, FieldParseError>> for Field<T> {
    fn from(result: Result<T, FieldParseError>) -> Self {
        match result {
            Ok(value) => Field::Parsed(value),
            Err(err) => Field::Malformed(err),
        }
    }
}

impl<T> Field<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Field::Malformed(_))
    }
}

impl<T: fmt::Display> Field<T> {
    /// Display text for present fields; `None` when the field is missing
    pub fn render(&self) -> Option<String> {
        match self {
            Field::Missing => None,
            Field::Parsed(value) => Some(value.to_string()),
            Field::Malformed(_) => Some(ERROR_MARKER.to_string()),
        }
    }

    fn rendered(&self, name: &'static str) -> RenderedField {
        RenderedField {
            name,
            text: self.render(),
            malformed: self.is_malformed(),
        }
    }
}

/// A listing field ready for display.
///
/// `malformed` comes from the field itself, so a parsed value whose text
/// happens to read "ERROR" is still reported as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub name: &'static str,
    pub text: Option<String>,
    pub malformed: bool,
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Missing => serializer.serialize_none(),
            Field::Parsed(value) => value.serialize(serializer),
            Field::Malformed(_) => serializer.serialize_str(ERROR_MARKER),
        }
    }
}

/// One rental listing page, built in a single extraction pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub url: String,
    pub address: Field<String>,
    pub rent: Field<i64>,
    pub property_type: Field<String>,
    #[serde(rename = "num_bedrooms")]
    pub bedrooms: Field<u32>,
    #[serde(rename = "num_bathrooms")]
    pub bathrooms: Field<rust_decimal::Decimal>,
    pub square_footage: Field<u32>,
}

impl Listing {
    /// Rendered fields in report order, labelled with their report names
    pub fn rendered_fields(&self) -> [RenderedField; 6] {
        [
            self.address.rendered("address"),
            self.rent.rendered("rent"),
            self.property_type.rendered("property_type"),
            self.bedrooms.rendered("num_bedrooms"),
            self.bathrooms.rendered("num_bathrooms"),
            self.square_footage.rendered("square_footage"),
        ]
    }
}

/// First whitespace-separated token of an element's class attribute
pub(crate) fn first_class<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element
        .value()
        .attr("class")
        .and_then(|classes| classes.split_whitespace().next())
}

/// Progress reported while a rental report runs
#[derive(Debug)]
pub enum RentalProgress<'a> {
    /// Discovery finished with this many listing URLs
    Discovered(usize),
    /// Listing at this zero-based position has been extracted
    Extracted { index: usize, listing: &'a Listing },
}

/// Discover every listing for a ZIP code and extract each one in turn.
///
/// `on_progress` sees the discovery count and then each listing as soon as
/// it is built. The first fetch failure aborts the report.
pub fn scrape_listings(
    source: &dyn PageSource,
    base_url: &str,
    zip_code: &str,
    mut on_progress: impl FnMut(RentalProgress<'_>),
) -> Result<Vec<Listing>> {
    let urls = get_property_list(source, base_url, zip_code)?;
    on_progress(RentalProgress::Discovered(urls.len()));

    let mut listings = Vec::with_capacity(urls.len());
    for (index, url) in urls.iter().enumerate() {
        let listing = create_property(source, url)?;
        on_progress(RentalProgress::Extracted {
            index,
            listing: &listing,
        });
        listings.push(listing);
    }
    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_field_render() {
        assert_eq!(Field::<u32>::Missing.render(), None);
        assert_eq!(Field::Parsed(3u32).render(), Some("3".to_string()));
        let malformed: Field<u32> = Field::Malformed(FieldParseError::Invalid {
            field: "num_bedrooms",
            raw: "x".to_string(),
        });
        assert_eq!(malformed.render(), Some("ERROR".to_string()));
        assert!(malformed.is_malformed());
    }

    #[test]
    fn test_field_from_result() {
        let ok = Field::from(Ok::<u32, FieldParseError>(1200));
        assert_eq!(ok, Field::Parsed(1200));
        assert!(!ok.is_malformed());
        let err = Field::<u32>::from(Err(FieldParseError::OutOfRange {
            field: "rent",
            value: 9999,
            max: 5000,
        }));
        assert!(matches!(err, Field::Malformed(_)));
        assert!(Field::<String>::default().is_missing());
    }

    #[test]
    fn test_first_class_token() {
        let document = Html::parse_fragment(
            r#"<a class="tileLink featured" href="/a"></a><a class=" other tileLink"></a><a></a>"#,
        );
        let selector = Selector::parse("a").unwrap();
        let tokens: Vec<Option<&str>> = document
            .select(&selector)
            .map(|a| first_class(&a))
            .collect();
        assert_eq!(tokens, vec![Some("tileLink"), Some("other"), None]);
    }

    #[test]
    fn test_rendered_fields_flag_malformed_by_variant() {
        let listing = Listing {
            url: "https://www.trulia.com/p/2".to_string(),
            address: Field::Parsed("ERROR".to_string()),
            rent: Field::Malformed(FieldParseError::Invalid {
                field: "rent",
                raw: "$abc".to_string(),
            }),
            property_type: Field::Missing,
            bedrooms: Field::Missing,
            bathrooms: Field::Missing,
            square_footage: Field::Missing,
        };
        let [address, rent, property_type, ..] = listing.rendered_fields();
        assert_eq!(address.text.as_deref(), Some("ERROR"));
        assert!(!address.malformed);
        assert_eq!(rent.text.as_deref(), Some("ERROR"));
        assert!(rent.malformed);
        assert_eq!(property_type.text, None);
        assert!(!property_type.malformed);
    }

    #[test]
    fn test_listing_serializes_missing_as_null() {
        let listing = Listing {
            url: "https://www.trulia.com/p/1".to_string(),
            address: Field::Parsed("123 Main St".to_string()),
            rent: Field::Malformed(FieldParseError::OutOfRange {
                field: "rent",
                value: 9999,
                max: 5000,
            }),
            property_type: Field::Missing,
            bedrooms: Field::Parsed(3),
            bathrooms: Field::Missing,
            square_footage: Field::Missing,
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["address"], "123 Main St");
        assert_eq!(json["rent"], "ERROR");
        assert_eq!(json["num_bedrooms"], 3);
        assert!(json["property_type"].is_null());
    }
}

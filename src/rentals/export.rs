// CSV export of extracted listings
//
// One row per listing. Missing fields are empty cells, malformed ones "ERROR".

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

use super::Listing;

#[derive(Serialize)]
struct ListingRow<'a> {
    url: &'a str,
    address: String,
    rent: String,
    property_type: String,
    num_bedrooms: String,
    num_bathrooms: String,
    square_footage: String,
}

impl<'a> From<&'a Listing> for ListingRow<'a> {
    fn from(listing: &'a Listing) -> Self {
        Self {
            url: &listing.url,
            address: listing.address.render().unwrap_or_default(),
            rent: listing.rent.render().unwrap_or_default(),
            property_type: listing.property_type.render().unwrap_or_default(),
            num_bedrooms: listing.bedrooms.render().unwrap_or_default(),
            num_bathrooms: listing.bathrooms.render().unwrap_or_default(),
            square_footage: listing.square_footage.render().unwrap_or_default(),
        }
    }
}

/// Write listings as CSV (with header row) to any writer
pub fn write_listings_csv<W: Write>(writer: W, listings: &[Listing]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for listing in listings {
        csv_writer
            .serialize(ListingRow::from(listing))
            .with_context(|| format!("Failed to write CSV row for {}", listing.url))?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write listings to a CSV file, replacing it if present
pub fn export_listings_csv(path: &Path, listings: &[Listing]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_listings_csv(file, listings)?;
    info!("Exported {} listings to {}", listings.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldParseError;
    use crate::rentals::Field;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Listing> {
        vec![
            Listing {
                url: "https://www.trulia.com/p/1".to_string(),
                address: Field::Parsed("12 Elm St, Green Bay, WI".to_string()),
                rent: Field::Parsed(1150),
                property_type: Field::Parsed("Townhouse".to_string()),
                bedrooms: Field::Parsed(3),
                bathrooms: Field::Parsed(dec!(1.5)),
                square_footage: Field::Parsed(1450),
            },
            Listing {
                url: "https://www.trulia.com/p/2".to_string(),
                address: Field::Missing,
                rent: Field::Malformed(FieldParseError::OutOfRange {
                    field: "rent",
                    value: 9999,
                    max: 5000,
                }),
                property_type: Field::Missing,
                bedrooms: Field::Missing,
                bathrooms: Field::Missing,
                square_footage: Field::Missing,
            },
        ]
    }

    #[test]
    fn test_csv_rows() {
        let mut buf = Vec::new();
        write_listings_csv(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "url,address,rent,property_type,num_bedrooms,num_bathrooms,square_footage"
        );
        assert_eq!(
            lines[1],
            "https://www.trulia.com/p/1,\"12 Elm St, Green Bay, WI\",1150,Townhouse,3,1.5,1450"
        );
        assert_eq!(lines[2], "https://www.trulia.com/p/2,,ERROR,,,,");
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("listings.csv");
        export_listings_csv(&path, &sample()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}

//! Listing extraction from search result HTML.

use crate::craigslist::models::Listing;
use crate::craigslist::selectors;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Parser for craigslist search result pages.
///
/// Extraction is best-effort: rows with a missing descriptive block, a price
/// without digits, or an empty neighborhood are skipped without error.
///
/// Markup lookups go through `scraper` directly rather than a separate
/// element-search trait. The `selectors` statics are the only place that
/// names tags and classes, so swapping the markup library touches that
/// module and the `select` calls here.
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser;

impl Parser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Extracts listings in document order from one (possibly concatenated) HTML blob.
    pub fn parse_listings(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);

        let mut listings = Vec::new();
        let mut skipped = 0usize;

        for row in document.select(&selectors::RESULT_ROW) {
            match self.parse_row(row) {
                Some(listing) => {
                    trace!("Parsed listing: {} - {}", listing.price, listing.neighborhood);
                    listings.push(listing);
                }
                None => skipped += 1,
            }
        }

        debug!("Extracted {} listings ({} rows skipped)", listings.len(), skipped);
        listings
    }

    /// Parses one result row, returning `None` for incomplete rows.
    fn parse_row(&self, row: ElementRef) -> Option<Listing> {
        let Some(info) = row.select(&selectors::RESULT_INFO).next() else {
            trace!("Skipping row without result info");
            return None;
        };

        let price = info
            .select(&selectors::PRICE)
            .next()
            .and_then(|e| parse_price(&e.text().collect::<String>()));

        let neighborhood =
            info.select(&selectors::NEIGHBORHOOD).next().and_then(parse_neighborhood);

        match (price, neighborhood) {
            (Some(price), Some(neighborhood)) => Some(Listing { price, neighborhood }),
            (price, neighborhood) => {
                trace!(
                    "Skipping row (price found: {}, neighborhood found: {})",
                    price.is_some(),
                    neighborhood.is_some()
                );
                None
            }
        }
    }
}

/// Keeps only the digits of a price marker and reads them as an integer.
///
/// `"$1,250"` yields 1250 and `"$12.50"` yields 1250. Text without digits, or
/// with more digits than fit in a `u64`, yields `None`.
pub fn parse_price(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse().ok()
}

/// Reads the direct text of a neighborhood marker, trimmed; empty text yields `None`.
fn parse_neighborhood(element: ElementRef) -> Option<String> {
    let text: String = element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect();
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

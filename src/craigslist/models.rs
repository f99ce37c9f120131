//! Data models for regions, queries, raw pages and extracted listings.

use crate::stats::{PriceStatistics, StatsError};
use serde::{Deserialize, Serialize};

/// A named search area with its own endpoint and price bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Display name, also used for page cache file names
    pub name: String,
    /// Search endpoint without query string parameters
    pub base_url: String,
    /// Lower bound of the price filter
    #[serde(default)]
    pub price_min: u32,
    /// Upper bound of the price filter
    #[serde(default = "default_price_max")]
    pub price_max: u32,
    /// Free-text location filters; "" means no filter
    #[serde(default)]
    pub sub_locations: Vec<String>,
    /// Number of result pages requested per sub-location
    #[serde(default = "default_pages_per_sub_location")]
    pub pages_per_sub_location: u32,
}

fn default_price_max() -> u32 {
    10_000
}

fn default_pages_per_sub_location() -> u32 {
    3
}

impl Region {
    /// Creates a region with default price bounds and no sub-locations.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            price_min: 0,
            price_max: default_price_max(),
            sub_locations: Vec::new(),
            pages_per_sub_location: default_pages_per_sub_location(),
        }
    }

    /// Returns the sub-locations to search, substituting a single "" when none are set.
    pub fn effective_sub_locations(&self) -> Vec<&str> {
        if self.sub_locations.is_empty() {
            vec![""]
        } else {
            self.sub_locations.iter().map(String::as_str).collect()
        }
    }

    /// Returns the report label for one sub-location of this region.
    pub fn label_for(&self, sub_location: &str) -> String {
        if sub_location.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, sub_location)
        }
    }

    /// Returns the site host of the base URL, without scheme or path.
    ///
    /// `https://sfbay.craigslist.org/search/sfc/roo` yields `sfbay.craigslist.org`.
    /// A URL without a scheme yields an empty string.
    pub fn site(&self) -> String {
        let Some((_, rest)) = self.base_url.split_once("://") else {
            return String::new();
        };
        rest.split(['/', '?', '#']).next().unwrap_or_default().replace('\\', "")
    }
}

/// A single resolved search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub region_name: String,
    pub sub_location: String,
    pub offset: u64,
    pub url: String,
}

/// The concatenated HTML of every page fetched for one (region, sub-location) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub label: String,
    pub html: String,
}

impl RawPage {
    /// Joins fetched page bodies with a single newline.
    pub fn from_pages(label: impl Into<String>, pages: &[String]) -> Self {
        Self { label: label.into(), html: pages.join("\n") }
    }
}

/// One extracted (price, neighborhood) observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Digits of the price marker read as an integer
    pub price: u64,
    /// Trimmed, non-empty neighborhood text
    pub neighborhood: String,
}

/// Listings and statistics for one aggregation group (one region sub-location).
#[derive(Debug, Clone, PartialEq)]
pub struct RegionResult {
    pub label: String,
    pub listings: Vec<Listing>,
    /// `Err` when the group had fewer than two valid prices
    pub stats: Result<PriceStatistics, StatsError>,
}

impl RegionResult {
    /// Computes statistics over the listing prices and builds the result.
    pub fn from_listings(label: impl Into<String>, listings: Vec<Listing>) -> Self {
        let prices: Vec<u64> = listings.iter().map(|l| l.price).collect();
        let stats = PriceStatistics::compute(&prices);
        Self { label: label.into(), listings, stats }
    }

    /// Returns the neighborhood of every listing, in listing order.
    pub fn neighborhoods(&self) -> Vec<String> {
        self.listings.iter().map(|l| l.neighborhood.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_sub_locations_default() {
        let region = Region::new("Chico", "https://chico.craigslist.org/search/roo");
        assert_eq!(region.effective_sub_locations(), vec![""]);
    }

    #[test]
    fn test_effective_sub_locations_configured() {
        let mut region = Region::new("Chico", "https://chico.craigslist.org/search/roo");
        region.sub_locations = vec!["".to_string(), "downtown".to_string()];
        assert_eq!(region.effective_sub_locations(), vec!["", "downtown"]);
    }

    #[test]
    fn test_label_for() {
        let region = Region::new("East Bay", "https://sfbay.craigslist.org/search/eby/roo");
        assert_eq!(region.label_for(""), "East Bay");
        assert_eq!(region.label_for("oakland"), "East Bay (oakland)");
    }

    #[test]
    fn test_site() {
        let region = Region::new("SF", "https://sfbay.craigslist.org/search/sfc/roo");
        assert_eq!(region.site(), "sfbay.craigslist.org");

        let region = Region::new("Test", "http://x.test/search?lang=en");
        assert_eq!(region.site(), "x.test");

        let region = Region::new("Bare", "no-scheme/search");
        assert_eq!(region.site(), "");
    }

    #[test]
    fn test_raw_page_joins_with_newline() {
        let pages = vec!["<a>".to_string(), String::new(), "<b>".to_string()];
        let raw = RawPage::from_pages("Test", &pages);
        assert_eq!(raw.html, "<a>\n\n<b>");
        assert_eq!(raw.label, "Test");
    }

    #[test]
    fn test_region_result_from_listings() {
        let listings = vec![
            Listing { price: 500, neighborhood: "(a)".to_string() },
            Listing { price: 1500, neighborhood: "(b)".to_string() },
        ];
        let result = RegionResult::from_listings("Test", listings);

        assert_eq!(result.neighborhoods(), vec!["(a)", "(b)"]);
        assert_eq!(result.stats.unwrap().mean, 1000.0);
    }

    #[test]
    fn test_region_result_insufficient() {
        let result = RegionResult::from_listings("Empty", Vec::new());
        assert_eq!(result.stats, Err(StatsError::InsufficientSamples { found: 0 }));
        assert!(result.neighborhoods().is_empty());
    }

    #[test]
    fn test_region_toml_defaults() {
        let region: Region = toml::from_str(
            r#"
            name = "Redding"
            base_url = "https://redding.craigslist.org/search/roo"
            "#,
        )
        .unwrap();

        assert_eq!(region.price_min, 0);
        assert_eq!(region.price_max, 10_000);
        assert!(region.sub_locations.is_empty());
        assert_eq!(region.pages_per_sub_location, 3);
    }
}

//! Search URL construction and pagination.

use crate::craigslist::models::{Query, Region};

/// Results per search page on the listing site.
pub const DEFAULT_PAGE_SIZE: u32 = 120;

/// Builds the paginated search queries for a region.
pub struct QueryBuilder {
    page_size: u32,
}

impl QueryBuilder {
    /// Creates a builder that advances the offset by `page_size` per page.
    pub fn new(page_size: u32) -> Self {
        Self { page_size }
    }

    /// Returns one query per page for the given sub-location, in offset order.
    pub fn build(&self, region: &Region, sub_location: &str) -> Vec<Query> {
        (0..region.pages_per_sub_location)
            .map(|page| {
                let offset = u64::from(page) * u64::from(self.page_size);
                Query {
                    region_name: region.name.clone(),
                    sub_location: sub_location.to_string(),
                    offset,
                    url: self.url(region, sub_location, offset),
                }
            })
            .collect()
    }

    /// Resolves the URL for a single page: price range, location term, then offset.
    pub fn url(&self, region: &Region, sub_location: &str, offset: u64) -> String {
        let separator = if region.base_url.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{}{}min_price={}&max_price={}",
            region.base_url, separator, region.price_min, region.price_max
        );

        if !sub_location.is_empty() {
            url.push_str("&query=");
            url.push_str(&sub_location.replace(' ', "+"));
        }

        url.push_str(&format!("&s={}", offset));
        url
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

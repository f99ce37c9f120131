//! Craigslist-specific modules for query construction, fetching, parsing and models.

pub mod client;
pub mod models;
pub mod parser;
pub mod query;
pub mod selectors;

pub use client::{HttpFetcher, PageFetcher};
pub use models::{Listing, Query, RawPage, Region, RegionResult};
pub use parser::Parser;
pub use query::QueryBuilder;

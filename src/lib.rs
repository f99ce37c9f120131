//! rent-survey - Compare rental listing prices across regions
//!
//! Fetches paginated craigslist search results for each configured region,
//! extracts (price, neighborhood) listings and reports descriptive price
//! statistics per region and sub-location.

pub mod commands;
pub mod config;
pub mod craigslist;
pub mod format;
pub mod stats;
pub mod store;

pub use config::Config;
pub use craigslist::models::{Listing, RawPage, Region, RegionResult};
pub use stats::{PriceStatistics, StatsError};

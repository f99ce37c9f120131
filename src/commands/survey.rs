//! Survey command: fetch every region's search pages and compare prices.

use crate::config::Config;
use crate::craigslist::{HttpFetcher, PageFetcher, Parser, QueryBuilder, RawPage, RegionResult};
use crate::format::Formatter;
use crate::store::{FsSink, PersistenceSink};
use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Runs the region survey.
pub struct SurveyCommand {
    config: Config,
}

impl SurveyCommand {
    /// Creates a new survey command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the survey over HTTP, caching pages on disk, and returns the formatted report.
    pub async fn execute(&self) -> Result<String> {
        self.config.validate()?;

        let fetcher = HttpFetcher::new(&self.config).context("Failed to create HTTP client")?;
        let sink = FsSink::new(&self.config.scrape_dir, &self.config.locations_log);

        if self.config.reset_locations_log {
            sink.reset_log();
        }

        let results = self.run(&fetcher, &sink).await?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_results(&results))
    }

    /// Runs the survey with the provided fetcher and sink (for testing).
    ///
    /// Groups are processed one (region, sub-location) pair at a time, and every
    /// fetch is awaited before the next one is issued. Persistence happens after
    /// all groups are computed.
    pub async fn run(
        &self,
        fetcher: &impl PageFetcher,
        sink: &impl PersistenceSink,
    ) -> Result<Vec<RegionResult>> {
        self.config.validate()?;

        let builder = QueryBuilder::new(self.config.page_size);
        let parser = Parser::new();

        let mut pages = Vec::new();
        let mut results = Vec::new();
        let mut labels = HashSet::new();

        for region in &self.config.regions {
            info!("Surveying {} ({})", region.name, region.site());

            if region.price_min > region.price_max {
                warn!(
                    "{}: price_min {} is above price_max {}, the search will likely be empty",
                    region.name, region.price_min, region.price_max
                );
            }

            for sub_location in region.effective_sub_locations() {
                let label = region.label_for(sub_location);
                if !labels.insert(label.clone()) {
                    warn!("Duplicate label {}: its cached page will be overwritten", label);
                }

                let mut bodies = Vec::new();
                for query in builder.build(region, sub_location) {
                    debug!("Fetching {} offset {}: {}", label, query.offset, query.url);
                    bodies.push(fetcher.fetch(&query.url).await.unwrap_or_default());
                }

                let page = RawPage::from_pages(label.clone(), &bodies);
                let listings = parser.parse_listings(&page.html);
                info!("{}: {} listings", label, listings.len());

                let result = RegionResult::from_listings(label, listings);
                if let Err(e) = &result.stats {
                    warn!("Skipping statistics for {}: {}", result.label, e);
                }

                pages.push(page);
                results.push(result);
            }
        }

        for page in &pages {
            sink.write_page(page);
        }

        for result in &results {
            sink.append_neighborhoods(&result.neighborhoods());
        }

        Ok(results)
    }
}

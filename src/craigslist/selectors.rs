//! CSS selectors for craigslist search result pages.
//!
//! Every markup assumption the extractor makes lives here. When the site
//! changes its result markup, update these selectors and the test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// One search result row.
pub static RESULT_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.result-row").unwrap());

/// Descriptive block inside a result row.
pub static RESULT_INFO: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.result-info").unwrap());

/// Price marker inside the descriptive block.
pub static PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.result-price").unwrap());

/// Neighborhood marker inside the descriptive block.
pub static NEIGHBORHOOD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.result-hood").unwrap());

//! Report formatting for region results (text, JSON, CSV).

use crate::config::OutputFormat;
use crate::craigslist::RegionResult;
use crate::stats::PriceStatistics;
use serde_json::json;

/// Formats survey results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats all results in configuration order.
    pub fn format_results(&self, results: &[RegionResult]) -> String {
        match self.format {
            OutputFormat::Text => self.text_results(results),
            OutputFormat::Json => self.json_results(results),
            OutputFormat::Csv => self.csv_results(results),
        }
    }

    /// Closing line printed after the report; machine-readable formats get none.
    pub fn trailer(&self) -> Option<&'static str> {
        match self.format {
            OutputFormat::Text => Some("Done."),
            OutputFormat::Json | OutputFormat::Csv => None,
        }
    }

    // Text formatting

    fn text_results(&self, results: &[RegionResult]) -> String {
        results.iter().map(|r| self.text_block(r)).collect::<Vec<_>>().join("\n")
    }

    /// One block per result: min, bands and mean, max, then median, deviation, variance.
    fn text_block(&self, result: &RegionResult) -> String {
        let mut lines = vec![format!("-- {} --", result.label)];

        match &result.stats {
            Ok(stats) => {
                lines.push(format!("Min: {:.2}", stats.minimum as f64));
                lines.push(format!(" LAV: {:.2}", stats.lower_band));
                lines.push(format!(" Avg: {:.2}", stats.mean));
                lines.push(format!(" RAV: {:.2}", stats.upper_band));
                lines.push(format!("Max: {:.2}", stats.maximum as f64));
                lines.push(" - - - -".to_string());
                lines.push(format!("Median: {:.2}", stats.median));
                lines.push(format!("Deviat: {:.2}", stats.sample_stddev));
                lines.push(format!("Varian: {:.2}", stats.sample_variance));
            }
            Err(e) => {
                lines.push(format!("Skipped ({} listings): {}", result.listings.len(), e));
            }
        }

        lines.push(String::new());
        lines.join("\n")
    }

    // JSON formatting

    fn json_results(&self, results: &[RegionResult]) -> String {
        let values: Vec<serde_json::Value> = results
            .iter()
            .map(|result| {
                let (stats, error) = match &result.stats {
                    Ok(stats) => (serde_json::to_value(stats).ok(), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                json!({
                    "label": result.label,
                    "listings": result.listings.len(),
                    "stats": stats,
                    "error": error,
                })
            })
            .collect();

        serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "label,listings,minimum,lower_band,mean,upper_band,maximum,median,stddev,variance"
            .to_string()
    }

    fn csv_results(&self, results: &[RegionResult]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for result in results {
            let values = match &result.stats {
                Ok(stats) => Self::csv_stats(stats),
                Err(_) => ",,,,,,,".to_string(),
            };

            lines.push(format!(
                "{},{},{}",
                Self::csv_escape(&result.label),
                result.listings.len(),
                values
            ));
        }

        lines.join("\n")
    }

    fn csv_stats(stats: &PriceStatistics) -> String {
        format!(
            "{},{:.2},{:.2},{:.2},{},{:.2},{:.2},{:.2}",
            stats.minimum,
            stats.lower_band,
            stats.mean,
            stats.upper_band,
            stats.maximum,
            stats.median,
            stats.sample_stddev,
            stats.sample_variance
        )
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

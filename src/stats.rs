//! Descriptive price statistics for one aggregation group.

use serde::Serialize;
use thiserror::Error;

/// Minimum number of prices needed for sample variance.
pub const MIN_SAMPLES: usize = 2;

/// Errors raised by the statistics aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("insufficient samples: need at least 2 prices, found {found}")]
    InsufficientSamples { found: usize },
}

/// Summary statistics over a set of prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStatistics {
    pub minimum: u64,
    pub maximum: u64,
    pub mean: f64,
    pub median: f64,
    pub sample_stddev: f64,
    pub sample_variance: f64,
    /// mean - sample_stddev
    pub lower_band: f64,
    /// mean + sample_stddev
    pub upper_band: f64,
}

impl PriceStatistics {
    /// Computes statistics over `prices`; order does not matter.
    pub fn compute(prices: &[u64]) -> Result<Self, StatsError> {
        if prices.len() < MIN_SAMPLES {
            return Err(StatsError::InsufficientSamples { found: prices.len() });
        }

        let mut sorted = prices.to_vec();
        sorted.sort_unstable();

        let n = sorted.len();
        let minimum = sorted[0];
        let maximum = sorted[n - 1];

        let mean = sorted.iter().map(|&p| p as f64).sum::<f64>() / n as f64;

        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
        };

        let sample_variance =
            sorted.iter().map(|&p| (p as f64 - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        let sample_stddev = sample_variance.sqrt();

        Ok(Self {
            minimum,
            maximum,
            mean,
            median,
            sample_stddev,
            sample_variance,
            lower_band: mean - sample_stddev,
            upper_band: mean + sample_stddev,
        })
    }
}

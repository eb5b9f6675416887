use crate::error::{BenchError, BenchResult};
use std::time::Duration;

/// Timing of one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySample {
    /// Wall-clock time from request write to decoded response
    pub round_trip: Duration,
    /// Compute time reported by the server
    pub calc: Duration,
    /// `round_trip - calc`, the estimated network transit time
    pub transit: Duration,
}

impl LatencySample {
    /// Subtract the server's compute time from a measured round trip.
    ///
    /// A server that reports more compute time than the client measured
    /// produces [`BenchError::NegativeTransit`]; the value is never clamped.
    pub fn measure(round_trip: Duration, calc: Duration) -> BenchResult<Self> {
        let transit = round_trip
            .checked_sub(calc)
            .ok_or(BenchError::NegativeTransit { round_trip, calc })?;
        Ok(Self {
            round_trip,
            calc,
            transit,
        })
    }

    pub fn transit_micros(&self) -> f64 {
        self.transit.as_secs_f64() * 1_000_000.0
    }
}

/// Aggregate over a set of values. `std_dev` is the population deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl LatencyStats {
    /// `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }

    /// Transit-time statistics in microseconds.
    pub fn from_samples(samples: &[LatencySample]) -> Option<Self> {
        let values: Vec<f64> = samples.iter().map(LatencySample::transit_micros).collect();
        Self::from_values(&values)
    }
}

//! Benchmark run loop
//!
//! Issues a fixed number of sequential queries over one connection and
//! reduces the per-query transit times to a mean and population standard
//! deviation.

pub mod selector;
pub mod stats;

pub use selector::EndpointSelector;
pub use stats::{LatencySample, LatencyStats};

use crate::config::BenchConfig;
use crate::driver::PathClient;
use crate::error::{BenchError, BenchResult};
use crate::nodes::NodeSet;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncWrite};

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub samples: Vec<LatencySample>,
    /// Transit-time statistics in microseconds
    pub stats: LatencyStats,
    /// Wall-clock duration of the whole query loop
    pub elapsed: Duration,
}

impl BenchReport {
    pub fn queries(&self) -> usize {
        self.samples.len()
    }

    pub fn queries_per_sec(&self) -> f64 {
        self.queries() as f64 / self.elapsed.as_secs_f64()
    }

    /// Mean and standard deviation of the transit time, in microseconds.
    pub fn summary_line(&self) -> String {
        format!(
            "average RTT is {:.2} (+- {:.2})",
            self.stats.mean, self.stats.std_dev
        )
    }

    pub fn print(&self) {
        println!("{}", self.summary_line());
        print_separator();
        println!("  {:.<30} {:>12}", "Queries", self.queries());
        println!("  {:.<30} {:>10.2}µs", "Mean transit", self.stats.mean);
        println!("  {:.<30} {:>10.2}µs", "Std dev", self.stats.std_dev);
        println!("  {:.<30} {:>10.2}µs", "Min transit", self.stats.min);
        println!("  {:.<30} {:>10.2}µs", "Max transit", self.stats.max);
        println!("  {:.<30} {:>12}", "Total time", format_duration(self.elapsed));
        println!("  {:.<30} {:>12}", "Throughput", format_ops_per_sec(self.queries_per_sec()));
    }
}

fn print_separator() {
    println!("{}", "-".repeat(48));
}

fn format_duration(d: Duration) -> String {
    if d.as_secs() > 0 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() > 0 {
        format!("{:.2}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.2}µs", d.as_secs_f64() * 1_000_000.0)
    }
}

fn format_ops_per_sec(ops: f64) -> String {
    if ops >= 1_000_000.0 {
        format!("{:.2}M q/s", ops / 1_000_000.0)
    } else if ops >= 1_000.0 {
        format!("{:.2}K q/s", ops / 1_000.0)
    } else {
        format!("{:.2} q/s", ops)
    }
}

/// Run `samples` queries over an established connection.
///
/// The first error of any kind aborts the run; samples gathered so far are
/// dropped with it.
pub async fn run<S>(
    client: &mut PathClient<S>,
    nodes: &NodeSet,
    selector: &mut EndpointSelector,
    samples: usize,
) -> BenchResult<BenchReport>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    if samples == 0 {
        return Err(BenchError::InvalidConfig(
            "samples must be at least 1".to_string(),
        ));
    }
    selector.check(nodes)?;

    let mut collected = Vec::with_capacity(samples);
    let start = Instant::now();

    for seq in 1..=samples {
        let (origin, destination) = selector.pick(nodes)?;
        let outcome = client.find_shortest_path(origin, destination).await?;
        let sample = LatencySample::measure(outcome.round_trip, outcome.response.calc_duration)?;

        tracing::info!(
            "Shortest path between {} and {} is: {:?}",
            origin,
            destination,
            outcome.response.path
        );
        tracing::debug!(
            seq,
            rtt = ?sample.round_trip,
            calc = ?sample.calc,
            transit = ?sample.transit,
            "query complete"
        );

        collected.push(sample);
    }

    let elapsed = start.elapsed();
    let stats = LatencyStats::from_samples(&collected)
        .ok_or_else(|| BenchError::InvalidConfig("no samples collected".to_string()))?;

    Ok(BenchReport {
        samples: collected,
        stats,
        elapsed,
    })
}

/// Full benchmark: load nodes, connect, run, close.
///
/// Everything that can fail without touching the network is checked before
/// the connection is opened.
pub async fn execute(config: &BenchConfig) -> BenchResult<BenchReport> {
    config.validate()?;

    let nodes = NodeSet::load(&config.nodes_file)?;
    let mut selector = EndpointSelector::new(&config.selection, config.seed);
    selector.check(&nodes)?;

    let mut client = PathClient::connect(&config.host).await?;
    let report = run(&mut client, &nodes, &mut selector, config.samples).await?;
    client.close().await?;

    Ok(report)
}

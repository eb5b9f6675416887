//! Latency benchmark client for shortest-path servers.
//!
//! Sends path queries over a single TCP connection and reports the network
//! transit time of each one: the measured round trip minus the compute time
//! the server reports in its response.

pub mod bench;
pub mod config;
pub mod driver;
pub mod error;
pub mod nodes;

pub use bench::{execute, run, BenchReport, EndpointSelector, LatencySample, LatencyStats};
pub use config::{BenchConfig, Selection};
pub use driver::{DriverError, PathClient, PathRequest, PathResponse, QueryOutcome};
pub use error::{BenchError, BenchResult};
pub use nodes::NodeSet;

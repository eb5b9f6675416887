use crate::driver::DriverError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Environment variable '{0}' is not set")]
    MissingEnv(&'static str),

    #[error("Failed to read node file '{path}': {source}")]
    NodeFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Node set is empty, cannot pick random endpoints")]
    EmptyNodeSet,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("Server compute time {calc:?} exceeds measured round trip {round_trip:?}")]
    NegativeTransit { round_trip: Duration, calc: Duration },
}

pub type BenchResult<T> = Result<T, BenchError>;

impl BenchError {
    /// Whether the error happened before any network I/O was attempted.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            BenchError::MissingEnv(_)
                | BenchError::NodeFile { .. }
                | BenchError::EmptyNodeSet
                | BenchError::InvalidConfig(_)
        )
    }
}

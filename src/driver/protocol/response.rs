use super::error::DriverError;
use serde::Deserialize;
use std::time::Duration;

/// Successful answer to a [`PathRequest`](super::PathRequest).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathResponse {
    /// Node identifiers from origin to destination, empty when no path exists
    pub path: Vec<String>,
    /// Time the server spent computing the path
    #[serde(rename = "calc-duration", deserialize_with = "duration_nanos::deserialize")]
    pub calc_duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Any payload the server may send back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ServerReply {
    Path(PathResponse),
    Error(ErrorResponse),
}

impl ServerReply {
    pub fn into_path(self) -> Result<PathResponse, DriverError> {
        match self {
            ServerReply::Path(resp) => Ok(resp),
            ServerReply::Error(err) => Err(DriverError::ServerError(err.message)),
        }
    }
}

/// `calc-duration` travels as an integer count of nanoseconds.
pub mod duration_nanos {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_nanos)
    }
}

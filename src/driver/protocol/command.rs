use serde::{Deserialize, Serialize};

/// Shortest-path query sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    #[serde(rename = "ori")]
    pub origin: String,
    #[serde(rename = "dest")]
    pub destination: String,
}

impl PathRequest {
    pub fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
        }
    }
}

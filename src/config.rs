//! Benchmark configuration
//!
//! ## Environment Variables
//!
//! - `HOST` - Target server as `host:port` (required)
//!
//! A `.env` file in the working directory is loaded first; variables already
//! present in the environment win over values from the file.

use crate::error::{BenchError, BenchResult};
use std::path::{Path, PathBuf};

/// Environment variable naming the target server
pub const ENV_HOST: &str = "HOST";

/// Optional env file read before the environment is inspected
pub const ENV_FILE: &str = ".env";

/// Node list read from the working directory by default
pub const DEFAULT_NODES_FILE: &str = "nodes.txt";

/// Number of queries per run
pub const DEFAULT_SAMPLES: usize = 10_000;

/// How origin and destination are chosen for each query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Both endpoints drawn independently and uniformly from the node set
    #[default]
    Random,
    /// The same pair for every query
    Fixed { origin: String, destination: String },
}

impl Selection {
    /// Build a selection from optional CLI values. Both or neither must be set.
    pub fn from_pair(origin: Option<String>, destination: Option<String>) -> BenchResult<Self> {
        match (origin, destination) {
            (None, None) => Ok(Selection::Random),
            (Some(origin), Some(destination)) => Ok(Selection::Fixed {
                origin,
                destination,
            }),
            _ => Err(BenchError::InvalidConfig(
                "origin and destination must be given together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Server address (`host:port`)
    pub host: String,
    pub nodes_file: PathBuf,
    pub samples: usize,
    /// Seed for endpoint sampling; drawn from OS entropy when unset
    pub seed: Option<u64>,
    pub selection: Selection,
}

impl BenchConfig {
    pub fn new(host: String) -> Self {
        Self {
            host,
            nodes_file: PathBuf::from(DEFAULT_NODES_FILE),
            samples: DEFAULT_SAMPLES,
            seed: None,
            selection: Selection::Random,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> BenchResult<Self> {
        let env_path = Path::new(ENV_FILE);
        if env_path.exists() {
            let _ = dotenvy::from_path(env_path);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> BenchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_HOST).ok_or(BenchError::MissingEnv(ENV_HOST))?;
        let config = Self::new(host);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.host.trim().is_empty() {
            return Err(BenchError::InvalidConfig(format!("{} is empty", ENV_HOST)));
        }
        if self.samples == 0 {
            return Err(BenchError::InvalidConfig(
                "samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

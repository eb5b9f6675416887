use crate::config::Selection;
use crate::error::{BenchError, BenchResult};
use crate::nodes::NodeSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks the origin and destination of each query.
///
/// The random variant owns a single generator seeded once, so a run with a
/// fixed seed and node set always produces the same sequence of pairs.
#[derive(Debug)]
pub enum EndpointSelector {
    Random(StdRng),
    Fixed { origin: String, destination: String },
}

impl EndpointSelector {
    pub fn new(selection: &Selection, seed: Option<u64>) -> Self {
        match selection {
            Selection::Random => Self::random(seed),
            Selection::Fixed {
                origin,
                destination,
            } => Self::Fixed {
                origin: origin.clone(),
                destination: destination.clone(),
            },
        }
    }

    pub fn random(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::Random(rng)
    }

    /// Check that `pick` can succeed for this node set.
    pub fn check(&self, nodes: &NodeSet) -> BenchResult<()> {
        match self {
            Self::Random(_) if nodes.is_empty() => Err(BenchError::EmptyNodeSet),
            _ => Ok(()),
        }
    }

    /// Draw the next pair. Origin and destination are independent and may
    /// be equal.
    pub fn pick<'a>(&'a mut self, nodes: &'a NodeSet) -> BenchResult<(&'a str, &'a str)> {
        match self {
            Self::Random(rng) => {
                if nodes.is_empty() {
                    return Err(BenchError::EmptyNodeSet);
                }
                let origin = rng.gen_range(0..nodes.len());
                let destination = rng.gen_range(0..nodes.len());
                match (nodes.get(origin), nodes.get(destination)) {
                    (Some(o), Some(d)) => Ok((o, d)),
                    _ => Err(BenchError::EmptyNodeSet),
                }
            }
            Self::Fixed {
                origin,
                destination,
            } => Ok((origin.as_str(), destination.as_str())),
        }
    }
}

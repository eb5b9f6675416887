//! Node identifier list loaded once at startup.

use crate::error::{BenchError, BenchResult};
use std::path::Path;

/// Ordered, immutable list of node identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    nodes: Vec<String>,
}

impl NodeSet {
    /// Read a node file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> BenchResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BenchError::NodeFile {
            path: path.to_path_buf(),
            source,
        })?;
        let nodes = Self::parse(&content);
        tracing::info!("Loaded {} nodes from {}", nodes.len(), path.display());
        Ok(nodes)
    }

    /// Split `content` on single spaces.
    ///
    /// Tokens are kept verbatim and in order: no deduplication, no trimming.
    /// Only one line terminator at the very end of the content is dropped.
    /// Empty content yields a single empty identifier, never an empty set.
    pub fn parse(content: &str) -> Self {
        let content = content
            .strip_suffix("\r\n")
            .or_else(|| content.strip_suffix('\n'))
            .unwrap_or(content);

        Self {
            nodes: content.split(' ').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for NodeSet {
    fn from(nodes: Vec<String>) -> Self {
        Self { nodes }
    }
}

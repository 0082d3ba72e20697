//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_WALK_NODES, DEFAULT_THREADS};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Worker threads for batch analysis. 0 = rayon's global pool.
    pub threads: Option<usize>,
    /// Maximum syntax nodes visited per entry point before the walk gives up.
    pub max_walk_nodes: Option<usize>,
}

impl AnalysisConfig {
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }

    pub fn effective_max_walk_nodes(&self) -> usize {
        self.max_walk_nodes.unwrap_or(DEFAULT_MAX_WALK_NODES)
    }
}

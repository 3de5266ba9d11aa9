//! Core configuration for xtimeline-core.

use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// Sizing knobs for track pools.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial slot capacity reserved by a pool.
    pub pool_capacity: usize,
    /// Vacant slots that keep their instance around for reuse. Instances
    /// released past this limit are dropped and the slot stays empty.
    pub max_free: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_capacity: 64,
            max_free: 256,
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self, TrackError> {
        Ok(serde_json::from_str(s)?)
    }
}

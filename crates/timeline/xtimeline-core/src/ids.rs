//! Identifiers for core entities.

use serde::{Deserialize, Serialize};

/// Identity of the timeline that owns a track.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimelineId(pub u32);

impl std::fmt::Display for TimelineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timeline#{}", self.0)
    }
}

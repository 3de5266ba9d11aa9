//! Keyframe payload of a transform track.
//!
//! `TransformTrackData` stores three index-aligned sequences (time, position,
//! rotation). Rotation is kept as Euler angles in degrees and is never
//! converted while stored.
//!
//! `time` is always sorted non-decreasing. Constructed and decoded payloads
//! are stably sorted by time (all three sequences move together), and
//! insertion overwrites an exact timestamp match in place or inserts at the
//! sorted index.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// Three-component vector (x, y, z).
pub type Vec3 = [f32; 3];

/// One (time, position, rotation) triple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
}

/// Serializable keyframe store. All three sequences always have equal length;
/// deserialization rejects payloads that break this.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrackData")]
pub struct TransformTrackData {
    time: Vec<f32>,
    pos: Vec<Vec3>,
    rot: Vec<Vec3>,
}

/// Wire shape before validation.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawTrackData {
    time: Vec<f32>,
    pos: Vec<Vec3>,
    rot: Vec<Vec3>,
}

impl TryFrom<RawTrackData> for TransformTrackData {
    type Error = TrackError;

    fn try_from(raw: RawTrackData) -> Result<Self, Self::Error> {
        Self::from_parts(raw.time, raw.pos, raw.rot)
    }
}

impl TransformTrackData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw sequences, rejecting misaligned or non-finite input.
    /// Keys given out of time order are sorted; equal times keep their order.
    pub fn from_parts(time: Vec<f32>, pos: Vec<Vec3>, rot: Vec<Vec3>) -> Result<Self, TrackError> {
        let mut data = Self { time, pos, rot };
        data.validate()?;
        if !data.is_sorted() {
            debug!("sorting {} keyframes by time", data.len());
            data.sort_by_time();
        }
        Ok(data)
    }

    fn sort_by_time(&mut self) {
        let mut order: Vec<usize> = (0..self.time.len()).collect();
        order.sort_by(|&a, &b| self.time[a].total_cmp(&self.time[b]));
        self.time = order.iter().map(|&i| self.time[i]).collect();
        self.pos = order.iter().map(|&i| self.pos[i]).collect();
        self.rot = order.iter().map(|&i| self.rot[i]).collect();
    }

    /// Decode a `{ "time": [...], "pos": [...], "rot": [...] }` document.
    pub fn from_json(s: &str) -> Result<Self, TrackError> {
        let raw: RawTrackData = serde_json::from_str(s)?;
        Self::try_from(raw)
    }

    /// Check the length invariant and that every timestamp is finite.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.pos.len() != self.time.len() || self.rot.len() != self.time.len() {
            return Err(TrackError::invalid_payload(format!(
                "sequence lengths differ (time={}, pos={}, rot={})",
                self.time.len(),
                self.pos.len(),
                self.rot.len()
            )));
        }
        if let Some(i) = self.time.iter().position(|t| !t.is_finite()) {
            return Err(TrackError::invalid_payload(format!(
                "timestamp at index {i} is not finite"
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    #[inline]
    pub fn times(&self) -> &[f32] {
        &self.time
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.pos
    }

    #[inline]
    pub fn rotations(&self) -> &[Vec3] {
        &self.rot
    }

    pub fn keyframe(&self, index: usize) -> Option<Keyframe> {
        Some(Keyframe {
            time: *self.time.get(index)?,
            position: *self.pos.get(index)?,
            rotation: *self.rot.get(index)?,
        })
    }

    /// First and last timestamps.
    pub fn time_range(&self) -> Option<(f32, f32)> {
        Some((*self.time.first()?, *self.time.last()?))
    }

    /// Index of the first keyframe whose timestamp equals `t` exactly.
    pub fn index_of(&self, t: f32) -> Option<usize> {
        self.time.iter().position(|&x| x == t)
    }

    /// Whether timestamps are non-decreasing.
    pub fn is_sorted(&self) -> bool {
        self.time.windows(2).all(|w| w[0] <= w[1])
    }

    /// Upsert a keyframe.
    pub fn add_item(&mut self, t: f32, pos: Vec3, rot: Vec3) {
        if !t.is_finite() {
            warn!("ignoring keyframe with non-finite time {t}");
            return;
        }
        if let Some(i) = self.index_of(t) {
            self.pos[i] = pos;
            self.rot[i] = rot;
            return;
        }
        let at = self.time.partition_point(|&x| x < t);
        self.time.insert(at, t);
        self.pos.insert(at, pos);
        self.rot.insert(at, rot);
    }

    /// Remove the first keyframe at exactly `t`. Returns false when none matches.
    pub fn remove_item(&mut self, t: f32) -> bool {
        match self.index_of(t) {
            Some(i) => self.remove_item_at(i),
            None => false,
        }
    }

    /// Remove keyframe `index` from all three sequences. Out of range is a no-op.
    pub fn remove_item_at(&mut self, index: usize) -> bool {
        if index >= self.time.len() {
            return false;
        }
        self.time.remove(index);
        self.pos.remove(index);
        self.rot.remove(index);
        true
    }
}

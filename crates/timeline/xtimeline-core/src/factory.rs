//! Track construction.
//!
//! Cloning a track goes through a [`TrackFactory`] passed in by the caller.
//! The pool-backed factory deep-copies the keyframe payload, so a clone can
//! be edited without affecting its source.

use log::warn;

use crate::binding::ParentRef;
use crate::data::TransformTrackData;
use crate::error::TrackError;
use crate::ids::TimelineId;
use crate::pool::{PoolHandle, TrackPool};
use crate::track::TransformTrack;

/// Everything needed to construct a transform track.
#[derive(Clone, Debug)]
pub struct TrackDescriptor {
    pub data: TransformTrackData,
    pub timeline: TimelineId,
    pub parent: Option<ParentRef>,
    pub mute: bool,
}

impl TrackDescriptor {
    pub fn new(data: TransformTrackData, timeline: TimelineId, parent: Option<ParentRef>) -> Self {
        Self {
            data,
            timeline,
            parent,
            mute: false,
        }
    }
}

/// Produces built tracks from descriptors.
pub trait TrackFactory {
    fn get_track(&mut self, desc: TrackDescriptor) -> Result<PoolHandle, TrackError>;
}

impl TrackFactory for TrackPool<TransformTrack> {
    fn get_track(&mut self, desc: TrackDescriptor) -> Result<PoolHandle, TrackError> {
        let handle = self.acquire();
        let built = match self.get_mut(handle) {
            Some(track) => track.build(desc),
            None => Err(TrackError::StaleHandle {
                index: handle.index(),
                generation: handle.generation(),
            }),
        };
        if let Err(err) = built {
            warn!("track construction failed: {err}");
            self.release(handle);
            return Err(err);
        }
        Ok(handle)
    }
}

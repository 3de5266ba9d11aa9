//! Timeline: owns a track pool and drives its active tracks once per frame.

use log::debug;

use crate::binding::ParentRef;
use crate::config::Config;
use crate::data::TransformTrackData;
use crate::error::TrackError;
use crate::factory::{TrackDescriptor, TrackFactory};
use crate::ids::TimelineId;
use crate::pool::{PoolHandle, TrackPool};
use crate::target::TargetRegistry;
use crate::track::{TimelineTrack, TransformTrack};

#[derive(Debug)]
pub struct Timeline {
    id: TimelineId,
    pool: TrackPool<TransformTrack>,
    /// Active tracks in creation order.
    active: Vec<PoolHandle>,
}

impl Timeline {
    pub fn new(id: TimelineId, cfg: &Config) -> Self {
        Self {
            id,
            pool: TrackPool::new(cfg),
            active: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> TimelineId {
        self.id
    }

    #[inline]
    pub fn pool(&self) -> &TrackPool<TransformTrack> {
        &self.pool
    }

    #[inline]
    pub fn handles(&self) -> &[PoolHandle] {
        &self.active
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn add_track(
        &mut self,
        data: TransformTrackData,
        parent: Option<ParentRef>,
    ) -> Result<PoolHandle, TrackError> {
        let handle = self
            .pool
            .get_track(TrackDescriptor::new(data, self.id, parent))?;
        self.active.push(handle);
        Ok(handle)
    }

    pub fn track(&self, handle: PoolHandle) -> Option<&TransformTrack> {
        self.pool.get(handle)
    }

    pub fn track_mut(&mut self, handle: PoolHandle) -> Option<&mut TransformTrack> {
        self.pool.get_mut(handle)
    }

    /// Destroy a track and return its instance to the pool.
    pub fn destroy_track(&mut self, handle: PoolHandle) -> bool {
        let Some(pos) = self.active.iter().position(|h| *h == handle) else {
            return false;
        };
        self.active.remove(pos);
        self.pool.release(handle)
    }

    /// Construct a copy of `handle` on this timeline.
    pub fn clone_track(&mut self, handle: PoolHandle) -> Result<PoolHandle, TrackError> {
        let desc = self
            .pool
            .get(handle)
            .ok_or(TrackError::StaleHandle {
                index: handle.index(),
                generation: handle.generation(),
            })?
            .clone_descriptor()?;
        let copy = self.pool.get_track(desc)?;
        self.active.push(copy);
        Ok(copy)
    }

    /// Evaluate every active track once.
    pub fn process(&mut self, time: f32, prev: f32, targets: &mut dyn TargetRegistry) {
        for handle in &self.active {
            if let Some(track) = self.pool.get_mut(*handle) {
                track.process(time, prev, targets);
            }
        }
    }

    /// Destroy every active track and construct a fresh one from its
    /// descriptor. Handles are returned in the previous order; old handles
    /// become stale and binding caches start empty.
    pub fn rebuild(&mut self) -> Result<Vec<PoolHandle>, TrackError> {
        let descs = self
            .active
            .iter()
            .filter_map(|h| self.pool.get(*h))
            .map(TransformTrack::descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        for handle in std::mem::take(&mut self.active) {
            self.pool.release(handle);
        }
        for desc in descs {
            let handle = self.pool.get_track(desc)?;
            self.active.push(handle);
        }
        debug!("{} rebuilt {} tracks", self.id, self.active.len());
        Ok(self.active.clone())
    }
}

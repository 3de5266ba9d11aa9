//! Transform track: keyframe store, lazy binding and per-frame evaluation.
//!
//! Lifecycle per instance:
//! `Unbuilt --build--> Built --release--> Destroyed --acquire--> Unbuilt`.
//! Instances are owned by a [`TrackPool`](crate::pool::TrackPool); every
//! acquisition starts a new logical track with an empty binding cache.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::binding::{Binding, ParentRef, TargetHandle};
use crate::data::{TransformTrackData, Vec3};
use crate::error::TrackError;
use crate::factory::{TrackDescriptor, TrackFactory};
use crate::ids::TimelineId;
use crate::pool::{PoolHandle, Poolable};
use crate::sampling::{sample_transform, TransformSample};
use crate::target::TargetRegistry;

/// Kind of asset a track animates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AssetType {
    Transform,
}

/// Structural constraints of a track kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackFlags {
    /// Only valid as a child of a bind track.
    pub sub_only: bool,
    /// Never holds clips.
    pub no_clip: bool,
}

/// Clip placement on a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipData {
    pub start: f32,
    pub duration: f32,
}

/// Packaged animation segment built by clip-based track kinds.
pub trait Clip: std::fmt::Debug {
    fn start(&self) -> f32;
    fn duration(&self) -> f32;
}

/// Behaviour shared by every track kind driven by a timeline.
pub trait TimelineTrack {
    fn asset_type(&self) -> AssetType;

    fn flags(&self) -> TrackFlags;

    /// Evaluate at `time` and write into the bound target. `prev` is the
    /// time of the previous evaluation.
    fn process(&mut self, time: f32, prev: f32, targets: &mut dyn TargetRegistry);

    fn build_clip(&mut self, clip: &ClipData) -> Result<Box<dyn Clip>, TrackError>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TrackState {
    #[default]
    Unbuilt,
    Built,
    Destroyed,
}

#[derive(Debug, Default)]
pub struct TransformTrack {
    state: TrackState,
    timeline: TimelineId,
    binding: Binding,
    mute: bool,
    data: Option<TransformTrackData>,
}

impl TransformTrack {
    /// Generic construction followed by [`on_post_build`](Self::on_post_build).
    pub fn build(&mut self, desc: TrackDescriptor) -> Result<(), TrackError> {
        if self.state != TrackState::Unbuilt {
            warn!("build requested on a {:?} transform track", self.state);
            return Err(TrackError::AlreadyBuilt);
        }
        self.timeline = desc.timeline;
        self.binding = Binding::new(desc.parent);
        self.mute = desc.mute;
        self.on_post_build(desc.data)
    }

    /// Attach the keyframe store; the track becomes sample-able.
    fn on_post_build(&mut self, data: TransformTrackData) -> Result<(), TrackError> {
        if let Err(err) = data.validate() {
            warn!("rejecting transform track payload: {err}");
            return Err(err);
        }
        debug!(
            "transform track built on {} with {} keyframes",
            self.timeline,
            data.len()
        );
        self.data = Some(data);
        self.state = TrackState::Built;
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> TrackState {
        self.state
    }

    #[inline]
    pub fn timeline(&self) -> TimelineId {
        self.timeline
    }

    #[inline]
    pub fn parent(&self) -> Option<&ParentRef> {
        self.binding.parent()
    }

    #[inline]
    pub fn data(&self) -> Option<&TransformTrackData> {
        self.data.as_ref()
    }

    #[inline]
    pub fn is_muted(&self) -> bool {
        self.mute
    }

    #[inline]
    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
    }

    /// Bound target, resolved through the parent on first use.
    pub fn target(&mut self) -> Option<&TargetHandle> {
        self.binding.resolve()
    }

    pub fn sample(&self, time: f32) -> TransformSample {
        match &self.data {
            Some(data) => sample_transform(data, time),
            None => TransformSample::default(),
        }
    }

    pub fn add_item(&mut self, time: f32, position: Vec3, rotation: Vec3) {
        match self.data.as_mut() {
            Some(data) => data.add_item(time, position, rotation),
            None => warn!("add_item on a {:?} transform track ignored", self.state),
        }
    }

    pub fn remove_item(&mut self, time: f32) -> bool {
        self.data.as_mut().is_some_and(|d| d.remove_item(time))
    }

    pub fn remove_item_at(&mut self, index: usize) -> bool {
        self.data.as_mut().is_some_and(|d| d.remove_item_at(index))
    }

    /// What a factory needs to construct an equivalent track, mute included.
    pub fn descriptor(&self) -> Result<TrackDescriptor, TrackError> {
        let data = self.data.as_ref().ok_or(TrackError::NotBuilt)?;
        Ok(TrackDescriptor {
            data: data.clone(),
            timeline: self.timeline,
            parent: self.binding.parent().cloned(),
            mute: self.mute,
        })
    }

    /// Descriptor for a clone: payload, timeline and parent only. Clones
    /// start unmuted.
    pub fn clone_descriptor(&self) -> Result<TrackDescriptor, TrackError> {
        Ok(TrackDescriptor {
            mute: false,
            ..self.descriptor()?
        })
    }

    /// Ask `factory` for a new track with the same payload, timeline and parent.
    pub fn clone_with<F: TrackFactory + ?Sized>(
        &self,
        factory: &mut F,
    ) -> Result<PoolHandle, TrackError> {
        factory.get_track(self.clone_descriptor()?)
    }
}

impl TimelineTrack for TransformTrack {
    fn asset_type(&self) -> AssetType {
        AssetType::Transform
    }

    fn flags(&self) -> TrackFlags {
        TrackFlags {
            sub_only: true,
            no_clip: true,
        }
    }

    fn process(&mut self, time: f32, _prev: f32, targets: &mut dyn TargetRegistry) {
        if self.mute {
            return;
        }
        let Some(handle) = self.binding.resolve() else {
            trace!("transform track unbound at t={time}, skipping");
            return;
        };
        let Some(target) = targets.target_mut(handle) else {
            trace!("target '{handle}' missing from registry, skipping");
            return;
        };
        let sample = match &self.data {
            Some(data) => sample_transform(data, time),
            None => return,
        };
        if !sample.found {
            return;
        }
        target.set_local_position(sample.position);
        target.set_local_euler_degrees(sample.rotation);
    }

    fn build_clip(&mut self, _clip: &ClipData) -> Result<Box<dyn Clip>, TrackError> {
        Err(TrackError::UnsupportedOperation {
            track: "transform track",
            operation: "clips",
        })
    }
}

impl Poolable for TransformTrack {
    fn on_acquire(&mut self) {
        self.state = TrackState::Unbuilt;
    }

    fn on_release(&mut self) {
        debug!("transform track on {} destroyed", self.timeline);
        self.state = TrackState::Destroyed;
        self.binding = Binding::default();
        self.data = None;
        self.mute = false;
        self.timeline = TimelineId::default();
    }
}

//! XTimeline core (engine-agnostic)
//!
//! Runtime transform tracks: a keyframe store of (time, position, rotation)
//! triples, linear sampling with clamped ends, lazy binding to a target
//! through the parent track, and pooled track instances that are recycled
//! across timeline rebuilds.
//!
//! Everything here is single-threaded. Keyframe edits must not interleave
//! with `process` on the same track, and a pool must only be used from one
//! thread.

pub mod binding;
pub mod config;
pub mod data;
pub mod error;
pub mod factory;
pub mod ids;
pub mod interp;
pub mod pool;
pub mod sampling;
pub mod target;
pub mod timeline;
pub mod track;

// Re-exports for consumers (adapters)
pub use binding::{
    parent_ref, BindTrack, Binding, BindingProvider, ParentRef, TargetHandle, TrackNode,
};
pub use config::Config;
pub use data::{Keyframe, TransformTrackData, Vec3};
pub use error::TrackError;
pub use factory::{TrackDescriptor, TrackFactory};
pub use ids::TimelineId;
pub use pool::{PoolHandle, Poolable, TrackPool};
pub use sampling::{sample_transform, TransformSample};
pub use target::{
    euler_degrees_to_quat, LocalTransform, SceneTargets, TargetRegistry, TransformTarget,
};
pub use timeline::Timeline;
pub use track::{
    AssetType, Clip, ClipData, TimelineTrack, TrackFlags, TrackState, TransformTrack,
};

/// Result type for fallible track operations.
pub type Result<T> = core::result::Result<T, TrackError>;

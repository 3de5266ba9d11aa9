//! Transform track sampling.
//!
//! Model:
//! - Before the first keyframe the first values are held, after the last
//!   keyframe the last values are held.
//! - Between keyframes, the first adjacent pair `[i, i+1]` (in index order)
//!   with `time[i] <= t <= time[i+1]` is blended linearly.
//! - An empty store, or a time no pair brackets (NaN), yields zero vectors
//!   with `found == false`.

use crate::data::{TransformTrackData, Vec3};
use crate::interp::lerp_vec3;

/// Result of evaluating a transform track at one time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformSample {
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub found: bool,
}

impl TransformSample {
    #[inline]
    fn hit(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            found: true,
        }
    }

    #[inline]
    fn miss() -> Self {
        Self::default()
    }
}

/// Sample `data` at `time`.
pub fn sample_transform(data: &TransformTrackData, time: f32) -> TransformSample {
    let times = data.times();
    let pos = data.positions();
    let rot = data.rotations();
    let n = times.len();
    if n == 0 {
        return TransformSample::miss();
    }
    if time < times[0] {
        return TransformSample::hit(pos[0], rot[0]);
    }
    if time > times[n - 1] {
        return TransformSample::hit(pos[n - 1], rot[n - 1]);
    }
    if n == 1 && time == times[0] {
        return TransformSample::hit(pos[0], rot[0]);
    }
    for i in 0..(n - 1) {
        let t0 = times[i];
        let t1 = times[i + 1];
        if time >= t0 && time <= t1 {
            // Exact hits return the stored key unblended; this also covers
            // duplicate timestamps, where the first key at that time wins.
            if time == t0 {
                return TransformSample::hit(pos[i], rot[i]);
            }
            if time == t1 {
                return TransformSample::hit(pos[i + 1], rot[i + 1]);
            }
            let alpha = (time - t0) / (t1 - t0);
            return TransformSample::hit(
                lerp_vec3(pos[i], pos[i + 1], alpha),
                lerp_vec3(rot[i], rot[i + 1], alpha),
            );
        }
    }
    TransformSample::miss()
}

//! Linear interpolation helpers.
//!
//! Rotations are Euler degrees and are blended per component like positions;
//! there is no shortest-arc correction.

use crate::data::Vec3;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let a = [1.0, -2.0, 3.5];
        let b = [4.0, 8.0, -1.0];
        assert_eq!(lerp_vec3(a, b, 0.0), a);
        assert_eq!(lerp_vec3(a, b, 1.0), b);
    }

    #[test]
    fn euler_components_do_not_take_the_short_way_round() {
        // 350 -> 10 degrees passes through 180, not through 0.
        let r = lerp_vec3([0.0, 350.0, 0.0], [0.0, 10.0, 0.0], 0.5);
        assert_eq!(r, [0.0, 180.0, 0.0]);
    }
}

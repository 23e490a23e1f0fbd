use std::f64::consts::TAU;

use macroquad::math::{dvec3, DVec3};
use rand::Rng;

/// Heading as a unit axis plus a rotation angle about it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisAngle {
    pub axis: DVec3,
    pub angle: f64,
}

impl AxisAngle {
    pub fn new(axis: DVec3, angle: f64) -> Self {
        Self { axis, angle }
    }
}

/// Componentwise interpolation with `t` clamped to [0, 1].
pub fn lerp(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    let t = t.clamp(0.0, 1.0);
    a * (1.0 - t) + b * t
}

/// Unit vector in the direction of `v`, or `fallback` when `v` has no direction.
pub fn normalize_or(v: DVec3, fallback: DVec3) -> DVec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Uniform sample in [-scale, scale].
pub fn random_symmetric(rng: &mut impl Rng, scale: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-scale..=scale)
}

/// Random vector of length `scale`, uniform over the sphere (or the xy circle when planar).
pub fn random_vector(rng: &mut impl Rng, scale: f64, planar: bool) -> DVec3 {
    let theta = rng.gen_range(0.0..TAU);
    if planar {
        return dvec3(theta.cos(), theta.sin(), 0.0) * scale;
    }
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let r = (1.0 - z * z).max(0.0).sqrt();
    dvec3(r * theta.cos(), r * theta.sin(), z) * scale
}

/// Uniform random orientation: unit axis plus an angle in [0, 2π).
pub fn random_orientation(rng: &mut impl Rng, planar: bool) -> AxisAngle {
    AxisAngle {
        axis: random_vector(rng, 1.0, planar),
        angle: rng.gen_range(0.0..TAU),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn lerp_clamps_factor() {
        let a = DVec3::X;
        let b = DVec3::Y;
        assert_eq!(lerp(a, b, 2.0), b);
        assert_eq!(lerp(a, b, -1.0), a);
        assert_eq!(lerp(a, b, 0.5), dvec3(0.5, 0.5, 0.0));
    }

    #[test]
    fn zero_vector_keeps_fallback() {
        assert_eq!(normalize_or(DVec3::ZERO, DVec3::Z), DVec3::Z);
        let n = normalize_or(dvec3(3.0, 4.0, 0.0), DVec3::Z);
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wrapped_angles_stay_in_range() {
        for angle in [-7.0, -TAU, -1e-18, 0.0, 3.0, TAU, 13.0] {
            let w = wrap_angle(angle);
            assert!((0.0..TAU).contains(&w), "{angle} wrapped to {w}");
        }
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn random_vectors_have_requested_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let v = random_vector(&mut rng, 0.3, false);
            assert!((v.length() - 0.3).abs() < 1e-9);
            let p = random_vector(&mut rng, 2.0, true);
            assert_eq!(p.z, 0.0);
            assert!((p.length() - 2.0).abs() < 1e-9);
        }
    }
}

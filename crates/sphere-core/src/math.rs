use glam::Vec3;
use std::f32::consts::PI;

/// Angle in radians between two non-zero vectors of any length.
#[inline]
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom <= f32::EPSILON {
        return PI / 2.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Quadratic ease-in/ease-out on [0, 1].
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Rise-then-fall shape over a spike's normalized age.
#[inline]
pub fn life_envelope(age_fraction: f32) -> f32 {
    (age_fraction.clamp(0.0, 1.0) * PI).sin()
}

/// Power-shaped closeness of `angle` inside a cone, `None` outside it.
#[inline]
pub fn locality(angle: f32, cone: f32, power: f32) -> Option<f32> {
    if angle >= cone {
        return None;
    }
    Some((1.0 - angle / cone).powf(power))
}

/// Blend of two sine waves mapped to [0, 1], then mixed against a constant
/// by `noise_amount`.
#[inline]
pub fn oscillation_mix(osc1: f32, osc2: f32, noise_amount: f32) -> f32 {
    let osc_norm = 0.5 + 0.5 * ((osc1 + osc2) * 0.5);
    (1.0 - noise_amount) + noise_amount * osc_norm
}

//! Transient spikes and the fixed-size pools that recycle them.
//!
//! Slots are never removed; an expired spike is overwritten in place.

use crate::math::{lerp, life_envelope};
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

pub trait Spike {
    fn start_time(&self) -> f32;
    fn life(&self) -> f32;

    /// Normalized age; above 1 means the slot is due for respawn.
    fn age_fraction(&self, time: f32) -> f32 {
        (time - self.start_time()) / self.life()
    }

    fn envelope(&self, time: f32) -> f32 {
        life_envelope(self.age_fraction(time))
    }
}

/// Magnet sub-spike, placed by polar offset from the moving magnet direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubSpike {
    pub alpha: f32,
    pub beta: f32,
    pub start_time: f32,
    pub life: f32,
    pub phase: f32,
}

impl SubSpike {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, time: f32, area_cone_angle: f32) -> Self {
        let max_alpha = area_cone_angle * 0.7;
        Self {
            alpha: rng.gen::<f32>() * max_alpha,
            beta: rng.gen::<f32>() * TAU,
            start_time: time,
            life: lerp(0.9, 1.8, rng.gen::<f32>()),
            phase: rng.gen::<f32>() * TAU,
        }
    }

    /// Direction of this spike around `base`, mirrored to the front hemisphere.
    pub fn direction(&self, base: Vec3) -> Vec3 {
        let w = base.normalize_or_zero();
        let arbitrary = if w.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
        let u = arbitrary.cross(w).normalize_or_zero();
        let v = w.cross(u).normalize_or_zero();
        let sin_alpha = self.alpha.sin();
        let mut dir = w * self.alpha.cos()
            + u * (sin_alpha * self.beta.cos())
            + v * (sin_alpha * self.beta.sin());
        if dir.z < 0.0 {
            dir.z = -dir.z;
        }
        dir.normalize_or_zero()
    }
}

impl Spike for SubSpike {
    fn start_time(&self) -> f32 {
        self.start_time
    }
    fn life(&self) -> f32 {
        self.life
    }
}

/// Dialog ambient spike with an explicit front-hemisphere direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialogSpike {
    pub dir: Vec3,
    pub start_time: f32,
    pub life: f32,
    pub phase: f32,
}

impl DialogSpike {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, time: f32) -> Self {
        let mut dir = Vec3::new(
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
        );
        if dir.length_squared() < 1e-4 {
            dir = Vec3::Z;
        }
        dir = dir.normalize();
        if dir.z < 0.0 {
            dir.z = -dir.z;
        }
        Self {
            dir,
            start_time: time,
            life: lerp(1.2, 3.4, rng.gen::<f32>()),
            phase: rng.gen::<f32>() * TAU,
        }
    }
}

impl Spike for DialogSpike {
    fn start_time(&self) -> f32 {
        self.start_time
    }
    fn life(&self) -> f32 {
        self.life
    }
}

/// Per-frame snapshot of a spike: where it points, how alive it is, its seed.
#[derive(Clone, Copy, Debug)]
pub struct ActiveSpike {
    pub dir: Vec3,
    pub envelope: f32,
    pub phase: f32,
}

#[derive(Clone, Debug)]
pub struct SpikePool<S> {
    slots: SmallVec<[S; 8]>,
}

impl<S: Spike> Default for SpikePool<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Spike> SpikePool<S> {
    pub fn new() -> Self {
        Self {
            slots: SmallVec::new(),
        }
    }

    /// Discard every slot and spawn `count` fresh ones.
    pub fn fill(&mut self, count: usize, mut spawn: impl FnMut() -> S) {
        self.slots.clear();
        self.slots.extend((0..count).map(|_| spawn()));
    }

    /// Overwrite each slot whose age fraction exceeds 1. Returns how many.
    pub fn respawn_expired(&mut self, time: f32, mut spawn: impl FnMut() -> S) -> usize {
        let mut respawned = 0;
        for slot in self.slots.iter_mut() {
            if slot.age_fraction(time) > 1.0 {
                *slot = spawn();
                respawned += 1;
            }
        }
        respawned
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.slots.iter()
    }
}

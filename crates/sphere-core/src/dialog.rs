//! Dialog-mode ambient field: a calm centre, a spiky ring, nothing outside.
//!
//! Angles are measured from the axis pointing back at the viewer, not from
//! the pointer.

use crate::config::SphereConfig;
use crate::constants::{DIALOG_REFILL_FEATHER, DIALOG_SPIKE_FADE_PORTION};
use crate::math::{angle_between, locality, oscillation_mix, smoothstep};
use crate::spikes::{ActiveSpike, DialogSpike, Spike, SpikePool};
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::PI;

/// What the dialog field decides for a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DialogPoint {
    /// Place the point exactly here, ignoring every radial offset.
    Anchored(Vec3),
    /// Push the point outward along its direction by this much.
    Radial(f32),
}

/// Per-frame constants of the dialog field.
#[derive(Clone, Debug)]
pub struct DialogFrame {
    pub intensity: f32,
    pub refilling: bool,
    pub refill_progress: f32,
    pub spike_fade: f32,
    pub spikes: SmallVec<[ActiveSpike; 8]>,
}

#[derive(Clone, Debug)]
pub struct DialogField {
    spikes: SpikePool<DialogSpike>,
    last_intensity: f32,
}

impl DialogField {
    pub fn new<R: Rng + ?Sized>(config: &SphereConfig, rng: &mut R) -> Self {
        let mut field = Self {
            spikes: SpikePool::new(),
            last_intensity: 0.0,
        };
        field.rebuild(0.0, config.dialog_spike_count(), rng);
        field
    }

    pub fn spikes(&self) -> &SpikePool<DialogSpike> {
        &self.spikes
    }

    fn rebuild<R: Rng + ?Sized>(&mut self, time: f32, count: usize, rng: &mut R) {
        self.spikes.fill(count, || DialogSpike::spawn(rng, time));
    }

    /// Keep the pool at its configured size and recycle expired spikes.
    pub fn maintain<R: Rng + ?Sized>(&mut self, time: f32, config: &SphereConfig, rng: &mut R) {
        let count = config.dialog_spike_count();
        if self.spikes.len() != count {
            log::debug!("[dialog] rebuilding spike pool {} -> {}", self.spikes.len(), count);
            self.rebuild(time, count, rng);
            return;
        }
        self.spikes
            .respawn_expired(time, || DialogSpike::spawn(rng, time));
    }

    /// Snapshot this frame's intensity, refill state and live spikes.
    ///
    /// A refill is in progress whenever intensity drops below last frame's.
    pub fn frame(&self, hollow_factor: f32, time: f32) -> DialogFrame {
        let intensity = hollow_factor.clamp(0.0, 1.0);
        let refilling = intensity < self.last_intensity - 1e-4;
        let refill_progress = if refilling { 1.0 - intensity } else { 0.0 };
        let spike_fade = if refilling {
            1.0 - smoothstep(0.0, DIALOG_SPIKE_FADE_PORTION, refill_progress)
        } else {
            1.0
        };
        let spikes = self
            .spikes
            .iter()
            .map(|s| ActiveSpike {
                dir: s.dir,
                envelope: s.envelope(time),
                phase: s.phase,
            })
            .collect();
        DialogFrame {
            intensity,
            refilling,
            refill_progress,
            spike_fade,
            spikes,
        }
    }

    /// Remember what this frame fed in so the next one can detect a refill.
    pub fn finish_frame(&mut self, hollow_factor: f32, dialog_mode: bool) {
        self.last_intensity = if dialog_mode { hollow_factor } else { 0.0 };
    }

    pub fn displace(
        &self,
        frame: &DialogFrame,
        dir: Vec3,
        point_phase: f32,
        radius: f32,
        time: f32,
        config: &SphereConfig,
    ) -> DialogPoint {
        let inner = config.dialog_ring_inner_angle;
        let outer = config.dialog_ring_outer_angle;
        let angle = angle_between(dir, Vec3::Z);

        if inner > 0.0 && angle <= inner {
            return DialogPoint::Anchored(center_position(frame, dir, angle, inner, radius));
        }

        let ring_weight = if angle < outer {
            let t = ((angle - inner) / (outer - inner)).clamp(0.0, 1.0);
            (t * PI).sin()
        } else {
            0.0
        };
        if ring_weight <= 0.001 || frame.intensity <= 0.001 || frame.spikes.is_empty() {
            return DialogPoint::Radial(0.0);
        }

        let mut best = 0.0_f32;
        let mut best_envelope = 0.0_f32;
        let mut best_phase = 0.0_f32;
        for spike in &frame.spikes {
            let a = angle_between(dir, spike.dir);
            if let Some(local) = locality(a, config.dialog_cone_angle, config.dialog_local_power) {
                let combined = local * spike.envelope;
                if combined > best {
                    best = combined;
                    best_envelope = spike.envelope;
                    best_phase = spike.phase;
                }
            }
        }
        if best <= 0.0 {
            return DialogPoint::Radial(0.0);
        }

        let local_intensity = best * frame.intensity * ring_weight;
        if local_intensity <= 0.001 {
            return DialogPoint::Radial(0.0);
        }
        let osc1 = (time * config.dialog_wave_speed1 + point_phase + best_phase).sin();
        let osc2 = (time * config.dialog_wave_speed2 + point_phase * 1.37 - best_phase * 0.6).sin();
        let mix = oscillation_mix(osc1, osc2, config.dialog_noise_amount);
        let height = config.dialog_spike_min_height
            + (config.dialog_spike_max_height - config.dialog_spike_min_height) * local_intensity;
        DialogPoint::Radial(height * mix * best_envelope * frame.spike_fade)
    }
}

/// Centre points sit on the inner ring circle (same azimuth). During a refill
/// they slide back home outside-in: the ring edge first, the very centre last.
fn center_position(frame: &DialogFrame, dir: Vec3, angle: f32, inner: f32, radius: f32) -> Vec3 {
    let base = dir * radius;
    let len_xy = (dir.x * dir.x + dir.y * dir.y).sqrt();
    let (ux, uy) = if len_xy > 1e-6 {
        (dir.x / len_xy, dir.y / len_xy)
    } else {
        (1.0, 0.0)
    };
    let (sin_phi, cos_phi) = inner.sin_cos();
    let ring = Vec3::new(ux * sin_phi, uy * sin_phi, cos_phi) * radius;

    let reveal = if frame.refilling {
        let threshold = 1.0 - (angle / inner).clamp(0.0, 1.0);
        smoothstep(
            threshold - DIALOG_REFILL_FEATHER,
            threshold + DIALOG_REFILL_FEATHER,
            frame.refill_progress,
        )
    } else {
        0.0
    };
    ring + (base - ring) * reveal
}

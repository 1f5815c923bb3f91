//! Pointer-proximity magnet field and its sub-spike pool.

use crate::camera::{ray_sphere, Camera};
use crate::config::SphereConfig;
use crate::math::{angle_between, lerp, locality, oscillation_mix};
use crate::spikes::{ActiveSpike, Spike, SpikePool, SubSpike};
use glam::{Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;

/// Linear falloff from 1 at the silhouette edge to 0 at the activation boundary
/// `(1 + extra) × radius_ndc`. Anywhere inside the silhouette counts as 1.
pub fn proximity(pointer: Vec2, radius_ndc: f32, extra: f32) -> f32 {
    let r = pointer.length();
    let activation = radius_ndc * (1.0 + extra);
    if r >= activation {
        return 0.0;
    }
    let from_edge = (r - radius_ndc).max(0.0);
    let mut denom = radius_ndc * extra;
    if denom == 0.0 {
        denom = 1e-6;
    }
    (1.0 - from_edge / denom).clamp(0.0, 1.0)
}

/// Where the pointer ray meets the sphere, mirrored to the front hemisphere.
///
/// A miss (or a hit behind the equator) falls back to the sphere point closest
/// to the ray, so the result is always a unit vector.
pub fn pointer_direction(camera: &Camera, pointer: Vec2, radius: f32) -> Vec3 {
    let (origin, dir) = camera.pointer_ray(pointer);
    let hit = ray_sphere(origin, dir, radius)
        .map(|t| origin + dir * t)
        .filter(|p| p.z >= 0.0);
    let mut out = match hit {
        Some(p) => p.normalize_or_zero(),
        None => {
            let closest = origin + dir * -origin.dot(dir);
            if closest.length() < 1e-6 {
                Vec3::Z
            } else {
                closest.normalize()
            }
        }
    };
    if out.z < 0.0 {
        out.z = -out.z;
    }
    out.normalize_or_zero()
}

#[derive(Clone, Debug)]
pub struct MagnetField {
    raw_dir: Vec3,
    visual_dir: Vec3,
    active: bool,
    intensity: f32,
    target: f32,
    sub_spikes: SpikePool<SubSpike>,
}

impl MagnetField {
    pub fn new<R: Rng + ?Sized>(config: &SphereConfig, rng: &mut R) -> Self {
        let mut sub_spikes = SpikePool::new();
        let area = config.area_cone_angle;
        sub_spikes.fill(config.sub_spike_count(), || SubSpike::spawn(rng, 0.0, area));
        Self {
            raw_dir: Vec3::Z,
            visual_dir: Vec3::Z,
            active: false,
            intensity: 0.0,
            target: 0.0,
            sub_spikes,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn raw_direction(&self) -> Vec3 {
        self.raw_dir
    }

    pub fn visual_direction(&self) -> Vec3 {
        self.visual_dir
    }

    pub fn sub_spikes(&self) -> &SpikePool<SubSpike> {
        &self.sub_spikes
    }

    /// Control-mode step: track the pointer, ease the global intensity and
    /// recycle expired sub-spikes. `pointer` is `None` until the pointer has
    /// ever been set.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        time: f32,
        pointer: Option<Vec2>,
        enabled: bool,
        camera: &Camera,
        radius: f32,
        config: &SphereConfig,
        rng: &mut R,
    ) -> f32 {
        let proximity = match pointer {
            Some(p) if enabled => self.track(p, camera, radius, config),
            _ => {
                self.active = false;
                0.0
            }
        };

        self.target = if enabled {
            proximity * config.spike_max_intensity
        } else {
            0.0
        };
        self.intensity += (self.target - self.intensity) * config.spike_easing;
        if !self.active {
            self.intensity *= config.spike_decay;
        }

        if self.active {
            let area = config.area_cone_angle;
            self.sub_spikes
                .respawn_expired(time, || SubSpike::spawn(rng, time, area));
        }
        proximity
    }

    /// Dialog-mode step: the local magnet is switched off and eases to zero.
    pub fn release(&mut self, config: &SphereConfig) {
        self.target = 0.0;
        self.intensity += (0.0 - self.intensity) * config.spike_easing;
        self.active = false;
    }

    fn track(&mut self, pointer: Vec2, camera: &Camera, radius: f32, config: &SphereConfig) -> f32 {
        let radius_ndc = camera.projected_radius_ndc(radius);
        let proximity = proximity(pointer, radius_ndc, config.magnet_extra_radius_factor);
        self.active = proximity > 0.001;
        self.raw_dir = pointer_direction(camera, pointer, radius);
        self.visual_dir = self.visual_dir.lerp(self.raw_dir, config.magnet_follow_easing);
        proximity
    }

    /// Resolve every sub-spike against the current visual direction once per
    /// frame. Empty when the field contributes nothing this frame.
    pub fn frame_spikes(&self, time: f32) -> SmallVec<[ActiveSpike; 8]> {
        if !(self.intensity > 0.001 && self.active) {
            return SmallVec::new();
        }
        self.sub_spikes
            .iter()
            .map(|s| ActiveSpike {
                dir: s.direction(self.visual_dir),
                envelope: s.envelope(time),
                phase: s.phase,
            })
            .collect()
    }

    /// Radial offset for one point. `spikes` comes from [`Self::frame_spikes`].
    pub fn displacement(
        &self,
        dir: Vec3,
        point_phase: f32,
        spikes: &[ActiveSpike],
        time: f32,
        config: &SphereConfig,
    ) -> f32 {
        if spikes.is_empty() {
            return 0.0;
        }
        if angle_between(dir, self.visual_dir) >= config.area_cone_angle {
            return 0.0;
        }

        let mut best = 0.0_f32;
        let mut best_envelope = 0.0_f32;
        for spike in spikes {
            let angle = angle_between(dir, spike.dir);
            // per point/spike jitter of the cone, about ±35 %
            let noise = (point_phase * 3.17 + spike.phase * 1.31).sin()
                + 0.6 * (point_phase * 5.11 - spike.phase * 0.73).sin();
            let cone = config.sub_spike_cone_angle * (1.0 + 0.35 * noise * 0.5);
            if let Some(local) = locality(angle, cone, config.spike_local_power) {
                let combined = local * spike.envelope;
                if combined > best {
                    best = combined;
                    best_envelope = spike.envelope;
                }
            }
        }
        if best <= 0.0 {
            return 0.0;
        }

        let local_intensity = best * self.intensity;
        let osc1 = (time * config.spike_osc_speed1 + point_phase).sin();
        let osc2 = (time * config.spike_osc_speed2 + point_phase * 1.37).sin();
        let mix = oscillation_mix(osc1, osc2, config.spike_noise_amount);
        let height = lerp(
            config.spike_min_height,
            config.spike_max_height,
            local_intensity * config.spike_size_ratio,
        );
        height * mix * (0.5 + 0.5 * best_envelope)
    }
}

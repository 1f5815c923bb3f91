//! Screen-space portal push, active only in control mode.

use crate::camera::Camera;
use crate::config::SphereConfig;
use glam::{Mat4, Vec3};

/// Per-frame constants of the hollow field. Built once, evaluated per point.
#[derive(Clone, Copy, Debug)]
pub struct HollowFrame {
    view_projection: Mat4,
    aspect: f32,
    threshold: f32,
    push: f32,
}

impl HollowFrame {
    /// `None` when the field is switched off or too weak to matter.
    pub fn new(
        camera: &Camera,
        radius: f32,
        hollow_factor: f32,
        dialog_mode: bool,
        config: &SphereConfig,
    ) -> Option<Self> {
        if dialog_mode || hollow_factor <= 0.001 {
            return None;
        }
        let aspect = camera.aspect;
        let sphere_radius = camera.projected_radius_ndc(radius) * aspect;
        Some(Self {
            view_projection: camera.view_projection(),
            aspect,
            threshold: sphere_radius * config.hollow_screen_radius_factor,
            push: hollow_factor * config.hollow_max_push,
        })
    }

    /// Screen-space radius limit inside which points are pushed.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Outward push for a point at `world`, quadratic from the screen centre.
    pub fn offset(&self, world: Vec3) -> f32 {
        let ndc = self.view_projection.project_point3(world);
        let x = ndc.x * self.aspect;
        let r = (x * x + ndc.y * ndc.y).sqrt();
        if r < self.threshold {
            let t = 1.0 - r / self.threshold;
            self.push * t * t
        } else {
            0.0
        }
    }
}

//! The particle sphere: composes the three fields into the position buffer.

use crate::camera::Camera;
use crate::config::SphereConfig;
use crate::dialog::{DialogField, DialogPoint};
use crate::hollow::HollowFrame;
use crate::magnet::MagnetField;
use crate::points::PointField;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What the phase controller hands the sphere each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SphereInputs {
    pub enable_magnet: bool,
    pub hollow_factor: f32,
    pub dialog_mode: bool,
}

pub struct MagneticSphere {
    radius: f32,
    field: PointField,
    positions: Vec<Vec3>,
    pointer: Option<Vec2>,
    magnet: MagnetField,
    dialog: DialogField,
    rng: StdRng,
}

impl MagneticSphere {
    /// Radius and point budget are fixed here; later config edits to them are
    /// ignored until the sphere is rebuilt.
    pub fn new(config: &SphereConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let radius = config.sphere_radius;
        let field = PointField::generate(config.point_budget(), &mut rng);
        let positions = field.directions().iter().map(|d| *d * radius).collect();
        let magnet = MagnetField::new(config, &mut rng);
        let dialog = DialogField::new(config, &mut rng);
        log::info!(
            "[sphere] radius {:.1}, {} points, {} sub-spikes, {} dialog spikes",
            radius,
            field.len(),
            magnet.sub_spikes().len(),
            dialog.spikes().len()
        );
        Self {
            radius,
            field,
            positions,
            pointer: None,
            magnet,
            dialog,
            rng,
        }
    }

    pub fn base_radius(&self) -> f32 {
        self.radius
    }

    pub fn point_count(&self) -> usize {
        self.field.len()
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn magnet(&self) -> &MagnetField {
        &self.magnet
    }

    pub fn dialog(&self) -> &DialogField {
        &self.dialog
    }

    /// World-space point positions written by the last `update`.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Latest pointer snapshot in NDC. The magnet stays dormant until the
    /// first call.
    pub fn set_pointer_ndc(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    /// Advance the fields to `time` (seconds) and rewrite every position.
    pub fn update(
        &mut self,
        time: f32,
        inputs: SphereInputs,
        camera: &Camera,
        config: &SphereConfig,
    ) {
        if inputs.dialog_mode {
            self.magnet.release(config);
            self.dialog.maintain(time, config, &mut self.rng);
        } else {
            self.magnet.update(
                time,
                self.pointer,
                inputs.enable_magnet,
                camera,
                self.radius,
                config,
                &mut self.rng,
            );
        }

        self.write_positions(time, inputs, camera, config);
        self.dialog
            .finish_frame(inputs.hollow_factor, inputs.dialog_mode);
    }

    fn write_positions(
        &mut self,
        time: f32,
        inputs: SphereInputs,
        camera: &Camera,
        config: &SphereConfig,
    ) {
        let radius = self.radius;
        let hollow = HollowFrame::new(
            camera,
            radius,
            inputs.hollow_factor,
            inputs.dialog_mode,
            config,
        );
        let dialog_frame = inputs
            .dialog_mode
            .then(|| self.dialog.frame(inputs.hollow_factor, time));
        let magnet_spikes = if inputs.dialog_mode {
            Default::default()
        } else {
            self.magnet.frame_spikes(time)
        };

        let dirs = self.field.directions();
        let phases = self.field.phases();
        for ((out, &dir), &phase) in self.positions.iter_mut().zip(dirs).zip(phases) {
            let spike = match &dialog_frame {
                Some(frame) => match self.dialog.displace(frame, dir, phase, radius, time, config) {
                    DialogPoint::Anchored(pos) => {
                        *out = pos;
                        continue;
                    }
                    DialogPoint::Radial(offset) => offset,
                },
                None => self
                    .magnet
                    .displacement(dir, phase, &magnet_spikes, time, config),
            };
            let hollow_offset = hollow.as_ref().map_or(0.0, |h| h.offset(dir * radius));
            *out = dir * (radius + spike + hollow_offset);
        }
    }
}

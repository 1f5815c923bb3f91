//! Front-hemisphere point field on an equal-area golden spiral.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;
use std::f64::consts::PI;

/// Immutable unit directions plus one oscillation seed per direction.
#[derive(Clone, Debug, Default)]
pub struct PointField {
    directions: Vec<Vec3>,
    phases: Vec<f32>,
}

impl PointField {
    /// Walk `total` spiral candidates and keep those facing the viewer (z >= 0).
    ///
    /// Angles are computed in f64: the spiral azimuth grows past 10^6 radians
    /// for large budgets, where f32 loses the fractional turn.
    pub fn generate<R: Rng + ?Sized>(total: usize, rng: &mut R) -> Self {
        let mut directions = Vec::with_capacity(total / 2 + 1);
        let mut phases = Vec::with_capacity(total / 2 + 1);
        let n = total as f64;
        let golden = PI * (1.0 + 5.0_f64.sqrt());
        for i in 0..total {
            let k = i as f64 + 0.5;
            let phi = (1.0 - 2.0 * k / n).acos();
            let theta = golden * k;
            let z = phi.cos();
            if z < 0.0 {
                continue;
            }
            let x = theta.cos() * phi.sin();
            let y = theta.sin() * phi.sin();
            directions.push(Vec3::new(x as f32, y as f32, z as f32).normalize());
            phases.push(rng.gen::<f32>() * TAU);
        }
        log::debug!("[sphere] {} of {} spiral points kept", directions.len(), total);
        Self { directions, phases }
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    pub fn phases(&self) -> &[f32] {
        &self.phases
    }
}

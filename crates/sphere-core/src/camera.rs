//! Camera model used for silhouette projection, pointer unprojection and the
//! screen-space hollow test.
//!
//! These types avoid platform APIs; the web frontend builds one per frame from
//! the canvas aspect ratio.

use glam::{Mat4, Vec2, Vec3};

/// Simple right-handed camera with an OpenGL-style perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera on the +Z axis looking at the origin.
    pub fn looking_at_origin(distance: f32, aspect: f32, fovy_radians: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Same frustum with the [0, 1] depth range the GPU clips against.
    pub fn gpu_projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World position to normalized device coordinates.
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }

    /// Normalized device coordinates back to world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.view_projection().inverse().project_point3(ndc)
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Half-width of a centred sphere's silhouette in NDC, measured on the x axis.
    pub fn projected_radius_ndc(&self, radius: f32) -> f32 {
        self.project(Vec3::new(radius, 0.0, 0.0)).x.abs()
    }

    /// World-space ray from the eye through an NDC pointer position.
    pub fn pointer_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let through = self.unproject(ndc.extend(0.0));
        (self.eye, (through - self.eye).normalize_or_zero())
    }
}

/// Closest strictly positive hit distance of a ray against a sphere centred at
/// the origin. `dir` must be normalized.
#[inline]
pub fn ray_sphere(origin: Vec3, dir: Vec3, radius: f32) -> Option<f32> {
    let b = origin.dot(dir);
    let c = origin.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t > 0.0).then_some(t)
}

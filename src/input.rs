use glam::Vec2;

/// Latest pointer snapshot in normalized device coordinates.
///
/// `moved` stays false until the first pointer event so the magnet is not
/// aimed at the centre before the user has touched anything.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub ndc: Vec2,
    pub moved: bool,
}

impl PointerState {
    pub fn update(&mut self, ndc: Vec2) {
        self.ndc = ndc;
        self.moved = true;
    }

    /// Pointer the sphere should follow this frame: a controller-driven
    /// virtual pointer wins, otherwise the real one once it has moved.
    pub fn effective(&self, virtual_pointer: Option<Vec2>) -> Option<Vec2> {
        virtual_pointer.or(self.moved.then_some(self.ndc))
    }
}

/// Client-space pointer position to NDC: x right, y up, both in [-1, 1].
///
/// Degenerate rectangles map to the centre.
#[inline]
pub fn client_to_ndc(client_x: f32, client_y: f32, left: f32, top: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let u = (client_x - left) / width;
    let v = (client_y - top) / height;
    Vec2::new(u * 2.0 - 1.0, 1.0 - v * 2.0)
}

/// Canvas aspect ratio, never zero.
#[inline]
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

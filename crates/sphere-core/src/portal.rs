//! Portal image shown through the hollow.
//!
//! A prompt opens it to full size while its hollow is held; a dialog shows it
//! at half size, scaled by the dialog intensity. The scale eases once per
//! frame and the image hides once it has shrunk away.

use crate::constants::{PORTAL_DIALOG_SCALE, PORTAL_EASING, PORTAL_HIDE_BELOW};
use crate::phase::{Phase, PhaseOutput};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PortalImage {
    scale: f32,
    visible: bool,
}

impl PortalImage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn update(&mut self, out: &PhaseOutput) {
        let target = if out.dialog_mode {
            self.visible = true;
            out.hollow_factor.clamp(0.0, 1.0) * PORTAL_DIALOG_SCALE
        } else if out.phase == Phase::Hollow {
            self.visible = true;
            1.0
        } else {
            0.0
        };
        self.scale += (target - self.scale) * PORTAL_EASING;

        let closing = if out.dialog_mode {
            out.hollow_factor < PORTAL_HIDE_BELOW
        } else {
            out.phase != Phase::Hollow
        };
        if closing && self.scale < PORTAL_HIDE_BELOW {
            self.visible = false;
        }
    }
}

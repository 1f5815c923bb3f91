// Two page themes; each sets a body class plus the renderer's clear and dot colours.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Gray,
    White,
}

pub const THEME_CLASSES: [&str; 2] = ["theme-gray", "theme-white"];

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Gray => Theme::White,
            Theme::White => Theme::Gray,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Gray => "gray",
            Theme::White => "white",
        }
    }

    pub fn body_class(self) -> &'static str {
        match self {
            Theme::Gray => THEME_CLASSES[0],
            Theme::White => THEME_CLASSES[1],
        }
    }

    pub fn background_hex(self) -> u32 {
        match self {
            Theme::Gray => 0x393b3d,
            Theme::White => 0xffffff,
        }
    }

    pub fn dots_hex(self) -> u32 {
        match self {
            Theme::Gray => 0xced3d6,
            Theme::White => 0x444444,
        }
    }

    pub fn background(self) -> [f32; 3] {
        hex_rgb(self.background_hex())
    }

    pub fn dots(self) -> [f32; 3] {
        hex_rgb(self.dots_hex())
    }
}

/// `0xRRGGBB` to RGB channels in [0, 1].
#[inline]
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

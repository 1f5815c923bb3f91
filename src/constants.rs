// Page layout, camera and chat defaults for the web front end.
//
// Field tuning lives in `sphere_core::SphereConfig`; only values the
// live panel never edits belong here.
// Camera
pub const CAMERA_Z: f32 = 260.0;
pub const CAMERA_FOV_DEG: f32 = 45.0;

// Seed for the sphere's point phases and spike pools
pub const SPHERE_SEED: u64 = 0x5eed_5fe4;

// Element ids bound by the front end
pub const CANVAS_ID: &str = "app-canvas";
pub const CENTER_OVERLAY_ID: &str = "center-overlay";
pub const CENTER_LABEL_ID: &str = "center-label";
pub const DIALOG_TEXT_ID: &str = "dialog-text";
pub const PORTAL_ID: &str = "portal";
pub const PORTAL_IMAGE_ID: &str = "portal-image";
pub const CONTROL_BAR_ID: &str = "control-bar";
pub const PROMPT_BAR_ID: &str = "prompt-bar";
pub const PROMPT_INNER_ID: &str = "prompt-bar-inner";
pub const PROMPT_LOADING_ID: &str = "prompt-bar-loading";
pub const PROMPT_FILL_ID: &str = "prompt-loading-fill";
pub const PROMPT_INPUT_ID: &str = "prompt-text-input";
pub const PROMPT_SEND_ID: &str = "prompt-send-button";
pub const PANEL_ID: &str = "control-panel";

// Control bar buttons: (element id, prompt label)
pub const CONTROL_BUTTONS: [(&str, &str); 3] = [
    ("btn-me", "me"),
    ("btn-work", "my work"),
    ("btn-cv", "classic cv"),
];

// CSS class toggled to hide bars and the panel
pub const HIDDEN_CLASS: &str = "hidden";

// Loading bar: time the full bar stays visible before swapping back (ms)
pub const LOADING_COMPLETE_HOLD_MS: f64 = 180.0;

// Chat proxy
pub const CHAT_ENDPOINT: &str = "/api/chat";
pub const CHAT_MODEL: &str = "gpt-4o-mini";
pub const CHAT_WARMUP: bool = false;
pub const PERSONA_NAME: &str = "Virtual Me";

// Point sprite opacity
pub const POINT_ALPHA: f32 = 0.95;

// Fixed tuning that is not exposed to the live control panel.

// Dialog refill: width of the smoothstep front revealing centre points (radians of progress)
pub const DIALOG_REFILL_FEATHER: f32 = 0.10;
// Dialog refill: fraction of refill progress over which ring spikes fade out
pub const DIALOG_SPIKE_FADE_PORTION: f32 = 0.18;

// Hollow factor below which an animation counts as finished
pub const HOLLOW_SETTLE_EPSILON: f32 = 0.01;

// Hollow phase: target drops to zero after this share of the hollow duration
pub const HOLLOW_RELEASE_FRACTION: f64 = 0.6;
pub const HOLLOW_HARD_STOP_FRACTION: f64 = 1.4;

// Reading time floors for dialog cues (ms)
pub const DIALOG_MIN_READING_MS: f32 = 3000.0;
pub const DIALOG_FALLBACK_MIN_MS: f32 = 3500.0;

pub const DIALOG_FALLBACK_SENTENCE: &str =
    "my thoughts got lost on the way here, could you ask me that again?";
pub const DIALOG_EMPTY_REPLY: &str = "...";

// Portal image: per-frame easing of its scale, and its size in dialog mode
pub const PORTAL_EASING: f32 = 0.12;
pub const PORTAL_DIALOG_SCALE: f32 = 0.5;
// Scale (and dialog hollow factor) below which the portal is hidden
pub const PORTAL_HIDE_BELOW: f32 = 0.01;

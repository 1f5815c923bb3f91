//! Designer knobs read by every field evaluator and by the phase controller.
//!
//! The struct is deliberately unvalidated: out-of-range values are accepted
//! and simply produce degenerate visuals. A live control panel edits it by
//! name through [`SphereConfig::set`], driven by [`PARAM_SECTIONS`].

/// Range metadata for one live-editable parameter.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

/// A titled group of parameters shown together in the control panel.
#[derive(Clone, Copy, Debug)]
pub struct ParamSection {
    pub title: &'static str,
    pub params: &'static [ParamSpec],
}

macro_rules! sphere_config {
    ($($field:ident: $default:expr),* $(,)?) => {
        #[derive(Clone, Debug, PartialEq)]
        pub struct SphereConfig {
            $(pub $field: f32,)*
        }

        impl Default for SphereConfig {
            fn default() -> Self {
                Self { $($field: $default,)* }
            }
        }

        impl SphereConfig {
            /// Every parameter name accepted by `get`/`set`.
            pub const KEYS: &'static [&'static str] = &[$(stringify!($field),)*];

            pub fn get(&self, key: &str) -> Option<f32> {
                match key {
                    $(stringify!($field) => Some(self.$field),)*
                    _ => None,
                }
            }

            /// Overwrite one parameter in place. Returns false for unknown keys.
            pub fn set(&mut self, key: &str, value: f32) -> bool {
                match key {
                    $(stringify!($field) => {
                        self.$field = value;
                        true
                    })*
                    _ => false,
                }
            }
        }
    };
}

sphere_config! {
    // sphere
    sphere_radius: 60.0,
    total_points: 200_000.0,
    point_size: 0.6,

    // magnet area
    area_cone_angle: 0.9,
    num_sub_spikes: 6.0,
    sub_spike_cone_angle: 0.28,
    spike_local_power: 2.8,
    spike_min_height: 4.0,
    spike_max_height: 102.0,
    spike_size_ratio: 1.1,
    spike_osc_speed1: 0.5,
    spike_osc_speed2: 0.2,
    spike_noise_amount: 0.7,
    spike_max_intensity: 1.0,
    spike_easing: 0.03,
    spike_decay: 0.096,
    magnet_follow_easing: 0.12,
    magnet_extra_radius_factor: 1.8,

    // hollow / portal
    hollow_max_push: 260.0,
    hollow_easing: 0.08,
    hollow_duration_ms: 10_500.0,
    hollow_screen_radius_factor: 1.2,
    prompt_transition_duration_ms: 700.0,

    // dialog envelope and ambient spikes
    dialog_seconds_per_char: 0.08,
    dialog_in_duration_ms: 900.0,
    dialog_out_duration_ms: 900.0,
    dialog_min_hold_ms: 2000.0,
    dialog_num_spikes: 32.0,
    dialog_cone_angle: 0.35,
    dialog_local_power: 2.2,
    dialog_spike_min_height: 3.0,
    dialog_spike_max_height: 28.0,
    dialog_wave_speed1: 0.45,
    dialog_wave_speed2: 0.18,
    dialog_noise_amount: 0.7,
    dialog_ring_inner_angle: 0.10,
    dialog_ring_outer_angle: 0.60,
}

impl SphereConfig {
    /// Number of spiral candidates; the hemisphere cull keeps about half.
    pub fn point_budget(&self) -> usize {
        if self.total_points.is_finite() && self.total_points > 0.0 {
            self.total_points as usize
        } else {
            0
        }
    }

    pub fn sub_spike_count(&self) -> usize {
        self.num_sub_spikes.max(0.0) as usize
    }

    /// Ambient pool size; always at least one spike.
    pub fn dialog_spike_count(&self) -> usize {
        (self.dialog_num_spikes.floor().max(1.0)) as usize
    }

    /// Shortest envelope a dialog may use: fade-in + minimum hold + fade-out.
    pub fn dialog_min_total_ms(&self) -> f32 {
        self.dialog_in_duration_ms + self.dialog_min_hold_ms + self.dialog_out_duration_ms
    }
}

const fn param(key: &'static str, label: &'static str, min: f32, max: f32, step: f32) -> ParamSpec {
    ParamSpec {
        key,
        label,
        min,
        max,
        step,
    }
}

pub static PARAM_SECTIONS: &[ParamSection] = &[
    ParamSection {
        title: "Spikes",
        params: &[
            param("spike_max_height", "Spike max height", 10.0, 200.0, 1.0),
            param("spike_min_height", "Spike min height", 0.0, 50.0, 1.0),
            param("spike_easing", "Spike easing", 0.05, 1.5, 0.05),
            param("spike_decay", "Spike decay", 0.8, 1.0, 0.005),
            param("magnet_follow_easing", "Magnet drag", 0.01, 0.5, 0.01),
            param("spike_noise_amount", "Noise amount", 0.0, 1.0, 0.05),
        ],
    },
    ParamSection {
        title: "Field & Area",
        params: &[
            param("magnet_extra_radius_factor", "Activation radius", 0.1, 2.5, 0.05),
            param("area_cone_angle", "Area cone angle", 0.2, 1.4, 0.05),
            param("sub_spike_cone_angle", "Spike cone angle", 0.05, 0.7, 0.02),
        ],
    },
    ParamSection {
        title: "Hollow / Portal",
        params: &[
            param("hollow_max_push", "Hollow push", 50.0, 500.0, 10.0),
            param("hollow_easing", "Hollow easing", 0.02, 0.3, 0.01),
            param("hollow_screen_radius_factor", "Hollow radius", 0.2, 0.9, 0.05),
            param("prompt_transition_duration_ms", "Center sweep (ms)", 100.0, 2000.0, 50.0),
        ],
    },
    ParamSection {
        title: "Dialog / Static Spikes",
        params: &[
            param("dialog_seconds_per_char", "Seconds per char", 0.02, 0.3, 0.01),
            param("dialog_in_duration_ms", "Dialog fade-in (ms)", 100.0, 5000.0, 50.0),
            param("dialog_out_duration_ms", "Dialog fade-out (ms)", 100.0, 5000.0, 50.0),
            param("dialog_min_hold_ms", "Dialog min hold (ms)", 500.0, 10_000.0, 100.0),
            param("dialog_num_spikes", "Dialog spikes count", 4.0, 64.0, 1.0),
            param("dialog_cone_angle", "Dialog cone angle", 0.05, 1.2, 0.05),
            param("dialog_local_power", "Dialog local power", 1.0, 4.0, 0.1),
            param("dialog_spike_min_height", "Static spike min", 0.0, 30.0, 1.0),
            param("dialog_spike_max_height", "Static spike max", 5.0, 80.0, 1.0),
            param("dialog_wave_speed1", "Wave speed 1", 0.05, 2.0, 0.05),
            param("dialog_wave_speed2", "Wave speed 2", 0.05, 2.0, 0.05),
            param("dialog_noise_amount", "Dialog noise", 0.0, 1.0, 0.05),
            param("dialog_ring_inner_angle", "Ring inner angle", 0.0, 1.0, 0.01),
            param("dialog_ring_outer_angle", "Ring outer angle", 0.1, 1.5, 0.01),
        ],
    },
];

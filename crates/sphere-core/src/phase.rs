//! Prompt/dialog timing controller.
//!
//! The controller owns its own clock, advanced by `update(dt)`, so triggers
//! and envelopes are measured in the same frame-coherent time base. Control
//! mode (`Idle -> Transition -> Hollow -> Idle`) and dialog mode are variants
//! of one enum: a dialog suspends the control machine entirely and hands back
//! to `Idle` when its envelope has played out.

use crate::config::SphereConfig;
use crate::constants::{HOLLOW_HARD_STOP_FRACTION, HOLLOW_RELEASE_FRACTION, HOLLOW_SETTLE_EPSILON};
use crate::math::ease_in_out_quad;
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transition,
    Hollow,
}

/// Per-call overrides for one prompt occurrence. `None` uses the config.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PromptOptions {
    pub transition_duration_ms: Option<f32>,
    pub hollow_duration_ms: Option<f32>,
    pub hollow_easing: Option<f32>,
}

/// Everything dependents may observe about the controller for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseOutput {
    pub hollow_factor: f32,
    pub phase: Phase,
    pub virtual_pointer: Option<Vec2>,
    pub dialog_mode: bool,
}

impl PhaseOutput {
    /// The local magnet follows the pointer while idle or sweeping to centre.
    pub fn magnet_enabled(&self) -> bool {
        !self.dialog_mode && matches!(self.phase, Phase::Idle | Phase::Transition)
    }

    /// True while a prompt or dialog is still playing.
    pub fn is_animating(&self) -> bool {
        self.dialog_mode || self.phase != Phase::Idle
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PromptTiming {
    transition_ms: f32,
    hollow_ms: f32,
    easing: f32,
}

impl PromptTiming {
    fn resolve(opts: &PromptOptions, config: &SphereConfig) -> Self {
        Self {
            transition_ms: opts
                .transition_duration_ms
                .map_or(config.prompt_transition_duration_ms, |v| v.max(0.0)),
            hollow_ms: opts
                .hollow_duration_ms
                .map_or(config.hollow_duration_ms, |v| v.max(0.0)),
            easing: opts
                .hollow_easing
                .map_or(config.hollow_easing, |v| v.clamp(0.0, 1.0)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ControlPhase {
    Idle,
    Transition { started_ms: f64, from: Vec2 },
    Hollow { started_ms: f64 },
}

/// Four-segment dialog envelope: fade-in, hold, fade-out, then zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialogEnvelope {
    in_ms: f32,
    out_ms: f32,
    total_ms: f32,
}

impl DialogEnvelope {
    /// Requested durations shorter than in + min hold + out are stretched.
    pub fn new(duration_ms: f32, config: &SphereConfig) -> Self {
        Self {
            in_ms: config.dialog_in_duration_ms,
            out_ms: config.dialog_out_duration_ms,
            total_ms: duration_ms.max(config.dialog_min_total_ms()),
        }
    }

    pub fn total_ms(&self) -> f32 {
        self.total_ms
    }

    pub fn hold_end_ms(&self) -> f32 {
        self.total_ms - self.out_ms
    }

    /// Target intensity `elapsed_ms` after the dialog started.
    pub fn intensity(&self, elapsed_ms: f32) -> f32 {
        let hold_end = self.hold_end_ms();
        if elapsed_ms <= 0.0 {
            0.0
        } else if elapsed_ms < self.in_ms {
            ease_in_out_quad(elapsed_ms / self.in_ms)
        } else if elapsed_ms < hold_end {
            1.0
        } else if elapsed_ms < self.total_ms {
            1.0 - ease_in_out_quad((elapsed_ms - hold_end) / self.out_ms)
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Control {
        phase: ControlPhase,
        timing: Option<PromptTiming>,
    },
    Dialog {
        started_ms: f64,
        envelope: DialogEnvelope,
    },
}

#[derive(Clone, Debug)]
pub struct PhaseController {
    clock_ms: f64,
    mode: Mode,
    hollow_factor: f32,
    hollow_target: f32,
    virtual_pointer: Vec2,
    label: Option<String>,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseController {
    pub fn new() -> Self {
        Self {
            clock_ms: 0.0,
            mode: Mode::Control {
                phase: ControlPhase::Idle,
                timing: None,
            },
            hollow_factor: 0.0,
            hollow_target: 0.0,
            virtual_pointer: Vec2::ZERO,
            label: None,
        }
    }

    /// Controller time in milliseconds, advanced only by `update`.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Label of the prompt currently playing. A dialog or an idle controller
    /// shows none.
    pub fn center_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Start a portal: sweep the virtual pointer from `pointer` to the centre,
    /// then open the hollow. Any running prompt or dialog is discarded.
    pub fn trigger_prompt(
        &mut self,
        label: &str,
        pointer: Vec2,
        opts: PromptOptions,
        config: &SphereConfig,
    ) {
        log::info!("[phase] prompt '{}' from ({:.2},{:.2})", label, pointer.x, pointer.y);
        self.virtual_pointer = pointer;
        self.hollow_target = 0.0;
        self.label = Some(label.to_string());
        self.mode = Mode::Control {
            phase: ControlPhase::Transition {
                started_ms: self.clock_ms,
                from: pointer,
            },
            timing: Some(PromptTiming::resolve(&opts, config)),
        };
    }

    /// Start a dialog envelope lasting at least `duration_ms`.
    pub fn trigger_dialog(&mut self, text: &str, duration_ms: f32, config: &SphereConfig) {
        let envelope = DialogEnvelope::new(duration_ms, config);
        log::info!(
            "[phase] dialog {} chars, envelope {:.0} ms",
            text.chars().count(),
            envelope.total_ms()
        );
        self.mode = Mode::Dialog {
            started_ms: self.clock_ms,
            envelope,
        };
        self.hollow_factor = 0.0;
        self.hollow_target = 0.0;
        self.label = None;
    }

    pub fn update(&mut self, dt: Duration, config: &SphereConfig) -> PhaseOutput {
        self.clock_ms += dt.as_secs_f64() * 1000.0;
        let now = self.clock_ms;

        match self.mode {
            Mode::Dialog {
                started_ms,
                envelope,
            } => {
                let elapsed = (now - started_ms) as f32;
                self.hollow_target = envelope.intensity(elapsed);
                self.ease(config.hollow_easing);
                if elapsed > envelope.total_ms() && self.hollow_factor < HOLLOW_SETTLE_EPSILON {
                    self.settle_idle();
                    return self.output(Phase::Idle, false);
                }
                self.output(Phase::Hollow, true)
            }
            Mode::Control { phase, timing } => {
                let timing = timing.unwrap_or_else(|| PromptTiming::resolve(&PromptOptions::default(), config));
                let phase = self.step_control(phase, timing, now);
                self.ease(timing.easing);

                if phase == ControlPhase::Idle {
                    return self.output(Phase::Idle, false);
                }
                if matches!(phase, ControlPhase::Hollow { .. })
                    && self.hollow_target == 0.0
                    && self.hollow_factor < HOLLOW_SETTLE_EPSILON
                {
                    self.settle_idle();
                    return self.output(Phase::Idle, false);
                }
                self.mode = Mode::Control {
                    phase,
                    timing: Some(timing),
                };
                match phase {
                    ControlPhase::Transition { .. } => self.output(Phase::Transition, false),
                    _ => self.output(Phase::Hollow, false),
                }
            }
        }
    }

    fn step_control(&mut self, phase: ControlPhase, timing: PromptTiming, now: f64) -> ControlPhase {
        match phase {
            ControlPhase::Idle => ControlPhase::Idle,
            ControlPhase::Transition { started_ms, from } => {
                let t = if timing.transition_ms > 0.0 {
                    (((now - started_ms) / timing.transition_ms as f64).min(1.0)) as f32
                } else {
                    1.0
                };
                self.virtual_pointer = from * (1.0 - t);
                if t >= 1.0 {
                    log::debug!("[phase] transition -> hollow");
                    self.hollow_target = 1.0;
                    self.step_control(ControlPhase::Hollow { started_ms: now }, timing, now)
                } else {
                    phase
                }
            }
            ControlPhase::Hollow { started_ms } => {
                let elapsed = now - started_ms;
                let hollow_ms = timing.hollow_ms as f64;
                if elapsed > hollow_ms * HOLLOW_RELEASE_FRACTION {
                    self.hollow_target = 0.0;
                }
                if elapsed > hollow_ms * HOLLOW_HARD_STOP_FRACTION {
                    self.hollow_target = 0.0;
                }
                phase
            }
        }
    }

    fn ease(&mut self, easing: f32) {
        self.hollow_factor += (self.hollow_target - self.hollow_factor) * easing;
    }

    fn settle_idle(&mut self) {
        log::debug!("[phase] settled to idle");
        self.mode = Mode::Control {
            phase: ControlPhase::Idle,
            timing: None,
        };
        self.hollow_factor = 0.0;
        self.hollow_target = 0.0;
        self.label = None;
    }

    fn output(&self, phase: Phase, dialog_mode: bool) -> PhaseOutput {
        PhaseOutput {
            hollow_factor: self.hollow_factor,
            phase,
            virtual_pointer: (phase == Phase::Transition).then_some(self.virtual_pointer),
            dialog_mode,
        }
    }
}

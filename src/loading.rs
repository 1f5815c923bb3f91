// Fake progress for the prompt bar while a chat request is in flight.
// Fast linear start, then an asymptotic crawl that never reaches the end
// on its own; completion is forced when the response arrives.

pub const LINEAR_PHASE_SEC: f64 = 1.2;
pub const LINEAR_PHASE_PCT: f64 = 60.0;
pub const CRAWL_SPAN_PCT: f64 = 22.0;
pub const CRAWL_RATE: f64 = 0.9;

/// Target percentage `t_sec` seconds after the request started.
#[inline]
pub fn progress_target(t_sec: f64) -> f64 {
    if t_sec <= 0.0 {
        0.0
    } else if t_sec < LINEAR_PHASE_SEC {
        t_sec / LINEAR_PHASE_SEC * LINEAR_PHASE_PCT
    } else {
        let tt = t_sec - LINEAR_PHASE_SEC;
        LINEAR_PHASE_PCT + CRAWL_SPAN_PCT * (1.0 - (-tt * CRAWL_RATE).exp())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LoadingState {
    #[default]
    Idle,
    Running { started_ms: f64, progress: f64 },
    Completing { since_ms: f64 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoadingBar {
    pub state: LoadingState,
}

impl LoadingBar {
    pub fn start(&mut self, now_ms: f64) {
        self.state = LoadingState::Running {
            started_ms: now_ms,
            progress: 0.0,
        };
    }

    pub fn complete(&mut self, now_ms: f64) {
        self.state = LoadingState::Completing { since_ms: now_ms };
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.state, LoadingState::Idle)
    }

    /// Advance and return the fill percentage to show, or `None` once the
    /// completed bar has been held for `hold_ms` and should be swapped out.
    pub fn tick(&mut self, now_ms: f64, hold_ms: f64) -> Option<f64> {
        match self.state {
            LoadingState::Idle => None,
            LoadingState::Running {
                started_ms,
                progress,
            } => {
                let target = progress_target((now_ms - started_ms) / 1000.0);
                let progress = progress.max(target).clamp(0.0, 100.0);
                self.state = LoadingState::Running {
                    started_ms,
                    progress,
                };
                Some(progress)
            }
            LoadingState::Completing { since_ms } => {
                if now_ms - since_ms >= hold_ms {
                    self.state = LoadingState::Idle;
                    None
                } else {
                    Some(100.0)
                }
            }
        }
    }
}

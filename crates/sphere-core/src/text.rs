//! Frame-ticked typewriter for dialog sentences.
//!
//! Each sentence is typed one character at a time, lingers, is deleted in
//! chunks, then the next one starts. All timing is driven by `tick(now_ms)`
//! from the frame loop; a generation counter marks which run is current so a
//! restart or stop leaves nothing scheduled behind.

pub const CURSOR: char = '▍';

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypingOptions {
    pub type_delay_ms: f64,
    pub pre_delete_ms: f64,
    pub delete_delay_ms: f64,
    pub delete_chunk: usize,
    pub cursor_blink_ms: f64,
}

impl Default for TypingOptions {
    fn default() -> Self {
        Self {
            type_delay_ms: 22.0,
            pre_delete_ms: 450.0,
            delete_delay_ms: 1.0,
            delete_chunk: 12,
            cursor_blink_ms: 420.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Typing { sentence: usize, char_idx: usize },
    Lingering { sentence: usize },
    Deleting { sentence: usize },
}

#[derive(Clone, Debug, Default)]
pub struct TextAnimator {
    opts: TypingOptions,
    generation: u64,
    sentences: Vec<Vec<char>>,
    current: String,
    step: Option<Step>,
    next_step_ms: f64,
    next_blink_ms: f64,
    cursor_on: bool,
}

impl TextAnimator {
    pub fn new(opts: TypingOptions) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    /// Identifies the current run; bumped by every `start` and `stop`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.step.is_some()
    }

    /// Replace whatever is animating with `sentences`. Blank entries are
    /// skipped. Returns the new generation.
    pub fn start<S: AsRef<str>>(&mut self, sentences: &[S], now_ms: f64) -> u64 {
        self.generation += 1;
        self.sentences = sentences
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.chars().collect())
            .collect();
        self.current.clear();
        self.cursor_on = true;
        self.next_step_ms = now_ms;
        self.next_blink_ms = now_ms + self.opts.cursor_blink_ms;
        self.step = (!self.sentences.is_empty()).then_some(Step::Typing {
            sentence: 0,
            char_idx: 0,
        });
        self.generation
    }

    pub fn stop(&mut self) {
        self.generation += 1;
        self.step = None;
        self.sentences.clear();
        self.current.clear();
        self.cursor_on = true;
    }

    /// Run every step that has come due by `now_ms`. Returns true when the
    /// visible text changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.step.is_none() {
            return false;
        }
        let mut changed = false;
        while let Some(step) = self.step {
            if now_ms < self.next_step_ms {
                break;
            }
            self.advance(step);
            changed = true;
        }
        if self.step.is_some() && self.opts.cursor_blink_ms > 0.0 {
            while now_ms >= self.next_blink_ms {
                self.cursor_on = !self.cursor_on;
                self.next_blink_ms += self.opts.cursor_blink_ms;
                changed = true;
            }
        }
        changed
    }

    fn advance(&mut self, step: Step) {
        match step {
            Step::Typing { sentence, char_idx } => {
                let chars = &self.sentences[sentence];
                self.current.push(chars[char_idx]);
                self.next_step_ms += self.opts.type_delay_ms;
                self.step = Some(if char_idx + 1 < chars.len() {
                    Step::Typing {
                        sentence,
                        char_idx: char_idx + 1,
                    }
                } else {
                    Step::Lingering { sentence }
                });
            }
            Step::Lingering { sentence } => {
                self.next_step_ms += self.opts.pre_delete_ms;
                self.step = Some(Step::Deleting { sentence });
            }
            Step::Deleting { sentence } => {
                let keep = self
                    .current
                    .chars()
                    .count()
                    .saturating_sub(self.opts.delete_chunk.max(1));
                self.current = self.current.chars().take(keep).collect();
                self.next_step_ms += self.opts.delete_delay_ms;
                if self.current.is_empty() {
                    self.step = (sentence + 1 < self.sentences.len()).then_some(Step::Typing {
                        sentence: sentence + 1,
                        char_idx: 0,
                    });
                    if self.step.is_none() {
                        self.sentences.clear();
                    }
                }
            }
        }
    }

    /// Visible text, with the cursor appended while a run is blinking.
    pub fn display(&self) -> String {
        if self.step.is_some() && self.cursor_on {
            format!("{}{}", self.current, CURSOR)
        } else {
            self.current.clone()
        }
    }
}

//! Simulated loading progress.
//!
//! Self-contained: advances by a random step on a fixed interval, clamps at
//! 100%, holds briefly, then reports itself done. Nothing external cancels
//! it. Randomness is injected so tests can drive it with a seeded RNG.

use rand::Rng;

use crate::constants::{LOADING_HOLD_SEC, LOADING_STEP_INTERVAL_SEC, LOADING_STEP_MAX};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Loading,
    Holding,
    Done,
}

pub struct LoadingProgress {
    progress: f32,
    phase: Phase,
    step_accum: f32,
    hold_accum: f32,
}

impl Default for LoadingProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingProgress {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            phase: Phase::Loading,
            step_accum: 0.0,
            hold_accum: 0.0,
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        match self.phase {
            Phase::Loading => {
                self.step_accum += dt;
                while self.step_accum >= LOADING_STEP_INTERVAL_SEC {
                    self.step_accum -= LOADING_STEP_INTERVAL_SEC;
                    self.progress += rng.gen_range(0.0..LOADING_STEP_MAX);
                    if self.progress >= 100.0 {
                        self.progress = 100.0;
                        self.phase = Phase::Holding;
                        break;
                    }
                }
            }
            Phase::Holding => {
                self.hold_accum += dt;
                if self.hold_accum >= LOADING_HOLD_SEC {
                    self.phase = Phase::Done;
                }
            }
            Phase::Done => {}
        }
    }

    /// Percent complete in [0, 100].
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// True once the post-completion hold has elapsed; the screen hides
    /// itself at this point.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }
}

//! Spin step scheduling for the slot grid animation.
//!
//! A [`Spinner`] is a pure stepping state machine: the host owns the clock,
//! polls [`Spinner::interval`] for the delay before the next step and calls
//! [`Spinner::step`] when it elapses. There are no timers or callbacks in
//! here, so tearing the animation down is simply dropping the value - no
//! pending tick can fire against stale state.

use crate::constants::{
    BATCH_REST_SLOT, BATCH_STEP_BUDGET, BATCH_STEP_MS, DECEL_FACTOR, DECEL_WINDOW, INITIAL_STEP_MS,
    LOOP_COUNT,
};
use std::time::Duration;

/// Result of advancing the spinner by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinStep {
    /// Visible slot index after this step.
    pub index: usize,
    /// True when this was the terminal step.
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct Spinner {
    slot_count: usize,
    remaining: u32,
    target: usize,
    interval: Duration,
    decelerate: bool,
}

impl Spinner {
    /// Plans a single-draw spin from `current` to `target`.
    ///
    /// The step budget is at least `LOOP_COUNT` full rotations plus whatever
    /// is needed to land exactly on the target, so the reel always visibly
    /// spins before stopping.
    pub fn single(current: usize, target: usize, slot_count: usize) -> Self {
        debug_assert!(slot_count > 0 && target < slot_count && current < slot_count);
        let steps_needed = (target + slot_count - current) % slot_count;
        Self {
            slot_count,
            remaining: (slot_count * LOOP_COUNT + steps_needed) as u32,
            target,
            interval: Duration::from_millis(INITIAL_STEP_MS),
            decelerate: true,
        }
    }

    /// Plans a batch spin: short, constant speed, lands on a decorative slot.
    /// The batch result is revealed as a grid, not by the landing index.
    pub fn batch(slot_count: usize) -> Self {
        debug_assert!(slot_count > 0);
        Self {
            slot_count,
            remaining: BATCH_STEP_BUDGET,
            target: BATCH_REST_SLOT % slot_count,
            interval: Duration::from_millis(BATCH_STEP_MS),
            decelerate: false,
        }
    }

    /// Delay the host should wait before the next [`step`](Self::step) call.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advances the visible index by one slot and decrements the budget.
    ///
    /// Once the remaining budget drops inside the deceleration window the
    /// interval grows geometrically, which reads as the reel slowing down.
    /// Must not be called after the terminal step.
    pub fn step(&mut self, current: usize) -> SpinStep {
        debug_assert!(self.remaining > 0, "stepped a finished spinner");
        self.remaining -= 1;

        if self.remaining == 0 {
            // The terminal step parks exactly on the planned slot. For single
            // spins the step budget already walks there; for batch spins this
            // is what moves the reel to its rest slot.
            return SpinStep {
                index: self.target,
                finished: true,
            };
        }

        let index = (current + 1) % self.slot_count;

        if self.decelerate && self.remaining < DECEL_WINDOW {
            self.interval = self.interval.mul_f64(DECEL_FACTOR);
        }

        SpinStep {
            index,
            finished: false,
        }
    }
}

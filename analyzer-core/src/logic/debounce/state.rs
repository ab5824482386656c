//! Debounce State Machine
//!
//! ```text
//!            raw violation (acc += dt)
//!          ┌───────────────────────────┐
//!          ▼                           │
//!   ┌─────────┐  raw violation  ┌──────────────────────┐
//!   │ Normal  │ ──────────────► │ Accumulating { acc } │
//!   └─────────┘ ◄────────────── └──────────────────────┘
//!                 clean sample
//! ```
//!
//! A step is confirmed while `acc >= threshold`. Once crossed, `acc` can only
//! grow until a clean sample resets it, so the rest of the streak stays
//! confirmed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DebounceState {
    #[default]
    Normal,
    Accumulating {
        /// Seconds of uninterrupted raw violation so far
        elapsed: f64,
    },
}

impl DebounceState {
    /// Pure transition: `(state, raw_violation, dt) -> (state, confirmed)`
    ///
    /// `dt` is the time since the previous sample; the timestamp policy has
    /// already been applied by the caller.
    pub fn step(self, raw_violation: bool, dt: f64, threshold: f64) -> (DebounceState, bool) {
        if !raw_violation {
            return (DebounceState::Normal, false);
        }

        let elapsed = self.accumulated() + dt;
        (DebounceState::Accumulating { elapsed }, elapsed >= threshold)
    }

    pub fn accumulated(&self) -> f64 {
        match self {
            DebounceState::Normal => 0.0,
            DebounceState::Accumulating { elapsed } => *elapsed,
        }
    }
}

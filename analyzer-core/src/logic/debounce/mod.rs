//! Debounce Module
//!
//! Separates momentary envelope excursions from sustained violations.
//!
//! ## Structure
//! - `state`: [`DebounceState`] and its pure `step` transition
//! - `engine`: run-level pass producing [`RunEvaluation`]
//!
//! ## Usage
//! ```ignore
//! use boat_analyzer_core::logic::debounce::evaluate;
//!
//! let eval = evaluate(&samples, ambient_temp, &EnvelopeConfig::default())?;
//! match eval.verdict {
//!     RunVerdict::Pass => qualify(),
//!     RunVerdict::Disqualified { first_violation_time, .. } => flag(first_violation_time),
//! }
//! ```

pub mod state;
pub mod engine;

pub use state::DebounceState;
pub use engine::{evaluate, AnnotatedSample, RunEvaluation, RunStats, RunVerdict};

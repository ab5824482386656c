//! Boat Analyzer Core
//!
//! Turns a race vessel's telemetry log into a qualification verdict.
//!
//! ```text
//! raw CSV ──► RawTable ──► RowOutcome (Valid | Dropped)
//!                              │
//!                              ▼
//!                     EnvelopeFlags per sample
//!                              │
//!                              ▼
//!              DebounceState (Normal ⇄ Accumulating)
//!                              │
//!                              ▼
//!             AnnotatedSample + RunVerdict (PASS | DISQUALIFIED)
//! ```
//!
//! The engine is a pure function of the samples and an [`EnvelopeConfig`];
//! nothing in this crate holds global state.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{AnalyzerError, AnalyzerResult, SchemaError};
pub use logic::analysis::{analyze, analyze_csv, Analysis};
pub use logic::dataset::{ColumnSchema, RawTable, RowOutcome, Sample};
pub use logic::debounce::{evaluate, AnnotatedSample, RunEvaluation, RunStats, RunVerdict};
pub use logic::envelope::{EnvelopeConfig, QualificationPolicy, TimestampPolicy};
pub use logic::run::RunMetadata;

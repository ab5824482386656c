//! Envelope Module
//!
//! Per-sample operating envelope: is the engine under load, and is every
//! monitored quantity inside its acceptable range?
//!
//! ## Structure
//! - `config`: [`EnvelopeConfig`], [`Range`], qualification/timestamp policies
//! - `types`: [`EnvelopeFlags`]
//! - `rules`: [`evaluate_sample`]

pub mod config;
pub mod types;
pub mod rules;

pub use config::{EnvelopeConfig, QualificationPolicy, Range, TimestampPolicy};
pub use types::EnvelopeFlags;
pub use rules::evaluate_sample;

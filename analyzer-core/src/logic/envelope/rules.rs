//! Envelope Rules
//!
//! Pure, order-independent classification of a single sample.

use super::config::EnvelopeConfig;
use super::types::EnvelopeFlags;
use crate::logic::dataset::Sample;

/// Classify one sample against the envelope
pub fn evaluate_sample(sample: &Sample, ambient_temp: f64, config: &EnvelopeConfig) -> EnvelopeFlags {
    let ceiling = config.temperature_ceiling(ambient_temp);

    EnvelopeFlags {
        throttle_active: sample.throttle_position >= config.throttle_activation_min,
        mixture_ok: config.mixture_range.contains(sample.mixture_ratio),
        fuel_ok: config.fuel_pressure_range.contains(sample.fuel_pressure),
        intake_ok: sample.intake_air_temp <= ceiling,
        coolant_ok: sample.coolant_temp <= ceiling,
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Envelope Configuration
//!
//! Immutable thresholds for one evaluation. Passed by reference into the
//! engine, never stored globally, so runs with different envelopes can be
//! evaluated side by side.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{AnalyzerError, AnalyzerResult};

// ============================================================================
// RANGE
// ============================================================================

/// Closed interval `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive at both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    fn validate(&self, name: &str) -> AnalyzerResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(AnalyzerError::InvalidConfig(format!(
                "{} bounds must be finite",
                name
            )));
        }
        if self.low > self.high {
            return Err(AnalyzerError::InvalidConfig(format!(
                "{} is inverted: [{}, {}]",
                name, self.low, self.high
            )));
        }
        Ok(())
    }
}

// ============================================================================
// POLICIES
// ============================================================================

/// How a per-sample confirmation turns into a per-sample "qualified" flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationPolicy {
    /// qualified = NOT confirmed
    #[default]
    Strict,
    /// qualified = NOT (confirmed OR previous sample confirmed)
    TrailingWindow,
}

impl QualificationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualificationPolicy::Strict => "strict",
            QualificationPolicy::TrailingWindow => "trailing_window",
        }
    }
}

impl std::str::FromStr for QualificationPolicy {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(QualificationPolicy::Strict),
            "trailing_window" | "trailing-window" => Ok(QualificationPolicy::TrailingWindow),
            other => Err(AnalyzerError::InvalidConfig(format!(
                "unknown qualification policy '{}'",
                other
            ))),
        }
    }
}

/// What to do when elapsed time steps backwards between two retained samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Treat a negative step as zero
    #[default]
    Clamp,
    /// Abort the evaluation
    Reject,
}

impl TimestampPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampPolicy::Clamp => "clamp",
            TimestampPolicy::Reject => "reject",
        }
    }
}

impl std::str::FromStr for TimestampPolicy {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(TimestampPolicy::Clamp),
            "reject" => Ok(TimestampPolicy::Reject),
            other => Err(AnalyzerError::InvalidConfig(format!(
                "unknown timestamp policy '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// ENVELOPE CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Throttle (%) at or above which the engine is under load
    pub throttle_activation_min: f64,
    /// Acceptable mixture ratio
    pub mixture_range: Range,
    /// Acceptable fuel pressure (psi)
    pub fuel_pressure_range: Range,
    /// Added to ambient temperature to get the intake/coolant ceiling
    pub ambient_offset: f64,
    /// Seconds of uninterrupted raw violation before confirmation
    pub sustained_violation_threshold: f64,
    #[serde(default)]
    pub qualification_policy: QualificationPolicy,
    #[serde(default)]
    pub timestamp_policy: TimestampPolicy,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            throttle_activation_min: DEFAULT_THROTTLE_ACTIVATION_MIN,
            mixture_range: Range::new(DEFAULT_MIXTURE_MIN, DEFAULT_MIXTURE_MAX),
            fuel_pressure_range: Range::new(DEFAULT_FUEL_PRESSURE_MIN, DEFAULT_FUEL_PRESSURE_MAX),
            ambient_offset: DEFAULT_AMBIENT_OFFSET,
            sustained_violation_threshold: DEFAULT_SUSTAINED_VIOLATION_SECS,
            qualification_policy: QualificationPolicy::Strict,
            timestamp_policy: TimestampPolicy::Clamp,
        }
    }
}

impl EnvelopeConfig {
    /// Earlier rule revision: a confirmation also disqualifies the next sample
    pub fn trailing_window() -> Self {
        Self {
            qualification_policy: QualificationPolicy::TrailingWindow,
            ..Default::default()
        }
    }

    /// Refuse logs whose clock runs backwards instead of clamping
    pub fn strict_timestamps() -> Self {
        Self {
            timestamp_policy: TimestampPolicy::Reject,
            ..Default::default()
        }
    }

    /// Intake/coolant ceiling for a given ambient temperature
    pub fn temperature_ceiling(&self, ambient_temp: f64) -> f64 {
        ambient_temp + self.ambient_offset
    }

    pub fn validate(&self) -> AnalyzerResult<()> {
        self.mixture_range.validate("mixture_range")?;
        self.fuel_pressure_range.validate("fuel_pressure_range")?;

        if !self.throttle_activation_min.is_finite() {
            return Err(AnalyzerError::InvalidConfig(
                "throttle_activation_min must be finite".to_string(),
            ));
        }
        if !self.ambient_offset.is_finite() {
            return Err(AnalyzerError::InvalidConfig(
                "ambient_offset must be finite".to_string(),
            ));
        }
        if !self.sustained_violation_threshold.is_finite() || self.sustained_violation_threshold < 0.0 {
            return Err(AnalyzerError::InvalidConfig(format!(
                "sustained_violation_threshold must be a non-negative number of seconds, got {}",
                self.sustained_violation_threshold
            )));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

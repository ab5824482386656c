//! Central Configuration Constants
//!
//! Single source of truth for the envelope and ingestion defaults.
//! The server can override every one of these from the environment.

/// Minimum throttle (%) at which the engine is considered under load
pub const DEFAULT_THROTTLE_ACTIVATION_MIN: f64 = 97.0;

/// Acceptable mixture (lambda) ratio, inclusive
pub const DEFAULT_MIXTURE_MIN: f64 = 0.80;
pub const DEFAULT_MIXTURE_MAX: f64 = 0.92;

/// Acceptable fuel pressure (psi), inclusive
pub const DEFAULT_FUEL_PRESSURE_MIN: f64 = 317.0;
pub const DEFAULT_FUEL_PRESSURE_MAX: f64 = 372.0;

/// Margin (°C) added to ambient temperature for the intake/coolant ceiling
pub const DEFAULT_AMBIENT_OFFSET: f64 = 15.0;

/// Uninterrupted violation time (seconds) before a violation is confirmed
pub const DEFAULT_SUSTAINED_VIOLATION_SECS: f64 = 0.5;

/// Logger export files start with this many preamble lines before the header
pub const DEFAULT_PREAMBLE_LINES: usize = 19;

/// Rows shown in the HTML preview
pub const DEFAULT_PREVIEW_ROWS: usize = 60;

// ============================================
// Logger column names
// ============================================

pub const COLUMN_THROTTLE: &str = "TPS (Main)";
pub const COLUMN_FUEL_PRESSURE: &str = "Fuel Pressure";
pub const COLUMN_INTAKE_AIR_TEMP: &str = "IAT";
pub const COLUMN_COOLANT_TEMP: &str = "ECT";
pub const COLUMN_ELAPSED_TIME: &str = "Section Time";

/// Any column whose name contains this (case-insensitive) is a mixture sensor
pub const DEFAULT_MIXTURE_PATTERN: &str = "lambda";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

//! Configuration module

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use boat_analyzer_core::constants::{DEFAULT_PREAMBLE_LINES, DEFAULT_PREVIEW_ROWS};
use boat_analyzer_core::logic::envelope::Range;
use boat_analyzer_core::{ColumnSchema, EnvelopeConfig};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Rows shown in the HTML preview
    pub preview_rows: usize,

    /// Lines skipped before the CSV header
    pub preamble_lines: usize,

    /// Where annotated exports are written
    pub export_dir: PathBuf,

    /// Exports older than this are deleted
    pub export_ttl: Duration,

    /// Upload body limit (bytes)
    pub max_upload_bytes: usize,

    /// Envelope thresholds, identical for every run this process evaluates
    pub envelope: EnvelopeConfig,

    /// Logger column names
    pub schema: ColumnSchema,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            environment: "development".to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            preamble_lines: DEFAULT_PREAMBLE_LINES,
            export_dir: env::temp_dir().join("boat-analyzer"),
            export_ttl: Duration::from_secs(3600),
            max_upload_bytes: 16 * 1024 * 1024,
            envelope: EnvelopeConfig::default(),
            schema: ColumnSchema::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (unset keys keep their default)
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let d_env = &defaults.envelope;

        let envelope = EnvelopeConfig {
            throttle_activation_min: parse_or(&get, "ENVELOPE_THROTTLE_MIN", d_env.throttle_activation_min)?,
            mixture_range: Range::new(
                parse_or(&get, "ENVELOPE_MIXTURE_MIN", d_env.mixture_range.low)?,
                parse_or(&get, "ENVELOPE_MIXTURE_MAX", d_env.mixture_range.high)?,
            ),
            fuel_pressure_range: Range::new(
                parse_or(&get, "ENVELOPE_FUEL_MIN", d_env.fuel_pressure_range.low)?,
                parse_or(&get, "ENVELOPE_FUEL_MAX", d_env.fuel_pressure_range.high)?,
            ),
            ambient_offset: parse_or(&get, "ENVELOPE_AMBIENT_OFFSET", d_env.ambient_offset)?,
            sustained_violation_threshold: parse_or(
                &get,
                "ENVELOPE_SUSTAINED_SECS",
                d_env.sustained_violation_threshold,
            )?,
            qualification_policy: parse_or(&get, "QUALIFICATION_POLICY", d_env.qualification_policy)?,
            timestamp_policy: parse_or(&get, "TIMESTAMP_POLICY", d_env.timestamp_policy)?,
        };
        envelope.validate().context("invalid envelope configuration")?;

        let schema = ColumnSchema {
            mixture_pattern: get("MIXTURE_PATTERN").unwrap_or(defaults.schema.mixture_pattern.clone()),
            ..defaults.schema.clone()
        };
        schema.mixture_regex().context("invalid MIXTURE_PATTERN")?;

        let export_ttl_secs: u64 = parse_or(&get, "EXPORT_TTL_SECS", defaults.export_ttl.as_secs())?;
        if export_ttl_secs == 0 {
            anyhow::bail!("EXPORT_TTL_SECS must be at least 1");
        }

        Ok(Self {
            port: parse_or(&get, "PORT", defaults.port)?,
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment.clone()),
            preview_rows: parse_or(&get, "PREVIEW_ROWS", defaults.preview_rows)?,
            preamble_lines: parse_or(&get, "PREAMBLE_LINES", defaults.preamble_lines)?,
            export_dir: get("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir.clone()),
            export_ttl: Duration::from_secs(export_ttl_secs),
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            envelope,
            schema,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_or<F, T>(get: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{}='{}': {}", key, raw, e)),
    }
}

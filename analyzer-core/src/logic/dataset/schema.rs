//! Column Schema
//!
//! Which logger columns feed which measurement.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{AnalyzerError, AnalyzerResult};

/// Column names expected in the logger export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub throttle: String,
    pub fuel_pressure: String,
    pub intake_air_temp: String,
    pub coolant_temp: String,
    pub elapsed_time: String,
    /// Case-insensitive regex; every matching column is a mixture sensor
    pub mixture_pattern: String,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            throttle: COLUMN_THROTTLE.to_string(),
            fuel_pressure: COLUMN_FUEL_PRESSURE.to_string(),
            intake_air_temp: COLUMN_INTAKE_AIR_TEMP.to_string(),
            coolant_temp: COLUMN_COOLANT_TEMP.to_string(),
            elapsed_time: COLUMN_ELAPSED_TIME.to_string(),
            mixture_pattern: DEFAULT_MIXTURE_PATTERN.to_string(),
        }
    }
}

impl ColumnSchema {
    /// Required columns, in the order they are checked and coerced
    pub fn required(&self) -> [&str; 5] {
        [
            self.throttle.as_str(),
            self.fuel_pressure.as_str(),
            self.intake_air_temp.as_str(),
            self.coolant_temp.as_str(),
            self.elapsed_time.as_str(),
        ]
    }

    pub fn mixture_regex(&self) -> AnalyzerResult<Regex> {
        RegexBuilder::new(&self.mixture_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                AnalyzerError::InvalidConfig(format!(
                    "mixture pattern '{}': {}",
                    self.mixture_pattern, e
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_matches_logger_export() {
        let schema = ColumnSchema::default();
        assert_eq!(
            schema.required(),
            ["TPS (Main)", "Fuel Pressure", "IAT", "ECT", "Section Time"]
        );
    }

    #[test]
    fn test_mixture_regex_is_case_insensitive_substring() {
        let re = ColumnSchema::default().mixture_regex().unwrap();
        assert!(re.is_match("Lambda 1"));
        assert!(re.is_match("WB LAMBDA (Bank 2)"));
        assert!(!re.is_match("AFR"));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let schema = ColumnSchema {
            mixture_pattern: "(".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            schema.mixture_regex(),
            Err(AnalyzerError::InvalidConfig(_))
        ));
    }
}

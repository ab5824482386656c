//! Run-level metadata supplied once per upload

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, AnalyzerResult};

/// Who ran, when, and in what conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub vessel_id: String,
    /// Ambient temperature (°C), base of the intake/coolant ceiling
    pub ambient_temp: f64,
}

impl RunMetadata {
    pub fn new(
        departure_date: NaiveDate,
        departure_time: NaiveTime,
        vessel_id: impl Into<String>,
        ambient_temp: f64,
    ) -> Self {
        Self {
            departure_date,
            departure_time,
            vessel_id: vessel_id.into(),
            ambient_temp,
        }
    }

    pub fn departure(&self) -> NaiveDateTime {
        self.departure_date.and_time(self.departure_time)
    }

    /// A non-finite ambient makes every temperature comparison false
    pub fn validate(&self) -> AnalyzerResult<()> {
        if !self.ambient_temp.is_finite() {
            return Err(AnalyzerError::InvalidMetadata(format!(
                "ambient temperature must be a finite number, got {}",
                self.ambient_temp
            )));
        }
        Ok(())
    }
}

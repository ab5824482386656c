use serde::{Deserialize, Serialize};

/// One timestamped telemetry observation, fully numeric
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in the raw data section (0-based), for joining back to cells
    pub row_index: usize,

    pub elapsed_time: f64,
    pub throttle_position: f64,

    /// Mean of every mixture sensor that read in this row
    pub mixture_ratio: f64,

    pub fuel_pressure: f64,
    pub intake_air_temp: f64,
    pub coolant_temp: f64,
}

/// Why a row was left out of the evaluation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropReason {
    /// A required column held something that is not a finite number
    Unparseable { column: String, value: String },
    /// None of the mixture sensor cells could be read
    NoMixtureReading,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::Unparseable { column, value } => {
                write!(f, "column '{}' is not numeric ('{}')", column, value)
            }
            DropReason::NoMixtureReading => write!(f, "no mixture sensor reading"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub row_index: usize,
    pub reason: DropReason,
}

/// Per-row result of normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Valid(Sample),
    Dropped(DroppedRow),
}

//! Error handling
//!
//! Only whole-run failures live here. A cell that fails numeric coercion is
//! not an error: it becomes a [`DropReason`](crate::logic::dataset::DropReason)
//! on that row.

use thiserror::Error;

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// The dataset's columns cannot support an evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("no mixture sensor column matches pattern '{pattern}'")]
    NoMixtureColumn { pattern: String },
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("CSV error at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error(
        "elapsed time goes backwards at data row {row_index}: {previous} s -> {current} s"
    )]
    NonMonotonicTime {
        row_index: usize,
        previous: f64,
        current: f64,
    },

    #[error("invalid envelope configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid run metadata: {0}")]
    InvalidMetadata(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// True when the input (not the system) is at fault
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnalyzerError::Schema(_)
                | AnalyzerError::Csv { .. }
                | AnalyzerError::NonMonotonicTime { .. }
                | AnalyzerError::InvalidMetadata(_)
        )
    }
}

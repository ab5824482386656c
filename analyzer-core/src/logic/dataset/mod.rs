//! Dataset Module - Telemetry Ingestion & Normalization
//!
//! Turns a logger export into an ordered list of numeric [`Sample`]s.
//!
//! ## Structure
//! - `reader`: CSV text -> [`RawTable`] (preamble skip, quoting)
//! - `schema`: required column names + mixture sensor pattern
//! - `record`: [`Sample`], [`RowOutcome`], [`DropReason`]
//! - `normalizer`: schema check, coercion, mixture averaging

pub mod reader;
pub mod schema;
pub mod record;
pub mod normalizer;


pub use reader::{read_csv, RawTable};
pub use schema::ColumnSchema;
pub use record::{DropReason, DroppedRow, RowOutcome, Sample};
pub use normalizer::{normalize, NormalizedRun};

//! Logic Module - Normalizer, Engine & Reporting
//!
//! ## Structure
//! - `dataset/` - CSV reading, column schema, sample normalization
//! - `envelope/` - Envelope configuration and per-sample rules
//! - `debounce/` - Sustained-violation state machine and run evaluation
//! - `analysis` - End-to-end pipeline producing an [`analysis::Analysis`]
//! - `report/` - CSV export, HTML preview, export storage

pub mod dataset;
pub mod envelope;
pub mod debounce;
pub mod analysis;
pub mod report;
pub mod run;

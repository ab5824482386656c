//! Report Module
//!
//! Everything downstream of the verdict: annotated CSV, HTML preview and the
//! per-analysis export files.

pub mod export;
pub mod html;
pub mod storage;

#[cfg(test)]
mod tests;

pub use export::{to_csv_bytes, write_annotated, DERIVED_COLUMNS};
pub use html::{escape_html, render_table};
pub use storage::ExportStore;

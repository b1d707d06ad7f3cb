//! Error types surfaced to the operator.
//!
//! Only structural failures live here. Cell-level problems (blank or
//! non-numeric cells) and a zero section total are normalized where they occur
//! and never become errors.

use thiserror::Error;

use crate::model::{Provider, Section};

/// A section's table could not be located or read.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not open workbook '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: calamine::Error,
    },
    #[error("sheet '{sheet}' not found (available: {available})")]
    SheetNotFound { sheet: String, available: String },
    #[error("could not read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },
    #[error("marker row {marker_row} leaves no room for the two header rows above it")]
    MarkerRowTooSmall { marker_row: usize },
    #[error("header rows for marker row {marker_row} lie beyond the sheet ({rows} rows)")]
    HeaderOutOfRange { marker_row: usize, rows: usize },
    #[error("header rows for marker row {marker_row} are empty")]
    EmptyHeader { marker_row: usize },
    #[error("provider {provider} appears more than once in the table at row {marker_row}")]
    DuplicateProvider {
        provider: Provider,
        marker_row: usize,
    },
}

/// The report could not be assembled.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report withheld: could not read {}", list_sections(.failed))]
    Withheld { failed: Vec<Section> },
}

fn list_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| format!("'{}'", s.title()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A manual-entry document could not be loaded.
#[derive(Debug, Error)]
pub enum ManualEntryError {
    #[error("could not read manual entries from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manual entries in '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

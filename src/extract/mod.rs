//! Extraction of provider records from a section table inside a worksheet.
//!
//! A section table sits under a marker row (the row holding `Prestadores`):
//! two header rows, then the provider rows and a total row. Extraction is
//! all-or-nothing per section; cell-level problems never fail it.

pub mod cells;
pub mod columns;
pub mod header;

pub use columns::{ColumnMap, Metric};
pub use header::{RawHeaderTable, RawRow};

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::model::{Provider, ProviderRecord, ProviderRecords, RangeBucket, SENTINEL_AVERAGE};
use crate::source::{Cell, SheetGrid, SheetSource};

/// Reads `sheet` from `source` and extracts the table at `marker_row`.
#[tracing::instrument(skip(source), err)]
pub fn extract<S>(
    source: &mut S,
    sheet: &str,
    marker_row: usize,
) -> Result<ProviderRecords, ExtractionError>
where
    S: SheetSource + ?Sized,
{
    let grid = source.read_sheet(sheet)?;
    extract_table(&grid, marker_row)
}

/// Extracts both providers' records from an already-read sheet.
pub fn extract_table(
    grid: &SheetGrid,
    marker_row: usize,
) -> Result<ProviderRecords, ExtractionError> {
    let table = RawHeaderTable::read(grid, marker_row)?;

    let columns = ColumnMap::resolve(table.columns());
    for (bucket, metric) in columns.missing() {
        debug!(marker_row, %bucket, ?metric, "No column for bucket");
    }

    let rows = provider_rows(&table, marker_row)?;

    let records: ProviderRecords = Provider::ALL
        .iter()
        .map(|&provider| {
            let record = match rows.get(&provider) {
                Some(row) => record_from_row(row, &columns, marker_row),
                None => {
                    warn!(marker_row, %provider, "Provider row missing, using empty record");
                    ProviderRecord::empty()
                }
            };
            (provider, record)
        })
        .collect();

    info!(
        marker_row,
        solusof = records[&Provider::Solusof].total(),
        sistech = records[&Provider::Sistech].total(),
        "Section table extracted"
    );

    Ok(records)
}

/// Keeps allow-listed rows and folds the legacy alias into its canonical
/// provider. A provider showing up twice is rejected rather than letting one
/// row silently overwrite the other.
fn provider_rows(
    table: &RawHeaderTable,
    marker_row: usize,
) -> Result<BTreeMap<Provider, &RawRow>, ExtractionError> {
    let mut rows = BTreeMap::new();

    for row in table.rows() {
        let Some(provider) = Provider::canonicalize(&row.label) else {
            debug!(marker_row, label = %row.label, "Skipping row");
            continue;
        };

        if rows.insert(provider, row).is_some() {
            return Err(ExtractionError::DuplicateProvider {
                provider,
                marker_row,
            });
        }
    }

    Ok(rows)
}

fn record_from_row(row: &RawRow, columns: &ColumnMap, marker_row: usize) -> ProviderRecord {
    let averages = RangeBucket::ALL.map(|bucket| {
        let cell = cell_at(row, columns.column(bucket, Metric::Average));
        cells::parse_average(cell).unwrap_or_else(|| SENTINEL_AVERAGE.to_string())
    });

    let counts = RangeBucket::ALL.map(|bucket| {
        let cell = cell_at(row, columns.column(bucket, Metric::Count));
        cells::parse_count(cell).unwrap_or_else(|| {
            if !cell.is_blank() {
                debug!(marker_row, label = %row.label, %bucket, ?cell, "Unreadable count, using 0");
            }
            0
        })
    });

    ProviderRecord::new(averages, counts)
}

fn cell_at(row: &RawRow, column: Option<usize>) -> &Cell {
    const EMPTY: &Cell = &Cell::Empty;
    column.and_then(|c| row.cells.get(c)).unwrap_or(EMPTY)
}

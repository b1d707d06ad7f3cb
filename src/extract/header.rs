//! Reading the two-row header table that sits under a marker row.

use tracing::warn;

use crate::error::ExtractionError;
use crate::source::{Cell, SheetGrid};

/// Data rows read under the header: two providers and the total row.
pub const MAX_DATA_ROWS: usize = 3;

/// Labels expected in the row-label column of the marker row.
const MARKER_LABELS: [&str; 2] = ["prestadores", "providers"];

/// One data row: its raw label (column A, trimmed) and the cells after it,
/// aligned with [`RawHeaderTable::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub label: String,
    pub cells: Vec<Cell>,
}

/// A table with flattened `outer_inner` column labels and raw row labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHeaderTable {
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawHeaderTable {
    /// Reads the table anchored at the 1-based `marker_row`.
    ///
    /// The compound header spans 0-based rows `marker_row - 2` and
    /// `marker_row - 1`; column A holds the row labels.
    pub fn read(grid: &SheetGrid, marker_row: usize) -> Result<Self, ExtractionError> {
        if marker_row < 2 {
            return Err(ExtractionError::MarkerRowTooSmall { marker_row });
        }
        let outer_row = marker_row - 2;
        let inner_row = marker_row - 1;

        if inner_row >= grid.height() {
            return Err(ExtractionError::HeaderOutOfRange {
                marker_row,
                rows: grid.height(),
            });
        }

        let width = grid.width();
        let header_blank = (1..width).all(|col| {
            grid.cell(outer_row, col).is_none_or(Cell::is_blank)
                && grid.cell(inner_row, col).is_none_or(Cell::is_blank)
        });
        if header_blank {
            return Err(ExtractionError::EmptyHeader { marker_row });
        }

        if !has_marker_label(grid, inner_row) {
            warn!(marker_row, "Marker label not found; reading table anyway");
        }

        let columns = flatten_header(grid.row(outer_row), grid.row(inner_row), width);

        let rows = (inner_row + 1..grid.height())
            .filter(|&row| !grid.is_row_blank(row))
            .take(MAX_DATA_ROWS)
            .map(|row| RawRow {
                label: grid
                    .cell(row, 0)
                    .map(Cell::display)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                cells: (1..width)
                    .map(|col| grid.cell(row, col).cloned().unwrap_or(Cell::Empty))
                    .collect(),
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }
}

fn has_marker_label(grid: &SheetGrid, row: usize) -> bool {
    grid.cell(row, 0).is_some_and(|cell| {
        let label = cell.display().to_lowercase();
        MARKER_LABELS.iter().any(|m| label.contains(m))
    })
}

/// Joins the two header rows column by column into `outer_inner`.
///
/// Merged outer cells only carry their text in the first column, so the last
/// non-blank outer label is carried forward.
fn flatten_header(outer: &[Cell], inner: &[Cell], width: usize) -> Vec<String> {
    let mut current_outer = String::new();

    (1..width)
        .map(|col| {
            let outer_label = outer.get(col).map(Cell::display).unwrap_or_default();
            if !outer_label.trim().is_empty() {
                current_outer = outer_label.trim().to_string();
            }
            let inner_label = inner.get(col).map(Cell::display).unwrap_or_default();

            format!("{}_{}", current_outer, inner_label.trim())
                .trim()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|v| match *v {
                "" => Cell::Empty,
                text => Cell::text(text),
            })
            .collect()
    }

    #[test]
    fn test_flatten_forward_fills_merged_outer_labels() {
        let outer = cells(&["", " <2 min ", "", "2-5 min", ""]);
        let inner = cells(&[
            "Prestadores",
            "Promedio de Diferencia",
            "Cuenta de Placas ",
            "Promedio de Diferencia",
            "Cuenta de Placas",
        ]);

        let columns = flatten_header(&outer, &inner, 5);

        assert_eq!(
            columns,
            vec![
                "<2 min_Promedio de Diferencia",
                "<2 min_Cuenta de Placas",
                "2-5 min_Promedio de Diferencia",
                "2-5 min_Cuenta de Placas",
            ]
        );
    }

    #[test]
    fn test_read_takes_first_three_non_blank_rows() {
        let grid = SheetGrid::from_rows(vec![
            cells(&["<2 min"]),
            cells(&["", "<2 min", ""]),
            cells(&[
                "Prestadores",
                "Promedio de Diferencia",
                "Cuenta de Placas",
            ]),
            cells(&["AC_avl_Solusof", "00:01:04", "10"]),
            cells(&["", "", ""]),
            cells(&[" AC_avl_Sistech ", "00:00:40", "20"]),
            cells(&["Total general", "00:00:50", "30"]),
            cells(&["AC_avl_truper", "00:00:40", "40"]),
        ]);

        let table = RawHeaderTable::read(&grid, 3).unwrap();

        let labels: Vec<_> = table.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["AC_avl_Solusof", "AC_avl_Sistech", "Total general"]
        );
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.rows()[0].cells.len(), 2);
    }

    #[test]
    fn test_marker_row_too_small() {
        let grid = SheetGrid::from_rows(vec![cells(&["Prestadores", "x"])]);
        assert!(matches!(
            RawHeaderTable::read(&grid, 1),
            Err(ExtractionError::MarkerRowTooSmall { marker_row: 1 })
        ));
    }

    #[test]
    fn test_header_beyond_sheet() {
        let grid = SheetGrid::from_rows(vec![cells(&["a", "b"]), cells(&["c", "d"])]);
        assert!(matches!(
            RawHeaderTable::read(&grid, 40),
            Err(ExtractionError::HeaderOutOfRange {
                marker_row: 40,
                rows: 2
            })
        ));
    }

    #[test]
    fn test_blank_header_is_an_error() {
        let grid = SheetGrid::from_rows(vec![
            cells(&["", "", ""]),
            cells(&["Prestadores", "", ""]),
            cells(&["AC_avl_Solusof", "1", "2"]),
        ]);
        assert!(matches!(
            RawHeaderTable::read(&grid, 2),
            Err(ExtractionError::EmptyHeader { marker_row: 2 })
        ));
    }
}

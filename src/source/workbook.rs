use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use super::{Cell, SheetGrid, SheetSource, sheet_not_found};
use crate::error::ExtractionError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A workbook on disk (`.xlsx`, `.xlsm`, `.xls`, `.ods`), decoded by calamine.
pub struct WorkbookSource {
    path: String,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractionError> {
        let path = path.as_ref();
        let workbook = open_workbook_auto(path).map_err(|source| ExtractionError::Open {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self {
            path: path.display().to_string(),
            workbook,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl SheetSource for WorkbookSource {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetGrid, ExtractionError> {
        let names = self.sheet_names();
        if !names.iter().any(|n| n == sheet) {
            return Err(sheet_not_found(sheet, &names));
        }

        let range = self
            .workbook
            .worksheet_range(sheet)
            .map_err(|e| ExtractionError::Sheet {
                sheet: sheet.to_string(),
                message: e.to_string(),
            })?;

        let grid = grid_from_range(&range);
        debug!(
            path = %self.path,
            sheet,
            rows = grid.height(),
            cols = grid.width(),
            "Sheet loaded"
        );
        Ok(grid)
    }
}

/// calamine ranges start at the first used cell; pad them back to A1.
fn grid_from_range(range: &Range<Data>) -> SheetGrid {
    let Some((first_row, first_col)) = range.start() else {
        return SheetGrid::default();
    };

    let mut rows = vec![Vec::new(); first_row as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; first_col as usize];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }

    SheetGrid::from_rows(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            // Averages are stored as fractions of a day with a time format.
            if dt.is_duration() || (0.0..1.0).contains(&serial) {
                Cell::Time((serial * SECONDS_PER_DAY).round().max(0.0) as u64)
            } else {
                Cell::Text(data.to_string())
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

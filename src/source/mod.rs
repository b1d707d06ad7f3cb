//! Access to the worksheets a report is read from.
//!
//! [`SheetSource`] is the seam between the extractor and spreadsheet decoding.
//! [`WorkbookSource`] reads real workbooks through calamine; [`GridSource`]
//! serves grids held in memory.

mod grid;
mod memory;
mod workbook;

pub use grid::{Cell, SheetGrid, format_hms};
pub use memory::GridSource;
pub use workbook::WorkbookSource;

use crate::error::ExtractionError;

/// Anything that can list its sheets and hand back one sheet as a cell grid.
pub trait SheetSource {
    fn sheet_names(&self) -> Vec<String>;

    /// Reads `sheet` into a grid anchored at cell A1.
    fn read_sheet(&mut self, sheet: &str) -> Result<SheetGrid, ExtractionError>;
}

/// Builds the error for a sheet name the source does not know.
pub(crate) fn sheet_not_found(sheet: &str, available: &[String]) -> ExtractionError {
    ExtractionError::SheetNotFound {
        sheet: sheet.to_string(),
        available: available.join(", "),
    }
}

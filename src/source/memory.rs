use super::{SheetGrid, SheetSource, sheet_not_found};
use crate::error::ExtractionError;

/// Named sheets held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct GridSource {
    sheets: Vec<(String, SheetGrid)>,
}

impl GridSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: &str, grid: SheetGrid) -> Self {
        self.sheets.push((name.to_string(), grid));
        self
    }
}

impl SheetSource for GridSource {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetGrid, ExtractionError> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, grid)| grid.clone())
            .ok_or_else(|| sheet_not_found(sheet, &self.sheet_names()))
    }
}

/// A decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    /// Duration or time-of-day, in whole seconds.
    Time(u64),
}

impl Cell {
    pub fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }

    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) | Cell::Time(_) => false,
        }
    }

    /// Renders the cell the way a header label reads in the sheet.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Time(secs) => format_hms(*secs),
        }
    }
}

/// Formats a second count as `HH:MM:SS`; hours grow past 24 rather than wrap.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Dense cell grid of one sheet. Row 0 is spreadsheet row 1 and column 0 is
/// column A, so positions match what the operator sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row in the grid.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn row(&self, index: usize) -> &[Cell] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn is_row_blank(&self, index: usize) -> bool {
        self.row(index).iter().all(Cell::is_blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(64), "00:01:04");
        assert_eq!(format_hms(5004), "01:23:24");
        assert_eq!(format_hms(90_000), "25:00:00");
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(Cell::Number(5.0).display(), "5");
        assert_eq!(Cell::Number(2.5).display(), "2.5");
        assert_eq!(Cell::Empty.display(), "");
    }

    #[test]
    fn test_out_of_bounds_reads_are_empty() {
        let grid = SheetGrid::from_rows(vec![vec![Cell::text("a")]]);
        assert_eq!(grid.cell(0, 0), Some(&Cell::text("a")));
        assert_eq!(grid.cell(0, 1), None);
        assert!(grid.row(7).is_empty());
        assert!(grid.is_row_blank(7));
    }
}

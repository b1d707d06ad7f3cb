//! Coercion of individual table cells into record values.
//!
//! `None` means the cell is blank or unreadable; callers fall back to the
//! sentinel average or a zero count.

use crate::source::{Cell, format_hms};

pub fn parse_average(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Time(secs) => Some(format_hms(*secs)),
        Cell::Text(text) => {
            let text = text.trim();
            (!text.is_empty() && !text.eq_ignore_ascii_case("nan")).then(|| text.to_string())
        }
        Cell::Number(n) if n.is_finite() => Some(cell.display()),
        Cell::Number(_) | Cell::Empty => None,
    }
}

/// Counts truncate toward zero; negative and non-finite values are rejected.
pub fn parse_count(cell: &Cell) -> Option<u64> {
    match cell {
        Cell::Number(n) => whole(*n),
        Cell::Text(text) => text.trim().parse::<f64>().ok().and_then(whole),
        Cell::Time(_) | Cell::Empty => None,
    }
}

fn whole(n: f64) -> Option<u64> {
    (n.is_finite() && n >= 0.0).then(|| n.trunc() as u64)
}

//! Run configuration, passed explicitly into the report pipeline.

pub mod manual;

pub use manual::ManualEntries;

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::model::Section;

/// Marker rows (1-based spreadsheet rows) locating each section's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMarkers {
    pub avl_hub: usize,
    pub hub_simon: usize,
    pub avl_simon: usize,
}

impl SectionMarkers {
    pub fn get(&self, section: Section) -> usize {
        match section {
            Section::AvlHub => self.avl_hub,
            Section::HubSimon => self.hub_simon,
            Section::AvlSimon => self.avl_simon,
        }
    }
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self {
            avl_hub: Section::AvlHub.default_marker_row(),
            hub_simon: Section::HubSimon.default_marker_row(),
            avl_simon: Section::AvlSimon.default_marker_row(),
        }
    }
}

/// Where a report's numbers come from.
#[derive(Debug, Clone)]
pub enum InputSource {
    /// A workbook; `sheet` defaults to the first sheet when `None`.
    Workbook {
        path: PathBuf,
        sheet: Option<String>,
        markers: SectionMarkers,
    },
    Manual(ManualEntries),
}

/// Everything one report run needs.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub analysis_date: NaiveDate,
    pub input: InputSource,
}

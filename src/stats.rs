use serde::Serialize;

use crate::analyzers::types::TidyRow;
use crate::model::{Provider, ProviderRecords, RangeBucket, Section};

/// Aggregated view of one section, built once by
/// [`aggregate`](crate::analyzers::aggregate::aggregate).
#[derive(Debug, Clone, Serialize)]
pub struct SectionDataset {
    pub section: Section,
    pub records: ProviderRecords,
    pub rows: Vec<TidyRow>,
    pub total_count: u64,
}

impl SectionDataset {
    pub fn pct(part: u64, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn row(&self, provider: Provider, bucket: RangeBucket) -> Option<&TidyRow> {
        self.rows
            .iter()
            .find(|r| r.provider == provider && r.bucket == bucket)
    }

    /// Share of the section total for `(provider, bucket)`; 0 when absent.
    pub fn percentage(&self, provider: Provider, bucket: RangeBucket) -> f64 {
        self.row(provider, bucket).map_or(0.0, |r| r.percentage)
    }

    pub fn provider_total(&self, provider: Provider) -> u64 {
        self.records.get(&provider).map_or(0, |r| r.total())
    }
}

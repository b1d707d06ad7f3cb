//! Data types produced by the section aggregation.

use serde::Serialize;

use crate::analyzers::grade::Light;
use crate::model::{Provider, RangeBucket};

/// One `(provider, bucket)` observation of a section in long form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyRow {
    pub provider: Provider,
    pub bucket: RangeBucket,
    pub average: String,
    pub count: u64,
    pub percentage: f64,
}

/// Provider × bucket summary. Every vector is indexed in [`RangeBucket::ALL`]
/// order, matching `buckets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub buckets: Vec<RangeBucket>,
    pub rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub provider: Provider,
    pub averages: Vec<String>,
    pub counts: Vec<u64>,
    /// Percentages formatted with one decimal, e.g. `66.7%`.
    pub percentages: Vec<String>,
}

/// A provider's reports arriving under two and five minutes, as shares of the
/// section total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyIndicator {
    pub provider: Provider,
    pub under_two_pct: f64,
    pub two_to_five_pct: f64,
    pub under_five_pct: f64,
    pub light: Light,
}

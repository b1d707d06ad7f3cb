//! Core domain types shared by extraction, aggregation and reporting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Average duration reported when a cell is missing or unreadable.
pub const SENTINEL_AVERAGE: &str = "00:00:00";

/// Latency bucket a plate report falls into.
///
/// Declaration order is the display order; it is not alphabetical, so always
/// iterate [`RangeBucket::ALL`] instead of sorting labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RangeBucket {
    #[serde(rename = "<2 min")]
    UnderTwo,
    #[serde(rename = "2-5 min")]
    TwoToFive,
    #[serde(rename = "5-10 min")]
    FiveToTen,
    #[serde(rename = "≥10 min")]
    TenOrMore,
}

impl RangeBucket {
    pub const ALL: [RangeBucket; 4] = [
        RangeBucket::UnderTwo,
        RangeBucket::TwoToFive,
        RangeBucket::FiveToTen,
        RangeBucket::TenOrMore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RangeBucket::UnderTwo => "<2 min",
            RangeBucket::TwoToFive => "2-5 min",
            RangeBucket::FiveToTen => "5-10 min",
            RangeBucket::TenOrMore => "≥10 min",
        }
    }

    /// Position of the bucket inside a record's `averages`/`counts` arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RangeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the two AVL providers being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "AC_avl_Solusof")]
    Solusof,
    #[serde(rename = "AC_avl_Sistech")]
    Sistech,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Solusof, Provider::Sistech];

    /// Legacy spelling used by some networks for the Sistech rows.
    pub const SISTECH_ALIAS: &'static str = "AC_avl_truper";

    pub fn canonical_id(self) -> &'static str {
        match self {
            Provider::Solusof => "AC_avl_Solusof",
            Provider::Sistech => "AC_avl_Sistech",
        }
    }

    /// Short name used on KPI cards and chart legends.
    pub fn short_name(self) -> &'static str {
        match self {
            Provider::Solusof => "Solusof",
            Provider::Sistech => "Sistech",
        }
    }

    /// Chart color for the provider's series.
    pub fn color(self) -> &'static str {
        match self {
            Provider::Solusof => "#0083B8",
            Provider::Sistech => "#FF4B4B",
        }
    }

    /// Maps a raw row label onto its canonical provider.
    ///
    /// Returns `None` for labels outside the allow-list (e.g. the total row).
    /// Feeding a canonical id back in yields the same provider, so the
    /// mapping is idempotent.
    pub fn canonicalize(raw: &str) -> Option<Provider> {
        match raw.trim() {
            "AC_avl_Solusof" => Some(Provider::Solusof),
            "AC_avl_Sistech" | Self::SISTECH_ALIAS => Some(Provider::Sistech),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_id())
    }
}

/// Reporting flow between two tracking stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    AvlHub,
    HubSimon,
    AvlSimon,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::AvlHub, Section::HubSimon, Section::AvlSimon];

    pub fn title(self) -> &'static str {
        match self {
            Section::AvlHub => "AVL a HUB",
            Section::HubSimon => "HUB a SIMON",
            Section::AvlSimon => "AVL a SIMON",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Section::AvlHub => "avl_hub",
            Section::HubSimon => "hub_simon",
            Section::AvlSimon => "avl_simon",
        }
    }

    /// Marker row used by the usual workbook layout.
    pub fn default_marker_row(self) -> usize {
        match self {
            Section::AvlHub => 5,
            Section::HubSimon => 18,
            Section::AvlSimon => 30,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One provider's averages and counts for one section, indexed by
/// [`RangeBucket::index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub averages: [String; 4],
    pub counts: [u64; 4],
}

impl ProviderRecord {
    pub fn new(averages: [String; 4], counts: [u64; 4]) -> Self {
        Self { averages, counts }
    }

    /// Record used when a provider row is absent.
    pub fn empty() -> Self {
        Self {
            averages: std::array::from_fn(|_| SENTINEL_AVERAGE.to_string()),
            counts: [0; 4],
        }
    }

    pub fn average(&self, bucket: RangeBucket) -> &str {
        &self.averages[bucket.index()]
    }

    pub fn count(&self, bucket: RangeBucket) -> u64 {
        self.counts[bucket.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Default for ProviderRecord {
    fn default() -> Self {
        Self::empty()
    }
}

/// Per-provider records for one section, ordered by [`Provider`].
pub type ProviderRecords = BTreeMap<Provider, ProviderRecord>;

use crate::analyzers::grade::grade;
use crate::analyzers::types::{EfficiencyIndicator, PivotRow, PivotTable, TidyRow};
use crate::model::{ProviderRecord, ProviderRecords, RangeBucket, SENTINEL_AVERAGE, Section};
use crate::stats::SectionDataset;

/// Aggregates one section's provider records into a [`SectionDataset`].
///
/// Rows come out provider by provider in bucket order. Percentages are shares
/// of the whole section total, and are all 0 when that total is 0.
pub fn aggregate(section: Section, records: ProviderRecords) -> SectionDataset {
    let total_count: u64 = records.values().map(ProviderRecord::total).sum();

    let rows = records
        .iter()
        .flat_map(|(&provider, record)| {
            RangeBucket::ALL.iter().map(move |&bucket| TidyRow {
                provider,
                bucket,
                average: record.average(bucket).to_string(),
                count: record.count(bucket),
                percentage: SectionDataset::pct(record.count(bucket), total_count),
            })
        })
        .collect();

    SectionDataset {
        section,
        records,
        rows,
        total_count,
    }
}

/// Pivots the tidy rows into provider × bucket form.
///
/// Columns always follow [`RangeBucket::ALL`], whatever order the rows are
/// in; cells without a row read as the sentinel average, 0 and `0.0%`.
pub fn pivot(dataset: &SectionDataset) -> PivotTable {
    let rows = dataset
        .records
        .keys()
        .map(|&provider| {
            let cells: Vec<Option<&TidyRow>> = RangeBucket::ALL
                .iter()
                .map(|&bucket| dataset.row(provider, bucket))
                .collect();

            PivotRow {
                provider,
                averages: cells
                    .iter()
                    .map(|c| c.map_or(SENTINEL_AVERAGE, |r| r.average.as_str()))
                    .map(String::from)
                    .collect(),
                counts: cells.iter().map(|c| c.map_or(0, |r| r.count)).collect(),
                percentages: cells
                    .iter()
                    .map(|c| format_pct(c.map_or(0.0, |r| r.percentage)))
                    .collect(),
            }
        })
        .collect();

    PivotTable {
        buckets: RangeBucket::ALL.to_vec(),
        rows,
    }
}

/// Per-provider efficiency: the provider's `<2 min` and `2-5 min` shares of
/// the section total, and their sum graded as a traffic light.
pub fn efficiency(dataset: &SectionDataset) -> Vec<EfficiencyIndicator> {
    dataset
        .records
        .keys()
        .map(|&provider| {
            let under_two = dataset.percentage(provider, RangeBucket::UnderTwo);
            let two_to_five = dataset.percentage(provider, RangeBucket::TwoToFive);
            let under_five = under_two + two_to_five;

            EfficiencyIndicator {
                provider,
                under_two_pct: under_two,
                two_to_five_pct: two_to_five,
                under_five_pct: under_five,
                light: grade(under_five),
            }
        })
        .collect()
}

/// Formats a percentage with one decimal, e.g. `66.7%`.
pub fn format_pct(pct: f64) -> String {
    format!("{pct:.1}%")
}

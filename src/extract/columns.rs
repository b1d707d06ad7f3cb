//! Lookup of the average/count column for each latency bucket.
//!
//! Flattened headers carry noise (units, stray words), so a column matches
//! when its name contains an expected fragment. When several columns match,
//! the first one in sheet order wins.

use crate::model::RangeBucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Average,
    Count,
}

impl Metric {
    fn suffix(self) -> &'static str {
        match self {
            Metric::Average => "Promedio de Diferencia",
            Metric::Count => "Cuenta de Placas",
        }
    }
}

/// Outer header labels accepted for each bucket.
const BUCKET_HEADERS: [(RangeBucket, &[&str]); 4] = [
    (RangeBucket::UnderTwo, &["<2 min"]),
    (RangeBucket::TwoToFive, &["2-5 min"]),
    (RangeBucket::FiveToTen, &["5-10 min"]),
    (RangeBucket::TenOrMore, &["≥10 min", ">=10 min"]),
];

/// Header fragments that identify `(bucket, metric)`.
pub fn fragments(bucket: RangeBucket, metric: Metric) -> Vec<String> {
    BUCKET_HEADERS
        .iter()
        .filter(|(b, _)| *b == bucket)
        .flat_map(|(_, labels)| labels.iter())
        .map(|label| format!("{}_{}", label, metric.suffix()))
        .collect()
}

/// Index of the first column whose name contains a fragment for
/// `(bucket, metric)`.
pub fn locate(columns: &[String], bucket: RangeBucket, metric: Metric) -> Option<usize> {
    let fragments = fragments(bucket, metric);
    columns
        .iter()
        .position(|name| fragments.iter().any(|f| name.contains(f.as_str())))
}

/// Resolved column positions for all buckets of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    averages: [Option<usize>; 4],
    counts: [Option<usize>; 4],
}

impl ColumnMap {
    pub fn resolve(columns: &[String]) -> Self {
        let find = |metric: Metric| RangeBucket::ALL.map(|b| locate(columns, b, metric));
        Self {
            averages: find(Metric::Average),
            counts: find(Metric::Count),
        }
    }

    pub fn column(&self, bucket: RangeBucket, metric: Metric) -> Option<usize> {
        match metric {
            Metric::Average => self.averages[bucket.index()],
            Metric::Count => self.counts[bucket.index()],
        }
    }

    /// Buckets/metrics with no matching column.
    pub fn missing(&self) -> Vec<(RangeBucket, Metric)> {
        RangeBucket::ALL
            .iter()
            .flat_map(|&b| [(b, Metric::Average), (b, Metric::Count)])
            .filter(|&(b, m)| self.column(b, m).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_locate_tolerates_header_noise() {
        let columns = names(&[
            "Rango_Prestadores",
            "<2 min_Promedio de Diferencia (hh:mm:ss)",
            "<2 min_Cuenta de Placas",
        ]);

        let under_two = |metric| locate(&columns, RangeBucket::UnderTwo, metric);
        assert_eq!(under_two(Metric::Average), Some(1));
        assert_eq!(under_two(Metric::Count), Some(2));
        assert_eq!(
            locate(&columns, RangeBucket::TwoToFive, Metric::Count),
            None
        );
    }

    #[test]
    fn test_first_match_wins() {
        let columns = names(&[
            "2-5 min_Cuenta de Placas",
            "Total 2-5 min_Cuenta de Placas",
        ]);
        let found = locate(&columns, RangeBucket::TwoToFive, Metric::Count);
        assert_eq!(found, Some(0));
    }

    #[test]
    fn test_ascii_ten_minute_label_is_accepted() {
        let columns = names(&[">=10 min_Cuenta de Placas"]);
        let found = locate(&columns, RangeBucket::TenOrMore, Metric::Count);
        assert_eq!(found, Some(0));
    }

    #[test]
    fn test_column_map_reports_missing() {
        let columns = names(&[
            "<2 min_Promedio de Diferencia",
            "<2 min_Cuenta de Placas",
            "2-5 min_Promedio de Diferencia",
            "2-5 min_Cuenta de Placas",
            "5-10 min_Promedio de Diferencia",
            "5-10 min_Cuenta de Placas",
            "≥10 min_Promedio de Diferencia",
        ]);

        let map = ColumnMap::resolve(&columns);

        assert_eq!(map.column(RangeBucket::FiveToTen, Metric::Count), Some(5));
        assert_eq!(map.missing(), vec![(RangeBucket::TenOrMore, Metric::Count)]);
    }
}

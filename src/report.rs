//! The rendered report: one view per section built from its
//! [`SectionDataset`], whatever the data came from.
//!
//! Charts are emitted as descriptions (categories, series, colors) for an
//! external charting layer to draw.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info};

use crate::analyzers::aggregate::{aggregate, efficiency, format_pct, pivot};
use crate::analyzers::types::{EfficiencyIndicator, PivotTable};
use crate::error::{ExtractionError, ReportError};
use crate::model::{Provider, ProviderRecords, RangeBucket, Section};
use crate::stats::SectionDataset;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub value: u64,
    /// `value` with thousands separators, e.g. `26,792`.
    pub display: String,
}

impl KpiCard {
    fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
            display: thousands(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub color: String,
    pub values: Vec<f64>,
    /// Text drawn on each bar.
    pub labels: Vec<String>,
}

/// Grouped bar chart: one bar group per bucket, one series per provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub section: Section,
    pub title: String,
    pub kpis: Vec<KpiCard>,
    pub count_chart: ChartSpec,
    pub percentage_chart: ChartSpec,
    pub table: PivotTable,
    pub efficiency: Vec<EfficiencyIndicator>,
    #[serde(skip)]
    pub dataset: SectionDataset,
}

impl SectionView {
    pub fn from_dataset(dataset: SectionDataset) -> Self {
        let section = dataset.section;

        let mut kpis = vec![KpiCard::new("Total Placas en Sección", dataset.total_count)];
        kpis.extend(Provider::ALL.iter().map(|&p| {
            let label = format!("Total {}", p.short_name());
            KpiCard::new(label, dataset.provider_total(p))
        }));

        Self {
            section,
            title: format!("Análisis: {}", section.title()),
            kpis,
            count_chart: count_chart(&dataset),
            percentage_chart: percentage_chart(&dataset),
            table: pivot(&dataset),
            efficiency: efficiency(&dataset),
            dataset,
        }
    }
}

fn categories() -> Vec<String> {
    RangeBucket::ALL
        .iter()
        .map(|b| b.label().to_string())
        .collect()
}

fn count_chart(dataset: &SectionDataset) -> ChartSpec {
    let series = Provider::ALL
        .iter()
        .map(|&provider| {
            let counts: Vec<u64> = RangeBucket::ALL
                .iter()
                .map(|&b| dataset.row(provider, b).map_or(0, |r| r.count))
                .collect();
            ChartSeries {
                name: provider.canonical_id().to_string(),
                color: provider.color().to_string(),
                values: counts.iter().map(|&c| c as f64).collect(),
                labels: counts.iter().map(|&c| thousands(c)).collect(),
            }
        })
        .collect();

    ChartSpec {
        title: "Comparativa de Cantidad de Placas por Rango".to_string(),
        x_label: "Rango de Reportabilidad".to_string(),
        y_label: "Nº de Placas".to_string(),
        categories: categories(),
        series,
    }
}

fn percentage_chart(dataset: &SectionDataset) -> ChartSpec {
    let series = Provider::ALL
        .iter()
        .map(|&provider| {
            let values: Vec<f64> = RangeBucket::ALL
                .iter()
                .map(|&b| dataset.percentage(provider, b))
                .collect();
            ChartSeries {
                name: provider.canonical_id().to_string(),
                color: provider.color().to_string(),
                labels: values.iter().map(|&v| format_pct(v)).collect(),
                values,
            }
        })
        .collect();

    ChartSpec {
        title: "Distribución Porcentual por Rango".to_string(),
        x_label: "Rango de Reportabilidad".to_string(),
        y_label: "% del Total de la Sección".to_string(),
        categories: categories(),
        series,
    }
}

/// A complete report for one analysis date.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub analysis_date: NaiveDate,
    pub sections: Vec<SectionView>,
}

impl Report {
    /// Builds the report from every section's extraction outcome.
    ///
    /// A single failed section withholds the whole report; each failure is
    /// logged for the operator.
    #[tracing::instrument(skip(outcomes), fields(date = %analysis_date))]
    pub fn assemble(
        analysis_date: NaiveDate,
        outcomes: Vec<(Section, Result<ProviderRecords, ExtractionError>)>,
    ) -> Result<Self, ReportError> {
        let mut failed = Vec::new();
        let mut sections = Vec::new();

        for (section, outcome) in outcomes {
            match outcome {
                Ok(records) => {
                    sections.push(SectionView::from_dataset(aggregate(section, records)));
                }
                Err(e) => {
                    error!(section = %section, error = %e, "Section could not be read");
                    failed.push(section);
                }
            }
        }

        if !failed.is_empty() {
            return Err(ReportError::Withheld { failed });
        }

        info!(sections = sections.len(), "Report assembled");
        Ok(Self {
            title: format!(
                "Reportabilidad SIMON IV Truper - {}",
                analysis_date.format("%d %B %Y")
            ),
            analysis_date,
            sections,
        })
    }

    pub fn section(&self, section: Section) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.section == section)
    }
}

/// Formats `n` with comma thousands separators.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::PivotRow;
    use crate::model::ProviderRecord;

    fn record(counts: [u64; 4]) -> ProviderRecord {
        ProviderRecord::new(Default::default(), counts)
    }

    fn records(solusof: [u64; 4], sistech: [u64; 4]) -> ProviderRecords {
        ProviderRecords::from([
            (Provider::Solusof, record(solusof)),
            (Provider::Sistech, record(sistech)),
        ])
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 18).unwrap()
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(26792), "26,792");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_section_view_kpis() {
        let dataset = aggregate(Section::AvlHub, records([100, 0, 0, 0], [50, 0, 0, 0]));
        let view = SectionView::from_dataset(dataset);

        let values: Vec<_> = view
            .kpis
            .iter()
            .map(|k| (k.label.as_str(), k.value))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Total Placas en Sección", 150),
                ("Total Solusof", 100),
                ("Total Sistech", 50),
            ]
        );
        assert_eq!(view.title, "Análisis: AVL a HUB");
    }

    #[test]
    fn test_charts_follow_bucket_order() {
        let dataset = aggregate(Section::AvlHub, records([1, 2, 3, 4], [0, 0, 0, 4]));
        let view = SectionView::from_dataset(dataset);

        assert_eq!(
            view.count_chart.categories,
            vec!["<2 min", "2-5 min", "5-10 min", "≥10 min"]
        );
        assert_eq!(view.count_chart.series[0].values, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(view.count_chart.series[1].color, "#FF4B4B");
        assert_eq!(view.percentage_chart.series[0].labels[0], "7.1%");
        assert_eq!(view.percentage_chart.series[1].labels[3], "28.6%");
    }

    #[test]
    fn test_assemble_all_sections() {
        let outcomes = Section::ALL
            .iter()
            .map(|&s| (s, Ok(records([1, 0, 0, 0], [1, 0, 0, 0]))))
            .collect();

        let report = Report::assemble(date(), outcomes).unwrap();

        assert_eq!(report.sections.len(), 3);
        assert_eq!(
            report.title,
            "Reportabilidad SIMON IV Truper - 18 August 2025"
        );
        assert!(report.section(Section::HubSimon).is_some());
    }

    #[test]
    fn test_one_failed_section_withholds_report() {
        let outcomes = vec![
            (Section::AvlHub, Ok(records([1, 0, 0, 0], [1, 0, 0, 0]))),
            (
                Section::HubSimon,
                Err(ExtractionError::HeaderOutOfRange {
                    marker_row: 18,
                    rows: 10,
                }),
            ),
            (Section::AvlSimon, Ok(records([1, 0, 0, 0], [1, 0, 0, 0]))),
        ];

        let err = Report::assemble(date(), outcomes).unwrap_err();

        let ReportError::Withheld { failed } = err;
        assert_eq!(failed, vec![Section::HubSimon]);
    }

    #[test]
    fn test_all_zero_section_still_renders() {
        let outcomes = vec![(Section::HubSimon, Ok(records([0; 4], [0; 4])))];

        let report = Report::assemble(date(), outcomes).unwrap();
        let view = &report.sections[0];

        assert_eq!(view.kpis[0].value, 0);
        let zero = |r: &PivotRow| r.percentages.iter().all(|p| p == "0.0%");
        assert!(view.table.rows.iter().all(zero));
    }
}

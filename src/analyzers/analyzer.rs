use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{error, info};

use crate::config::{InputSource, ManualEntries, ReportConfig, SectionMarkers};
use crate::error::ReportError;
use crate::extract::extract_table;
use crate::model::Section;
use crate::report::Report;
use crate::source::{SheetSource, WorkbookSource};

/// Runs one report render for `config`.
pub fn analyze(config: &ReportConfig) -> Result<Report> {
    match &config.input {
        InputSource::Workbook {
            path,
            sheet,
            markers,
        } => {
            let mut source = WorkbookSource::open(path)
                .with_context(|| format!("cannot open workbook {}", path.display()))?;
            Ok(analyze_sheet(
                &mut source,
                sheet.as_deref(),
                markers,
                config.analysis_date,
            )?)
        }
        InputSource::Manual(entries) => Ok(analyze_manual(entries, config.analysis_date)?),
    }
}

/// Reads the sheet once and extracts every section from it.
///
/// `sheet` defaults to the source's first sheet.
#[tracing::instrument(skip(source, markers))]
pub fn analyze_sheet<S>(
    source: &mut S,
    sheet: Option<&str>,
    markers: &SectionMarkers,
    analysis_date: NaiveDate,
) -> Result<Report, ReportError>
where
    S: SheetSource + ?Sized,
{
    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => source.sheet_names().first().cloned().unwrap_or_default(),
    };
    info!(sheet = %sheet_name, ?markers, "Reading sheet");

    let grid = match source.read_sheet(&sheet_name) {
        Ok(grid) => grid,
        Err(e) => {
            error!(sheet = %sheet_name, error = %e, "Sheet could not be read");
            return Err(ReportError::Withheld {
                failed: Section::ALL.to_vec(),
            });
        }
    };

    let outcomes = Section::ALL
        .iter()
        .map(|&section| {
            let outcome = extract_table(&grid, markers.get(section));
            (section, outcome)
        })
        .collect();

    Report::assemble(analysis_date, outcomes)
}

/// Builds the report from manually entered figures.
pub fn analyze_manual(
    entries: &ManualEntries,
    analysis_date: NaiveDate,
) -> Result<Report, ReportError> {
    let outcomes = Section::ALL
        .iter()
        .map(|&section| (section, Ok(entries.records(section))))
        .collect();

    Report::assemble(analysis_date, outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Provider, RangeBucket};
    use crate::source::{Cell, GridSource, SheetGrid};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 18).unwrap()
    }

    fn text_row(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|v| match *v {
                "" => Cell::Empty,
                text => Cell::text(text),
            })
            .collect()
    }

    /// Three small tables with markers at rows 2, 6 and 10.
    fn three_tables() -> SheetGrid {
        let mut rows = Vec::new();
        for count in [10.0, 20.0, 30.0] {
            rows.push(text_row(&["", "<2 min", ""]));
            rows.push(text_row(&[
                "Prestadores",
                "Promedio de Diferencia",
                "Cuenta de Placas",
            ]));
            rows.push(vec![
                Cell::text("AC_avl_Solusof"),
                Cell::text("00:01:00"),
                Cell::Number(count),
            ]);
            rows.push(vec![]);
        }
        SheetGrid::from_rows(rows)
    }

    #[test]
    fn test_analyze_sheet_defaults_to_first_sheet() {
        let mut source = GridSource::new()
            .with_sheet("Resumen", three_tables())
            .with_sheet("Otra", SheetGrid::default());
        let markers = SectionMarkers {
            avl_hub: 2,
            hub_simon: 6,
            avl_simon: 10,
        };

        let report = analyze_sheet(&mut source, None, &markers, date()).unwrap();

        let counts: Vec<_> = report
            .sections
            .iter()
            .map(|s| s.dataset.records[&Provider::Solusof].total())
            .collect();
        assert_eq!(counts, vec![10, 20, 30]);
    }

    #[test]
    fn test_bad_marker_withholds_report() {
        let mut source = GridSource::new().with_sheet("Resumen", three_tables());
        let markers = SectionMarkers {
            avl_hub: 2,
            hub_simon: 6,
            avl_simon: 400,
        };

        let err = analyze_sheet(&mut source, Some("Resumen"), &markers, date()).unwrap_err();

        let ReportError::Withheld { failed } = err;
        assert_eq!(failed, vec![Section::AvlSimon]);
    }

    #[test]
    fn test_missing_sheet_withholds_every_section() {
        let mut source = GridSource::new().with_sheet("Resumen", three_tables());

        let markers = SectionMarkers::default();

        let err = analyze_sheet(&mut source, Some("Hoja9"), &markers, date()).unwrap_err();

        let ReportError::Withheld { failed } = err;
        assert_eq!(failed, Section::ALL.to_vec());
    }

    #[test]
    fn test_analyze_manual_sample() {
        let report = analyze_manual(&ManualEntries::sample(), date()).unwrap();

        let hub_simon = report.section(Section::HubSimon).unwrap();
        assert_eq!(hub_simon.kpis[0].display, "65,503");
    }

    #[test]
    fn test_analyze_with_missing_workbook_fails() {
        let config = ReportConfig {
            analysis_date: date(),
            input: InputSource::Workbook {
                path: "/nonexistent/reporte.xlsx".into(),
                sheet: None,
                markers: SectionMarkers::default(),
            },
        };

        assert!(analyze(&config).is_err());
    }
}

//! Output formatting and persistence for reports.
//!
//! Supports a plain-text rendering, JSON serialization, and appending the
//! tidy rows to a CSV file.

use anyhow::Result;
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::PivotRow;
use crate::model::{Provider, RangeBucket, Section};
use crate::report::{Report, SectionView};

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Writes the report as pretty-printed JSON.
pub fn write_json<W: Write>(mut writer: W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a plain-text rendering: KPIs, summary table and efficiency
/// indicators for each section.
pub fn write_text<W: Write>(mut writer: W, report: &Report) -> Result<()> {
    writeln!(writer, "{}", report.title)?;
    writeln!(writer, "{}", "=".repeat(report.title.chars().count()))?;

    for view in &report.sections {
        writeln!(writer)?;
        write_section(&mut writer, view)?;
    }

    Ok(())
}

fn write_section<W: Write>(writer: &mut W, view: &SectionView) -> Result<()> {
    writeln!(writer, "{}", view.title)?;
    writeln!(writer, "{}", "-".repeat(view.title.chars().count()))?;

    for kpi in &view.kpis {
        writeln!(writer, "  {:<24} {:>12}", kpi.label, kpi.display)?;
    }
    writeln!(writer)?;

    let header: String = view
        .table
        .buckets
        .iter()
        .map(|b| format!("{:>10}", b.label()))
        .collect();

    write_metric(writer, "Promedio", &header, view, |row| {
        row.averages.clone()
    })?;
    write_metric(writer, "Cantidad", &header, view, |row| {
        row.counts.iter().map(|c| c.to_string()).collect()
    })?;
    write_metric(writer, "Porcentaje", &header, view, |row| {
        row.percentages.clone()
    })?;
    writeln!(writer)?;

    writeln!(writer, "  Indicadores de Eficiencia")?;
    for indicator in &view.efficiency {
        writeln!(
            writer,
            "  {:<16} <2 min {:>6.1}%   2-5 min {:>6.1}%   <5 min {:>6.1}% {}",
            indicator.provider.canonical_id(),
            indicator.under_two_pct,
            indicator.two_to_five_pct,
            indicator.under_five_pct,
            indicator.light.symbol()
        )?;
    }

    Ok(())
}

fn write_metric<W, F>(
    writer: &mut W,
    metric: &str,
    header: &str,
    view: &SectionView,
    values: F,
) -> Result<()>
where
    W: Write,
    F: Fn(&PivotRow) -> Vec<String>,
{
    writeln!(writer, "  {:<16}{}", metric, header)?;
    for row in &view.table.rows {
        let cells: String = values(row).iter().map(|v| format!("{:>10}", v)).collect();
        writeln!(writer, "  {:<16}{}", row.provider.canonical_id(), cells)?;
    }
    Ok(())
}

/// One tidy row as written to CSV.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    analysis_date: NaiveDate,
    section: Section,
    provider: Provider,
    bucket: RangeBucket,
    average: &'a str,
    count: u64,
    percentage: f64,
}

/// Appends every section's tidy rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_rows(path: &str, report: &Report) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for view in &report.sections {
        for row in &view.dataset.rows {
            writer.serialize(CsvRow {
                analysis_date: report.analysis_date,
                section: view.section,
                provider: row.provider,
                bucket: row.bucket,
                average: &row.average,
                count: row.count,
                percentage: row.percentage,
            })?;
        }
    }
    writer.flush()?;

    Ok(())
}

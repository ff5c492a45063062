//! CSV Export
//!
//! Writes the filtered report list in the `reports.csv` layout.

use std::io::Write;

use chrono::SecondsFormat;

use crate::domain::Report;

pub const HEADER: &str = "ID,Title,Ward,Category,Status,Date Reported,Votes,Reporter";

// Hand-formatted: csv::Writer's QuoteStyle is writer-wide and cannot always
// quote title and reporter while quoting other fields only when needed.

/// Write the header and one row per report. Rows are newline-separated with
/// no trailing newline.
pub fn write_reports<W: Write>(mut out: W, reports: &[&Report]) -> std::io::Result<usize> {
    out.write_all(HEADER.as_bytes())?;
    for report in reports {
        out.write_all(b"\n")?;
        out.write_all(format_row(report).as_bytes())?;
    }
    out.flush()?;
    Ok(reports.len())
}

pub fn format_row(report: &Report) -> String {
    [
        report.id.to_string(),
        quote(&report.title),
        field(&report.ward),
        report.category.id().to_string(),
        report.status.id().to_string(),
        report
            .date_reported
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        report.votes.to_string(),
        quote(&report.reporter),
    ]
    .join(",")
}

/// Always-quoted field; embedded quotes are doubled.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quoted only when the value would otherwise break the row.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quote(value)
    } else {
        value.to_string()
    }
}

//! Report loading: the built-in fixture or a fixture file on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Category, Report, Status};

const BUILTIN_FIXTURE: &str = include_str!("fixtures/reports.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    Builtin,
    File(PathBuf),
}

impl ReportSource {
    pub fn display(&self) -> String {
        match self {
            ReportSource::Builtin => "built-in fixture".to_string(),
            ReportSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON fixture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV fixture: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported fixture format: {0} (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),
}

pub fn load(source: &ReportSource) -> Result<Vec<Report>, LoadError> {
    match source {
        ReportSource::Builtin => Ok(serde_json::from_str(BUILTIN_FIXTURE)?),
        ReportSource::File(path) => load_file(path),
    }
}

fn load_file(path: &Path) -> Result<Vec<Report>, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let content = || {
        fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match extension.as_deref() {
        Some("json") => Ok(serde_json::from_str(&content()?)?),
        Some("csv") => parse_csv(content()?.as_bytes()),
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// A row in the export layout, plus optional description/urgency columns.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ID")]
    id: u32,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Ward")]
    ward: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Date Reported")]
    date_reported: DateTime<Utc>,
    #[serde(rename = "Votes")]
    votes: u32,
    #[serde(rename = "Reporter")]
    reporter: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Urgent", default)]
    urgent: bool,
}

impl From<CsvRow> for Report {
    fn from(row: CsvRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            ward: row.ward,
            category: Category::from_id(&row.category),
            status: Status::from_id(&row.status),
            date_reported: row.date_reported,
            votes: row.votes,
            reporter: row.reporter,
            description: row.description,
            is_urgent: row.urgent,
        }
    }
}

fn parse_csv(data: &[u8]) -> Result<Vec<Report>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data);
    let mut reports = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        reports.push(Report::from(row?));
    }
    Ok(reports)
}

#[cfg(test)]
pub(crate) fn builtin_reports() -> Vec<Report> {
    load(&ReportSource::Builtin).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wardwatch-fixture-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_builtin_fixture() {
        let reports = builtin_reports();
        assert_eq!(reports.len(), 6);
        let ids: Vec<u32> = reports.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(reports[4].ward, "Sarang'ombe");
        assert_eq!(reports[1].status, Status::InProgress);
        assert!(reports[5].is_urgent);
    }

    #[test]
    fn test_csv_fixture_with_optional_columns() {
        let data = "ID,Title,Ward,Category,Status,Date Reported,Votes,Reporter,Urgent\n\
                    7,\"Blocked \"\"culvert\"\"\",Kibera,environment,in-progress,2025-02-01T08:00:00Z,3,\"Ann, W.\",true\n\
                    8,Noise,Makina,nightlife,closed,2025-02-02T08:00:00Z,0,Joe,false";
        let reports = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].title, "Blocked \"culvert\"");
        assert_eq!(reports[0].reporter, "Ann, W.");
        assert!(reports[0].is_urgent);
        assert!(reports[0].description.is_empty());
        assert_eq!(reports[1].category, Category::Other);
        assert_eq!(reports[1].status, Status::Pending);
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = scratch_path("reports.json");
        let original = builtin_reports();
        fs::write(&path, serde_json::to_string(&original[..2]).unwrap()).unwrap();
        let loaded = load(&ReportSource::File(path)).unwrap();
        assert_eq!(loaded, original[..2].to_vec());
    }

    #[test]
    fn test_load_errors() {
        let missing = load(&ReportSource::File(scratch_path("missing.json")));
        assert!(matches!(missing, Err(LoadError::Io { .. })));

        let yaml = load(&ReportSource::File(scratch_path("reports.yaml")));
        assert!(matches!(yaml, Err(LoadError::UnsupportedFormat(_))));

        let broken = scratch_path("broken.json");
        fs::write(&broken, "[{\"id\": 1}]").unwrap();
        assert!(matches!(
            load(&ReportSource::File(broken)),
            Err(LoadError::Json(_))
        ));
    }
}

//! Export Module
//!
//! - 'e' key or `:export [path]` writes the filtered grid to CSV
//! - Default target is `reports.csv` in the configured export directory

mod csv_export;

pub use csv_export::{format_row, write_reports, HEADER};

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::app::App;
use crate::core::{Action, NotifyLevel};
use crate::domain::Report;

pub const EXPORT_FILE_NAME: &str = "reports.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `reports` to `path`, creating parent directories as needed.
pub fn export_to_path(path: &Path, reports: &[&Report]) -> Result<usize, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    write_reports(BufWriter::new(file), reports).map_err(write_err)
}

/// Export the currently filtered view.
///
/// `target` overrides the default `<export_dir>/reports.csv`.
pub fn export_current_view(app: &App, target: Option<PathBuf>) -> Action {
    let path = target.unwrap_or_else(|| app.export_dir.join(EXPORT_FILE_NAME));
    let reports = app.visible_reports();

    match export_to_path(&path, &reports) {
        Ok(count) => {
            tracing::info!(rows = count, path = %path.display(), "exported reports");
            Action::Notify(
                format!("Exported {} reports to {}", count, path.display()),
                NotifyLevel::Info,
            )
        }
        Err(err) => {
            tracing::error!(error = %err, "export failed");
            Action::Notify(format!("Export failed: {err}"), NotifyLevel::Error)
        }
    }
}

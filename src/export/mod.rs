//! File exporters
//!
//! Both exporters work on the raw payload exactly as the API returned it,
//! never on the display rows.

pub mod csv;
pub mod json;

use crate::core::report::ReportType;
use crate::error::ExportError;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use self::csv::export_csv;
pub use self::json::export_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("CSV"),
            ExportFormat::Json => f.write_str("JSON"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{}' (expected csv or json)", other)),
        }
    }
}

/// `stampcard_<type>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn default_file_name(
    report_type: ReportType,
    format: ExportFormat,
    now: DateTime<Local>,
) -> String {
    format!(
        "stampcard_{}_{}.{}",
        report_type,
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

pub fn default_export_path(
    dir: Option<&Path>,
    report_type: ReportType,
    format: ExportFormat,
    now: DateTime<Local>,
) -> PathBuf {
    let name = default_file_name(report_type, format, now);
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

pub fn export_payload(
    format: ExportFormat,
    payload: &Value,
    report_type: ReportType,
    path: &Path,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => export_csv(payload, report_type, path),
        ExportFormat::Json => export_json(payload, report_type, path),
    }
}

/// Write `bytes` to `path`, creating missing parent directories
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_error = |source: std::io::Error| ExportError::FileIo {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, bytes).map_err(io_error)
}

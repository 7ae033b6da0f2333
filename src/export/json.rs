use super::write_file;
use crate::core::normalizer::{is_absent, record_count};
use crate::core::report::ReportType;
use crate::error::ExportError;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Envelope written around the untouched payload
#[derive(Debug, Serialize)]
pub struct JsonExport<'a> {
    pub report_type: ReportType,
    pub generated_at: String,
    pub total_records: usize,
    pub data: &'a Value,
}

impl<'a> JsonExport<'a> {
    /// `total_records` is 0 when the payload shape is not recognised
    pub fn new(payload: &'a Value, report_type: ReportType, generated_at: DateTime<Local>) -> Self {
        Self {
            report_type,
            generated_at: generated_at.to_rfc3339(),
            total_records: record_count(payload),
            data: payload,
        }
    }
}

pub fn export_json(payload: &Value, report_type: ReportType, path: &Path) -> Result<(), ExportError> {
    if is_absent(payload) {
        return Err(ExportError::NoData);
    }

    let document = JsonExport::new(payload, report_type, Local::now());
    // Pretty printer indents by two spaces and leaves non-ASCII as is
    let mut bytes = serde_json::to_vec_pretty(&document)?;
    bytes.push(b'\n');

    write_file(path, &bytes)?;
    log::debug!(
        "Wrote JSON export of {} records to {}",
        document.total_records,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_back(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_wraps_untouched_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let payload = json!({"data": [{"MemberNo": "M1", "StoreName": "東京"}], "page": 1});

        export_json(&payload, ReportType::Transactions, &path).unwrap();

        let written = read_back(&path);
        assert_eq!(written["data"], payload);
        assert_eq!(written["report_type"], json!("transactions"));
        assert_eq!(written["total_records"], json!(1));
        let generated_at = written["generated_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(generated_at).is_ok());

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("東京"));
        assert!(raw.contains("\n  \"report_type\": \"transactions\""));
    }

    #[test]
    fn test_unrecognised_shape_counts_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.json");
        let payload = json!({"rows": [1, 2]});

        export_json(&payload, ReportType::Summary, &path).unwrap();

        let written = read_back(&path);
        assert_eq!(written["total_records"], json!(0));
        assert_eq!(written["data"], payload);
    }

    #[test]
    fn test_key_order() {
        let payload = json!([1, 2, 3]);
        let doc = JsonExport::new(&payload, ReportType::Summary, Local::now());
        let text = serde_json::to_string(&doc).unwrap();
        let positions: Vec<usize> = ["report_type", "generated_at", "total_records", "data"]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(doc.total_records, 3);
    }

    #[test]
    fn test_null_payload_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.json");
        assert!(matches!(
            export_json(&Value::Null, ReportType::Summary, &path),
            Err(ExportError::NoData)
        ));
        assert!(!path.exists());
    }
}

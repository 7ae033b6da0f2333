use super::write_file;
use crate::core::normalizer::{Record, is_absent, unwrap_records};
use crate::core::report::ReportType;
use crate::error::ExportError;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::path::Path;

/// Write the payload's records as CSV, header taken from the first record.
///
/// Positional rows are named with the report's field list when they have
/// exactly one value per field. The file is only created once every row
/// has been serialized.
pub fn export_csv(payload: &Value, report_type: ReportType, path: &Path) -> Result<(), ExportError> {
    let bytes = render_csv(payload, report_type)?;
    write_file(path, &bytes)?;
    log::debug!("Wrote {} bytes of CSV to {}", bytes.len(), path.display());
    Ok(())
}

pub fn render_csv(payload: &Value, report_type: ReportType) -> Result<Vec<u8>, ExportError> {
    if is_absent(payload) {
        return Err(ExportError::NoData);
    }
    let records = unwrap_records(payload)?;
    if records.is_empty() {
        return Err(ExportError::NoRecords);
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| as_mapping(index, record, report_type))
        .collect::<Result<Vec<_>, _>>()?;

    let header: Vec<&str> = rows[0].keys().map(String::as_str).collect();

    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(b',')
        .from_writer(Vec::new());
    writer.write_record(&header)?;

    for (index, row) in rows.iter().enumerate() {
        if let Some(extra) = row.keys().find(|key| !header.contains(&key.as_str())) {
            return Err(ExportError::UnexpectedField {
                index,
                field: extra.clone(),
            });
        }
        writer.write_record(header.iter().map(|key| row.get(*key).map(cell_text).unwrap_or_default()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))
}

fn as_mapping(
    index: usize,
    record: &Value,
    report_type: ReportType,
) -> Result<Cow<'_, Map<String, Value>>, ExportError> {
    match Record::from_value(record) {
        Record::Mapping(map) => Ok(Cow::Borrowed(map)),
        Record::Positional(items) => {
            let fields = report_type.schema().fields;
            if items.len() != fields.len() {
                log::warn!(
                    "Positional record {} has {} values, {} report has {} fields",
                    index,
                    items.len(),
                    report_type,
                    fields.len()
                );
                return Err(ExportError::PositionalRecord {
                    index,
                    len: items.len(),
                    expected: fields.len(),
                });
            }
            Ok(Cow::Owned(
                fields
                    .iter()
                    .zip(items)
                    .map(|(field, value)| (field.to_string(), value.clone()))
                    .collect(),
            ))
        }
        Record::Opaque(_) => Err(ExportError::UnsupportedRecord { index }),
    }
}

/// Strings raw, `null` empty, everything else as compact JSON
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

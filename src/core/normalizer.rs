//! Normalization of raw report payloads
//!
//! The API answers either with a bare array of rows or with an object whose
//! `data` key holds that array. Each row is a JSON object keyed by field name
//! or an array of positional values in schema order. This module turns both
//! into [`NormalizedRow`]s for display; exports work on the raw payload.

use crate::core::report::{ColumnSpec, POSITIONAL_PRECEDENCE, ReportType};
use crate::error::FormatError;
use serde_json::{Map, Value};
use std::fmt;

/// Placeholder shown for a field that cannot be resolved
pub const UNAVAILABLE: &str = "N/A";

/// One row of a payload, tagged by shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Record<'a> {
    Mapping(&'a Map<String, Value>),
    Positional(&'a [Value]),
    Opaque(&'a Value),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Present(&'a Value),
    Unavailable,
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Present(value) => f.write_str(&display_value(value)),
            FieldValue::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl<'a> Record<'a> {
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Record::Mapping(map),
            Value::Array(items) => Record::Positional(items),
            other => Record::Opaque(other),
        }
    }

    pub fn resolve(&self, field: &str, report_type: ReportType) -> FieldValue<'a> {
        let found = match self {
            Record::Mapping(map) => map.get(field),
            Record::Positional(items) => {
                positional_index(field, report_type).and_then(|index| items.get(index))
            }
            Record::Opaque(_) => None,
        };

        match found {
            Some(value) => FieldValue::Present(value),
            None => {
                log::debug!(
                    "Field '{}' unavailable in {} record",
                    field,
                    self.kind()
                );
                FieldValue::Unavailable
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Record::Mapping(_) => "mapping",
            Record::Positional(_) => "positional",
            Record::Opaque(_) => "opaque",
        }
    }
}

/// Index of `field` in list-shaped rows of `report_type`.
///
/// The report's own table wins; otherwise the remaining tables are checked
/// in [`POSITIONAL_PRECEDENCE`] order.
pub fn positional_index(field: &str, report_type: ReportType) -> Option<usize> {
    report_type.schema().index_of(field).or_else(|| {
        POSITIONAL_PRECEDENCE
            .iter()
            .filter(|candidate| **candidate != report_type)
            .find_map(|candidate| candidate.schema().index_of(field))
    })
}

/// Stringify a JSON value for display (strings without quotes)
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Short name of the JSON kind, used in diagnostics
pub fn payload_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `null`, `{}` and `""` all mean the API sent nothing back
pub fn is_absent(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Extract the row sequence from either response shape.
///
/// A `null` under `data` is an empty page, not a malformed response.
pub fn unwrap_records(payload: &Value) -> Result<&[Value], FormatError> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) => Ok(&[][..]),
            Some(other) => Err(FormatError::UnexpectedShape {
                found: format!("object with non-array 'data' ({})", payload_kind(other)),
            }),
            None => Err(FormatError::UnexpectedShape {
                found: "object without 'data'".to_string(),
            }),
        },
        other => Err(FormatError::UnexpectedShape {
            found: payload_kind(other).to_string(),
        }),
    }
}

/// Number of rows in a payload; 0 when the shape is not recognised.
pub fn record_count(payload: &Value) -> usize {
    unwrap_records(payload).map(|records| records.len()).unwrap_or(0)
}

/// Display-ready row: one string per column of the report's schema
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    cells: Vec<(&'static ColumnSpec, String)>,
}

impl NormalizedRow {
    /// Look up a value by API field name or by column header
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(column, _)| column.field == name || column.header == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static ColumnSpec, &str)> + '_ {
        self.cells.iter().map(|(column, value)| (*column, value.as_str()))
    }

    pub fn values(&self) -> Vec<&str> {
        self.cells.iter().map(|(_, value)| value.as_str()).collect()
    }
}

pub fn normalize_record(record: &Value, report_type: ReportType) -> NormalizedRow {
    let record = Record::from_value(record);
    let cells = report_type
        .schema()
        .columns
        .iter()
        .map(|column| (column, record.resolve(column.field, report_type).to_string()))
        .collect();
    NormalizedRow { cells }
}

pub fn normalize(
    payload: &Value,
    report_type: ReportType,
) -> Result<Vec<NormalizedRow>, FormatError> {
    let records = unwrap_records(payload)?;
    if let Some(first) = records.first() {
        log::debug!("First record ({}): {}", payload_kind(first), first);
    }
    Ok(records
        .iter()
        .map(|record| normalize_record(record, report_type))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_bare_list() {
        let payload = json!([{"MemberNo": "M1"}, {"MemberNo": "M2"}]);
        assert_eq!(unwrap_records(&payload).unwrap().len(), 2);
    }

    #[test]
    fn test_unwrap_wrapped_object_ignores_metadata() {
        let payload = json!({"total": 99, "data": [[1, "M1"]], "page": 1});
        let records = unwrap_records(&payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], json!([1, "M1"]));
    }

    #[test]
    fn test_unwrap_unexpected_shapes() {
        assert!(unwrap_records(&json!("oops")).is_err());
        assert!(unwrap_records(&json!({"rows": []})).is_err());
        assert!(unwrap_records(&json!({"data": {"a": 1}})).is_err());
        assert_eq!(
            unwrap_records(&json!(42)),
            Err(FormatError::UnexpectedShape {
                found: "number".to_string()
            })
        );
    }

    #[test]
    fn test_null_data_is_empty_page() {
        let payload = json!({"data": null, "total": 0});
        assert!(unwrap_records(&payload).unwrap().is_empty());
        assert!(normalize(&payload, ReportType::Transactions)
            .unwrap()
            .is_empty());
        assert_eq!(record_count(&payload), 0);
    }

    #[test]
    fn test_record_count() {
        assert_eq!(record_count(&json!([1, 2, 3])), 3);
        assert_eq!(record_count(&json!({"data": [1]})), 1);
        assert_eq!(record_count(&json!({"other": [1]})), 0);
        assert_eq!(record_count(&Value::Null), 0);
    }

    #[test]
    fn test_mapping_missing_keys_become_sentinel() {
        let payload = json!([{"MemberNo": "M1"}, {}]);
        let rows = normalize(&payload, ReportType::Summary).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("MemberNo"), Some("M1"));
        assert_eq!(rows[0].get("CurrentStamps"), Some(UNAVAILABLE));
        assert_eq!(rows[1].values(), vec![UNAVAILABLE; 4]);
    }

    #[test]
    fn test_positional_summary_uses_documented_indices() {
        let row = json!(["M9", 4, 2, 1]);
        let record = Record::from_value(&row);
        let resolve = |f: &str| record.resolve(f, ReportType::Summary).to_string();
        assert_eq!(resolve("MemberNo"), "M9");
        assert_eq!(resolve("CurrentStamps"), "4");
        assert_eq!(resolve("CardsFilled"), "2");
        assert_eq!(resolve("RewardsEarned"), "1");
    }

    #[test]
    fn test_positional_transactions_scenario() {
        let payload = json!({"data": [[101, "M2", 5, 1, "Store A", "12.50", "2024-01-01"]]});
        let rows = normalize(&payload, ReportType::Transactions).unwrap();
        let row = &rows[0];
        assert_eq!(row.get("TxnID"), Some("101"));
        assert_eq!(row.get("MemberNo"), Some("M2"));
        assert_eq!(row.get("Stamps"), Some("5"));
        assert_eq!(row.get("Rewards"), Some("1"));
        assert_eq!(row.get("Store"), Some("Store A"));
        assert_eq!(row.get("Amount"), Some("12.50"));
        assert_eq!(row.get("Date"), Some("2024-01-01"));
    }

    #[test]
    fn test_transaction_names_prefer_transaction_table() {
        // MemberNo and RewardsEarned exist in both tables at different indices
        assert_eq!(positional_index("MemberNo", ReportType::Transactions), Some(1));
        assert_eq!(
            positional_index("RewardsEarned", ReportType::Transactions),
            Some(3)
        );
        assert_eq!(positional_index("MemberNo", ReportType::Summary), Some(0));
    }

    #[test]
    fn test_fallback_follows_precedence() {
        // Not a summary field: found through the transactions table
        assert_eq!(positional_index("StoreName", ReportType::Summary), Some(4));
        // Not a transactions field: found through the summary table
        assert_eq!(
            positional_index("CardsFilled", ReportType::Transactions),
            Some(2)
        );
        assert_eq!(positional_index("Unknown", ReportType::Summary), None);
    }

    #[test]
    fn test_out_of_range_index_is_sentinel() {
        let row = json!([101, "M2"]);
        let record = Record::from_value(&row);
        assert_eq!(
            record.resolve("TxnDate", ReportType::Transactions),
            FieldValue::Unavailable
        );
        assert_eq!(
            record.resolve("MemberNo", ReportType::Transactions),
            FieldValue::Present(&json!("M2"))
        );
    }

    #[test]
    fn test_opaque_records_do_not_abort_others() {
        let payload = json!([7, "text", null, {"MemberNo": "M1"}]);
        let rows = normalize(&payload, ReportType::Summary).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].get("MemberNo"), Some(UNAVAILABLE));
        assert_eq!(rows[3].get("MemberNo"), Some("M1"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("abc")), "abc");
        assert_eq!(display_value(&json!(12.5)), "12.5");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "null");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }
}

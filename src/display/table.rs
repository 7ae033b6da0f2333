use crate::core::normalizer::{NormalizedRow, UNAVAILABLE, is_absent, normalize, payload_kind};
use crate::core::report::ReportType;
use crate::display::TableStyle;
use crate::error::FormatError;
use crate::utils::text::{pad_to_width, truncate_chars};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;
use serde_json::Value;

pub const NO_DATA_MESSAGE: &str = "No data returned from API";
pub const NO_RECORDS_MESSAGE: &str = "No records found";

/// Formatter for report tables
pub struct TableDisplay {
    style: TableStyle,
    max_width: Option<usize>,
    use_colors: bool,
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            style: TableStyle::Plain,
            max_width: Self::detect_terminal_width(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => Some((cols as usize).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Colors are only ever applied on a terminal
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors && atty::is(atty::Stream::Stdout);
        self
    }

    /// Render a report payload, or the message for its empty/invalid state.
    ///
    /// Never fails: a payload of the wrong shape becomes a diagnostic line.
    pub fn render_report(&self, payload: Option<&Value>, report_type: ReportType) -> String {
        let payload = match payload {
            Some(value) if !is_absent(value) => value,
            _ => return NO_DATA_MESSAGE.to_string(),
        };

        let rows = match normalize(payload, report_type) {
            Ok(rows) => rows,
            Err(err @ FormatError::UnexpectedShape { .. }) => {
                log::debug!("Cannot render {} payload", payload_kind(payload));
                return err.to_string();
            }
        };

        if rows.is_empty() {
            return NO_RECORDS_MESSAGE.to_string();
        }

        match self.style {
            TableStyle::Plain => render_plain(&rows, report_type),
            TableStyle::Boxed => self.render_boxed(&rows, report_type),
        }
    }

    fn render_boxed(&self, rows: &[NormalizedRow], report_type: ReportType) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);

        let columns = report_type.schema().columns;
        table.set_header(columns.iter().map(|column| {
            let cell = Cell::new(column.header);
            if self.use_colors {
                cell.add_attribute(Attribute::Bold).fg(Color::Cyan)
            } else {
                cell
            }
        }));

        for row in rows {
            table.add_row(row.iter().map(|(column, value)| {
                let text = match column.max_chars {
                    Some(max) => truncate_chars(value, max),
                    None => value.to_string(),
                };
                let cell = Cell::new(text);
                if self.use_colors && value == UNAVAILABLE {
                    cell.fg(Color::DarkGrey)
                } else {
                    cell
                }
            }));
        }

        table.to_string()
    }

    fn configure_table_width(&self, table: &mut Table) {
        table.set_width(self.table_width());
    }

    fn table_width(&self) -> u16 {
        let width = match self.max_width {
            // Leave room for borders and padding
            Some(width) if width > 20 => width - 6,
            Some(width) => width.max(40),
            None => 80,
        };
        u16::try_from(width).unwrap_or(u16::MAX)
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

fn format_line<'a>(cells: impl Iterator<Item = (usize, &'a str)>) -> String {
    let line = cells
        .map(|(width, text)| pad_to_width(text, width))
        .collect::<Vec<_>>()
        .join(" ");
    line.trim_end().to_string()
}

/// Fixed-width text table: header, dash separator, one line per row
pub fn render_plain(rows: &[NormalizedRow], report_type: ReportType) -> String {
    let schema = report_type.schema();
    let mut out = String::new();

    out.push_str(&format_line(
        schema.columns.iter().map(|c| (c.width, c.header)),
    ));
    out.push('\n');
    out.push_str(&"-".repeat(schema.separator_width));
    out.push('\n');

    for row in rows {
        let cells: Vec<(usize, String)> = row
            .iter()
            .map(|(column, value)| {
                let text = match column.max_chars {
                    Some(max) => truncate_chars(value, max),
                    None => value.to_string(),
                };
                (column.width, text)
            })
            .collect();
        out.push_str(&format_line(
            cells.iter().map(|(width, text)| (*width, text.as_str())),
        ));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain() -> TableDisplay {
        TableDisplay::new()
            .with_style(TableStyle::Plain)
            .with_colors(false)
    }

    #[test]
    fn test_summary_scenario() {
        let payload = json!([{
            "MemberNo": "M1",
            "CurrentStamps": 3,
            "CardsFilled": 1,
            "RewardsEarned": 2
        }]);
        let out = plain().render_report(Some(&payload), ReportType::Summary);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Member#    Stamps   Filled Rewards");
        assert_eq!(lines[1], "-".repeat(40));
        assert_eq!(lines[2], "M1         3        1      2");
    }

    #[test]
    fn test_transactions_truncation() {
        let payload = json!({"data": [[
            101,
            "M7",
            1,
            0,
            "Main Street Store",
            "9.50",
            "2024-01-15T10:00:00"
        ]]});
        let out = plain().render_report(Some(&payload), ReportType::Transactions);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[1], "-".repeat(80));
        assert!(lines[2].contains("Main Street St "));
        assert!(!lines[2].contains("Main Street Sto"));
        assert!(lines[2].ends_with("2024-01-15"));
        assert!(lines[2].starts_with("101          M7"));
    }

    #[test]
    fn test_missing_fields_show_sentinel() {
        let payload = json!([{"MemberNo": "M1"}]);
        let out = plain().render_report(Some(&payload), ReportType::Summary);
        assert_eq!(out.lines().nth(2), Some("M1         N/A      N/A    N/A"));
    }

    #[test]
    fn test_empty_states_are_distinct() {
        let display = plain();
        assert_eq!(
            display.render_report(None, ReportType::Summary),
            NO_DATA_MESSAGE
        );
        assert_eq!(
            display.render_report(Some(&Value::Null), ReportType::Summary),
            NO_DATA_MESSAGE
        );
        assert_eq!(
            display.render_report(Some(&json!({})), ReportType::Summary),
            NO_DATA_MESSAGE
        );
        assert_eq!(
            display.render_report(Some(&json!([])), ReportType::Summary),
            NO_RECORDS_MESSAGE
        );
        assert_eq!(
            display.render_report(Some(&json!({"data": []})), ReportType::Transactions),
            NO_RECORDS_MESSAGE
        );
        assert_eq!(
            display.render_report(Some(&json!({"data": null, "total": 0})), ReportType::Summary),
            NO_RECORDS_MESSAGE
        );
    }

    #[test]
    fn test_unexpected_shape_message() {
        let out = plain().render_report(Some(&json!("oops")), ReportType::Summary);
        assert_eq!(out, "Unexpected API response format: string");

        let out = plain().render_report(Some(&json!({"rows": [1]})), ReportType::Summary);
        assert!(out.starts_with("Unexpected API response format:"));
    }

    #[test]
    fn test_opaque_records_do_not_abort_rendering() {
        let payload = json!([42, {"MemberNo": "M2"}]);
        let out = plain().render_report(Some(&payload), ReportType::Summary);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("N/A"));
        assert!(lines[3].starts_with("M2"));
    }

    #[test]
    fn test_table_width_clamps_to_u16() {
        assert_eq!(plain().with_max_width(100).table_width(), 94);
        assert_eq!(plain().with_max_width(10).table_width(), 40);
        assert_eq!(plain().with_max_width(70_000).table_width(), u16::MAX);
        assert_eq!(plain().with_max_width(usize::MAX).table_width(), u16::MAX);
    }

    #[test]
    fn test_boxed_style() {
        let payload = json!([{"MemberNo": "M1", "CurrentStamps": 3}]);
        let out = TableDisplay::new()
            .with_style(TableStyle::Boxed)
            .with_colors(false)
            .with_max_width(100)
            .render_report(Some(&payload), ReportType::Summary);

        assert!(out.contains("Member#"));
        assert!(out.contains("M1"));
        assert!(out.contains("N/A"));
        assert!(out.contains('│'));
    }
}

//! Report types and their static schemas
//!
//! Every report type owns one [`ReportSchema`]: the endpoint it is fetched
//! from, the field list posted to the API (whose order is also the positional
//! index table for list-shaped rows), the default ordering field, and the
//! display columns. Adding a report type means adding one schema entry.

use crate::error::ValidationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Summary,
    Transactions,
}

/// Order in which positional tables are consulted when the report's own
/// table has no entry for a field.
pub const POSITIONAL_PRECEDENCE: [ReportType; 2] = [ReportType::Transactions, ReportType::Summary];

impl ReportType {
    pub const ALL: [ReportType; 2] = [ReportType::Summary, ReportType::Transactions];

    pub fn schema(self) -> &'static ReportSchema {
        match self {
            ReportType::Summary => &SUMMARY_SCHEMA,
            ReportType::Transactions => &TRANSACTIONS_SCHEMA,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Summary => "summary",
            ReportType::Transactions => "transactions",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(ReportType::Summary),
            "transactions" => Ok(ReportType::Transactions),
            other => Err(ValidationError::InvalidReportType {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    #[default]
    Desc,
}

impl OrderDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            other => Err(ValidationError::InvalidDirection {
                value: other.to_string(),
            }),
        }
    }
}

/// One fixed-width column of the plain table
#[derive(Debug, PartialEq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub field: &'static str,
    pub width: usize,
    /// Values are cut to this many characters before padding
    pub max_chars: Option<usize>,
}

#[derive(Debug)]
pub struct ReportSchema {
    pub report_type: ReportType,
    pub endpoint: &'static str,
    /// Field selection sent to the API; position == index in list-shaped rows
    pub fields: &'static [&'static str],
    pub default_order_by: &'static str,
    pub columns: &'static [ColumnSpec],
    pub separator_width: usize,
}

impl ReportSchema {
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.index_of(field).is_some()
    }
}

pub static SUMMARY_SCHEMA: ReportSchema = ReportSchema {
    report_type: ReportType::Summary,
    endpoint: "/reports/loyalty/stampcards_summary",
    fields: &["MemberNo", "CurrentStamps", "CardsFilled", "RewardsEarned"],
    default_order_by: "MemberNo",
    columns: &[
        ColumnSpec {
            header: "Member#",
            field: "MemberNo",
            width: 10,
            max_chars: None,
        },
        ColumnSpec {
            header: "Stamps",
            field: "CurrentStamps",
            width: 8,
            max_chars: None,
        },
        ColumnSpec {
            header: "Filled",
            field: "CardsFilled",
            width: 6,
            max_chars: None,
        },
        ColumnSpec {
            header: "Rewards",
            field: "RewardsEarned",
            width: 8,
            max_chars: None,
        },
    ],
    separator_width: 40,
};

pub static TRANSACTIONS_SCHEMA: ReportSchema = ReportSchema {
    report_type: ReportType::Transactions,
    endpoint: "/reports/loyalty/stampcards_transactions",
    fields: &[
        "MemberSalesHeaderRecid",
        "MemberNo",
        "SaleStampsEarned",
        "RewardsEarned",
        "StoreName",
        "Amount",
        "TxnDate",
    ],
    default_order_by: "MemberSalesHeaderRecid",
    columns: &[
        ColumnSpec {
            header: "TxnID",
            field: "MemberSalesHeaderRecid",
            width: 12,
            max_chars: None,
        },
        ColumnSpec {
            header: "Member#",
            field: "MemberNo",
            width: 10,
            max_chars: None,
        },
        ColumnSpec {
            header: "Stamps",
            field: "SaleStampsEarned",
            width: 7,
            max_chars: None,
        },
        ColumnSpec {
            header: "Rewards",
            field: "RewardsEarned",
            width: 8,
            max_chars: None,
        },
        ColumnSpec {
            header: "Store",
            field: "StoreName",
            width: 15,
            max_chars: Some(14),
        },
        ColumnSpec {
            header: "Amount",
            field: "Amount",
            width: 10,
            max_chars: None,
        },
        ColumnSpec {
            header: "Date",
            field: "TxnDate",
            width: 12,
            max_chars: Some(10),
        },
    ],
    separator_width: 80,
};

/// A validated request for one page of one report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub report_type: ReportType,
    pub start: u64,
    pub limit: u32,
    pub order_by: String,
    pub order_direction: OrderDirection,
}

impl ReportQuery {
    /// Build a query, replacing an `order_by` that the report type does not
    /// know with the type's default field.
    pub fn new(
        report_type: ReportType,
        start: u64,
        limit: u32,
        order_by: &str,
        order_direction: OrderDirection,
    ) -> Self {
        let schema = report_type.schema();
        let order_by = if schema.has_field(order_by) {
            order_by.to_string()
        } else {
            log::debug!(
                "order_by '{}' is not a {} field, using '{}'",
                order_by,
                report_type,
                schema.default_order_by
            );
            schema.default_order_by.to_string()
        };

        Self {
            report_type,
            start,
            limit,
            order_by,
            order_direction,
        }
    }

    pub fn schema(&self) -> &'static ReportSchema {
        self.report_type.schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_tables() {
        let summary = ReportType::Summary.schema();
        assert_eq!(summary.index_of("MemberNo"), Some(0));
        assert_eq!(summary.index_of("CurrentStamps"), Some(1));
        assert_eq!(summary.index_of("CardsFilled"), Some(2));
        assert_eq!(summary.index_of("RewardsEarned"), Some(3));
        assert_eq!(summary.index_of("StoreName"), None);

        let txn = ReportType::Transactions.schema();
        assert_eq!(txn.index_of("MemberSalesHeaderRecid"), Some(0));
        assert_eq!(txn.index_of("MemberNo"), Some(1));
        assert_eq!(txn.index_of("SaleStampsEarned"), Some(2));
        assert_eq!(txn.index_of("RewardsEarned"), Some(3));
        assert_eq!(txn.index_of("StoreName"), Some(4));
        assert_eq!(txn.index_of("Amount"), Some(5));
        assert_eq!(txn.index_of("TxnDate"), Some(6));
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            ReportType::Summary.schema().endpoint,
            "/reports/loyalty/stampcards_summary"
        );
        assert_eq!(
            ReportType::Transactions.schema().endpoint,
            "/reports/loyalty/stampcards_transactions"
        );
    }

    #[test]
    fn test_invalid_order_by_substituted() {
        let query = ReportQuery::new(
            ReportType::Summary,
            0,
            100,
            "InvalidField",
            OrderDirection::Desc,
        );
        assert_eq!(query.order_by, "MemberNo");

        let query = ReportQuery::new(
            ReportType::Transactions,
            0,
            100,
            "CurrentStamps",
            OrderDirection::Asc,
        );
        assert_eq!(query.order_by, "MemberSalesHeaderRecid");
    }

    #[test]
    fn test_valid_order_by_kept() {
        let query = ReportQuery::new(
            ReportType::Transactions,
            5,
            10,
            "TxnDate",
            OrderDirection::Asc,
        );
        assert_eq!(query.order_by, "TxnDate");
        assert_eq!(query.start, 5);
        assert_eq!(query.order_direction, OrderDirection::Asc);
    }

    #[test]
    fn test_parse_report_type_and_direction() {
        assert_eq!("Summary".parse::<ReportType>(), Ok(ReportType::Summary));
        assert_eq!(
            " transactions ".parse::<ReportType>(),
            Ok(ReportType::Transactions)
        );
        assert!("daily".parse::<ReportType>().is_err());

        assert_eq!("ASC".parse::<OrderDirection>(), Ok(OrderDirection::Asc));
        assert_eq!(OrderDirection::default(), OrderDirection::Desc);
        assert!("up".parse::<OrderDirection>().is_err());
    }

    #[test]
    fn test_report_type_serializes_lowercase() {
        let json = serde_json::to_string(&ReportType::Transactions).unwrap();
        assert_eq!(json, "\"transactions\"");
    }
}

use crate::core::report::ReportQuery;
use serde::Serialize;

/// Name of the token field in the login response
pub const TOKEN_FIELD: &str = "token";

// Authentication models
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub psw: &'a str,
    pub auth_type: &'a str,
}

/// Body posted to both report endpoints
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRequest<'a> {
    pub fields: &'a [&'a str],
    pub order: Vec<(&'a str, &'a str)>,
    pub start: u64,
    pub limit: u32,
}

impl<'a> ReportRequest<'a> {
    pub fn from_query(query: &'a ReportQuery) -> Self {
        Self {
            fields: query.schema().fields,
            order: vec![(query.order_by.as_str(), query.order_direction.as_str())],
            start: query.start,
            limit: query.limit,
        }
    }
}

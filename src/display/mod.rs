pub mod progress;
pub mod table;

pub use progress::{OperationStatus, ProgressSpinner, display_status};
pub use table::TableDisplay;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How report tables are drawn
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    /// Fixed-width columns separated by single spaces
    #[default]
    Plain,
    /// Bordered table sized to the terminal
    Boxed,
}

impl fmt::Display for TableStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStyle::Plain => f.write_str("plain"),
            TableStyle::Boxed => f.write_str("boxed"),
        }
    }
}

impl FromStr for TableStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(TableStyle::Plain),
            "boxed" => Ok(TableStyle::Boxed),
            other => Err(format!("unknown table style '{}'", other)),
        }
    }
}

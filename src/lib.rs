//! Loyalty stamp-card reports from the Redcat API.
//!
//! Logs in, fetches a summary or transaction report, renders it as a
//! fixed-width table and exports the untouched payload to CSV or JSON.
//!
//! ```no_run
//! use stampcard_cli::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> stampcard_cli::Result<()> {
//! let config = Config::load(None)?;
//! let client = RedcatClient::new(config.resolve_base_url(None), config.api.auth_type.clone(), None)?;
//! let session = ReportSession::new(Arc::new(client), &config.reports);
//!
//! let report = session
//!     .generate(&GenerateRequest {
//!         credentials: Credentials::new("user", "secret"),
//!         report_type: ReportType::Summary,
//!         limit: "100".to_string(),
//!         start: 0,
//!         order_by: "MemberNo".to_string(),
//!         order_direction: OrderDirection::Desc,
//!     })
//!     .await?;
//! println!("{}", TableDisplay::new().render_report(Some(&report.payload), report.report_type));
//! session.export(ExportFormat::Csv, None).await?;
//! # Ok(())
//! # }
//! ```

pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Report definitions, normalization, session
pub mod storage; // Configuration and environment credentials

/// Support modules (used across layers)
pub mod api; // Redcat API client
pub mod display; // Table rendering and progress output
pub mod error; // Error handling
pub mod export; // CSV and JSON exporters
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;

pub mod prelude {
    pub use crate::api::client::RedcatClient;
    pub use crate::core::auth::Credentials;
    pub use crate::core::normalizer::{NormalizedRow, normalize};
    pub use crate::core::report::{OrderDirection, ReportQuery, ReportType};
    pub use crate::core::session::{GenerateRequest, ReportSession, RetainedReport};
    pub use crate::display::{TableDisplay, TableStyle};
    pub use crate::export::ExportFormat;
    pub use crate::storage::config::Config;
}

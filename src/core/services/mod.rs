pub mod config_service;
pub mod traits;

pub use config_service::{ConfigKey, ConfigService};
pub use traits::ReportApi;

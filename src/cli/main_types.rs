use crate::core::report::{OrderDirection, ReportType};
use crate::display::TableStyle;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stampcard-cli")]
#[command(about = "Loyalty stamp-card summary and transaction reports from the Redcat API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// API base URL, e.g. https://host/api/v1
    #[arg(long, global = true, env = "STAMPCARD_API_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one report, print it and optionally export it
    Report(ReportArgs),
    /// Interactive session: generate, inspect and export reports
    Shell {
        /// Username (falls back to STAMPCARD_USERNAME, then a prompt)
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// summary or transactions
    pub report_type: ReportType,

    /// Maximum number of records (defaults to reports.default_limit)
    #[arg(short, long, allow_hyphen_values = true)]
    pub limit: Option<String>,

    /// Offset of the first record
    #[arg(long, default_value_t = 0)]
    pub start: u64,

    /// Field to order by; unknown fields fall back to the report default
    #[arg(long)]
    pub order_by: Option<String>,

    /// asc or desc
    #[arg(long, default_value = "desc")]
    pub direction: OrderDirection,

    /// Username (falls back to STAMPCARD_USERNAME, then a prompt)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Export format, may be repeated
    #[arg(long = "export", action = clap::ArgAction::Append)]
    pub export: Vec<ExportFormat>,

    /// Export file path (only with a single --export)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// plain or boxed (defaults to display.style)
    #[arg(long)]
    pub style: Option<TableStyle>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// base-url, auth-type, default-limit, max-limit, auto-export,
        /// export-dir, style or colors
        key: String,
        /// New value
        value: String,
    },
}

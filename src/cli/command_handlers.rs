use crate::cli::main_types::{ConfigCommands, ReportArgs};
use crate::core::auth::Credentials;
use crate::core::services::config_service::{ConfigKey, ConfigService};
use crate::core::session::{GenerateRequest, ReportSession};
use crate::display::{OperationStatus, ProgressSpinner, TableDisplay, display_status};
use crate::error::{AppError, CliError};
use crate::export::ExportFormat;
use crate::storage::config::Config;
use std::path::PathBuf;

/// Print the API URL and default limit the way the shell banner does
pub fn print_config_banner(config: &Config, base_url: &str) {
    println!("{}", config.display.title);
    println!("API URL: {}", base_url);
    println!("Default limit: {}", config.reports.default_limit);
}

#[derive(Default)]
pub struct ReportHandler;

impl ReportHandler {
    pub fn new() -> Self {
        Self
    }

    /// Formats to write after a successful fetch; `auto_export` implies JSON
    pub fn export_formats(args: &ReportArgs, config: &Config) -> Result<Vec<ExportFormat>, AppError> {
        let mut formats: Vec<ExportFormat> = Vec::new();
        for format in &args.export {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        if formats.is_empty() && config.reports.auto_export {
            formats.push(ExportFormat::Json);
        }

        if args.output.is_some() && formats.len() != 1 {
            return Err(CliError::InvalidArguments(
                "--output needs exactly one --export format".to_string(),
            )
            .into());
        }
        Ok(formats)
    }

    pub fn build_request(
        args: &ReportArgs,
        credentials: Credentials,
        config: &Config,
    ) -> GenerateRequest {
        GenerateRequest {
            credentials,
            report_type: args.report_type,
            limit: args
                .limit
                .clone()
                .unwrap_or_else(|| config.reports.default_limit.to_string()),
            start: args.start,
            order_by: args
                .order_by
                .clone()
                .unwrap_or_else(|| args.report_type.schema().default_order_by.to_string()),
            order_direction: args.direction,
        }
    }

    pub async fn handle(
        &self,
        args: ReportArgs,
        session: &ReportSession,
        display: &TableDisplay,
        config: &Config,
    ) -> Result<(), AppError> {
        let formats = Self::export_formats(&args, config)?;
        let credentials = Credentials::collect(args.username.as_deref())?;
        let request = Self::build_request(&args, credentials, config);

        let mut spinner = ProgressSpinner::new(format!("Generating {} report...", args.report_type));
        spinner.start();
        let result = session.generate(&request).await;
        spinner.stop();
        let report = result?;

        println!(
            "{}",
            display.render_report(Some(&report.payload), report.report_type)
        );
        display_status(
            &format!(
                "Report completed! {} records retrieved",
                report.record_count()
            ),
            OperationStatus::Success,
        );

        for format in formats {
            let path = session.export(format, args.output.as_deref()).await?;
            display_status(
                &format!("{} exported successfully: {}", format, path.display()),
                OperationStatus::Success,
            );
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config_service: &mut ConfigService,
        config_path: Option<PathBuf>,
        base_url: &str,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                log::debug!("Showing configuration");
                print_config_banner(config_service.config(), base_url);

                println!("\nCurrent Configuration:");
                println!("=====================");
                for key in ConfigKey::ALL {
                    println!("  {:<14} {}", key.as_str(), config_service.get(key));
                }

                let path = match config_path {
                    Some(path) => path.display().to_string(),
                    None => Config::config_file_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "(unknown)".to_string()),
                };
                println!("\nConfig file: {}", path);
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                log::debug!("Setting config {} = {}", key, value);
                let key: ConfigKey = key.parse()?;
                config_service.set(key, &value)?;
                config_service.save_config(config_path)?;

                display_status(
                    &format!("Set {} to: {}", key, config_service.get(key)),
                    OperationStatus::Success,
                );
                Ok(())
            }
        }
    }
}

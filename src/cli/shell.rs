//! Interactive report shell
//!
//! Each `generate` runs on its own tokio task so the prompt keeps accepting
//! `status`, `help` and friends; a second `generate` or any `export` while
//! one is running is refused by the session.

use crate::core::auth::Credentials;
use crate::core::report::{OrderDirection, ReportType};
use crate::core::session::{GenerateRequest, ReportSession};
use crate::display::{OperationStatus, TableDisplay, display_status};
use crate::error::{AppError, CliError};
use crate::export::ExportFormat;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

const HELP: &str = "\
Commands:
  generate <summary|transactions> [limit] [order_by] [asc|desc]
  export <csv|json> [path]
  status     show whether a report is running or retained
  show       print the retained report again
  help       this text
  quit       leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Generate {
        report_type: ReportType,
        limit: Option<String>,
        order_by: Option<String>,
        direction: Option<OrderDirection>,
    },
    Export {
        format: ExportFormat,
        path: Option<PathBuf>,
    },
    Status,
    Show,
    Help,
    Quit,
    Empty,
}

fn usage(message: &str) -> CliError {
    CliError::InvalidArguments(message.to_string())
}

pub fn parse_command(line: &str) -> Result<ShellCommand, AppError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let rest: Vec<&str> = words.collect();

    let parsed = match command.to_ascii_lowercase().as_str() {
        "generate" | "gen" => {
            let report_type: ReportType = rest
                .first()
                .ok_or_else(|| usage("generate needs a report type (summary or transactions)"))?
                .parse()?;
            if rest.len() > 4 {
                return Err(usage("too many arguments to generate").into());
            }
            ShellCommand::Generate {
                report_type,
                limit: rest.get(1).map(|s| s.to_string()),
                order_by: rest.get(2).map(|s| s.to_string()),
                direction: rest.get(3).map(|s| s.parse()).transpose()?,
            }
        }
        "export" => {
            let format: ExportFormat = rest
                .first()
                .ok_or_else(|| usage("export needs a format (csv or json)"))?
                .parse()
                .map_err(|e: String| usage(&e))?;
            if rest.len() > 2 {
                return Err(usage("too many arguments to export").into());
            }
            ShellCommand::Export {
                format,
                path: rest.get(1).map(PathBuf::from),
            }
        }
        "status" => ShellCommand::Status,
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(usage(&format!("unknown command '{}', try 'help'", other)).into()),
    };
    Ok(parsed)
}

pub struct Shell {
    session: Arc<ReportSession>,
    display: Arc<TableDisplay>,
    credentials: Credentials,
    default_limit: u32,
    pending: Option<JoinHandle<()>>,
}

impl Shell {
    pub fn new(
        session: ReportSession,
        display: TableDisplay,
        credentials: Credentials,
        default_limit: u32,
    ) -> Self {
        Self {
            session: Arc::new(session),
            display: Arc::new(display),
            credentials,
            default_limit,
            pending: None,
        }
    }

    pub async fn run(mut self) -> Result<(), AppError> {
        println!("Type 'help' for commands.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("stampcard> ");
            std::io::stdout()
                .flush()
                .map_err(|e| CliError::Input(format!("Failed to flush stdout: {}", e)))?;

            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => return Err(CliError::Input(format!("Failed to read input: {}", e)).into()),
            };

            match parse_command(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(e) => println!("❌ {}", e.display_friendly()),
            }
        }

        // Let a running report finish before the runtime shuts down
        if let Some(handle) = self.pending.take() {
            let _ = handle.await;
        }
        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand) {
        match command {
            ShellCommand::Generate {
                report_type,
                limit,
                order_by,
                direction,
            } => {
                let request = GenerateRequest {
                    credentials: self.credentials.clone(),
                    report_type,
                    limit: limit.unwrap_or_else(|| self.default_limit.to_string()),
                    start: 0,
                    order_by: order_by
                        .unwrap_or_else(|| report_type.schema().default_order_by.to_string()),
                    order_direction: direction.unwrap_or_default(),
                };
                self.spawn_generate(request);
            }
            ShellCommand::Export { format, path } => {
                match self.session.export(format, path.as_deref()).await {
                    Ok(path) => display_status(
                        &format!("{} exported successfully: {}", format, path.display()),
                        OperationStatus::Success,
                    ),
                    Err(e) => report_error(&e),
                }
            }
            ShellCommand::Status => self.print_status().await,
            ShellCommand::Show => match self.session.retained().await {
                Some(report) => println!(
                    "{}",
                    self.display
                        .render_report(Some(&report.payload), report.report_type)
                ),
                None => println!("No report generated yet"),
            },
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit | ShellCommand::Empty => {}
        }
    }

    fn spawn_generate(&mut self, request: GenerateRequest) {
        let guard = match self.session.try_begin() {
            Ok(guard) => guard,
            Err(e) => {
                report_error(&e.into());
                return;
            }
        };

        println!("Generating {} report...", request.report_type);
        let session = Arc::clone(&self.session);
        let display = Arc::clone(&self.display);

        self.pending = Some(tokio::spawn(async move {
            match session.run(guard, &request).await {
                Ok(report) => {
                    println!();
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
                }
                Err(e) => {
                    println!();
                    report_error(&e);
                }
            }
        }));
    }

    async fn print_status(&self) {
        if self.session.is_busy() {
            display_status("Generating report", OperationStatus::InProgress);
            return;
        }
        match self.session.retained().await {
            Some(report) => println!(
                "Retained {} report: {} records, fetched at {}",
                report.report_type,
                report.record_count(),
                report.fetched_at.format("%Y-%m-%d %H:%M:%S")
            ),
            None => println!("No report generated yet"),
        }
    }
}

fn report_error(error: &AppError) {
    println!(
        "{} {}",
        error.severity().emoji(),
        error.display_friendly()
    );
    if let Some(hint) = error.troubleshooting_hint() {
        println!("   {}", hint);
    }
}

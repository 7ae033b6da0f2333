use crate::api::client::RedcatClient;
use crate::cli::command_handlers::{ConfigHandler, ReportHandler, print_config_banner};
use crate::cli::main_types::{Commands, ConfigCommands};
use crate::cli::shell::Shell;
use crate::core::auth::Credentials;
use crate::core::services::config_service::ConfigService;
use crate::core::session::ReportSession;
use crate::display::{TableDisplay, TableStyle};
use crate::error::AppError;
use crate::storage::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    base_url_override: Option<String>,
}

impl Dispatcher {
    pub fn new(config: Config, config_path: Option<PathBuf>, base_url_override: Option<String>) -> Self {
        Self {
            config,
            config_path,
            base_url_override,
        }
    }

    pub fn base_url(&self) -> String {
        self.config
            .resolve_base_url(self.base_url_override.as_deref())
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Report(args) => {
                log::debug!("Running report command: {:?}", args);
                let session = self.build_session()?;
                let display = self.table_display(args.style);
                ReportHandler::new()
                    .handle(args, &session, &display, &self.config)
                    .await
            }
            Commands::Shell { username } => {
                print_config_banner(&self.config, &self.base_url());
                let credentials = Credentials::collect(username.as_deref())?;
                let shell = Shell::new(
                    self.build_session()?,
                    self.table_display(None),
                    credentials,
                    self.config.reports.default_limit,
                );
                shell.run().await
            }
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    fn handle_config_command(&self, command: ConfigCommands) -> Result<(), AppError> {
        let mut config_service = ConfigService::new(self.config.clone());
        ConfigHandler::new().handle(
            command,
            &mut config_service,
            self.config_path.clone(),
            &self.base_url(),
        )
    }

    fn build_session(&self) -> Result<ReportSession, AppError> {
        let base_url = self.base_url();
        log::debug!("Using API at {}", base_url);

        let client = RedcatClient::new(
            base_url,
            self.config.api.auth_type.clone(),
            self.config.api.timeout_seconds.map(Duration::from_secs),
        )?;
        Ok(ReportSession::new(Arc::new(client), &self.config.reports))
    }

    fn table_display(&self, style: Option<TableStyle>) -> TableDisplay {
        let settings = &self.config.display;
        let display = TableDisplay::new()
            .with_style(style.unwrap_or(settings.style))
            .with_colors(settings.colors);
        match settings.max_width {
            Some(width) => display.with_max_width(width),
            None => display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_dispatcher(base_url: Option<&str>) -> Dispatcher {
        let mut config = Config::default();
        config.api.base_url = Some("http://file.example.test".to_string());
        Dispatcher::new(config, None, base_url.map(str::to_string))
    }

    #[test]
    fn test_base_url_override() {
        assert_eq!(
            create_test_dispatcher(None).base_url(),
            "http://file.example.test"
        );
        assert_eq!(
            create_test_dispatcher(Some("http://flag.example.test")).base_url(),
            "http://flag.example.test"
        );
    }

    #[test]
    fn test_build_session() {
        let session = create_test_dispatcher(None).build_session().unwrap();
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_dispatch_config_show() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let d = Dispatcher::new(
            Config::default(),
            Some(temp_dir.path().join("config.toml")),
            None,
        );
        let result = d
            .dispatch(Commands::Config {
                command: ConfigCommands::Show,
            })
            .await;
        assert!(result.is_ok());
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ValidationError: {0}")]
    Validation(#[from] ValidationError),
    #[error("AuthenticationError: {0}")]
    Auth(#[from] AuthError),
    #[error("FetchError: {0}")]
    Fetch(#[from] FetchError),
    #[error("FormatError: {0}")]
    Format(#[from] FormatError),
    #[error("ExportError: {0}")]
    Export(#[from] ExportError),
    #[error("SessionError: {0}")]
    Session(#[from] SessionError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Input error: {0}")]
    Input(String),
}

/// Raised before any network call is made.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Record limit must be a positive integer (got '{value}')")]
    InvalidLimit { value: String },
    #[error("Record limit {limit} exceeds the configured maximum of {max}")]
    LimitTooLarge { limit: u32, max: u32 },
    #[error("Unknown report type '{value}' (expected 'summary' or 'transactions')")]
    InvalidReportType { value: String },
    #[error("Unknown order direction '{value}' (expected 'asc' or 'desc')")]
    InvalidDirection { value: String },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login request failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Login rejected with status {status}: {body}")]
    Rejected {
        status: u16,
        endpoint: String,
        body: String,
    },
    #[error("Login response is not valid JSON: {message}")]
    InvalidResponse { message: String, body: String },
    #[error("Login response missing expected field '{field}'. Response: {body}")]
    MissingToken { field: String, body: String },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("HTTP error: {status} {body}")]
    Http {
        status: u16,
        endpoint: String,
        body: String,
    },
    #[error("Session token rejected by {endpoint} (status {status})")]
    Unauthorized {
        status: u16,
        endpoint: String,
        body: String,
    },
    #[error("Failed to parse response from {endpoint}: {message}")]
    InvalidJson { endpoint: String, message: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum FormatError {
    #[error("Unexpected API response format: {found}")]
    UnexpectedShape { found: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No data to export")]
    NoData,
    #[error("No records to export")]
    NoRecords,
    #[error("Unexpected data format for export: {0}")]
    Format(#[from] FormatError),
    #[error("Record {index} has {len} positional values, expected {expected}")]
    PositionalRecord {
        index: usize,
        len: usize,
        expected: usize,
    },
    #[error("Record {index} is neither a mapping nor a sequence")]
    UnsupportedRecord { index: usize },
    #[error("Record {index} contains field '{field}' that is not in the header")]
    UnexpectedField { index: usize, field: String },
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("A report is already being generated")]
    Busy,
    #[error("Please generate a report first")]
    NothingToExport,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration key '{key}' is not recognised")]
    UnknownKey { key: String },
    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Validation(_) => ErrorSeverity::Medium,
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Fetch(fetch_error) => match fetch_error {
                FetchError::Unauthorized { .. } => ErrorSeverity::High,
                FetchError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Format(_) => ErrorSeverity::Medium,
            AppError::Export(ExportError::FileIo { .. }) => ErrorSeverity::High,
            AppError::Export(_) => ErrorSeverity::Medium,
            AppError::Session(_) => ErrorSeverity::Low,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Critical,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Auth(AuthError::Rejected { status, .. }) => {
                format!("Login rejected by the server (status {})", status)
            }
            AppError::Fetch(FetchError::Unauthorized { .. }) => {
                "Session token was rejected".to_string()
            }
            AppError::Session(e) => e.to_string(),
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Validation(ValidationError::MissingCredentials) => Some(
                "Pass --username and set STAMPCARD_PASSWORD, or run from a terminal to be prompted"
                    .to_string(),
            ),
            AppError::Auth(AuthError::Transport { .. })
            | AppError::Fetch(FetchError::Transport { .. }) => Some(
                "Check the API URL with 'stampcard-cli config show' and your network connection"
                    .to_string(),
            ),
            AppError::Auth(AuthError::Rejected { .. }) => {
                Some("Check your username, password and the configured auth_type".to_string())
            }
            AppError::Fetch(FetchError::Unauthorized { .. }) => {
                Some("Generate the report again to log in with a fresh token".to_string())
            }
            AppError::Session(SessionError::NothingToExport) => {
                Some("Run 'generate <summary|transactions>' first".to_string())
            }
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Fix or remove ~/.config/stampcard-cli/config.toml".to_string())
            }
            _ => None,
        }
    }
}

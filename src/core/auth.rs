use crate::error::{AppError, CliError, ValidationError};
use crate::storage::credentials::{get_password, get_username};
use rpassword::read_password;
use std::fmt;
use std::io::{self, Write};

/// Username/password pair held only for the current session
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Gather credentials from the flag, the environment, then the terminal.
    ///
    /// Prompts only when stdin is a terminal; otherwise missing values stay
    /// empty and are rejected by [`Credentials::validate`].
    pub fn collect(username_arg: Option<&str>) -> Result<Self, AppError> {
        let interactive = atty::is(atty::Stream::Stdin);

        let username = match username_arg.map(str::to_string).or_else(get_username) {
            Some(name) => name,
            None if interactive => prompt_line("Username: ")?,
            None => String::new(),
        };

        let password = match get_password() {
            Some(password) => password,
            None if interactive => {
                print!("Password: ");
                io::stdout().flush().map_err(|e| {
                    AppError::Cli(CliError::Input(format!("Failed to flush stdout: {}", e)))
                })?;
                read_password().map_err(|e| {
                    AppError::Cli(CliError::Input(format!("Failed to read password: {}", e)))
                })?
            }
            None => String::new(),
        };

        Ok(Self { username, password })
    }

    /// Trimmed copy, rejecting empty values
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let username = self.username.trim();
        let password = self.password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(Credentials::new(username, password))
    }
}

fn prompt_line(prompt: &str) -> Result<String, AppError> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| AppError::Cli(CliError::Input(format!("Failed to flush stdout: {}", e))))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| AppError::Cli(CliError::Input(format!("Failed to read input: {}", e))))?;
    Ok(line.trim().to_string())
}

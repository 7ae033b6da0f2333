//! Credential lookup from the environment
//!
//! Credentials are never written anywhere: they come from command line
//! flags, these environment variables, or an interactive prompt.

use std::env;

pub const USERNAME_ENV: &str = "STAMPCARD_USERNAME";
pub const PASSWORD_ENV: &str = "STAMPCARD_PASSWORD";

/// Username from STAMPCARD_USERNAME if set and non-empty
pub fn get_username() -> Option<String> {
    env::var(USERNAME_ENV).ok().filter(|v| !v.is_empty())
}

/// Password from STAMPCARD_PASSWORD if set and non-empty
pub fn get_password() -> Option<String> {
    env::var(PASSWORD_ENV).ok().filter(|v| !v.is_empty())
}

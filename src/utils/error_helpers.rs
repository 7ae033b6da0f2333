use crate::error::{AuthError, FetchError};

/// Helper functions for standardizing error conversions across the codebase
/// Convert a reqwest transport error on the login endpoint
pub fn convert_login_error(error: reqwest::Error, endpoint: &str) -> AuthError {
    AuthError::Transport {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert a reqwest transport error on a report endpoint
pub fn convert_request_error(error: reqwest::Error, endpoint: &str) -> FetchError {
    FetchError::Transport {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Map a non-success report response to the matching FetchError
pub fn convert_status_error(status: u16, endpoint: &str, body: String) -> FetchError {
    match status {
        401 | 403 => FetchError::Unauthorized {
            status,
            endpoint: endpoint.to_string(),
            body,
        },
        _ => FetchError::Http {
            status,
            endpoint: endpoint.to_string(),
            body,
        },
    }
}

/// Convert a JSON decoding failure on a report endpoint
pub fn convert_json_error(error: serde_json::Error, endpoint: &str) -> FetchError {
    FetchError::InvalidJson {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Helper macro for standardizing map_err patterns
#[macro_export]
macro_rules! map_fetch_error {
    ($result:expr, $endpoint:expr) => {
        $result.map_err(|e| $crate::utils::error_helpers::convert_request_error(e, $endpoint))
    };
}

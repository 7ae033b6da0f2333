use crate::api::models::{LoginRequest, ReportRequest, TOKEN_FIELD};
use crate::core::auth::Credentials;
use crate::core::report::ReportQuery;
use crate::error::{AuthError, FetchError};
use crate::map_fetch_error;
use crate::utils::error_helpers::*;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("stampcard-cli/", env!("CARGO_PKG_VERSION"));
pub const AUTH_HEADER: &str = "X-Redcat-Authtoken";
pub const LOGIN_ENDPOINT: &str = "/login";

#[derive(Debug, Clone)]
pub struct RedcatClient {
    client: Client,
    pub base_url: String,
    pub auth_type: String,
}

impl RedcatClient {
    /// Create a client; `timeout` of None leaves requests unbounded
    pub fn new(
        base_url: String,
        auth_type: String,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| convert_request_error(e, "client_init"))?;

        Ok(RedcatClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_type,
        })
    }

    pub fn build_request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = token {
            request = request.header(AUTH_HEADER, token);
        }

        request
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let endpoint = LOGIN_ENDPOINT;
        let body = LoginRequest {
            username: &credentials.username,
            psw: &credentials.password,
            auth_type: &self.auth_type,
        };

        let response = self
            .build_request(Method::POST, endpoint, None)
            .json(&body)
            .send()
            .await
            .map_err(|e| convert_login_error(e, endpoint))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| convert_login_error(e, endpoint))?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                body: text,
            });
        }

        let value: Value = serde_json::from_str(&text).map_err(|e| AuthError::InvalidResponse {
            message: e.to_string(),
            body: text.clone(),
        })?;

        match value.get(TOKEN_FIELD) {
            Some(Value::String(token)) => Ok(token.clone()),
            _ => Err(AuthError::MissingToken {
                field: TOKEN_FIELD.to_string(),
                body: text,
            }),
        }
    }

    /// Fetch one page of a report; the payload is returned untouched
    pub async fn fetch_report(&self, token: &str, query: &ReportQuery) -> Result<Value, FetchError> {
        let endpoint = query.schema().endpoint;

        let response = map_fetch_error!(
            self.build_request(Method::POST, endpoint, Some(token))
                .json(&ReportRequest::from_query(query))
                .send()
                .await,
            endpoint
        )?;

        let status = response.status();
        let text = map_fetch_error!(response.text().await, endpoint)?;

        if !status.is_success() {
            return Err(convert_status_error(status.as_u16(), endpoint, text));
        }

        serde_json::from_str(&text).map_err(|e| convert_json_error(e, endpoint))
    }
}

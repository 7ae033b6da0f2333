//! Service traits
//!
//! [`ReportApi`] is the seam between the session and the network, so the
//! session logic can be exercised against a canned implementation.

use crate::api::client::RedcatClient;
use crate::core::auth::Credentials;
use crate::core::report::ReportQuery;
use crate::error::{AuthError, FetchError};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ReportApi: Send + Sync {
    /// One login call, returning the session token
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError>;

    /// One report call, returning the raw payload
    async fn fetch_report(&self, token: &str, query: &ReportQuery) -> Result<Value, FetchError>;
}

#[async_trait]
impl ReportApi for RedcatClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        RedcatClient::login(self, credentials).await
    }

    async fn fetch_report(&self, token: &str, query: &ReportQuery) -> Result<Value, FetchError> {
        RedcatClient::fetch_report(self, token, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::{OrderDirection, ReportType};
    use serde_json::json;

    struct MockApi;

    #[async_trait]
    impl ReportApi for MockApi {
        async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
            Ok(format!("token-{}", credentials.username))
        }

        async fn fetch_report(
            &self,
            _token: &str,
            query: &ReportQuery,
        ) -> Result<Value, FetchError> {
            Ok(json!({"data": [], "order": query.order_by}))
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let api: Box<dyn ReportApi> = Box::new(MockApi);
        let token = api.login(&Credentials::new("bob", "pw")).await.unwrap();
        assert_eq!(token, "token-bob");

        let query = ReportQuery::new(ReportType::Summary, 0, 1, "Nope", OrderDirection::Asc);
        let payload = api.fetch_report(&token, &query).await.unwrap();
        assert_eq!(payload["order"], json!("MemberNo"));
    }
}

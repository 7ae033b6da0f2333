//! Report session
//!
//! [`ReportSession`] is the single owner of process-wide mutable state: the
//! busy flag, the cached session token and the last successfully fetched
//! report. Everything else (normalizer, renderer, exporters) is a pure
//! function of the payload it is handed.

use crate::core::auth::Credentials;
use crate::core::normalizer::record_count;
use crate::core::report::{OrderDirection, ReportQuery, ReportType};
use crate::core::services::traits::ReportApi;
use crate::error::{AppError, AuthError, FetchError, SessionError, ValidationError};
use crate::export::{self, ExportFormat};
use crate::storage::config::ReportSettings;
use crate::utils::validation::validate_limit;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};

/// Raw user input for one generate-report run
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub credentials: Credentials,
    pub report_type: ReportType,
    /// Unparsed, validated together with the credentials
    pub limit: String,
    pub start: u64,
    pub order_by: String,
    pub order_direction: OrderDirection,
}

impl GenerateRequest {
    pub fn validate(&self, max_limit: u32) -> Result<(Credentials, ReportQuery), ValidationError> {
        let credentials = self.credentials.validate()?;
        let limit = validate_limit(&self.limit, max_limit)?;
        let query = ReportQuery::new(
            self.report_type,
            self.start,
            limit,
            &self.order_by,
            self.order_direction,
        );
        Ok((credentials, query))
    }
}

/// Payload of the last successful fetch, kept for export
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedReport {
    pub report_type: ReportType,
    pub payload: Value,
    pub fetched_at: DateTime<Local>,
}

impl RetainedReport {
    pub fn record_count(&self) -> usize {
        record_count(&self.payload)
    }
}

/// Clears the busy flag when dropped, whatever way the run ends
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

struct CachedToken {
    credentials: Credentials,
    token: String,
}

pub struct ReportSession {
    api: Arc<dyn ReportApi>,
    max_limit: u32,
    export_dir: Option<PathBuf>,
    in_flight: Arc<AtomicBool>,
    token: Mutex<Option<CachedToken>>,
    retained: RwLock<Option<RetainedReport>>,
}

impl ReportSession {
    pub fn new(api: Arc<dyn ReportApi>, settings: &ReportSettings) -> Self {
        Self {
            api,
            max_limit: settings.max_limit,
            export_dir: settings.export_dir.clone(),
            in_flight: Arc::new(AtomicBool::new(false)),
            token: Mutex::new(None),
            retained: RwLock::new(None),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claim the session for one run, or fail if a run is in progress
    pub fn try_begin(&self) -> Result<InFlightGuard, SessionError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SessionError::Busy)?;
        Ok(InFlightGuard {
            flag: Arc::clone(&self.in_flight),
        })
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<RetainedReport, AppError> {
        let guard = self.try_begin()?;
        self.run(guard, request).await
    }

    /// Validate, authenticate, fetch, retain. The guard is released on return.
    pub async fn run(
        &self,
        _guard: InFlightGuard,
        request: &GenerateRequest,
    ) -> Result<RetainedReport, AppError> {
        log::info!("Validating inputs...");
        let (credentials, query) = request.validate(self.max_limit)?;

        let token = self.token_for(&credentials).await?;

        log::info!(
            "Generating {} report (limit {}, order {} {})...",
            query.report_type,
            query.limit,
            query.order_by,
            query.order_direction
        );
        let payload = match self.api.fetch_report(&token, &query).await {
            Ok(payload) => payload,
            Err(err) => {
                if matches!(err, FetchError::Unauthorized { .. }) {
                    log::warn!("Session token rejected, it will not be reused");
                    *self.token.lock().await = None;
                }
                return Err(err.into());
            }
        };

        let report = RetainedReport {
            report_type: query.report_type,
            payload,
            fetched_at: Local::now(),
        };
        log::info!(
            "Report completed! {} records retrieved",
            report.record_count()
        );

        *self.retained.write().await = Some(report.clone());
        Ok(report)
    }

    async fn token_for(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let mut cached = self.token.lock().await;
        if let Some(entry) = cached.as_ref() {
            if entry.credentials.username == credentials.username
                && entry.credentials.password == credentials.password
            {
                log::debug!("Reusing session token for {}", credentials.username);
                return Ok(entry.token.clone());
            }
        }

        log::info!("Authenticating...");
        let token = self.api.login(credentials).await?;
        log::info!("Authentication successful");

        *cached = Some(CachedToken {
            credentials: credentials.clone(),
            token: token.clone(),
        });
        Ok(token)
    }

    pub async fn retained(&self) -> Option<RetainedReport> {
        self.retained.read().await.clone()
    }

    /// Write the retained payload to `path`, or to a timestamped default name
    pub async fn export(
        &self,
        format: ExportFormat,
        path: Option<&Path>,
    ) -> Result<PathBuf, AppError> {
        if self.is_busy() {
            return Err(SessionError::Busy.into());
        }

        let retained = self.retained.read().await;
        let report = retained.as_ref().ok_or(SessionError::NothingToExport)?;

        let path = match path {
            Some(p) => p.to_path_buf(),
            None => export::default_export_path(
                self.export_dir.as_deref(),
                report.report_type,
                format,
                Local::now(),
            ),
        };

        export::export_payload(format, &report.payload, report.report_type, &path)?;
        log::info!("{} exported successfully: {}", format, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingApi {
        logins: AtomicUsize,
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl ReportApi for CountingApi {
        async fn login(&self, _credentials: &Credentials) -> Result<String, AuthError> {
            self.logins.fetch_add(1, Ordering::SeqCst);
            Ok("tok".to_string())
        }

        async fn fetch_report(
            &self,
            _token: &str,
            _query: &ReportQuery,
        ) -> Result<Value, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(json!([{"MemberNo": "M1"}]))
        }
    }

    fn request(limit: &str) -> GenerateRequest {
        GenerateRequest {
            credentials: Credentials::new("alice", "secret"),
            report_type: ReportType::Summary,
            limit: limit.to_string(),
            start: 0,
            order_by: "MemberNo".to_string(),
            order_direction: OrderDirection::Desc,
        }
    }

    #[test]
    fn test_request_validation_order() {
        let mut req = request("abc");
        req.credentials = Credentials::new("", "");
        assert_eq!(
            req.validate(100).unwrap_err(),
            ValidationError::MissingCredentials
        );

        let req = request("abc");
        assert!(matches!(
            req.validate(100),
            Err(ValidationError::InvalidLimit { .. })
        ));
    }

    #[test]
    fn test_guard_resets_flag() {
        let session = ReportSession::new(
            Arc::new(CountingApi::default()),
            &ReportSettings::default(),
        );
        {
            let _guard = session.try_begin().unwrap();
            assert!(session.is_busy());
            assert_eq!(session.try_begin().unwrap_err(), SessionError::Busy);
        }
        assert!(!session.is_busy());
        assert!(session.try_begin().is_ok());
    }

    #[tokio::test]
    async fn test_validation_error_makes_no_calls() {
        let api = Arc::new(CountingApi::default());
        let session = ReportSession::new(api.clone(), &ReportSettings::default());

        for limit in ["0", "-5", "abc"] {
            let result = session.generate(&request(limit)).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
        assert_eq!(api.logins.load(Ordering::SeqCst), 0);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 0);
        assert!(!session.is_busy());
        assert!(session.retained().await.is_none());
    }

    #[tokio::test]
    async fn test_token_reused_for_same_credentials() {
        let api = Arc::new(CountingApi::default());
        let session = ReportSession::new(api.clone(), &ReportSettings::default());

        session.generate(&request("10")).await.unwrap();
        session.generate(&request("10")).await.unwrap();
        assert_eq!(api.logins.load(Ordering::SeqCst), 1);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 2);

        let mut other = request("10");
        other.credentials = Credentials::new("bob", "secret");
        session.generate(&other).await.unwrap();
        assert_eq!(api.logins.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_export_requires_report() {
        let session = ReportSession::new(
            Arc::new(CountingApi::default()),
            &ReportSettings::default(),
        );
        let result = session.export(ExportFormat::Json, None).await;
        assert!(matches!(
            result,
            Err(AppError::Session(SessionError::NothingToExport))
        ));
    }

    #[tokio::test]
    async fn test_export_rejected_while_busy() {
        let session = ReportSession::new(
            Arc::new(CountingApi::default()),
            &ReportSettings::default(),
        );
        session.generate(&request("10")).await.unwrap();

        let _guard = session.try_begin().unwrap();
        let result = session.export(ExportFormat::Csv, None).await;
        assert!(matches!(result, Err(AppError::Session(SessionError::Busy))));
    }
}

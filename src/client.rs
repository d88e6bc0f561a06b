//! Check-in backend HTTP client.

use crate::config::ServerConfig;
use crate::error::{AppError, Result};
use crate::models::{AnalyticsData, CheckInRequest, StudentRecord, StudentWire};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// Fallback message when a check-in fails without a usable server message.
pub const CHECK_IN_FAILED: &str = "Check-in failed";

/// Check-in backend client.
///
/// Wraps the four remote operations the kiosk needs. Cloning is cheap; clones share
/// the connection pool.
#[derive(Clone)]
pub struct CheckInClient {
    client: Client,
    base_url: String,
}

impl CheckInClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `config` - Base URL (e.g. "http://localhost:8080/api") and request timeout
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL all endpoints hang off.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every check-in record, in the order the backend returns them.
    pub async fn get_students(&self) -> Result<Vec<StudentRecord>> {
        let url = format!("{base}/students", base = self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!("GET {url} returned {}", response.status());
            return Err(AppError::FetchStudents);
        }

        let wire: Vec<StudentWire> = response.json().await?;
        debug!("Fetched {} student records", wire.len());
        Ok(wire.into_iter().map(StudentRecord::from).collect())
    }

    /// Fetch the daily check-in series. Order is preserved.
    pub async fn get_analytics(&self) -> Result<Vec<AnalyticsData>> {
        let url = format!("{base}/analytics", base = self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!("GET {url} returned {}", response.status());
            return Err(AppError::FetchAnalytics);
        }

        Ok(response.json().await?)
    }

    /// Submit a check-in and return the stored record.
    ///
    /// A non-success response becomes [`AppError::Rejected`] when the body carries a
    /// `detail` string, otherwise [`AppError::CheckInFailed`].
    pub async fn save_student(&self, name: &str, email: &str) -> Result<StudentRecord> {
        let url = format!("{base}/checkin", base = self.base_url);
        let body = CheckInRequest {
            name: name.to_string(),
            email: email.to_string(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(check_in_error(status, &text));
        }

        let wire: StudentWire = response.json().await?;
        Ok(wire.into())
    }

    /// URL of the server-generated CSV export.
    ///
    /// Handing this to the system browser is the fire-and-forget export path.
    pub fn export_url(&self) -> String {
        format!("{base}/export", base = self.base_url)
    }

    /// Download the CSV export body.
    pub async fn download_export(&self) -> Result<Vec<u8>> {
        let url = self.export_url();
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::export(format!("server returned {}", response.status())));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Build the error for a failed check-in from status and raw body.
///
/// JSON bodies yield their `detail` string or the generic message; anything that
/// is not JSON yields the status text.
fn check_in_error(status: StatusCode, body: &str) -> AppError {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => match json.get("detail").and_then(|d| d.as_str()) {
            Some(detail) if !detail.is_empty() => AppError::Rejected(detail.to_string()),
            _ => AppError::CheckInFailed(CHECK_IN_FAILED.to_string()),
        },
        Err(_) => {
            let message = status.canonical_reason().unwrap_or(CHECK_IN_FAILED);
            AppError::CheckInFailed(message.to_string())
        }
    }
}

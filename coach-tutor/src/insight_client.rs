//! Insight service client
//!
//! Posts the current position to `POST /api/chess/insights`. The client never
//! fails: transport errors, non-2xx responses and unreadable bodies all
//! resolve to [`Insight::unavailable`] with the reason in `error`.

use async_trait::async_trait;
use coach_common::insight::INSIGHTS_PATH;
use coach_common::{Insight, InsightRequest};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("coach-tutor/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Source of coach commentary for a position
///
/// Implementations must always produce an insight; failures are reported
/// through [`Insight::error`].
#[async_trait]
pub trait InsightSource: Send + Sync {
    async fn fetch(&self, request: &InsightRequest) -> Insight;
}

/// HTTP client for the insight service
pub struct HttpInsightClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpInsightClient {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:5780`
    pub fn new(base_url: &str) -> reqwest::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), INSIGHTS_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, request: &InsightRequest) -> Result<Insight, String> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            return Err(format!("{}: {}", status.as_u16(), text));
        }

        response.json::<Insight>().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl InsightSource for HttpInsightClient {
    async fn fetch(&self, request: &InsightRequest) -> Insight {
        debug!(endpoint = %self.endpoint, fen = %request.fen, "Requesting insight");

        match self.request(request).await {
            Ok(insight) => insight,
            Err(e) => {
                warn!("Error fetching chess insights: {}", e);
                Insight::unavailable(e)
            }
        }
    }
}

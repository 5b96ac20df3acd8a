mod types;

pub use types::{
    CreateScheduleRequest, ErrorBody, GenerateRequest, GeneratedContent, PlatformStatus,
    PostReceipt, PublishRequest, ScheduleReceipt,
};

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Platform;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    // The backend's human-readable message, surfaced verbatim.
    #[error("{message}")]
    Backend { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

const MOCK_LATENCY: Duration = Duration::from_millis(250);

/// JSON client for the Postdeck scheduling API. In mock mode every call
/// succeeds with canned data after a short delay, so the whole client works
/// without a backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    mock: bool,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
            mock: false,
        }
    }

    /// Simulates all operations without a backend.
    pub fn mock() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: String::new(),
            token: None,
            mock: true,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.mock
    }

    pub async fn generate_content(
        &self,
        subject: &str,
        tone: Option<&str>,
    ) -> Result<GeneratedContent> {
        if self.mock {
            tokio::time::sleep(MOCK_LATENCY).await;
            return Ok(GeneratedContent {
                title: subject.to_string(),
                body: format!(
                    "{subject} — here's what you need to know. (generated draft{})",
                    tone.map(|t| format!(", tone: {t}")).unwrap_or_default()
                ),
            });
        }

        let request = GenerateRequest {
            subject: subject.to_string(),
            tone: tone.map(str::to_string),
        };
        self.post_json("/v1/content/generate", &request).await
    }

    pub async fn publish_post(&self, request: &PublishRequest) -> Result<PostReceipt> {
        if self.mock {
            tokio::time::sleep(MOCK_LATENCY).await;
            return Ok(PostReceipt {
                id: "post-mock-1".to_string(),
                post_urls: Vec::new(),
            });
        }

        self.post_json("/v1/posts/publish", request).await
    }

    pub async fn create_schedule(&self, request: &CreateScheduleRequest) -> Result<ScheduleReceipt> {
        if self.mock {
            tokio::time::sleep(MOCK_LATENCY).await;
            return Ok(ScheduleReceipt {
                id: "sched-mock-1".to_string(),
            });
        }

        self.post_json("/v1/schedules", request).await
    }

    pub async fn connected_platforms(&self) -> Result<Vec<PlatformStatus>> {
        if self.mock {
            return Ok(Platform::ALL
                .iter()
                .map(|&platform| PlatformStatus {
                    platform,
                    connected: true,
                })
                .collect());
        }

        self.get_json("/v1/platforms/status").await
    }

    /// Fire-and-forget audit event. Failures are logged and never interrupt
    /// the primary flow.
    pub fn audit(&self, action: &'static str, detail: String) {
        if self.mock {
            debug!(action, detail, "audit event (mock)");
            return;
        }

        let http = self.http.clone();
        let url = format!("{}/v1/audit", self.base_url);
        let token = self.token.clone();
        tokio::spawn(async move {
            let mut req = http
                .post(&url)
                .json(&serde_json::json!({ "action": action, "detail": detail }));
            if let Some(token) = token {
                req = req.bearer_auth(token);
            }
            if let Err(e) = req.send().await {
                warn!("audit event '{action}' failed: {e}");
            }
        });
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let mut req = self.http.post(&url).json(body);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        Self::decode(req.send().await?).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let mut req = self.http.get(&url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        Self::decode(req.send().await?).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

#![allow(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use contact_flow::{ContactRecord, GENERIC_FAILURE, SubmissionGateway, SubmissionOutcome};

/// Default bound on one submission attempt. The wizard has no caller-side
/// cancellation, so the request itself must not hang forever.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the messaging endpoint.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors raised while constructing the gateway client.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// JSON body sent to the messaging endpoint.
#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    name: &'a str,
    email: &'a str,
    reason: &'a str,
    message: &'a str,
}

/// Success body; only `messageId` is relied upon.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(rename = "messageId")]
    message_id: String,
}

/// Failure body; `message` is reported verbatim when present.
#[derive(Debug, Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
}

/// [`SubmissionGateway`] implementation performing exactly one POST per
/// attempt. Every failure mode is normalized into the `Failure` variant;
/// nothing escapes this boundary.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: Url,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionGateway for HttpGateway {
    async fn submit(&self, record: &ContactRecord) -> SubmissionOutcome {
        let body = SubmitRequest {
            name: &record.name,
            email: &record.email,
            reason: record.reason.map(|reason| reason.id()).unwrap_or_default(),
            message: &record.message,
        };
        debug!(endpoint = %self.endpoint, "submitting contact message");

        let response = match self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "submission transport failure");
                return generic_failure();
            }
        };

        let status = response.status();
        match response.bytes().await {
            Ok(bytes) => normalize(status, &bytes),
            Err(error) => {
                warn!(%error, "failed to read submission response");
                generic_failure()
            }
        }
    }
}

/// Maps a wire response onto the submission outcome contract: 2xx with a
/// `messageId` is a success, anything else is a failure carrying the body's
/// `message` field when present.
pub fn normalize(status: StatusCode, body: &[u8]) -> SubmissionOutcome {
    if status.is_success() {
        match serde_json::from_slice::<SubmitResponse>(body) {
            Ok(parsed) => SubmissionOutcome::Success {
                message_id: parsed.message_id,
            },
            Err(error) => {
                warn!(%error, "success response without a usable messageId");
                generic_failure()
            }
        }
    } else {
        let reason = serde_json::from_slice::<FailureBody>(body)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        warn!(status = %status, reason = %reason, "submission rejected by the endpoint");
        SubmissionOutcome::Failure { reason }
    }
}

fn generic_failure() -> SubmissionOutcome {
    SubmissionOutcome::Failure {
        reason: GENERIC_FAILURE.to_string(),
    }
}

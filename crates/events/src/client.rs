//! HTTP client for the orchestrator's event and registration APIs.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::event::{JobEvent, SendAck};
use crate::sender::{DeliveryError, EventSender};
use crate::serve::RegisterRequest;

/// HTTP request timeout for a single call to the orchestrator.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const SIGNING_KEY_PREFIX: &str = "signkey-";

/// Process-wide client handed out by [`OrchestratorClient::shared`].
static SHARED: OnceLock<Arc<OrchestratorClient>> = OnceLock::new();

/// Where and how to reach the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Base URL of the orchestrator's event ingest host.
    pub base_url: String,
    /// Base URL of the orchestrator's management API, where functions are
    /// registered. The same host as `base_url` for the dev server.
    pub api_url: String,
    /// Key that authorizes sending events for this app.
    pub event_key: String,
    /// Key used to authenticate function registration, if required.
    pub signing_key: Option<String>,
    /// Application id under which functions are registered.
    pub app_id: String,
}

/// Sends events to the orchestrator over HTTP.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools
/// connections.
#[derive(Debug)]
pub struct OrchestratorClient {
    http: reqwest::Client,
    config: OrchestratorConfig,
}

impl OrchestratorClient {
    pub fn new(config: OrchestratorConfig) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DeliveryError::Client(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Return the process-wide client, building it on the first call.
    ///
    /// Later calls ignore `config` and return the client built first.
    pub fn shared(config: OrchestratorConfig) -> Result<Arc<Self>, DeliveryError> {
        if let Some(client) = SHARED.get() {
            return Ok(Arc::clone(client));
        }
        let client = Arc::new(Self::new(config)?);
        Ok(Arc::clone(SHARED.get_or_init(|| client)))
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    fn event_url(&self) -> String {
        format!(
            "{}/e/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.event_key
        )
    }

    fn register_url(&self) -> String {
        format!("{}/fn/register", self.config.api_url.trim_end_matches('/'))
    }

    /// Register this app's functions so the orchestrator knows where to
    /// deliver their triggering events.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), DeliveryError> {
        let mut builder = self.http.post(self.register_url()).json(request);
        if let Some(key) = &self.config.signing_key {
            builder = builder.bearer_auth(hash_signing_key(key)?);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::HttpStatus(response.status().as_u16()));
        }

        tracing::info!(
            app_id = %request.app_name,
            function_count = request.functions.len(),
            "Registered functions with orchestrator"
        );
        Ok(())
    }
}

/// The orchestrator never receives the signing key itself, only
/// `signkey-<env>-` followed by the SHA-256 hex digest of the hex-decoded key.
fn hash_signing_key(key: &str) -> Result<String, DeliveryError> {
    let split = key
        .strip_prefix(SIGNING_KEY_PREFIX)
        .and_then(|rest| rest.find('-'))
        .map(|i| SIGNING_KEY_PREFIX.len() + i + 1)
        .unwrap_or(0);
    let (prefix, secret) = key.split_at(split);

    let bytes = decode_hex(secret)
        .ok_or_else(|| DeliveryError::Client("signing key is not valid hex".to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{prefix}{:x}", hasher.finalize()))
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.is_empty() || s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| s.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}

#[async_trait]
impl EventSender for OrchestratorClient {
    async fn send(&self, event: JobEvent) -> Result<SendAck, DeliveryError> {
        let response = self
            .http
            .post(self.event_url())
            .json(&[&event])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(event = %event.name, status, "Orchestrator rejected event");
            return Err(DeliveryError::HttpStatus(status));
        }

        let ack: SendAck = response.json().await?;
        tracing::debug!(event = %event.name, ids = ?ack.ids, "Event accepted for delivery");
        Ok(ack)
    }
}

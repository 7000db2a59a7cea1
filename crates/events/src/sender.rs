//! Publish seam between the request handlers and the orchestrator.

use async_trait::async_trait;

use crate::event::{JobEvent, SendAck};

/// Error returned when the orchestrator does not accept an event.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The orchestrator returned a non-2xx status code.
    #[error("Orchestrator returned HTTP {0}")]
    HttpStatus(u16),

    /// The client could not be constructed from its configuration.
    #[error("Orchestrator client misconfigured: {0}")]
    Client(String),
}

/// Anything that can hand a [`JobEvent`] to the orchestrator.
///
/// `send` resolves once the event is accepted for delivery; it never waits
/// for the triggered function to run. Implementations do not retry.
#[async_trait]
pub trait EventSender: Send + Sync {
    async fn send(&self, event: JobEvent) -> Result<SendAck, DeliveryError>;
}

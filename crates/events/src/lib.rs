//! Client side of the external job orchestrator.
//!
//! This crate only hands events over; delivery, retries and execution of the
//! triggered functions all happen inside the orchestrator.
//!
//! - [`JobEvent`] -- a named event with a JSON payload.
//! - [`EventSender`] -- the publish seam used by the API layer.
//! - [`OrchestratorClient`] -- HTTP implementation of [`EventSender`].
//! - [`serve`] -- manifest of the functions this app registers with the
//!   orchestrator, backing the serve route.

pub mod client;
pub mod event;
pub mod sender;
pub mod serve;

pub use client::{OrchestratorClient, OrchestratorConfig};
pub use event::{JobEvent, SendAck};
pub use sender::{DeliveryError, EventSender};
pub use serve::{FunctionManifest, ServeHandler};

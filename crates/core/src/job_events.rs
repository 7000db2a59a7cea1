//! Names and payload literals for the jobs this backend hands to the
//! external orchestrator.
//!
//! `createWorkflow` currently enqueues a fixed placeholder event rather than
//! anything derived from caller input, so its name and payload live here as
//! constants instead of being threaded through the request.

/// Event published by `createWorkflow`.
pub const HELLO_EVENT_NAME: &str = "test/hello.wordl";

/// Fixed `email` field carried in the [`HELLO_EVENT_NAME`] payload.
pub const HELLO_EVENT_EMAIL: &str = "janedoe@example.com";

/// Acknowledgement message returned once the event is accepted for delivery.
pub const JOB_QUEUED_MESSAGE: &str = "Job queued";

/// Id of the orchestrator function triggered by [`HELLO_EVENT_NAME`].
///
/// The function body runs inside the orchestrator's worker, not here.
pub const EXECUTE_FUNCTION_ID: &str = "execute";

//! Function manifest exposed on the orchestrator serve route.
//!
//! The orchestrator discovers which functions an app provides by calling its
//! serve URL. This process only describes the functions (introspection) and
//! pushes that description to the orchestrator (registration). Function
//! bodies run in the orchestrator's worker, so invocation is not served here.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use nodeflow_core::job_events::{EXECUTE_FUNCTION_ID, HELLO_EVENT_NAME};

use crate::client::OrchestratorClient;
use crate::sender::DeliveryError;

/// Every function is served as a single step with this id.
const ENTRY_STEP_ID: &str = "step";
/// Registration protocol version.
const REGISTER_PROTOCOL_VERSION: &str = "0.1";

/// Event that triggers a function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trigger {
    pub event: String,
}

/// A function the orchestrator runs on behalf of this app.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionManifest {
    pub id: String,
    pub name: String,
    pub triggers: Vec<Trigger>,
}

impl FunctionManifest {
    pub fn new(id: impl Into<String>, trigger_event: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            triggers: vec![Trigger {
                event: trigger_event.into(),
            }],
        }
    }

    /// The `execute` function, triggered by the event `createWorkflow` sends.
    pub fn execute() -> Self {
        Self::new(EXECUTE_FUNCTION_ID, HELLO_EVENT_NAME)
    }
}

/// How the orchestrator reaches a step: an HTTP call back to the serve URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRuntime {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub id: String,
    pub name: String,
    pub runtime: StepRuntime,
}

/// A function as the orchestrator stores it: ids are scoped by app and each
/// function has one entry step pointing back at the serve URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisteredFunction {
    pub id: String,
    pub name: String,
    pub triggers: Vec<Trigger>,
    pub steps: BTreeMap<String, Step>,
}

impl RegisteredFunction {
    pub fn from_manifest(manifest: &FunctionManifest, app_id: &str, serve_url: &str) -> Self {
        let id = format!("{app_id}-{}", manifest.id);
        let step = Step {
            id: ENTRY_STEP_ID.to_string(),
            name: ENTRY_STEP_ID.to_string(),
            runtime: StepRuntime {
                kind: "http".to_string(),
                url: format!("{serve_url}?fnId={id}&stepId={ENTRY_STEP_ID}"),
            },
        };
        Self {
            id,
            name: manifest.name.clone(),
            triggers: manifest.triggers.clone(),
            steps: BTreeMap::from([(ENTRY_STEP_ID.to_string(), step)]),
        }
    }
}

/// Body of a registration call, in the orchestrator's wire format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Public URL the orchestrator should call back.
    pub url: String,
    pub deploy_type: String,
    pub framework: String,
    pub app_name: String,
    pub functions: Vec<RegisteredFunction>,
    pub sdk: String,
    pub v: String,
}

/// Response to a GET on the serve route.
#[derive(Debug, Clone, Serialize)]
pub struct Introspection {
    pub app_id: String,
    pub function_count: usize,
    pub has_event_key: bool,
    pub has_signing_key: bool,
    pub functions: Vec<FunctionManifest>,
}

/// Answers the orchestrator's serve-route calls for this app.
pub struct ServeHandler {
    client: Arc<OrchestratorClient>,
    functions: Vec<FunctionManifest>,
}

impl ServeHandler {
    pub fn new(client: Arc<OrchestratorClient>, functions: Vec<FunctionManifest>) -> Self {
        Self { client, functions }
    }

    /// Describe this app without contacting the orchestrator.
    pub fn introspect(&self) -> Introspection {
        let config = self.client.config();
        Introspection {
            app_id: config.app_id.clone(),
            function_count: self.functions.len(),
            has_event_key: !config.event_key.is_empty(),
            has_signing_key: config.signing_key.is_some(),
            functions: self.functions.clone(),
        }
    }

    /// Push the function manifest to the orchestrator.
    pub async fn register(&self, serve_url: &str) -> Result<(), DeliveryError> {
        let app_id = &self.client.config().app_id;
        let request = RegisterRequest {
            url: serve_url.to_string(),
            deploy_type: "ping".to_string(),
            framework: "axum".to_string(),
            app_name: app_id.clone(),
            functions: self
                .functions
                .iter()
                .map(|f| RegisteredFunction::from_manifest(f, app_id, serve_url))
                .collect(),
            sdk: format!("rust:{}", env!("CARGO_PKG_VERSION")),
            v: REGISTER_PROTOCOL_VERSION.to_string(),
        };
        self.client.register(&request).await
    }
}

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, get_current_timestamp, EncodingKey, Header};
use tower::ServiceExt;

use nodeflow_api::auth::jwt::JwtConfig;
use nodeflow_api::config::{AppEnv, ServerConfig};
use nodeflow_api::router::build_app_router;
use nodeflow_api::state::AppState;
use nodeflow_db::models::workflow::Workflow;
use nodeflow_db::WorkflowStore;
use nodeflow_events::{
    DeliveryError, EventSender, FunctionManifest, JobEvent, OrchestratorClient,
    OrchestratorConfig, SendAck, ServeHandler,
};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        app_env: AppEnv::Test,
        database_url: "postgres://unused/unused".to_string(),
        db_max_connections: 1,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
        },
        checkout_success_url: None,
        orchestrator: OrchestratorConfig {
            // Nothing listens here; tests never reach the real client.
            base_url: "http://127.0.0.1:9".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
            event_key: "test".to_string(),
            signing_key: None,
            app_id: "nodeflow-test".to_string(),
        },
        public_url: "http://localhost:3000".to_string(),
    }
}

/// In-memory [`WorkflowStore`] that counts every call.
#[derive(Default)]
pub struct RecordingStore {
    rows: Vec<Workflow>,
    fail: bool,
    calls: AtomicUsize,
}

impl RecordingStore {
    pub fn with_rows(rows: Vec<Workflow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkflowStore for RecordingStore {
    async fn list_workflows(&self) -> Result<Vec<Workflow>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self.rows.clone())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

/// [`EventSender`] that records events instead of sending them.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<JobEvent>>,
    fail: bool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<JobEvent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSender for RecordingSender {
    async fn send(&self, event: JobEvent) -> Result<SendAck, DeliveryError> {
        if self.fail {
            return Err(DeliveryError::HttpStatus(503));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(event);
        Ok(SendAck {
            ids: vec![format!("evt-{}", sent.len())],
        })
    }
}

/// Build the full application router around the given doubles.
pub fn build_test_app(store: Arc<RecordingStore>, sender: Arc<RecordingSender>) -> Router {
    let config = test_config();
    let client = Arc::new(
        OrchestratorClient::new(config.orchestrator.clone()).expect("client should build"),
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        workflows: store,
        events: sender,
        serve: Arc::new(ServeHandler::new(client, vec![FunctionManifest::execute()])),
    };

    build_app_router(state, &config)
}

/// A session token for `user_id`, signed the way the auth provider signs them.
pub fn session_token(user_id: &str) -> String {
    let now = get_current_timestamp() as i64;
    let claims = serde_json::json!({ "sub": user_id, "exp": now + 900, "iat": now });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(test_config().jwt.secret.as_bytes()),
    )
    .expect("token encoding should succeed")
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn workflow(id: i64, name: &str) -> Workflow {
    let now = chrono::Utc::now();
    Workflow {
        id,
        name: name.to_string(),
        user_id: "user_owner".to_string(),
        created_at: now,
        updated_at: now,
    }
}

use std::str::FromStr;

use nodeflow_db::{PoolSettings, DEFAULT_MAX_CONNECTIONS};
use nodeflow_events::OrchestratorConfig;

use crate::auth::jwt::JwtConfig;

/// Orchestrator dev server address, used when running locally.
const DEV_ORCHESTRATOR_URL: &str = "http://localhost:8288";
/// Hosted orchestrator event ingest host.
const CLOUD_EVENT_URL: &str = "https://inn.gs";
/// Hosted orchestrator management API, where functions are registered.
const CLOUD_API_URL: &str = "https://api.inngest.com";
/// Event key accepted by the local dev server.
const DEV_EVENT_KEY: &str = "local";

/// Deployment environment, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl AppEnv {
    pub fn is_development(self) -> bool {
        self == AppEnv::Development
    }
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            "test" => Ok(AppEnv::Test),
            other => Err(format!("unknown APP_ENV '{other}'")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Values that only make sense locally (dev orchestrator, placeholder event
/// key) are filled in only when `APP_ENV` is `development`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub app_env: AppEnv,
    /// Postgres connection string. Required.
    pub database_url: String,
    pub db_max_connections: u32,
    /// Session token validation settings.
    pub jwt: JwtConfig,
    /// Where the billing provider sends users after checkout.
    pub checkout_success_url: Option<String>,
    pub orchestrator: OrchestratorConfig,
    /// Externally reachable base URL of this server, used as the
    /// orchestrator's callback address.
    pub public_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                   |
    /// |---------------------------|-------------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                                 |
    /// | `PORT`                    | `3000`                                    |
    /// | `CORS_ORIGINS`            | `http://localhost:3000`                   |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                      |
    /// | `APP_ENV`                 | `development`                             |
    /// | `DATABASE_URL`            | **required**                              |
    /// | `DB_MAX_CONNECTIONS`      | `10`                                      |
    /// | `CHECKOUT_SUCCESS_URL`    | unset                                     |
    /// | `ORCHESTRATOR_BASE_URL`   | dev server in development, else `inn.gs`  |
    /// | `ORCHESTRATOR_API_URL`    | dev server in development, else cloud API |
    /// | `ORCHESTRATOR_EVENT_KEY`  | `local` in development, else **required** |
    /// | `ORCHESTRATOR_SIGNING_KEY`| unset                                     |
    /// | `ORCHESTRATOR_APP_ID`     | `nodeflow`                                |
    /// | `PUBLIC_URL`              | `http://localhost:{PORT}`                 |
    ///
    /// # Panics
    ///
    /// Panics on missing required variables or unparseable values. The
    /// server cannot run without them.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_env: AppEnv = std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".into())
            .parse()
            .unwrap_or_else(|e| panic!("APP_ENV is invalid: {e}"));

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in the environment");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let jwt = JwtConfig::from_env();

        let checkout_success_url = std::env::var("CHECKOUT_SUCCESS_URL")
            .ok()
            .filter(|s| !s.is_empty());

        let orchestrator = orchestrator_from_env(app_env);

        let public_url = std::env::var("PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_env,
            database_url,
            db_max_connections,
            jwt,
            checkout_success_url,
            orchestrator,
            public_url,
        }
    }

    /// Pool settings derived from this config. SQL statements are logged in
    /// development only.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            log_statements: self.app_env.is_development(),
        }
    }

    /// URL the orchestrator calls back on.
    pub fn serve_url(&self) -> String {
        format!("{}/api/inngest", self.public_url.trim_end_matches('/'))
    }
}

/// Event host and API host used when the env vars are unset. The dev server
/// answers both on one address.
fn default_orchestrator_urls(app_env: AppEnv) -> (&'static str, &'static str) {
    if app_env.is_development() {
        (DEV_ORCHESTRATOR_URL, DEV_ORCHESTRATOR_URL)
    } else {
        (CLOUD_EVENT_URL, CLOUD_API_URL)
    }
}

fn orchestrator_from_env(app_env: AppEnv) -> OrchestratorConfig {
    let (default_base, default_api) = default_orchestrator_urls(app_env);
    let base_url =
        std::env::var("ORCHESTRATOR_BASE_URL").unwrap_or_else(|_| default_base.into());
    let api_url = std::env::var("ORCHESTRATOR_API_URL").unwrap_or_else(|_| default_api.into());

    let event_key = match std::env::var("ORCHESTRATOR_EVENT_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ if app_env.is_development() => DEV_EVENT_KEY.into(),
        _ => panic!("ORCHESTRATOR_EVENT_KEY must be set outside development"),
    };

    let signing_key = std::env::var("ORCHESTRATOR_SIGNING_KEY")
        .ok()
        .filter(|s| !s.is_empty());

    let app_id = std::env::var("ORCHESTRATOR_APP_ID").unwrap_or_else(|_| "nodeflow".into());

    OrchestratorConfig {
        base_url,
        api_url,
        event_key,
        signing_key,
        app_id,
    }
}

//! Session guard for protected procedures.
//!
//! [`require_auth`] is layered onto a router with `route_layer`, so it runs
//! before any handler in that router and knows nothing about what the
//! handler does. Handlers read the caller through `Extension<AuthUser>`.

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use nodeflow_core::error::CoreError;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Cookie the auth provider stores the session token in.
pub const SESSION_COOKIE: &str = "session_token";

/// Authenticated caller attached to the request context.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The auth provider's user id (from `claims.sub`).
    pub user_id: String,
}

/// Reject the request unless it carries a valid session credential.
///
/// On success the [`AuthUser`] is inserted into the request extensions and
/// the inner handler runs. On failure the handler is never called.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), &state.config.jwt).inspect_err(|e| {
        tracing::debug!(path = %request.uri().path(), reason = %e, "Rejected unauthenticated call");
    })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Resolve the caller from the `Authorization: Bearer` header, falling back
/// to the session cookie.
pub fn authenticate(headers: &HeaderMap, config: &JwtConfig) -> Result<AuthUser, AppError> {
    let token = bearer_token(headers)?
        .or_else(|| session_cookie(headers))
        .ok_or_else(|| unauthenticated("Missing session credential"))?;

    let claims = validate_token(token, config)
        .map_err(|_| unauthenticated("Invalid or expired session"))?;

    Ok(AuthUser {
        user_id: claims.sub,
    })
}

/// `Ok(None)` when no header is present, an error when it is malformed.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| unauthenticated("Invalid Authorization header"))?;
    value.strip_prefix("Bearer ").map(Some).ok_or_else(|| {
        unauthenticated("Invalid Authorization format. Expected: Bearer <token>")
    })
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

fn unauthenticated(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthenticated(msg.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use jsonwebtoken::{encode, get_current_timestamp, EncodingKey, Header};

    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "middleware-test-secret".to_string(),
        }
    }

    fn session(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn token_for(user_id: &str, secret: &str) -> String {
        let now = get_current_timestamp() as i64;
        session(
            serde_json::json!({ "sub": user_id, "exp": now + 300, "iat": now, "jti": "t-1" }),
            secret,
        )
    }

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_token_authenticates() {
        let token = token_for("user_abc", &config().secret);
        let map = headers(&[(AUTHORIZATION, format!("Bearer {token}").as_str())]);

        let user = authenticate(&map, &config()).unwrap();
        assert_eq!(user.user_id, "user_abc");
    }

    #[test]
    fn session_cookie_authenticates() {
        let token = token_for("user_cookie", &config().secret);
        let cookie = format!("theme=dark; {SESSION_COOKIE}={token}; other=1");
        let map = headers(&[(COOKIE, cookie.as_str())]);

        let user = authenticate(&map, &config()).unwrap();
        assert_eq!(user.user_id, "user_cookie");
    }

    #[test]
    fn provider_token_without_jti_authenticates() {
        let now = get_current_timestamp() as i64;
        let token = session(
            serde_json::json!({ "sub": "user_provider", "exp": now + 300, "iat": now }),
            &config().secret,
        );
        let map = headers(&[(AUTHORIZATION, format!("Bearer {token}").as_str())]);

        let user = authenticate(&map, &config()).unwrap();
        assert_eq!(user.user_id, "user_provider");
    }

    #[test]
    fn missing_credential_is_unauthenticated() {
        assert_matches!(
            authenticate(&HeaderMap::new(), &config()),
            Err(AppError::Core(CoreError::Unauthenticated(msg))) if msg.contains("Missing")
        );
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let map = headers(&[(AUTHORIZATION, "Basic dXNlcjpwYXNz")]);
        assert_matches!(
            authenticate(&map, &config()),
            Err(AppError::Core(CoreError::Unauthenticated(_)))
        );
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = token_for("user_abc", "someone-else");
        let map = headers(&[(AUTHORIZATION, format!("Bearer {token}").as_str())]);

        assert_matches!(
            authenticate(&map, &config()),
            Err(AppError::Core(CoreError::Unauthenticated(msg))) if msg.contains("Invalid or expired")
        );
    }

    #[test]
    fn empty_session_cookie_is_ignored() {
        let map = headers(&[(COOKIE, format!("{SESSION_COOKIE}=").as_str())]);
        assert!(authenticate(&map, &config()).is_err());
    }
}

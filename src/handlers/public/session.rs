// handlers/public/session.rs - Session issuance, inspection and termination

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::cookie::{removal_cookie, session_cookie, TOKEN_COOKIE};
use crate::auth::password::{verify_password, verify_unknown_user};
use crate::error::ApiError;
use crate::middleware::authenticate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login - Exchange administrator credentials for a session cookie
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Success sets the HTTP-only `token` cookie and answers `{ "ok": true }`.
/// Unknown usernames and wrong passwords both answer
/// `401 { "error": "Invalid credentials" }`.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let credential = match state.store.find_credential(&request.username).await? {
        Some(credential) => credential,
        None => {
            verify_unknown_user(&request.password);
            tracing::warn!(username = %request.username, "login failed: unknown username");
            return Err(ApiError::invalid_credentials());
        }
    };

    let valid = verify_password(&request.password, &credential.password_hash).map_err(|e| {
        tracing::error!(username = %credential.username, "stored password hash unusable: {}", e);
        ApiError::internal_server_error()
    })?;
    if !valid {
        tracing::warn!(username = %credential.username, "login failed: wrong password");
        return Err(ApiError::invalid_credentials());
    }

    let token = state.tokens.issue(&credential.username, credential.id)?;
    let cookie = session_cookie(token, state.tokens.ttl(), state.config.security.secure_cookies);

    tracing::info!(username = %credential.username, "administrator logged in");
    Ok((jar.add(cookie), Json(json!({ "ok": true }))))
}

/// GET /api/auth/me - Username of the current session
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Result<Json<Value>, ApiError> {
    let claims = authenticate(&state.tokens, jar.get(TOKEN_COOKIE).map(|c| c.value()))
        .map_err(|_| ApiError::unauthorized())?;
    Ok(Json(json!({ "username": claims.username })))
}

/// POST /api/auth/logout - Clear the session cookie. Safe to repeat.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.add(removal_cookie(state.config.security.secure_cookies));
    (jar, Json(json!({ "ok": true })))
}

// middleware/gate.rs - Access Gate: per-request path classification and auth policy

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use percent_encoding::percent_decode_str;

use crate::auth::cookie::TOKEN_COOKIE;
use crate::auth::{Claims, TokenAuthority, Verification};
use crate::error::ApiError;
use crate::state::AppState;

/// Fixed paths the gate reasons about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePaths {
    /// Every path under this prefix is an administrative API call
    pub admin_api_prefix: String,
    /// Bare root of the administrative UI; shows the login form
    pub admin_ui_root: String,
    /// Where authenticated visitors of the login form are sent
    pub landing: String,
}

impl Default for GatePaths {
    fn default() -> Self {
        Self {
            admin_api_prefix: "/api/admin".to_string(),
            admin_ui_root: "/adm".to_string(),
            landing: "/adm/propiedades".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    PublicAsset,
    AdminApi,
    AdminUi,
    LoginUi,
}

/// Why a request is not authenticated. Only ever logged; clients see one
/// uniform "unauthorized" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `token` cookie on the request
    Missing,
    /// Cookie present but signature or expiry check failed
    Invalid,
    /// Authenticated but outside capability; unused while there is a single admin level
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(String),
    Reject,
}

impl GatePaths {
    /// Classify a raw request path. The path is canonicalized first so that
    /// encoded or padded spellings land in the same class as the file the
    /// static fallback would resolve them to.
    pub fn classify(&self, path: &str) -> PathClass {
        let path = canonicalize(path);
        if is_under(&path, &self.admin_api_prefix) {
            PathClass::AdminApi
        } else if path == self.admin_ui_root {
            PathClass::LoginUi
        } else if is_under(&path, &self.admin_ui_root) {
            PathClass::AdminUi
        } else {
            PathClass::PublicAsset
        }
    }

    pub fn decide(&self, class: PathClass, authenticated: bool) -> GateDecision {
        match (class, authenticated) {
            (PathClass::AdminApi, false) => GateDecision::Reject,
            (PathClass::AdminUi, false) => GateDecision::Redirect(self.admin_ui_root.clone()),
            (PathClass::LoginUi, true) => GateDecision::Redirect(self.landing.clone()),
            _ => GateDecision::Continue,
        }
    }
}

/// Percent-decode, then drop empty and `.` segments and resolve `..`.
/// `/%61dm//propiedades/` and `/adm%2Fpropiedades` both become `/adm/propiedades`.
fn canonicalize(path: &str) -> String {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Segment-aware prefix test: `/adm` covers `/adm/x` but not `/admin`
fn is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Resolve the session carried by an optional cookie value
pub fn authenticate(tokens: &TokenAuthority, token: Option<&str>) -> Result<Claims, AuthFailure> {
    let token = token.filter(|t| !t.is_empty()).ok_or(AuthFailure::Missing)?;
    match tokens.verify(token) {
        Verification::Valid(claims) => Ok(claims),
        Verification::Invalid => Err(AuthFailure::Invalid),
    }
}

/// Axum middleware applying the gate to every request.
///
/// On success the session [`Claims`] are inserted into request extensions.
pub async fn access_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let class = state.gate.classify(request.uri().path());

    let session = authenticate(&state.tokens, jar.get(TOKEN_COOKIE).map(|c| c.value()));
    let authenticated = session.is_ok();

    match state.gate.decide(class, authenticated) {
        GateDecision::Continue => {
            match session {
                Ok(claims) => {
                    request.extensions_mut().insert(claims);
                }
                Err(failure) if class != PathClass::PublicAsset => {
                    tracing::debug!(path = %request.uri().path(), ?failure, "unauthenticated request allowed");
                }
                Err(_) => {}
            }
            next.run(request).await
        }
        GateDecision::Redirect(to) => Redirect::temporary(&to).into_response(),
        GateDecision::Reject => {
            if let Err(failure) = session {
                tracing::info!(path = %request.uri().path(), ?failure, "rejected admin API request");
            }
            ApiError::unauthorized().into_response()
        }
    }
}

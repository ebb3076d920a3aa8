#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use casa_catalog::auth::password::hash_password_with_cost;
use casa_catalog::auth::TokenAuthority;
use casa_catalog::config::AppConfig;
use casa_catalog::database::models::PropertyInput;
use casa_catalog::database::{CatalogStore, MemoryStore};
use casa_catalog::state::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Qm8#nXp3Tv";
pub const JWT_SECRET: &str = "integration-test-secret";

/// Id of the seeded property that starts out inactive
pub const INACTIVE_ID: i64 = 7;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.header(header::SET_COOKIE)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.body
            .as_array()
            .map(|rows| rows.iter().filter_map(|r| r["id"].as_i64()).collect())
            .unwrap_or_default()
    }
}

pub const ADMIN_PAGE: &str = "<h1>Administrar propiedades</h1>";

/// Public directory with a public `propiedades` page and the admin UI page
fn public_dir() -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("casa-catalog-public-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("adm"))?;
    std::fs::write(dir.join("propiedades"), "<h1>Propiedades</h1>")?;
    std::fs::write(dir.join("adm").join("propiedades"), ADMIN_PAGE)?;
    Ok(dir)
}

pub fn property(title: &str, kind: &str, status: &str, state_id: i32, county: &str, bedrooms: i32, parking: i32) -> Value {
    json!({
        "title": title,
        "type": kind,
        "status": status,
        "state_id": state_id,
        "county": county,
        "address": "Calle Independencia 100",
        "description": "",
        "square_meters": 150,
        "bedrooms": bedrooms,
        "bathrooms": 2,
        "parking": parking,
        "image": "/images/fachada.jpg",
        "price": "3250000.00",
        "lat": 20.67,
        "lng": -103.35
    })
}

/// Seven properties; id 7 is deactivated after seeding.
fn seed_properties() -> Vec<Value> {
    vec![
        property("Casa en Zapopan", "casa", "venta", 1, "Zapopan", 3, 2),
        property("Departamento en Guadalajara", "departamento", "renta", 1, "Guadalajara", 2, 1),
        property("Terreno en Tlajomulco", "terreno", "venta", 1, "Tlajomulco de Zúñiga", 0, 0),
        property("Casa en Monterrey", "casa", "venta", 2, "Monterrey", 4, 2),
        property("Departamento en San Pedro", "departamento", "venta", 2, "San Pedro Garza García", 2, 1),
        property("Casa en condominio Zapopan", "casa_en_condominio", "renta", 1, "Zapopan", 3, 2),
        property("Local en Guadalajara", "local", "renta", 1, "Guadalajara", 0, 3),
    ]
}

pub async fn spawn_app() -> Result<TestApp> {
    let store = Arc::new(MemoryStore::new());
    store.add_state("Jalisco").await;
    store.add_state("Nuevo León").await;
    store.add_state("Aguascalientes").await;

    let hash = hash_password_with_cost(ADMIN_PASSWORD, 4)?;
    store.add_credential(ADMIN_USERNAME, &hash).await;

    for value in seed_properties() {
        let input: PropertyInput = serde_json::from_value(value)?;
        store.create_property(input).await?;
    }
    store.deactivate_property(INACTIVE_ID as i32).await?;

    let mut config = AppConfig::development();
    config.security.jwt_secret = JWT_SECRET.to_string();
    config.server.public_dir = public_dir()?.to_string_lossy().into_owned();

    let tokens = TokenAuthority::new(JWT_SECRET, chrono::Duration::days(config.security.session_ttl_days))?;
    let state = AppState::new(config, tokens, store.clone());
    let router = casa_catalog::app(state.clone());

    Ok(TestApp { router, state, store })
}

impl TestApp {
    pub async fn request(&self, method: Method, path: &str, cookie: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        let text = String::from_utf8_lossy(&bytes).into_owned();

        Ok(TestResponse { status, headers, body, text })
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, path, cookie, None).await
    }

    pub async fn login_as(&self, username: &str, password: &str) -> Result<TestResponse> {
        self.request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Log in as the seeded administrator and return a `Cookie` header value
    pub async fn admin_cookie(&self) -> Result<String> {
        let res = self.login_as(ADMIN_USERNAME, ADMIN_PASSWORD).await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {} {}", res.status, res.body);
        let set_cookie = res.set_cookie().context("login did not set a cookie")?;
        let pair = set_cookie.split(';').next().context("empty Set-Cookie")?;
        Ok(pair.trim().to_string())
    }
}

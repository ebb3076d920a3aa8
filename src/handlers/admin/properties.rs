// handlers/admin/properties.rs - Property management behind the Access Gate

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::auth::Claims;
use crate::database::models::{AdminProperty, Property, PropertyInput};
use crate::error::ApiError;
use crate::handlers::public::properties::property_not_found;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

fn parse_id(id: &str) -> Result<i32, ApiError> {
    id.parse().map_err(|_| property_not_found())
}

fn parse_input(payload: Result<Json<PropertyInput>, JsonRejection>) -> Result<PropertyInput, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    input.validate().map_err(ApiError::bad_request)?;
    Ok(input)
}

/// GET /api/admin/properties - Every property, including inactive ones
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AdminProperty>>, ApiError> {
    Ok(Json(state.store.list_all_properties().await?))
}

/// POST /api/admin/properties - Create a property (201)
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Claims>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> ApiResult<Property> {
    let input = parse_input(payload)?;
    let property = state.store.create_property(input).await?;
    tracing::info!(admin = %session.username, id = property.id, "property created");
    Ok(ApiResponse::created(property))
}

/// PUT /api/admin/properties/:id - Replace every editable field
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Claims>,
    Path(id): Path<String>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> ApiResult<Property> {
    let id = parse_id(&id)?;
    let input = parse_input(payload)?;
    let property = state
        .store
        .update_property(id, input)
        .await?
        .ok_or_else(property_not_found)?;
    tracing::info!(admin = %session.username, id, "property updated");
    Ok(ApiResponse::success(property))
}

/// DELETE /api/admin/properties/:id - Soft delete (`active = false`)
pub async fn deactivate(
    State(state): State<AppState>,
    Extension(session): Extension<Claims>,
    Path(id): Path<String>,
) -> ApiResult<Property> {
    let id = parse_id(&id)?;
    let property = state
        .store
        .deactivate_property(id)
        .await?
        .ok_or_else(property_not_found)?;
    tracing::info!(admin = %session.username, id, "property deactivated");
    Ok(ApiResponse::success(property))
}

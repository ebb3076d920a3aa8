// handlers/public/properties.rs - GET /api/properties, GET /api/properties/:id

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::database::models::Property;
use crate::error::ApiError;
use crate::filter::{build_predicate, SearchParams};
use crate::state::AppState;

/// GET /api/properties - Public property search
///
/// All parameters are optional and comma-separated where multi-valued:
/// `state_id`, `county`, `status`, `type`, `bedrooms`, `parking`.
/// With no usable parameter the latest five properties are returned.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let query = build_predicate(&params);
    let properties = state.store.search_properties(&query).await?;
    Ok(Json(properties))
}

/// GET /api/properties/:id - Single property detail
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    let id: i32 = id.parse().map_err(|_| property_not_found())?;
    state
        .store
        .find_property(id)
        .await?
        .map(Json)
        .ok_or_else(property_not_found)
}

pub(crate) fn property_not_found() -> ApiError {
    ApiError::not_found("Property not found")
}

use axum::{extract::State, Json};

use crate::database::models::State as MexicanState;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/states - All states, alphabetical
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MexicanState>>, ApiError> {
    Ok(Json(state.store.list_states().await?))
}

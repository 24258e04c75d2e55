//! Liveness endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /health
///
/// Returns 200 with a database ping; 503 if the store is unreachable.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<Value>> {
    facerate_db::health_check(&state.pool)
        .await
        .map_err(facerate_db::error::StoreError::Unavailable)?;
    Ok(Json(json!({ "status": "ok" })))
}

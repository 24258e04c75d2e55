//! Handlers for the analytics views.
//!
//! Every view recomputes from the full event set on demand; there is no
//! cached aggregate state to invalidate.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use facerate_core::image_stats::{
    bottom_rated, compute_image_statistics, most_controversial, top_rated, ImageStatistic,
};
use facerate_core::overview::{compute_overview, Overview};
use facerate_core::user_stats::{compute_user_statistics, UserStatistic};

use crate::error::AppResult;
use crate::handlers::load_events;
use crate::state::AppState;

/// How many entries the ranked dashboard lists show.
const RANKING_LIMIT: usize = 3;

/// Response body for `GET /stats/images`.
#[derive(Debug, Serialize)]
pub struct ImageStatsResponse {
    /// Full per-image list, ordered by image id.
    pub images: Vec<ImageStatistic>,
    pub top_rated: Vec<ImageStatistic>,
    pub bottom_rated: Vec<ImageStatistic>,
    pub most_controversial: Vec<ImageStatistic>,
}

/// GET /api/v1/stats/overview
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<Overview>> {
    let events = load_events(&state.pool).await?;
    Ok(Json(compute_overview(&events)))
}

/// GET /api/v1/stats/images
pub async fn image_stats(State(state): State<AppState>) -> AppResult<Json<ImageStatsResponse>> {
    let events = load_events(&state.pool).await?;
    let images = compute_image_statistics(&events);
    let response = ImageStatsResponse {
        top_rated: top_rated(&images, RANKING_LIMIT),
        bottom_rated: bottom_rated(&images, RANKING_LIMIT),
        most_controversial: most_controversial(&images, RANKING_LIMIT),
        images,
    };
    Ok(Json(response))
}

/// GET /api/v1/stats/users
pub async fn user_stats(State(state): State<AppState>) -> AppResult<Json<Vec<UserStatistic>>> {
    let events = load_events(&state.pool).await?;
    Ok(Json(compute_user_statistics(&events)))
}

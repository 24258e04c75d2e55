//! Handlers for the rating submission flow and the administrative
//! store operations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use facerate_db::models::rating::{
    CreateRating, FlaggedImage, PurgeOutcome, RatingFilter, RatingRow, ValueClass,
};
use facerate_db::repositories::RatingRepo;

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /ratings`.
#[derive(Debug, Deserialize)]
pub struct ListRatingsQuery {
    pub class: Option<ValueClass>,
}

/// Query parameters for `DELETE /users`.
#[derive(Debug, Deserialize)]
pub struct PurgeUsersQuery {
    pub pattern: String,
    #[serde(default)]
    pub exact: bool,
}

/// Response body for `DELETE /users/{user}/last-rating`.
#[derive(Debug, Serialize)]
pub struct UndoResponse {
    /// The deleted event, or `null` when the user had none.
    pub undone: Option<RatingRow>,
}

/// Response body for `DELETE /images/{image_id}/ratings`.
#[derive(Debug, Serialize)]
pub struct PurgeImageResponse {
    pub deleted: u64,
}

// ---------------------------------------------------------------------------
// Submission flow
// ---------------------------------------------------------------------------

/// POST /api/v1/ratings
///
/// Submit one rating (or skip/flag sentinel). 409 when the user already
/// rated this image — callers should move on to a different image, not
/// retry.
pub async fn submit_rating(
    State(state): State<AppState>,
    Json(input): Json<CreateRating>,
) -> AppResult<(StatusCode, Json<RatingRow>)> {
    let row = RatingRepo::submit(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/ratings?class=
///
/// All rating events in store order, optionally narrowed by value class.
pub async fn list_ratings(
    State(state): State<AppState>,
    Query(query): Query<ListRatingsQuery>,
) -> AppResult<Json<Vec<RatingRow>>> {
    let filter = RatingFilter {
        class: query.class,
        image_ids: None,
    };
    let rows = RatingRepo::list(&state.pool, &filter).await?;
    Ok(Json(rows))
}

/// GET /api/v1/users/{user}/rated-images
///
/// Image ids this user has already responded to, sorted. The submission
/// UI uses this to pick the next unseen image.
pub async fn rated_images(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    let rated = RatingRepo::rated_image_ids(&state.pool, &user).await?;
    let mut ids: Vec<String> = rated.into_iter().collect();
    ids.sort();
    Ok(Json(ids))
}

/// GET /api/v1/images/flagged
pub async fn flagged_images(State(state): State<AppState>) -> AppResult<Json<Vec<FlaggedImage>>> {
    let flagged = RatingRepo::flagged_images(&state.pool).await?;
    Ok(Json(flagged))
}

// ---------------------------------------------------------------------------
// Administrative operations
// ---------------------------------------------------------------------------

/// DELETE /api/v1/images/{image_id}/ratings
///
/// Purge every event for an image. `deleted: 0` for an unknown image is
/// fine — purging is idempotent.
pub async fn purge_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> AppResult<Json<PurgeImageResponse>> {
    let deleted = RatingRepo::purge_image(&state.pool, &image_id).await?;
    Ok(Json(PurgeImageResponse { deleted }))
}

/// DELETE /api/v1/users/{user}/last-rating
pub async fn undo_last_rating(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> AppResult<Json<UndoResponse>> {
    let undone = RatingRepo::undo_last(&state.pool, &user).await?;
    Ok(Json(UndoResponse { undone }))
}

/// DELETE /api/v1/users?pattern=&exact=
///
/// Bulk cleanup of test accounts by identifier pattern.
pub async fn purge_users(
    State(state): State<AppState>,
    Query(query): Query<PurgeUsersQuery>,
) -> AppResult<Json<PurgeOutcome>> {
    let outcome = RatingRepo::purge_users(&state.pool, &query.pattern, query.exact).await?;
    Ok(Json(outcome))
}

//! CSV export of the full event set.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use facerate_core::export::{export_rows, to_csv, ExportFilter};

use crate::error::AppResult;
use crate::handlers::load_events;
use crate::state::AppState;

/// Query parameters for `GET /export.csv`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub filter: ExportFilter,
}

/// GET /api/v1/export.csv?filter=all|valid_only
///
/// Rows come out in store order with the sentinel encoding preserved
/// verbatim in the `rating` column.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let events = load_events(&state.pool).await?;
    let csv = to_csv(&export_rows(&events, query.filter));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"face_ratings_export.csv\"",
            ),
        ],
        csv,
    ))
}

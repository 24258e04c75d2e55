//! HTTP handlers, one module per surface area.

pub mod export;
pub mod health;
pub mod ratings;
pub mod stats;

use facerate_core::rating::RatingEvent;
use facerate_db::models::rating::RatingFilter;
use facerate_db::repositories::RatingRepo;
use facerate_db::DbPool;

use crate::error::{AppError, AppResult};

/// Read the full event set in store order (timestamp asc, id asc) and
/// decode rows into tagged domain events for the analytics engine.
///
/// A row that no longer decodes means the stored data is corrupt, not
/// that the caller sent bad input, so the failure surfaces as internal.
pub(crate) async fn load_events(pool: &DbPool) -> AppResult<Vec<RatingEvent>> {
    let rows = RatingRepo::list(pool, &RatingFilter::default()).await?;
    rows.into_iter()
        .map(|row| {
            let row_id = row.id.clone();
            row.into_event()
                .map_err(|err| AppError::Internal(format!("stored row {row_id}: {err}")))
        })
        .collect()
}

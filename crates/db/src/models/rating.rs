//! Rating row model and DTOs.

use facerate_core::error::CoreError;
use facerate_core::rating::{RatingEvent, RatingValue};
use facerate_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// RatingRow
// ---------------------------------------------------------------------------

/// A row from the `ratings` table.
///
/// `rating` keeps the flat sentinel encoding (-1 skip, -2 flag); convert
/// with [`RatingRow::into_event`] before doing any arithmetic on it.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RatingRow {
    pub id: String,
    pub image_id: String,
    pub rating: f64,
    pub user_identifier: String,
    pub timestamp: Timestamp,
}

impl RatingRow {
    /// Decode into the tagged domain event.
    ///
    /// Fails only if the stored value is outside the rating domain, which
    /// the write path prevents; a failure here means the database was
    /// modified out of band.
    pub fn into_event(self) -> Result<RatingEvent, CoreError> {
        let value = RatingValue::from_stored(self.rating)?;
        Ok(RatingEvent {
            id: self.id,
            image_id: self.image_id,
            value,
            user_identifier: self.user_identifier,
            timestamp: self.timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for submitting a new rating.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRating {
    pub image_id: String,
    /// Flat encoding: a score in [1.0, 10.0], -1 (skip), or -2 (flag).
    pub rating: f64,
    pub user_identifier: String,
}

/// Value-class narrowing for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    Valid,
    Skipped,
    Flagged,
}

/// Optional narrowing for [`crate::repositories::RatingRepo::list`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingFilter {
    pub class: Option<ValueClass>,
    /// Restrict to this set of image ids. An empty set matches nothing.
    pub image_ids: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

/// A flagged image and how many flag events it received.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct FlaggedImage {
    pub image_id: String,
    pub flag_count: i64,
}

/// Result of an administrative user purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurgeOutcome {
    /// Distinct user identifiers that matched the pattern.
    pub matched_users: u64,
    /// Rating events deleted.
    pub deleted_events: u64,
}

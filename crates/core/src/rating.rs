//! Rating value domain and the persisted rating event.
//!
//! The storage and export layers keep the flat numeric encoding the
//! original data set uses (a real rating in `[1.0, 10.0]`, `-1` for a
//! skip, `-2` for a flag). Inside the crate the three classes are a
//! tagged variant so aggregation code can never do arithmetic on a
//! sentinel by accident; conversion happens only at the boundary via
//! [`RatingValue::from_stored`] / [`RatingValue::to_stored`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Value domain constants
// ---------------------------------------------------------------------------

/// Lowest valid rating on the 1–10 scale.
pub const MIN_RATING: f64 = 1.0;
/// Highest valid rating on the 1–10 scale.
pub const MAX_RATING: f64 = 10.0;
/// Stored sentinel meaning "user skipped this image".
pub const SKIP_SENTINEL: f64 = -1.0;
/// Stored sentinel meaning "user flagged this image as inappropriate".
pub const FLAG_SENTINEL: f64 = -2.0;

// ---------------------------------------------------------------------------
// RatingValue
// ---------------------------------------------------------------------------

/// One of the three semantic classes a submission can carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "score")]
pub enum RatingValue {
    /// A real attractiveness rating in `[MIN_RATING, MAX_RATING]`.
    Valid(f64),
    /// The user declined to rate the image.
    Skipped,
    /// The user reported the image as inappropriate or low quality.
    Flagged,
}

impl RatingValue {
    /// Decode the flat stored encoding into a tagged value.
    ///
    /// Anything outside `[MIN_RATING, MAX_RATING]` that is not one of the
    /// two sentinels is a validation failure.
    pub fn from_stored(raw: f64) -> Result<Self, CoreError> {
        if raw == SKIP_SENTINEL {
            Ok(Self::Skipped)
        } else if raw == FLAG_SENTINEL {
            Ok(Self::Flagged)
        } else if (MIN_RATING..=MAX_RATING).contains(&raw) {
            Ok(Self::Valid(raw))
        } else {
            Err(CoreError::Validation(format!(
                "rating must be in [{MIN_RATING}, {MAX_RATING}] or one of the \
                 sentinels {SKIP_SENTINEL} (skip) / {FLAG_SENTINEL} (flag), got {raw}"
            )))
        }
    }

    /// Encode back to the flat representation used by storage and export.
    pub fn to_stored(self) -> f64 {
        match self {
            Self::Valid(score) => score,
            Self::Skipped => SKIP_SENTINEL,
            Self::Flagged => FLAG_SENTINEL,
        }
    }

    /// The numeric score, if this is a valid rating.
    pub fn score(self) -> Option<f64> {
        match self {
            Self::Valid(score) => Some(score),
            _ => None,
        }
    }

    pub fn is_skip(self) -> bool {
        self == Self::Skipped
    }

    pub fn is_flag(self) -> bool {
        self == Self::Flagged
    }
}

// ---------------------------------------------------------------------------
// RatingEvent
// ---------------------------------------------------------------------------

/// One persisted record of a user's response to one image.
///
/// Created exactly once by a successful submission, never updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingEvent {
    /// Globally unique identifier assigned at creation.
    pub id: String,
    /// Identifier of the rated image; references an external catalog.
    pub image_id: String,
    pub value: RatingValue,
    /// Free-text identifier supplied by the user; the join key for
    /// per-user analytics. Not authenticated.
    pub user_identifier: String,
    /// Creation time, assigned by the store.
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// Submission validation
// ---------------------------------------------------------------------------

/// Validate the raw inputs of a rating submission.
///
/// Returns the decoded [`RatingValue`] so the caller never has to touch
/// the sentinel encoding again.
pub fn validate_submission(
    image_id: &str,
    raw: f64,
    user_identifier: &str,
) -> Result<RatingValue, CoreError> {
    if image_id.trim().is_empty() {
        return Err(CoreError::Validation(
            "image_id must not be empty".to_string(),
        ));
    }
    if user_identifier.trim().is_empty() {
        return Err(CoreError::Validation(
            "user_identifier must not be empty".to_string(),
        ));
    }
    RatingValue::from_stored(raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

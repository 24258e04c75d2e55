//! Repository for the `ratings` table.

use std::collections::HashSet;

use facerate_core::error::CoreError;
use facerate_core::rating::{self, FLAG_SENTINEL, SKIP_SENTINEL};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::rating::{
    CreateRating, FlaggedImage, PurgeOutcome, RatingFilter, RatingRow, ValueClass,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, image_id, rating, user_identifier, timestamp";

/// Provides all store operations for rating events.
pub struct RatingRepo;

impl RatingRepo {
    /// Submit a new rating, returning the persisted row.
    ///
    /// Validation happens up front; the duplicate check is *not* a
    /// read-then-write — the unique index on `(image_id, user_identifier)`
    /// makes the INSERT itself the atomic check-and-insert, so concurrent
    /// duplicate submissions cannot both succeed.
    pub async fn submit(pool: &SqlitePool, input: &CreateRating) -> StoreResult<RatingRow> {
        rating::validate_submission(&input.image_id, input.rating, &input.user_identifier)?;

        let row = RatingRow {
            id: Uuid::new_v4().to_string(),
            image_id: input.image_id.clone(),
            rating: input.rating,
            user_identifier: input.user_identifier.clone(),
            timestamp: chrono::Utc::now(),
        };

        sqlx::query(
            "INSERT INTO ratings (id, image_id, rating, user_identifier, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&row.id)
        .bind(&row.image_id)
        .bind(row.rating)
        .bind(&row.user_identifier)
        .bind(row.timestamp)
        .execute(pool)
        .await
        .map_err(|e| classify_write_error(e, input))?;

        tracing::debug!(image_id = %row.image_id, user = %row.user_identifier, "rating stored");
        Ok(row)
    }

    /// List rating events, optionally narrowed by value class and/or an
    /// image-id set. Ordered by timestamp ascending, ties by id.
    pub async fn list(pool: &SqlitePool, filter: &RatingFilter) -> StoreResult<Vec<RatingRow>> {
        let mut clauses: Vec<String> = Vec::new();

        if let Some(class) = filter.class {
            clauses.push(match class {
                ValueClass::Valid => "rating > 0".to_string(),
                ValueClass::Skipped => format!("rating = {SKIP_SENTINEL}"),
                ValueClass::Flagged => format!("rating = {FLAG_SENTINEL}"),
            });
        }

        if let Some(image_ids) = &filter.image_ids {
            if image_ids.is_empty() {
                return Ok(Vec::new());
            }
            let placeholders = vec!["?"; image_ids.len()].join(", ");
            clauses.push(format!("image_id IN ({placeholders})"));
        }

        let mut sql = format!("SELECT {COLUMNS} FROM ratings");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY timestamp ASC, id ASC");

        let mut query = sqlx::query_as::<_, RatingRow>(&sql);
        if let Some(image_ids) = &filter.image_ids {
            for image_id in image_ids {
                query = query.bind(image_id);
            }
        }
        query.fetch_all(pool).await.map_err(StoreError::Unavailable)
    }

    /// Image ids this user has already responded to, in any class.
    ///
    /// The submission flow uses this to pick the next unseen image.
    /// Unknown users simply get an empty set.
    pub async fn rated_image_ids(
        pool: &SqlitePool,
        user_identifier: &str,
    ) -> StoreResult<HashSet<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT image_id FROM ratings WHERE user_identifier = ?1")
                .bind(user_identifier)
                .fetch_all(pool)
                .await
                .map_err(StoreError::Unavailable)?;
        Ok(rows.into_iter().map(|(image_id,)| image_id).collect())
    }

    /// Flagged images with their flag counts, most-flagged first.
    pub async fn flagged_images(pool: &SqlitePool) -> StoreResult<Vec<FlaggedImage>> {
        sqlx::query_as::<_, FlaggedImage>(&format!(
            "SELECT image_id, COUNT(*) AS flag_count FROM ratings
             WHERE rating = {FLAG_SENTINEL}
             GROUP BY image_id
             ORDER BY flag_count DESC, image_id ASC"
        ))
        .fetch_all(pool)
        .await
        .map_err(StoreError::Unavailable)
    }

    /// Delete every event for an image, returning the number of rows
    /// removed. Zero rows is a no-op success, not an error. Irreversible;
    /// meant for pulling inappropriate content out of circulation.
    pub async fn purge_image(pool: &SqlitePool, image_id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM ratings WHERE image_id = ?1")
            .bind(image_id)
            .execute(pool)
            .await
            .map_err(StoreError::Unavailable)?;
        let deleted = result.rows_affected();
        if deleted > 0 {
            tracing::info!(image_id, deleted, "purged image ratings");
        }
        Ok(deleted)
    }

    /// Delete and return the user's most recent event, or `None` if the
    /// user has none.
    ///
    /// Lookup and delete are one statement, so two racing undos can never
    /// both claim the same row.
    pub async fn undo_last(
        pool: &SqlitePool,
        user_identifier: &str,
    ) -> StoreResult<Option<RatingRow>> {
        let undone = sqlx::query_as::<_, RatingRow>(&format!(
            "DELETE FROM ratings
             WHERE id = (SELECT id FROM ratings
                         WHERE user_identifier = ?1
                         ORDER BY timestamp DESC, id DESC
                         LIMIT 1)
             RETURNING {COLUMNS}"
        ))
        .bind(user_identifier)
        .fetch_optional(pool)
        .await
        .map_err(StoreError::Unavailable)?;

        if let Some(row) = &undone {
            tracing::info!(user = %row.user_identifier, image_id = %row.image_id, "undid last rating");
        }
        Ok(undone)
    }

    /// Administrative cleanup: delete every event from users whose
    /// identifier matches `pattern`. `exact` does a case-sensitive
    /// equality match; otherwise a case-insensitive substring match.
    pub async fn purge_users(
        pool: &SqlitePool,
        pattern: &str,
        exact: bool,
    ) -> StoreResult<PurgeOutcome> {
        let (where_clause, bound) = if exact {
            ("user_identifier = ?1", pattern.to_string())
        } else {
            ("user_identifier LIKE ?1", format!("%{pattern}%"))
        };

        let matched: (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(DISTINCT user_identifier) FROM ratings WHERE {where_clause}"
        ))
        .bind(&bound)
        .fetch_one(pool)
        .await
        .map_err(StoreError::Unavailable)?;

        let result = sqlx::query(&format!("DELETE FROM ratings WHERE {where_clause}"))
            .bind(&bound)
            .execute(pool)
            .await
            .map_err(StoreError::Unavailable)?;

        let outcome = PurgeOutcome {
            matched_users: matched.0 as u64,
            deleted_events: result.rows_affected(),
        };
        if outcome.deleted_events > 0 {
            tracing::info!(
                pattern,
                exact,
                users = outcome.matched_users,
                events = outcome.deleted_events,
                "purged user ratings"
            );
        }
        Ok(outcome)
    }
}

/// The unique index turns a duplicate submission into a constraint
/// violation at insert time; everything else is a storage fault.
fn classify_write_error(err: sqlx::Error, input: &CreateRating) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Core(CoreError::DuplicateRating {
                image_id: input.image_id.clone(),
                user_identifier: input.user_identifier.clone(),
            })
        }
        _ => StoreError::Unavailable(err),
    }
}

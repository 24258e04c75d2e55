use facerate_core::error::CoreError;

/// Errors surfaced by the rating store.
///
/// Domain failures (validation, duplicate submission) come through as
/// [`CoreError`]; everything else the database can throw is collapsed
/// into [`StoreError::Unavailable`] — callers decide retry policy, the
/// store never retries on its own.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("storage unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

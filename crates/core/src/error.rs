#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("user '{user_identifier}' has already rated image '{image_id}'")]
    DuplicateRating {
        image_id: String,
        user_identifier: String,
    },
}

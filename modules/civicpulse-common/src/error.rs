use thiserror::Error;

#[derive(Error, Debug)]
pub enum CivicPulseError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Spam guard trip. Distinct from Validation so callers can surface the
    /// specific "slow down" message with a 429.
    #[error("Too many issues reported. Please slow down.")]
    RateLimited,

    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

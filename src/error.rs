use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Candidates exhausted: {0}")]
    Exhausted(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Graph snapshot error: {0}")]
    Snapshot(String),

    #[error("Bounce route failed after {attempts} attempt(s): {last}")]
    BounceFailed { attempts: u32, last: Box<AppError> },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures a caller can recover from by retrying with
    /// different parameters (no path found, candidate stream dried up).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::Exhausted(_) | AppError::BounceFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

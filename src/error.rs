//! Pipeline error classification.
//!
//! Errors fall into three operational classes: transient API errors (the
//! client retries rate limits and bad gateways itself, everything else is
//! left to the external scheduler), data-quality errors (foreign-key or type
//! mismatches that abort the current batch), and connectivity errors
//! (database unreachable, aborting the run).

use thiserror::Error;

/// Result type used throughout the pipeline.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Spotify Web API request failed (wraps reqwest::Error)
    #[error("Spotify API error: {0}")]
    Api(#[from] reqwest::Error),

    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Batch violated a schema constraint, e.g. a track referencing an
    /// album that was never loaded
    #[error("Data quality error: {0}")]
    DataQuality(String),
}

/// PostgreSQL error code for foreign-key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl Error {
    /// Classifies a database error, promoting foreign-key violations to
    /// data-quality errors. A track referencing an unseen album is bad input
    /// data, not a database fault, and is reported as such.
    pub fn from_db(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                return Error::DataQuality(format!(
                    "foreign key violation: {}",
                    db_err.message()
                ));
            }
        }
        Error::Database(err)
    }
}

/// Error types for the string repository.
///
/// Every failure the core can produce is local and synchronous: it describes
/// the request that was made, never a transient condition, so none of these
/// are worth retrying. The HTTP layer maps each variant to a status code.
///
/// ```rust,ignore
/// match store.get("racecar") {
///     Ok(record) => // Use record,
///     Err(StoreError::NotFound(value)) => // Report missing value,
///     Err(e) => // Handle other errors
/// }
/// ```
use thiserror::Error;

/// Result type for repository operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while storing, looking up or filtering strings
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("String already exists in the system: {0}")]
    Conflict(String),
    #[error("String does not exist in the system: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unable to parse query: {0}")]
    Unparseable(String),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl StoreError {
    pub fn conflict(value: impl Into<String>) -> Self {
        Self::Conflict(value.into())
    }

    pub fn not_found(value: impl Into<String>) -> Self {
        Self::NotFound(value.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unparseable(query: impl Into<String>) -> Self {
        Self::Unparseable(query.into())
    }
}

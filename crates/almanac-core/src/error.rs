use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("empty content pool: {0}")]
    EmptyPool(String),

    #[error("unknown element: {0}")]
    UnknownElement(String),

    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),
}

impl EngineError {
    /// Errors the caller can fix by changing the request.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidDateFormat(_)
                | EngineError::UnknownElement(_)
                | EngineError::InvalidConfig(_)
                | EngineError::InvalidRange(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrossmatchError>;

#[derive(Debug, Error)]
pub enum CrossmatchError {
    /// A candidate record lacks a required field or carries a value of the
    /// wrong type. Sentinel-valued shape parameters are not errors.
    #[error("invalid candidate record #{index}: field '{field}' {reason}")]
    InvalidRecord {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("invalid candidate list: {message}")]
    InvalidInput { message: String },

    #[error("invalid sky position: {message}")]
    InvalidPosition { message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrossmatchError {
    pub fn invalid_record(index: usize, field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            index,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_position(message: impl Into<String>) -> Self {
        Self::InvalidPosition {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

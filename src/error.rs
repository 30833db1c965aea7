use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArlNetError {
    #[error("{field} must be configured")]
    MissingValue { field: String },

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: String, value: f64 },

    #[error("{field} cannot be negative (got {value})")]
    Negative { field: String, value: f64 },

    #[error("Firebase credentials not found at: {path}")]
    CredentialsNotFound { path: String },

    #[error("Invalid value {value:?} for environment variable {key}: {reason}")]
    InvalidEnv {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArlNetError {
    /// Name of the offending field, for the variants that carry one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ArlNetError::MissingValue { field }
            | ArlNetError::OutOfRange { field, .. }
            | ArlNetError::NotPositive { field, .. }
            | ArlNetError::Negative { field, .. } => Some(field),
            ArlNetError::CredentialsNotFound { .. } => Some("credential_path"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArlNetError>;

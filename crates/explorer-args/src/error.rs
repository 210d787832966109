use thiserror::Error;

/// Errors from loading args or schemas. Coercion itself never fails.
#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("failed to parse args JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid arg schema at {path}: {reason}")]
    InvalidSchema { path: String, reason: String },
    #[error("invalid args: {reason}")]
    InvalidArgs { reason: String },
}

impl ArgsError {
    pub(crate) fn invalid_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_args(reason: impl Into<String>) -> Self {
        Self::InvalidArgs {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArgsError>;

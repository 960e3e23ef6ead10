// src/errors.rs
use actix_web::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("missing prompt parameter")]
    InvalidRequest,

    #[error("credential not configured")]
    MissingCredential,

    #[error("process error: {0}")]
    Launch(#[from] std::io::Error),

    /// Raw stderr of the child, or a generic message when it wrote nothing.
    #[error("{0}")]
    Subprocess(String),

    #[error("command execution timed out ({0}s)")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RelayError {
    /// HTTP status used when this error is written back to the caller.
    ///
    /// Anything the child process did (or failed to do) is still a completed
    /// bridge call and is reported as 200 with `success: false`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest => StatusCode::BAD_REQUEST,
            RelayError::MissingCredential | RelayError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::Launch(_) | RelayError::Subprocess(_) | RelayError::Timeout(_) => {
                StatusCode::OK
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

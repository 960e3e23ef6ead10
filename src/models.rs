// src/models.rs
use serde::{Deserialize, Serialize};

use crate::bridge::SubprocessResult;
use crate::errors::RelayError;

/// Body accepted by `POST /api/claude`.
#[derive(Deserialize, Debug, Clone)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl PromptRequest {
    /// Parse a raw body into a non-empty prompt.
    pub fn parse_prompt(body: &[u8]) -> Result<String, RelayError> {
        let request: PromptRequest =
            serde_json::from_slice(body).map_err(|_| RelayError::InvalidRequest)?;
        request
            .prompt
            .filter(|p| !p.is_empty())
            .ok_or(RelayError::InvalidRequest)
    }
}

/// JSON envelope for every `/api/claude` response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<SubprocessResult> for ApiResponse {
    fn from(result: SubprocessResult) -> Self {
        match result {
            SubprocessResult::Success { output } => ApiResponse {
                success: true,
                output: Some(output),
                error: None,
            },
            SubprocessResult::Failure { error } => ApiResponse {
                success: false,
                output: None,
                error: Some(error),
            },
        }
    }
}

impl From<&RelayError> for ApiResponse {
    fn from(err: &RelayError) -> Self {
        ApiResponse {
            success: false,
            output: None,
            error: Some(err.to_string()),
        }
    }
}

// src/api/handlers/claude.rs
use actix_web::{web, HttpResponse, Result};

use crate::api::AppState;
use crate::errors::RelayError;
use crate::models::{ApiResponse, PromptRequest};

const PROMPT_PREVIEW_CHARS: usize = 100;

fn error_response(err: RelayError) -> HttpResponse {
    HttpResponse::build(err.status_code()).json(ApiResponse::from(&err))
}

/// `POST /api/claude`: run the CLI for the posted prompt.
///
/// The body is parsed as JSON whatever its content type, so a `text/plain`
/// body carrying a JSON object is accepted too.
pub async fn run_prompt(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse> {
    let prompt = match PromptRequest::parse_prompt(&body) {
        Ok(prompt) => prompt,
        Err(e) => return Ok(error_response(e)),
    };

    let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    log::info!("Executing prompt: {}...", preview);

    let Some(api_key) = state.config.api_key.as_deref() else {
        log::error!("ANTHROPIC_API_KEY is not set, refusing to run the command");
        return Ok(error_response(RelayError::MissingCredential));
    };

    let result = state.bridge.run(&prompt, api_key).await;
    Ok(HttpResponse::Ok().json(result))
}

// src/api/handlers/ws.rs
use actix_web::{HttpResponse, Result};
use serde_json::json;

/// There is no socket protocol; the endpoint only answers with a notice.
pub async fn ws_placeholder() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "WebSocket support can be implemented here"
    })))
}

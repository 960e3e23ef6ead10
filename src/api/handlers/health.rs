// src/api/handlers/health.rs
use actix_web::{HttpResponse, Result};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    })))
}

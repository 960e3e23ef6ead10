// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/ws", web::get().to(handlers::ws_placeholder))
        .route("/api/claude", web::post().to(handlers::run_prompt))
        .route("/{_:.*}", web::get().to(handlers::static_file_handler));
}

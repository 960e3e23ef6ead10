// src/api/handlers/mod.rs
mod health;
mod claude;
mod assets;
pub mod ws;

pub use health::health_check;
pub use claude::run_prompt;
pub use assets::static_file_handler;
pub use ws::ws_placeholder;

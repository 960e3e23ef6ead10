// src/api/state.rs
use crate::bridge::{Bridge, Launcher, TokioLauncher};
use crate::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bridge: Arc<Bridge>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_launcher(config, Arc::new(TokioLauncher))
    }

    /// Build the state around a custom process launcher.
    pub fn with_launcher(config: AppConfig, launcher: Arc<dyn Launcher>) -> Self {
        let bridge = Bridge::new(config.bridge.clone(), launcher);
        Self {
            config: Arc::new(config),
            bridge: Arc::new(bridge),
        }
    }
}

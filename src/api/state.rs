//! Application state shared by every request handler

use std::sync::Arc;

use crate::infrastructure::database::HandlerRegistry;

/// Application state. Handlers resolve their database backend from `handlers`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub handlers: Arc<HandlerRegistry>,
}

impl AppState {
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self {
            handlers: Arc::new(handlers),
        }
    }
}

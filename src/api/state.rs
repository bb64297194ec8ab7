//! Application state for the leave engine API.

use std::sync::Arc;

use crate::engine::LeaveEngine;

/// Shared application state.
///
/// Holds the engine shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<LeaveEngine>,
}

impl AppState {
    /// Creates a new application state around the given engine.
    pub fn new(engine: LeaveEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &LeaveEngine {
        &self.engine
    }
}

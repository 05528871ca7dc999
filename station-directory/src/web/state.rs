//! Application state for the web layer.

use std::sync::Arc;

use crate::stations::StationDirectory;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory station list
    pub directory: StationDirectory,

    /// Base URL of the map service rows link to
    pub map_base_url: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(directory: StationDirectory, map_base_url: impl Into<Arc<str>>) -> Self {
        Self {
            directory,
            map_base_url: map_base_url.into(),
        }
    }
}

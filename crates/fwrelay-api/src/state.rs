//! Application state for the relay API

use std::sync::Arc;

use fwrelay_core::DeviceLookup;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    lookup: Arc<dyn DeviceLookup>,
}

impl AppState {
    pub fn new(lookup: Arc<dyn DeviceLookup>) -> Self {
        Self { lookup }
    }

    /// The lookup every request is answered with
    pub fn lookup(&self) -> &dyn DeviceLookup {
        self.lookup.as_ref()
    }
}

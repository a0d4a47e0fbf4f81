//! API server state

use std::sync::Arc;
use std::time::Duration;

use crate::storage::{ItemGateway, ItemStore};

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Gateway shared by every request
    pub gateway: ItemGateway,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, operation_timeout: Duration) -> Self {
        Self {
            gateway: ItemGateway::new(store, operation_timeout),
        }
    }
}

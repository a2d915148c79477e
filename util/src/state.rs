//! Application state container shared across Axum route handlers.
//!
//! Holds the database connection and the capability checker injected into every
//! write handler. Cloning is cheap: both members are reference counted.

use crate::capability::CapabilityCheck;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    capabilities: Arc<dyn CapabilityCheck>,
}

impl AppState {
    /// Creates a new `AppState` from a database connection and a capability checker.
    pub fn new(db: DatabaseConnection, capabilities: Arc<dyn CapabilityCheck>) -> Self {
        Self { db, capabilities }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns the capability checker used to gate write operations.
    pub fn capabilities(&self) -> &dyn CapabilityCheck {
        self.capabilities.as_ref()
    }
}

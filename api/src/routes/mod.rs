//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/courses` → course browse and read (public), add, edit and delete (authenticated,
//!   then gated per capability inside the handlers)

use axum::Router;
use util::state::AppState;

use crate::routes::{courses::course_routes, health::health_routes};

pub mod courses;
pub mod health;

/// Builds the router for every HTTP endpoint under `/api`.
///
/// The caller nests it and supplies the state:
/// `Router::new().nest("/api", routes()).with_state(app_state)`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/courses", course_routes())
}

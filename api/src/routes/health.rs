use axum::{Router, routing::get};
use util::state::AppState;

use crate::response::ApiResponse;

/// Builds the `/health` route group.
///
/// A single public `GET /health` endpoint for uptime checks and load balancers.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /health
///
/// ### Response
/// - `200 OK`
///
/// ```json
/// {
///   "success": true,
///   "data": "OK",
///   "message": "Health check passed",
///   "status": 200
/// }
/// ```
async fn health_check() -> ApiResponse<&'static str> {
    ApiResponse::success("OK", "Health check passed")
}

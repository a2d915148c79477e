//! Course resource: Browse, Read, Add, Edit and Delete.
//!
//! Reads are public. Writes pass `allow_authenticated` and then check the
//! caller's capability for the specific operation.

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::browse_courses))
        .route("/", post(post::add_course).route_layer(from_fn(allow_authenticated)))
        .route("/{course_id}", get(get::read_course))
        .route(
            "/{course_id}",
            put(put::edit_course)
                .patch(put::edit_course)
                .route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/{course_id}",
            delete(delete::delete_course).route_layer(from_fn(allow_authenticated)),
        )
}

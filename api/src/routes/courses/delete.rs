use axum::{
    Extension,
    extract::{Path, State},
};
use db::models::course::Model as CourseModel;
use sea_orm::TransactionTrait;
use util::{capability::Capability, state::AppState};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::{CourseError, CourseResponse, ensure_capability, parse_course_id};

/// DELETE /api/courses/{course_id}
///
/// Unlinks every cluster and unit, then removes the course, in one transaction.
///
/// # Returns
/// - `200 OK`: `"Course '<aqf_level> <title>' deleted"` with the removed course as data.
/// - `401 UNAUTHORIZED`: no valid token.
/// - `403 FORBIDDEN`: caller lacks `course delete`.
/// - `404 NOT FOUND`: `"Course not found"`.
pub async fn delete_course(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(course_id): Path<String>,
) -> Result<ApiResponse<CourseResponse>, CourseError> {
    ensure_capability(
        &app_state,
        &user,
        Capability::CourseDelete,
        "You are not authorised to delete this course.",
    )
    .await?;

    let course_id = parse_course_id(&course_id)?;

    let txn = app_state.db().begin().await?;
    let detail = CourseModel::find_detail(&txn, course_id)
        .await?
        .ok_or_else(CourseError::course_not_found)?;

    let removed = detail.course.clone().destroy(&txn).await?;
    txn.commit().await?;

    tracing::info!(course_id, user = user.0.sub, "Course deleted");

    Ok(ApiResponse::success(
        CourseResponse::from(detail),
        format!("Course '{}' deleted", removed.display_name()),
    ))
}

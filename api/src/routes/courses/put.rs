use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use db::models::course::{Entity as CourseEntity, Model as CourseModel};
use sea_orm::{DatabaseTransaction, DbErr, EntityTrait, TransactionTrait};
use serde_json::{Map, Value};
use util::{capability::Capability, state::AppState};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::{
    CourseError, CourseResponse, UpdateCourseRequest, ensure_capability, parse_body, parse_course_id,
};

/// PUT|PATCH /api/courses/{course_id}
///
/// Overwrites the supplied course fields and replaces the cluster and unit links
/// with exactly the supplied lists. A missing `cluster_id` or `unit_id` unlinks all.
///
/// # Returns
/// - `201 CREATED`: `"Course updated"` with the refreshed course.
/// - `400 BAD REQUEST`: body failed cleaning or validation.
/// - `401 UNAUTHORIZED`: no valid token.
/// - `403 FORBIDDEN`: caller lacks `course edit`.
/// - `404 NOT FOUND`: `"Course not found"`, or `"Course update failed."` when the write fails.
pub async fn edit_course(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(course_id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<ApiResponse<CourseResponse>, CourseError> {
    ensure_capability(
        &app_state,
        &user,
        Capability::CourseEdit,
        "You are not authorised to update this course.",
    )
    .await?;

    let course_id = parse_course_id(&course_id)?;
    let course = CourseEntity::find_by_id(course_id)
        .one(app_state.db())
        .await?
        .ok_or_else(CourseError::course_not_found)?;

    let req: UpdateCourseRequest = parse_body(payload)?;

    let txn = app_state.db().begin().await?;
    if let Err(err) = update_with_links(&txn, course, &req).await {
        tracing::warn!(error = %err, course_id, "Course update failed");
        return Err(CourseError::UpdateFailed);
    }
    txn.commit().await.map_err(|err| {
        tracing::warn!(error = %err, course_id, "Course update commit failed");
        CourseError::UpdateFailed
    })?;

    tracing::info!(course_id, user = user.0.sub, "Course updated");

    let detail = CourseModel::find_detail(app_state.db(), course_id)
        .await?
        .ok_or(CourseError::UpdateFailed)?;

    Ok(ApiResponse::created(CourseResponse::from(detail), "Course updated"))
}

async fn update_with_links(
    txn: &DatabaseTransaction,
    course: CourseModel,
    req: &UpdateCourseRequest,
) -> Result<(), DbErr> {
    let course = course.update_fields(txn, &req.changes()).await?;
    let clusters = course.sync_clusters(txn, &req.cluster_id).await?;
    let units = course.sync_units(txn, &req.unit_id).await?;

    tracing::debug!(
        course_id = course.id,
        clusters_attached = clusters.attach.len(),
        clusters_detached = clusters.detach.len(),
        units_attached = units.attach.len(),
        units_detached = units.detach.len(),
        "Synced course links"
    );
    Ok(())
}

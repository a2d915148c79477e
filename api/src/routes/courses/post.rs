use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use db::models::course::Model as CourseModel;
use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use serde_json::{Map, Value};
use util::{capability::Capability, state::AppState};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::courses::common::{
    CourseError, CourseResponse, CreateCourseRequest, ensure_capability, parse_body,
};

/// POST /api/courses
///
/// Creates a course and links the given clusters and units. The row and its links
/// are written in one transaction.
///
/// # Request Body
/// ```json
/// {
///   "national_code": "BSB40120",
///   "aqf_level": "IV",
///   "title": "Business",
///   "cluster_id": [1],
///   "unit_id": [5, 6]
/// }
/// ```
/// `cluster_id` and `unit_id` may also be a single id.
///
/// # Returns
/// - `201 CREATED`: `"Course added"` with the stored course, clusters and units.
/// - `400 BAD REQUEST`: body failed cleaning or validation.
/// - `401 UNAUTHORIZED`: no valid token.
/// - `403 FORBIDDEN`: caller lacks `course add`.
/// - `404 NOT FOUND`: `"Course creation failed"`, e.g. a linked id does not exist.
pub async fn add_course(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<ApiResponse<CourseResponse>, CourseError> {
    ensure_capability(
        &app_state,
        &user,
        Capability::CourseAdd,
        "You are not authorised to add new courses.",
    )
    .await?;

    let req: CreateCourseRequest = parse_body(payload)?;

    let txn = app_state.db().begin().await?;
    let course = match insert_with_links(&txn, &req).await {
        Ok(course) => course,
        Err(err) => {
            tracing::warn!(error = %err, national_code = %req.national_code, "Course creation failed");
            return Err(CourseError::CreationFailed);
        }
    };
    txn.commit().await.map_err(|err| {
        tracing::warn!(error = %err, "Course creation commit failed");
        CourseError::CreationFailed
    })?;

    tracing::info!(course_id = course.id, user = user.0.sub, "Course added");

    let detail = CourseModel::find_detail(app_state.db(), course.id)
        .await?
        .ok_or(CourseError::CreationFailed)?;

    Ok(ApiResponse::created(CourseResponse::from(detail), "Course added"))
}

async fn insert_with_links(txn: &DatabaseTransaction, req: &CreateCourseRequest) -> Result<CourseModel, DbErr> {
    let course = CourseModel::create(txn, &req.new_course()).await?;
    course.sync_clusters(txn, &req.cluster_id).await?;
    course.sync_units(txn, &req.unit_id).await?;
    Ok(course)
}

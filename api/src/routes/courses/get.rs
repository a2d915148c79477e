use axum::extract::{Path, Query, State};
use db::models::course::Model as CourseModel;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::courses::common::{BrowseQuery, CourseError, CourseResponse, parse_course_id};

/// GET /api/courses
///
/// Lists every course, or only those where any of `national_code`, `aqf_level`,
/// `title`, `tga_status`, `state_code` or `nominal_hours` contains `search`
/// (case-sensitive). Results are in id order with their clusters and units.
///
/// # Query Parameters
/// - `search`: (Optional) at most 100 characters. Blank is ignored.
///
/// # Returns
/// - `200 OK`: `"Found all <total> courses"`, or
///   `"Search results for: '<term>' [<matched> of <total> course(s) found]"`.
/// - `400 BAD REQUEST`: search term too long.
/// - `404 NOT FOUND`: `"No courses found."`
/// - `500 INTERNAL SERVER ERROR`: database failure.
pub async fn browse_courses(
    State(app_state): State<AppState>,
    Query(params): Query<BrowseQuery>,
) -> Result<ApiResponse<Vec<CourseResponse>>, CourseError> {
    params
        .validate()
        .map_err(|errors| CourseError::ValidationFailed(common::format_validation_errors(&errors)))?;

    let db = app_state.db();
    let term = params.term();

    let courses = CourseModel::search(db, term).await?;
    if courses.is_empty() {
        return Err(CourseError::NotFound("No courses found."));
    }

    let total = CourseModel::total(db).await?;
    let message = match term {
        Some(term) => format!(
            "Search results for: '{term}' [{} of {total} course(s) found]",
            courses.len()
        ),
        None => format!("Found all {total} courses"),
    };

    let details = CourseModel::with_relations(db, courses).await?;
    Ok(ApiResponse::success(
        details.into_iter().map(CourseResponse::from).collect(),
        message,
    ))
}

/// GET /api/courses/{course_id}
///
/// # Returns
/// - `200 OK`: `"Course found"` with the course, its clusters and units.
/// - `404 NOT FOUND`: `"Course not found"`, also for ids that are not integers.
pub async fn read_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<ApiResponse<CourseResponse>, CourseError> {
    let course_id = parse_course_id(&course_id)?;

    let detail = CourseModel::find_detail(app_state.db(), course_id)
        .await?
        .ok_or_else(CourseError::course_not_found)?;

    Ok(ApiResponse::success(CourseResponse::from(detail), "Course found"))
}

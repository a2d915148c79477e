//! Course request/response models and the error taxonomy shared by every course handler.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::{
    cluster::Model as ClusterModel,
    course::{CourseChanges, CourseDetail, NewCourse},
    unit::Model as UnitModel,
};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;
use util::capability::Capability;
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, Empty};
use crate::sanitize;

static NATIONAL_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Z0-9]{1,12}$").expect("valid national code pattern"));

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("{0}")]
    AuthorizationDenied(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Course creation failed")]
    CreationFailed,

    #[error("Course update failed.")]
    UpdateFailed,

    #[error("Database error")]
    Database(#[from] DbErr),
}

impl CourseError {
    pub fn course_not_found() -> Self {
        CourseError::NotFound("Course not found")
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CourseError::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            CourseError::NotFound(_) => StatusCode::NOT_FOUND,
            CourseError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            CourseError::CreationFailed | CourseError::UpdateFailed => StatusCode::NOT_FOUND,
            CourseError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CourseError {
    fn into_response(self) -> Response {
        if let CourseError::Database(err) = &self {
            tracing::error!(error = %err, "Course request failed on the database");
        }
        ApiResponse::<Empty>::error(self.status(), self.to_string()).into_response()
    }
}

/// Denies with `denial` unless the caller holds `capability`.
pub async fn ensure_capability(
    app_state: &AppState,
    user: &AuthUser,
    capability: Capability,
    denial: &'static str,
) -> Result<(), CourseError> {
    let actor = user.actor();
    if app_state.capabilities().has_capability(&actor, capability).await {
        return Ok(());
    }

    tracing::info!(user = actor.id, capability = %capability, "Capability denied");
    Err(CourseError::AuthorizationDenied(denial))
}

/// Path ids that are not integers cannot name a course.
pub fn parse_course_id(raw: &str) -> Result<i64, CourseError> {
    raw.parse().map_err(|_| CourseError::course_not_found())
}

/// Sanitizes, deserializes and validates a JSON body.
pub fn parse_body<T>(payload: Result<Json<Map<String, Value>>, JsonRejection>) -> Result<T, CourseError>
where
    T: DeserializeOwned + Validate,
{
    let Json(raw) = payload.map_err(|rejection| CourseError::ValidationFailed(rejection.body_text()))?;

    let request: T = serde_json::from_value(Value::Object(sanitize::clean(raw)))
        .map_err(|err| CourseError::ValidationFailed(format!("Invalid request body: {err}")))?;

    request
        .validate()
        .map_err(|errors| CourseError::ValidationFailed(common::format_validation_errors(&errors)))?;

    Ok(request)
}

#[derive(Debug, Deserialize, Validate)]
pub struct BrowseQuery {
    #[validate(length(max = 100, message = "Search term must be at most 100 characters"))]
    pub search: Option<String>,
}

impl BrowseQuery {
    /// The search term, ignoring blank input.
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(regex(
        path = &*NATIONAL_CODE_REGEX,
        message = "National code must be 1-12 letters or digits"
    ))]
    pub national_code: String,

    #[validate(length(min = 1, max = 20, message = "AQF level must be 1-20 characters"))]
    pub aqf_level: String,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(max = 50, message = "TGA status must be at most 50 characters"))]
    pub tga_status: Option<String>,

    #[validate(length(max = 10, message = "State code must be at most 10 characters"))]
    pub state_code: Option<String>,

    #[validate(range(min = 0, max = 100000, message = "Nominal hours must be between 0 and 100000"))]
    pub nominal_hours: Option<i32>,

    #[serde(default)]
    pub cluster_id: Vec<i64>,

    #[serde(default)]
    pub unit_id: Vec<i64>,
}

impl CreateCourseRequest {
    pub fn new_course(&self) -> NewCourse {
        NewCourse {
            national_code: self.national_code.clone(),
            aqf_level: self.aqf_level.clone(),
            title: self.title.clone(),
            tga_status: self.tga_status.clone(),
            state_code: self.state_code.clone(),
            nominal_hours: self.nominal_hours,
        }
    }
}

/// Edit body. Absent course fields keep their stored values. The nullable
/// columns distinguish absent (`None`) from an explicit `null` (`Some(None)`),
/// which clears them. The link lists always replace the current links, absent
/// meaning none.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(regex(
        path = &*NATIONAL_CODE_REGEX,
        message = "National code must be 1-12 letters or digits"
    ))]
    pub national_code: Option<String>,

    #[validate(length(min = 1, max = 20, message = "AQF level must be 1-20 characters"))]
    pub aqf_level: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 50, message = "TGA status must be at most 50 characters"))]
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub tga_status: Option<Option<String>>,

    #[validate(length(max = 10, message = "State code must be at most 10 characters"))]
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub state_code: Option<Option<String>>,

    #[validate(range(min = 0, max = 100000, message = "Nominal hours must be between 0 and 100000"))]
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub nominal_hours: Option<Option<i32>>,

    #[serde(default)]
    pub cluster_id: Vec<i64>,

    #[serde(default)]
    pub unit_id: Vec<i64>,
}

impl UpdateCourseRequest {
    pub fn changes(&self) -> CourseChanges {
        CourseChanges {
            national_code: self.national_code.clone(),
            aqf_level: self.aqf_level.clone(),
            title: self.title.clone(),
            tga_status: self.tga_status.clone(),
            state_code: self.state_code.clone(),
            nominal_hours: self.nominal_hours,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClusterSummary {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub qualification: Option<String>,
    pub state_code: Option<String>,
}

impl From<ClusterModel> for ClusterSummary {
    fn from(cluster: ClusterModel) -> Self {
        Self {
            id: cluster.id,
            code: cluster.code,
            title: cluster.title,
            qualification: cluster.qualification,
            state_code: cluster.state_code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub id: i64,
    pub national_code: String,
    pub title: String,
}

impl From<UnitModel> for UnitSummary {
    fn from(unit: UnitModel) -> Self {
        Self {
            id: unit.id,
            national_code: unit.national_code,
            title: unit.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: i64,
    pub national_code: String,
    pub aqf_level: String,
    pub title: String,
    pub tga_status: Option<String>,
    pub state_code: Option<String>,
    pub nominal_hours: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
    pub clusters: Vec<ClusterSummary>,
    pub units: Vec<UnitSummary>,
}

impl From<CourseDetail> for CourseResponse {
    fn from(detail: CourseDetail) -> Self {
        let course = detail.course;
        Self {
            id: course.id,
            national_code: course.national_code,
            aqf_level: course.aqf_level,
            title: course.title,
            tga_status: course.tga_status,
            state_code: course.state_code,
            nominal_hours: course.nominal_hours,
            created_at: course.created_at.to_rfc3339(),
            updated_at: course.updated_at.to_rfc3339(),
            clusters: detail.clusters.into_iter().map(ClusterSummary::from).collect(),
            units: detail.units.into_iter().map(UnitSummary::from).collect(),
        }
    }
}

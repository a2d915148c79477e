use api::{auth::generate_jwt, routes::routes};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use db::capabilities::DbCapabilities;
use db::models::{
    course::{Model as CourseModel, NewCourse},
    user::Model as UserModel,
    user_permission,
};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use util::{
    capability::{Capability, CapabilityCheck},
    config::AppConfig,
    state::AppState,
};

pub const TEST_JWT_SECRET: &str = "test-secret";

/// Router over a fresh in-memory database, plus its state for direct DB access.
///
/// Capabilities are read from the `user_permissions` table.
pub async fn make_test_app() -> (Router, AppState) {
    make_test_app_with(|db| Arc::new(DbCapabilities::new(db))).await
}

/// Same as [`make_test_app`] with a caller-supplied capability checker.
pub async fn make_test_app_with<F>(capabilities: F) -> (Router, AppState)
where
    F: FnOnce(DatabaseConnection) -> Arc<dyn CapabilityCheck>,
{
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);

    let db = setup_test_db().await;
    let app_state = AppState::new(db.clone(), capabilities(db));

    let router = Router::new()
        .nest("/api", routes())
        .with_state(app_state.clone());

    (router, app_state)
}

/// Creates a user holding `grants` and returns it with a signed token.
pub async fn seed_user(
    db: &DatabaseConnection,
    username: &str,
    admin: bool,
    grants: &[Capability],
) -> (UserModel, String) {
    let user = UserModel::create(db, username, &format!("{username}@test.com"), admin)
        .await
        .expect("Failed to create user");
    for capability in grants {
        user_permission::Model::grant(db, user.id, capability.as_str())
            .await
            .expect("Failed to grant capability");
    }
    let (token, _) = generate_jwt(user.id, user.admin).expect("Failed to sign token");
    (user, token)
}

pub async fn seed_course(db: &DatabaseConnection, national_code: &str, aqf_level: &str, title: &str) -> CourseModel {
    CourseModel::create(
        db,
        &NewCourse {
            national_code: national_code.into(),
            aqf_level: aqf_level.into(),
            title: title.into(),
            tga_status: None,
            state_code: None,
            nominal_hours: None,
        },
    )
    .await
    .expect("Failed to create course")
}

/// Sends one request and returns the status with the decoded envelope.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header("Authorization", format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => req
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, make_test_app_with, seed_user, send};
    use axum::http::StatusCode;
    use db::models::{
        cluster::Model as ClusterModel,
        course::Entity as CourseEntity,
        course_cluster,
        unit::Model as UnitModel,
    };
    use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use util::capability::{Capability, StaticCapabilities};

    /// One cluster (id 1) and six units (ids 1..=6).
    async fn seed_catalogue(db: &DatabaseConnection) {
        ClusterModel::create(db, "BUS1", "Business Basics", Some("BSB40120"), None)
            .await
            .unwrap();
        for i in 1..=6 {
            UnitModel::create(db, &format!("BSBUNIT{i}"), &format!("Unit {i}")).await.unwrap();
        }
    }

    fn business_course() -> Value {
        json!({
            "national_code": "BSB40120",
            "aqf_level": "IV",
            "title": "Business",
            "cluster_id": [1],
            "unit_id": [5, 6],
        })
    }

    fn ids(list: &Value) -> Vec<i64> {
        list.as_array().unwrap().iter().map(|v| v["id"].as_i64().unwrap()).collect()
    }

    /// Test Case: Authorized add links the given clusters and units
    #[tokio::test]
    async fn test_add_course_success() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        seed_catalogue(db).await;
        let (_, token) = seed_user(db, "clerk", false, &[Capability::CourseAdd]).await;

        let (status, json) = send(&app, "POST", "/api/courses", Some(&token), Some(business_course())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], 201);
        assert_eq!(json["message"], "Course added");
        assert_eq!(json["data"]["national_code"], "BSB40120");
        assert_eq!(ids(&json["data"]["clusters"]), vec![1]);
        assert_eq!(ids(&json["data"]["units"]), vec![5, 6]);

        let uri = format!("/api/courses/{}", json["data"]["id"]);
        let (status, read) = send(&app, "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&read["data"]["clusters"]), vec![1]);
        assert_eq!(ids(&read["data"]["units"]), vec![5, 6]);
    }

    /// Test Case: Caller without `course add`
    #[tokio::test]
    async fn test_add_course_forbidden() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        seed_catalogue(db).await;
        let (_, token) = seed_user(db, "viewer", false, &[Capability::CourseEdit]).await;

        let (status, json) = send(&app, "POST", "/api/courses", Some(&token), Some(business_course())).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            json,
            json!({
                "success": false,
                "data": [],
                "message": "You are not authorised to add new courses.",
                "status": 403,
            })
        );
        assert_eq!(CourseEntity::find().count(db).await.unwrap(), 0);
    }

    /// Test Case: Admins hold every capability
    #[tokio::test]
    async fn test_add_course_as_admin() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        seed_catalogue(db).await;
        let (_, token) = seed_user(db, "admin", true, &[]).await;

        let (status, _) = send(&app, "POST", "/api/courses", Some(&token), Some(business_course())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(CourseEntity::find().count(db).await.unwrap(), 1);
    }

    /// Test Case: Body is cleaned before it is stored
    #[tokio::test]
    async fn test_add_course_sanitizes_input() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        seed_catalogue(db).await;
        let (_, token) = seed_user(db, "clerk", false, &[Capability::CourseAdd]).await;

        let body = json!({
            "national_code": " bsb40120 ",
            "aqf_level": "IV",
            "title": "<b>Business</b>   Studies",
            "state_code": "",
            "nominal_hours": "600",
            "cluster_id": "1",
            "unit_id": 3,
        });
        let (status, json) = send(&app, "POST", "/api/courses", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        let data = &json["data"];
        assert_eq!(data["national_code"], "BSB40120");
        assert_eq!(data["title"], "Business Studies");
        assert!(data["state_code"].is_null());
        assert_eq!(data["nominal_hours"], 600);
        assert_eq!(ids(&data["clusters"]), vec![1]);
        assert_eq!(ids(&data["units"]), vec![3]);
    }

    /// Test Case: Repeated ids link once
    #[tokio::test]
    async fn test_add_course_collapses_duplicate_ids() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        seed_catalogue(db).await;
        let (_, token) = seed_user(db, "clerk", false, &[Capability::CourseAdd]).await;

        let mut body = business_course();
        body["unit_id"] = json!([5, 5, "5", 6]);
        let (status, json) = send(&app, "POST", "/api/courses", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(ids(&json["data"]["units"]), vec![5, 6]);
    }

    /// Test Case: Missing required field
    #[tokio::test]
    async fn test_add_course_validation_failure() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = seed_user(db, "clerk", false, &[Capability::CourseAdd]).await;

        let body = json!({"national_code": "BSB40120", "aqf_level": "IV"});
        let (status, json) = send(&app, "POST", "/api/courses", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], 400);
        assert!(json["message"].as_str().unwrap().contains("title"));
        assert_eq!(CourseEntity::find().count(db).await.unwrap(), 0);
    }

    /// Test Case: Linking a cluster that does not exist rolls the course back
    #[tokio::test]
    async fn test_add_course_with_unknown_cluster() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        seed_catalogue(db).await;
        let (_, token) = seed_user(db, "clerk", false, &[Capability::CourseAdd]).await;

        let mut body = business_course();
        body["cluster_id"] = json!([42]);
        let (status, json) = send(&app, "POST", "/api/courses", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course creation failed");
        assert_eq!(CourseEntity::find().count(db).await.unwrap(), 0);
        assert_eq!(course_cluster::Entity::find().count(db).await.unwrap(), 0);
    }

    /// Test Case: Missing authorization header
    #[tokio::test]
    async fn test_add_course_unauthorized() {
        let (app, app_state) = make_test_app().await;

        let (status, json) = send(&app, "POST", "/api/courses", None, Some(business_course())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Authentication required");
        assert_eq!(json["status"], 401);
        assert_eq!(CourseEntity::find().count(app_state.db()).await.unwrap(), 0);
    }

    /// Test Case: The injected checker decides, not the permission table
    #[tokio::test]
    async fn test_add_course_uses_injected_capabilities() {
        let (app, app_state) = make_test_app_with(|_| {
            Arc::new(StaticCapabilities::new().grant(1, Capability::CourseAdd))
        })
        .await;
        let db = app_state.db();
        seed_catalogue(db).await;
        let (granted, granted_token) = seed_user(db, "granted", false, &[]).await;
        let (_, other_token) = seed_user(db, "other", false, &[Capability::CourseAdd]).await;
        assert_eq!(granted.id, 1);

        let (status, _) = send(&app, "POST", "/api/courses", Some(&other_token), Some(business_course())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "POST", "/api/courses", Some(&granted_token), Some(business_course())).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, seed_course, seed_user, send};
    use axum::http::StatusCode;
    use db::models::{
        cluster::Model as ClusterModel,
        course::{Entity as CourseEntity, Model as CourseModel},
        course_cluster, course_unit,
        unit::Model as UnitModel,
    };
    use sea_orm::{DatabaseConnection, EntityTrait};
    use serde_json::json;
    use util::capability::Capability;

    struct TestData {
        course: CourseModel,
        clusters: Vec<i64>,
        units: Vec<i64>,
    }

    /// A course linked to clusters {1, 2} and unit {1}, with a spare cluster 3 and unit 2.
    async fn setup_test_data(db: &DatabaseConnection) -> TestData {
        let mut clusters = Vec::new();
        for code in ["NET1", "NET2", "SEC1"] {
            clusters.push(ClusterModel::create(db, code, code, None, None).await.unwrap().id);
        }
        let mut units = Vec::new();
        for code in ["ICTNWK401", "ICTSAS432"] {
            units.push(UnitModel::create(db, code, code).await.unwrap().id);
        }

        let course = seed_course(db, "ICT40120", "IV", "Networking").await;
        course.sync_clusters(db, &clusters[..2]).await.unwrap();
        course.sync_units(db, &units[..1]).await.unwrap();

        TestData { course, clusters, units }
    }

    async fn linked(db: &DatabaseConnection, course_id: i64) -> (Vec<i64>, Vec<i64>) {
        (
            course_cluster::Model::cluster_ids(db, course_id).await.unwrap().into_iter().collect(),
            course_unit::Model::unit_ids(db, course_id).await.unwrap().into_iter().collect(),
        )
    }

    /// Test Case: Edit replaces the link sets rather than merging them
    #[tokio::test]
    async fn test_edit_course_replaces_links() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let data = setup_test_data(db).await;
        let (_, token) = seed_user(db, "editor", false, &[Capability::CourseEdit]).await;

        let body = json!({"title": "Network Security", "cluster_id": [data.clusters[2]], "unit_id": data.units});
        let uri = format!("/api/courses/{}", data.course.id);
        let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Course updated");
        assert_eq!(json["status"], 201);
        assert_eq!(json["data"]["title"], "Network Security");
        assert_eq!(json["data"]["national_code"], "ICT40120");

        let (status, read) = send(&app, "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        let clusters: Vec<_> = read["data"]["clusters"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(clusters, vec![data.clusters[2]]);
        assert_eq!(linked(db, data.course.id).await, (vec![data.clusters[2]], data.units.clone()));
    }

    /// Test Case: Omitted link lists unlink everything
    #[tokio::test]
    async fn test_edit_course_without_lists_detaches_all() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let data = setup_test_data(db).await;
        let (_, token) = seed_user(db, "editor", false, &[Capability::CourseEdit]).await;

        let uri = format!("/api/courses/{}", data.course.id);
        let (status, json) = send(&app, "PATCH", &uri, Some(&token), Some(json!({"nominal_hours": 720}))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["nominal_hours"], 720);
        assert_eq!(json["data"]["title"], "Networking");
        assert_eq!(linked(db, data.course.id).await, (vec![], vec![]));
    }

    /// Test Case: Explicit null or blank values clear nullable fields
    #[tokio::test]
    async fn test_edit_course_clears_nullable_fields() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = seed_user(db, "editor", false, &[Capability::CourseEdit, Capability::CourseAdd]).await;

        let body = json!({
            "national_code": "BSB40120",
            "aqf_level": "IV",
            "title": "Business",
            "tga_status": "Current",
            "state_code": "AC21",
            "nominal_hours": 600,
        });
        let (status, created) = send(&app, "POST", "/api/courses", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let uri = format!("/api/courses/{}", created["data"]["id"]);

        let body = json!({"tga_status": null, "state_code": "", "nominal_hours": null});
        let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(json["data"]["tga_status"].is_null());
        assert!(json["data"]["state_code"].is_null());
        assert!(json["data"]["nominal_hours"].is_null());
        assert_eq!(json["data"]["title"], "Business");

        let id = created["data"]["id"].as_i64().unwrap();
        let stored = CourseEntity::find_by_id(id).one(db).await.unwrap().unwrap();
        assert_eq!((stored.tga_status, stored.state_code, stored.nominal_hours), (None, None, None));
    }

    /// Test Case: Caller without `course edit` changes nothing
    #[tokio::test]
    async fn test_edit_course_forbidden() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let data = setup_test_data(db).await;
        let (_, token) = seed_user(db, "clerk", false, &[Capability::CourseAdd, Capability::CourseDelete]).await;

        let body = json!({"title": "Hijacked", "cluster_id": [data.clusters[2]]});
        let uri = format!("/api/courses/{}", data.course.id);
        let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "You are not authorised to update this course.");

        let stored = CourseEntity::find_by_id(data.course.id).one(db).await.unwrap().unwrap();
        assert_eq!(stored, data.course);
        assert_eq!(linked(db, data.course.id).await, (data.clusters[..2].to_vec(), data.units[..1].to_vec()));
    }

    /// Test Case: Edit of a course that does not exist
    #[tokio::test]
    async fn test_edit_course_not_found() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = seed_user(app_state.db(), "admin", true, &[]).await;

        let (status, json) =
            send(&app, "PUT", "/api/courses/99999", Some(&token), Some(json!({"title": "Ghost"}))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found");
    }

    /// Test Case: Invalid field values are rejected before any write
    #[tokio::test]
    async fn test_edit_course_validation_failure() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let data = setup_test_data(db).await;
        let (_, token) = seed_user(db, "editor", false, &[Capability::CourseEdit]).await;

        let uri = format!("/api/courses/{}", data.course.id);
        let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(json!({"nominal_hours": -1}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Nominal hours must be between 0 and 100000");
        assert_eq!(linked(db, data.course.id).await.0, data.clusters[..2].to_vec());
    }

    /// Test Case: A failed link write leaves the course untouched
    #[tokio::test]
    async fn test_edit_course_with_unknown_unit_rolls_back() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let data = setup_test_data(db).await;
        let (_, token) = seed_user(db, "editor", false, &[Capability::CourseEdit]).await;

        let body = json!({"title": "Renamed", "cluster_id": [data.clusters[0]], "unit_id": [777]});
        let uri = format!("/api/courses/{}", data.course.id);
        let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course update failed.");

        let stored = CourseEntity::find_by_id(data.course.id).one(db).await.unwrap().unwrap();
        assert_eq!(stored.title, "Networking");
        assert_eq!(linked(db, data.course.id).await, (data.clusters[..2].to_vec(), data.units[..1].to_vec()));
    }
}

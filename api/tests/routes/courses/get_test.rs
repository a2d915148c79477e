#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, seed_course, send};
    use axum::http::StatusCode;
    use db::models::{cluster::Model as ClusterModel, course::Model as CourseModel, unit::Model as UnitModel};
    use serde_json::json;

    /// Test Case: Browse on an empty table
    #[tokio::test]
    async fn test_browse_empty_table_is_not_found() {
        let (app, _) = make_test_app().await;

        let (status, json) = send(&app, "GET", "/api/courses", None, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json,
            json!({"success": false, "data": [], "message": "No courses found.", "status": 404})
        );
    }

    /// Test Case: Browse without a search term lists everything in id order
    #[tokio::test]
    async fn test_browse_all_courses() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        seed_course(db, "ICT40120", "IV", "Certificate IV in IT").await;
        seed_course(db, "BSB40120", "IV", "Business").await;
        seed_course(db, "CHC30121", "III", "Early Childhood").await;

        let (status, json) = send(&app, "GET", "/api/courses", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], 200);
        assert_eq!(json["message"], "Found all 3 courses");
        let codes: Vec<_> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["national_code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["ICT40120", "BSB40120", "CHC30121"]);
    }

    /// Test Case: Search matches any searchable field, case-sensitively
    #[tokio::test]
    async fn test_browse_search_reports_subset() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        seed_course(db, "ICT40120", "IV", "Certificate IV in IT").await;
        seed_course(db, "BSB40120", "Cert IV", "Business").await;
        seed_course(db, "CHC30121", "III", "certified childcare").await;
        seed_course(db, "SIT30622", "III", "Hospitality").await;

        let (status, json) = send(&app, "GET", "/api/courses?search=Cert", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Search results for: 'Cert' [2 of 4 course(s) found]");
        let expected: Vec<_> = CourseModel::search(db, Some("Cert"))
            .await
            .unwrap()
            .into_iter()
            .map(|c| json!(c.id))
            .collect();
        let ids: Vec<_> = json["data"].as_array().unwrap().iter().map(|c| c["id"].clone()).collect();
        assert_eq!(ids, expected);
        assert_eq!(ids.len(), 2);
    }

    /// Test Case: Search with no matches
    #[tokio::test]
    async fn test_browse_search_without_matches() {
        let (app, app_state) = make_test_app().await;
        seed_course(app_state.db(), "BSB40120", "IV", "Business").await;

        let (status, json) = send(&app, "GET", "/api/courses?search=Plumbing", None, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "No courses found.");
    }

    /// Test Case: Blank search is the same as no search
    #[tokio::test]
    async fn test_browse_blank_search_lists_all() {
        let (app, app_state) = make_test_app().await;
        seed_course(app_state.db(), "BSB40120", "IV", "Business").await;

        let (status, json) = send(&app, "GET", "/api/courses?search=%20%20", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Found all 1 courses");
    }

    /// Test Case: Search term longer than 100 characters
    #[tokio::test]
    async fn test_browse_search_too_long() {
        let (app, _) = make_test_app().await;
        let uri = format!("/api/courses?search={}", "a".repeat(101));

        let (status, json) = send(&app, "GET", &uri, None, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Search term must be at most 100 characters");
    }

    /// Test Case: Read includes clusters and units
    #[tokio::test]
    async fn test_read_course_with_links() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let course = seed_course(db, "BSB40120", "IV", "Business").await;
        let cluster = ClusterModel::create(db, "BUS1", "Business Basics", None, None).await.unwrap();
        let unit = UnitModel::create(db, "BSBOPS401", "Coordinate business resources").await.unwrap();
        course.sync_clusters(db, &[cluster.id]).await.unwrap();
        course.sync_units(db, &[unit.id]).await.unwrap();

        let (status, json) = send(&app, "GET", &format!("/api/courses/{}", course.id), None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Course found");
        assert_eq!(json["data"]["title"], "Business");
        assert_eq!(json["data"]["clusters"][0]["code"], "BUS1");
        assert_eq!(json["data"]["units"][0]["national_code"], "BSBOPS401");
    }

    /// Test Case: Read of a missing or malformed id
    #[tokio::test]
    async fn test_read_course_not_found() {
        let (app, _) = make_test_app().await;

        for uri in ["/api/courses/99999", "/api/courses/not-a-number"] {
            let (status, json) = send(&app, "GET", uri, None, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(json["message"], "Course not found");
            assert_eq!(json["data"], json!([]));
        }
    }
}

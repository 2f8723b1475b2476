mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{row_slugs, ApiCall, RecordingFleetApi, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::with_defaults();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fleet_dashboard");
}

#[tokio::test]
async fn test_dashboard_loads_everything() {
    let app = TestApp::with_defaults();
    let (status, body) = app.get("/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    let calls = app.api.calls();
    assert!(calls.contains(&ApiCall::FetchAnalytics));
    assert!(calls.contains(&ApiCall::FetchShipments));
    assert!(calls.contains(&ApiCall::FetchMaintenances));

    assert_eq!(body["analyticsStatus"], "ready");
    let cards = body["analytics"].as_array().unwrap();
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[2]["key"], "totalCouriers");
    assert_eq!(cards[2]["title"], "Total Shipments");
    assert_eq!(cards[2]["value"], 40);

    assert_eq!(body["shipments"]["store"]["status"], "ready");
    assert_eq!(body["shipments"]["table"]["rows"].as_array().unwrap().len(), 3);
    assert_eq!(body["maintenances"]["table"]["pagination"]["totalCount"], 2);
}

#[tokio::test]
async fn test_dashboard_survives_failed_reads() {
    let api = RecordingFleetApi::new(common::default_shipments(), vec![]);
    api.fail_reads(true);
    let app = TestApp::new(api);

    let (status, body) = app.get("/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shipments"]["store"]["status"], "failed");
    assert_eq!(body["shipments"]["table"]["emptyState"], "No results.");
    assert_eq!(body["analyticsStatus"], "failed");
    assert!(body["analytics"].is_null());
}

#[tokio::test]
async fn test_failed_analytics_refresh_keeps_last_cards() {
    let app = TestApp::with_defaults().loaded().await;
    app.api.fail_reads(true);

    let (status, body) = app.get("/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analyticsStatus"], "failed");
    assert_eq!(body["analytics"][2]["value"], 40);
}

#[tokio::test]
async fn test_analytics_failure_is_generic() {
    let api = RecordingFleetApi::new(vec![], vec![]);
    api.fail_reads(true);
    let app = TestApp::new(api);

    let (status, body) = app.get("/api/analytics").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Please try again later");
    assert!(!body.to_string().contains("/shipments/analytics/"));
}

#[tokio::test]
async fn test_vehicles_are_derived_from_shipments() {
    let app = TestApp::with_defaults().loaded().await;
    let (status, body) = app.get("/api/vehicles").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["record"]["kind"], "truck");
}

#[tokio::test]
async fn test_shipment_intents() {
    let app = TestApp::with_defaults().loaded().await;

    let (status, body) = app
        .post(
            "/api/shipments/intent",
            json!({ "action": "sort", "sorting": [{ "column": "slug", "direction": "desc" }] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_slugs(&body), vec!["SHP-003", "SHP-002", "SHP-001"]);

    let (_, body) = app
        .post(
            "/api/shipments/intent",
            json!({ "action": "filter", "column": "slug", "value": "002" }),
        )
        .await;
    assert_eq!(row_slugs(&body), vec!["SHP-002"]);
    assert_eq!(body["state"]["pageIndex"], 0);

    let (_, body) = app
        .post("/api/shipments/intent", json!({ "action": "select", "id": "s-2" }))
        .await;
    assert_eq!(body["table"]["selection"]["footer"], "1 of 1 row(s) selected.");
    assert_eq!(body["details"]["slug"], "SHP-002");
    assert_eq!(body["details"]["vehicleKind"], "truck");
    assert_eq!(body["details"]["health"][0]["level"], "Excellent");
}

#[tokio::test]
async fn test_invalid_intents_are_bad_requests() {
    let app = TestApp::with_defaults().loaded().await;

    let cases = [
        json!({ "action": "sort", "sorting": [{ "column": "nope", "direction": "asc" }] }),
        json!({ "action": "pageSize", "pageSize": 0 }),
        json!({ "action": "launch" }),
        json!({ "action": "toggleSort", "column": "parts" }),
    ];
    for case in cases {
        let (status, _) = app.post("/api/maintenances/intent", case.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "intent {}", case);
    }
}

#[tokio::test]
async fn test_maintenance_columns_can_be_hidden() {
    let app = TestApp::with_defaults().loaded().await;
    let (status, body) = app
        .post(
            "/api/maintenances/intent",
            json!({ "action": "visibility", "column": "parts", "visible": false }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let cells = body["table"]["rows"][0]["cells"].as_array().unwrap();
    assert!(cells.iter().all(|c| c["column"] != "parts"));

    let (status, _) = app
        .post(
            "/api/maintenances/intent",
            json!({ "action": "visibility", "column": "slug", "visible": false }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_open_unknown_record_is_not_found() {
    let app = TestApp::with_defaults().loaded().await;
    let (status, _) = app.post_empty("/api/shipments/nope/cancel").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.post_empty("/api/maintenances/cancellation/confirm").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.api.mutations().is_empty());
}

#[tokio::test]
async fn test_session_login_and_logout() {
    let app = TestApp::with_defaults();

    let (status, _) = app.get("/api/session").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post(
            "/api/session/login",
            json!({ "accessToken": "tok-1", "user": { "name": "Ada", "role": "admin" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["name"], "Ada");
    assert_eq!(app.state.session.access_token().as_deref(), Some("tok-1"));

    let (status, body) = app.get("/api/session").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert!(body.get("accessToken").is_none());

    let (status, _) = app.post_empty("/api/session/logout").await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.state.session.current().is_none());
}

#[tokio::test]
async fn test_notifications_can_be_dismissed() {
    let app = TestApp::with_defaults().loaded().await;
    app.post_empty("/api/shipments/s-1/cancel").await;
    app.post_empty("/api/shipments/cancellation/confirm").await;

    let (_, list) = app.get("/api/notifications").await;
    let list = list.as_array().unwrap().clone();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["level"], "success");

    let id = list[0]["id"].as_str().unwrap();
    let (status, _) = app.delete(&format!("/api/notifications/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete(&format!("/api/notifications/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

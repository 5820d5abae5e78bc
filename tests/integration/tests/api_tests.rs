//! API Integration Tests
//!
//! Each test spawns its own server over a fresh in-memory store, so no
//! external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

const MONDAY: &str = "2024-05-06";
const TUESDAY: &str = "2024-05-07";
const WEDNESDAY: &str = "2024-05-08";

async fn create(server: &TestServer, form: &SnapshotForm) -> Snapshot {
    let response = server.post("/api/v1/snapshots", form).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn list(server: &TestServer, date: &str) -> Vec<Snapshot> {
    let response = server
        .get(&format!("/api/v1/snapshots?date={date}"))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["checks"]["store"], "healthy");
    assert_eq!(body["checks"]["recognizer"], "disabled");
}

// ============================================================================
// Snapshot Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_list_snapshot() {
    let server = TestServer::start().await.unwrap();

    let created = create(&server, &SnapshotForm::new(MONDAY, "Anna").power("8.5")).await;

    assert!(created.id.starts_with("2024-05-06_Anna_"));
    assert!(created.low_power);
    assert_eq!(created.duel_score, 0);
    assert_eq!(created.duel_alert, "critical");

    let day = list(&server, MONDAY).await;
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].id, created.id);
    assert!(list(&server, TUESDAY).await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_bad_input() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/snapshots", &SnapshotForm::new(MONDAY, "Anna").power("lots"))
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_NUMBER");

    let no_name = SnapshotForm::new(MONDAY, "  ");
    let response = server.post("/api/v1/snapshots", &no_name).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "MISSING_NAME");

    let mut bad_level = SnapshotForm::new(MONDAY, "Anna");
    bad_level.level = 31;
    let response = server.post("/api/v1/snapshots", &bad_level).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert!(list(&server, MONDAY).await.is_empty());
}

#[tokio::test]
async fn test_update_and_delete_snapshot() {
    let server = TestServer::start().await.unwrap();
    let created = create(&server, &SnapshotForm::new(MONDAY, "Anna")).await;
    let path = format!("/api/v1/snapshots/{}", created.id);

    let response = server
        .put(&path, &SnapshotForm::new(MONDAY, "Anna").power("20").rank("R3"))
        .await
        .unwrap();
    let updated: Snapshot = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.power, 20.0);
    assert_eq!(updated.rank, "R3");

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put(&path, &SnapshotForm::new(MONDAY, "Anna"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Bulk Operation Tests
// ============================================================================

#[tokio::test]
async fn test_copy_previous_day_resets_duel() {
    let server = TestServer::start().await.unwrap();
    create(&server, &SnapshotForm::new(MONDAY, "Anna").duel("3000000")).await;
    create(&server, &SnapshotForm::new(MONDAY, "Bob").duel("4000000")).await;

    let response = server
        .post_empty(&format!("/api/v1/days/{TUESDAY}/copy-previous"))
        .await
        .unwrap();
    let result: Affected = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.affected, 2);

    let tuesday = list(&server, TUESDAY).await;
    assert_eq!(tuesday.len(), 2);
    assert!(tuesday.iter().all(|s| s.duel_score == 0 && s.date == TUESDAY));
}

#[tokio::test]
async fn test_copy_selection_keeps_duel() {
    let server = TestServer::start().await.unwrap();
    let anna = create(&server, &SnapshotForm::new(MONDAY, "Anna").duel("3000000")).await;
    create(&server, &SnapshotForm::new(MONDAY, "Bob").duel("4000000")).await;

    let response = server
        .post(
            "/api/v1/snapshots/copy",
            &json!({ "ids": [anna.id], "target_date": WEDNESDAY }),
        )
        .await
        .unwrap();
    let result: Affected = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.affected, 1);

    let wednesday = list(&server, WEDNESDAY).await;
    assert_eq!(wednesday.len(), 1);
    assert_eq!(wednesday[0].duel_score, 3_000_000);
}

#[tokio::test]
async fn test_reset_dedupe_and_bulk_update() {
    let server = TestServer::start().await.unwrap();
    let anna = create(&server, &SnapshotForm::new(MONDAY, "Anna").duel("3000000")).await;
    create(&server, &SnapshotForm::new(MONDAY, " anna ").duel("1000000")).await;
    let bob = create(&server, &SnapshotForm::new(MONDAY, "Bob").duel("4000000")).await;

    let response = server
        .post_empty(&format!("/api/v1/days/{MONDAY}/dedupe"))
        .await
        .unwrap();
    let result: Affected = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.affected, 1);

    let response = server
        .post_empty(&format!("/api/v1/days/{MONDAY}/dedupe"))
        .await
        .unwrap();
    let result: Affected = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.affected, 0);

    let response = server
        .post_empty(&format!("/api/v1/days/{MONDAY}/reset-duel"))
        .await
        .unwrap();
    let result: Affected = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.affected, 2);

    let response = server
        .patch(
            "/api/v1/snapshots/bulk",
            &json!({ "ids": [anna.id, bob.id], "rank": "R2", "power": "" }),
        )
        .await
        .unwrap();
    let result: Affected = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.affected, 2);

    let day = list(&server, MONDAY).await;
    assert_eq!(day.len(), 2);
    assert!(day.iter().all(|s| s.rank == "R2" && s.duel_score == 0 && s.power == 15.0));
}

// ============================================================================
// View Tests
// ============================================================================

#[tokio::test]
async fn test_roster_view_filter_and_search() {
    let server = TestServer::start().await.unwrap();
    create(&server, &SnapshotForm::new(MONDAY, "Anna").power("8")).await;
    create(&server, &SnapshotForm::new(MONDAY, "Hans").power("9").rank("R3")).await;
    create(&server, &SnapshotForm::new(MONDAY, "Bob").power("7")).await;
    create(&server, &SnapshotForm::new(MONDAY, "Zed").power("20").rank("R2")).await;

    let response = server
        .get(&format!("/api/v1/views/roster?date={MONDAY}&filter=low_power&search=an"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let groups = body["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0]["rank"], "R3");
    assert_eq!(groups[0]["members"][0]["name"], "Hans");
    assert_eq!(groups[1]["count"], 0);
    assert_eq!(groups[2]["members"][0]["name"], "Anna");
    assert_eq!(body["stats"]["total"], 4);
    assert_eq!(body["stats"]["low_power"], 3);
}

#[tokio::test]
async fn test_unknown_filter_rejected() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get("/api/v1/views/power?filter=sleepy")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_weekly_duel() {
    let server = TestServer::start().await.unwrap();
    create(&server, &SnapshotForm::new(MONDAY, "Anna").duel("1000000")).await;
    create(&server, &SnapshotForm::new(TUESDAY, "Anna").duel("2000000")).await;
    create(&server, &SnapshotForm::new(WEDNESDAY, "Anna").duel("3000000")).await;
    create(&server, &SnapshotForm::new(TUESDAY, "Bob").duel("7000000")).await;

    let response = server
        .get(&format!("/api/v1/views/duel/weekly?date={WEDNESDAY}"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["week_start"], MONDAY);
    let scores = body["scores"].as_array().unwrap();
    assert_eq!(scores[0]["name"], "Bob");
    assert_eq!(scores[1]["name"], "Anna");
    assert_eq!(scores[1]["total_score"], 6_000_000);
    assert_eq!(scores[1]["yesterday_score"], 2_000_000);
    assert_eq!(scores[1]["participation"], "3/7");
}

#[tokio::test]
async fn test_power_progress_and_range_errors() {
    let server = TestServer::start().await.unwrap();
    create(&server, &SnapshotForm::new(MONDAY, "Anna").power("12")).await;
    create(&server, &SnapshotForm::new(WEDNESDAY, "Anna").power("15")).await;

    let response = server
        .get(&format!("/api/v1/views/progress/power?start={MONDAY}&end={WEDNESDAY}"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["mode"], "power");
    assert_eq!(body["capped"], false);
    assert_eq!(body["dates"].as_array().unwrap().len(), 3);
    let row = &body["rows"][0];
    assert_eq!(row["total_growth"], 3.0);
    assert!(row["cells"][1].is_null());
    assert_eq!(row["cells"][2]["power_tone"], "up");

    let response = server
        .get(&format!("/api/v1/views/progress/duel?start={WEDNESDAY}&end={MONDAY}"))
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_DATE_RANGE");

    let response = server
        .get("/api/v1/views/progress/duel?start=2024-01-01&end=2024-03-01")
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["capped"], true);
    assert_eq!(body["dates"].as_array().unwrap().len(), 32);
}

// ============================================================================
// Config and Recognition Tests
// ============================================================================

#[tokio::test]
async fn test_config_defaults_and_logo() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/config").await.unwrap();
    let defaults: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let name = defaults["alliance_name"].clone();
    assert!(name.is_string());

    let logo = "data:image/png;base64,aGVsbG8=";
    let response = server
        .put("/api/v1/config/logo", &json!({ "logo": logo }))
        .await
        .unwrap();
    let config: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(config["logo"], logo);
    assert_eq!(config["alliance_name"], name);

    let response = server
        .patch("/api/v1/config", &json!({ "alliance_name": "Night Watch" }))
        .await
        .unwrap();
    let config: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(config["alliance_name"], "Night Watch");
    assert_eq!(config["logo"], logo);
}

#[tokio::test]
async fn test_recognize_name_without_recognizer() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(
            "/api/v1/recognize-name",
            &json!({ "image": "data:image/png;base64,aGVsbG8=" }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["name"].is_null());
}

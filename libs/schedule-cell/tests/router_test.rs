use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use schedule_cell::router::{preview_routes, schedule_routes};
use shared_config::AppConfig;
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};
use shared_utils::ClinicClock;

const TODAY: &str = "2026-10-14";
const NEXT_WEEK: &str = "2026-10-20";

fn pinned_state(mock_server: &MockServer) -> Arc<AppConfig> {
    let today = NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").unwrap();
    TestConfig::with_url(&mock_server.uri()).on_day(today).to_arc()
}

async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_delete_without_confirmation_is_rejected() {
    let mock_server = MockServer::start().await;
    let state = pinned_state(&mock_server);

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let uri = format!("/{}/days/{}/windows/{}", Uuid::new_v4(), NEXT_WEEK, Uuid::new_v4());
    let response = schedule_routes(state).oneshot(empty_request("DELETE", &uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_confirmed_delete_returns_refreshed_list() {
    let mock_server = MockServer::start().await;
    let state = pinned_state(&mock_server);
    let doctor_id = Uuid::new_v4();
    let window_id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctor_schedules"))
        .and(query_param("id", format!("eq.{}", window_id)))
        .and(query_param("doctor_id", format!("eq.{}", doctor_id)))
        .and(query_param("schedule_date", format!("eq.{}", NEXT_WEEK)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = format!("/{}/days/{}/windows/{}?confirm=true", doctor_id, NEXT_WEEK, window_id);
    let response = schedule_routes(state).oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json_response = body_json(response).await;
    assert_eq!(json_response["message"], "تم حذف الفترة بنجاح");
    assert_eq!(json_response["data"]["removed_id"], json!(window_id));
    assert_eq!(json_response["data"]["windows"], json!([]));
}

#[tokio::test]
async fn test_adding_to_past_date_is_rejected() {
    let mock_server = MockServer::start().await;
    let state = pinned_state(&mock_server);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    // The day before the clinic's today.
    let uri = format!("/{}/days/2026-10-13/windows", Uuid::new_v4());
    let response = schedule_routes(state)
        .oneshot(json_request("POST", &uri, json!({ "start_time": "09:00", "end_time": "12:00" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_window_duplicate_is_conflict() {
    let mock_server = MockServer::start().await;
    let state = pinned_state(&mock_server);
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::schedule_row(&doctor_id.to_string(), NEXT_WEEK, "09:00", "17:00", 30)
        ])))
        .mount(&mock_server)
        .await;

    let uri = format!("/{}/days/{}/windows", doctor_id, NEXT_WEEK);
    let response = schedule_routes(state)
        .oneshot(json_request("POST", &uri, json!({
            "start_time": "09:00",
            "end_time": "17:00",
            "slot_duration_minutes": 30
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json_response = body_json(response).await;
    assert_eq!(json_response["error"], "يوجد موعد مكرر في هذا الوقت");
}

#[tokio::test]
async fn test_add_window_success() {
    let mock_server = MockServer::start().await;
    let state = pinned_state(&mock_server);
    let doctor_id = Uuid::new_v4();
    let created = MockSupabaseResponses::schedule_row(&doctor_id.to_string(), NEXT_WEEK, "09:00", "12:00", 15);

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_schedules"))
        .and(query_param("schedule_date", format!("eq.{}", NEXT_WEEK)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctor_schedules"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([created.clone()])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([created])))
        .mount(&mock_server)
        .await;

    let uri = format!("/{}/days/{}/windows", doctor_id, NEXT_WEEK);
    let response = schedule_routes(state)
        .oneshot(json_request("POST", &uri, json!({
            "start_time": "09:00",
            "end_time": "12:00",
            "slot_duration_minutes": 15,
            "notes": "صباحي"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json_response = body_json(response).await;
    assert_eq!(json_response["success"], true);
    assert_eq!(json_response["message"], "تم إضافة فترة العمل بنجاح");
    assert_eq!(json_response["data"]["window"]["start_time"], "09:00");
    assert_eq!(json_response["data"]["windows"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_calendar_for_requested_month() {
    let mock_server = MockServer::start().await;
    let state = pinned_state(&mock_server);
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::schedule_row(&doctor_id.to_string(), "2026-02-10", "09:00", "12:00", 30)
        ])))
        .mount(&mock_server)
        .await;

    let uri = format!("/{}/calendar?year=2026&month=2", doctor_id);
    let response = schedule_routes(state).oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let grid = body_json(response).await;
    let days = grid["days"].as_array().unwrap();
    assert_eq!(days.len(), 28);
    assert_eq!(grid["weekdays_ar"][0], "الأحد");

    let tenth = days.iter().find(|d| d["date"] == "2026-02-10").unwrap();
    assert_eq!(tenth["previews"], json!(["09:00 - 12:00"]));
}

#[tokio::test]
async fn test_calendar_rejects_invalid_month() {
    let mock_server = MockServer::start().await;
    let state = pinned_state(&mock_server);

    let uri = format!("/{}/calendar?year=2026&month=13", Uuid::new_v4());
    let response = schedule_routes(state).oneshot(empty_request("GET", &uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_draft_preview() {
    let state = TestConfig::default().to_arc();

    let response = schedule_routes(state.clone())
        .oneshot(json_request("POST", "/preview", json!({
            "start_time": "09:00",
            "end_time": "17:00",
            "slot_duration_minutes": 30
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let preview = body_json(response).await;
    assert_eq!(preview["slot_count"], 16);
    assert_eq!(preview["can_submit"], true);
    assert_eq!(preview["slots"][15]["end"], "17:00");

    let response = schedule_routes(state)
        .oneshot(json_request("POST", "/preview", json!({ "slot_duration_minutes": 20 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_prompt_text_for_doctor() {
    let mock_server = MockServer::start().await;
    let state = pinned_state(&mock_server);
    let doctor_id = Uuid::new_v4().to_string();
    let today = ClinicClock::from_config(&state).today();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::doctor_row(&doctor_id, "DOC-0001", &Uuid::new_v4().to_string())
        ])))
        .mount(&mock_server)
        .await;

    let within = today.format("%Y-%m-%d").to_string();
    let beyond = (today + Duration::days(10)).format("%Y-%m-%d").to_string();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctor_schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::schedule_row(&doctor_id, &within, "09:00", "17:00", 30),
            MockSupabaseResponses::schedule_row(&doctor_id, &beyond, "09:00", "17:00", 30)
        ])))
        .mount(&mock_server)
        .await;

    let uri = format!("/doctors/{}/text", doctor_id);
    let response = preview_routes(state).oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.starts_with("Doctor: Dr. Sara\nDepartment: Dermatology"));
    assert!(text.contains("Specialization: Cosmetic Dermatology"));
    assert!(text.contains("Services: None"));
    assert!(text.contains("Available Slots: 1 time periods this week"));
    assert!(text.contains(&format!("{} ", within)));
    assert!(text.ends_with("09:00-17:00 (16 x 30min)"));
}

#[tokio::test]
async fn test_summary_for_missing_doctor_is_404() {
    let mock_server = MockServer::start().await;
    let state = pinned_state(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let uri = format!("/doctors/{}", Uuid::new_v4());
    let response = preview_routes(state).oneshot(empty_request("GET", &uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

use assert_matches::assert_matches;
use reqwest::Method;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        supabase_url: server.uri(),
        supabase_anon_key: "test-anon-key".to_string(),
        supabase_service_key: "test-service-key".to_string(),
        clinic_timezone: chrono_tz::Asia::Dubai,
        clinic_today: None,
        port: 3000,
    }
}

#[tokio::test]
async fn test_request_sends_keys_and_decodes_rows() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/departments"))
        .and(header("apikey", "test-anon-key"))
        .and(header("Authorization", "Bearer test-service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "d1"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config_for(&mock_server));
    let rows: Vec<Value> = client
        .request(Method::GET, "/rest/v1/departments", None, None)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "d1");
}

#[tokio::test]
async fn test_unique_violation_is_downcastable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctor_schedules"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"doctor_schedules_unique\""
        })))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config_for(&mock_server));
    let err = client
        .request::<Vec<Value>>(Method::POST, "/rest/v1/doctor_schedules", None, Some(json!({})))
        .await
        .unwrap_err();

    assert_matches!(
        err.downcast_ref::<DatabaseError>(),
        Some(DatabaseError::UniqueViolation { .. })
    );
}

#[tokio::test]
async fn test_execute_ignores_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctor_schedules"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config_for(&mock_server));
    let result = client
        .execute(Method::DELETE, "/rest/v1/doctor_schedules?id=eq.x", None, None, None)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_count_reads_content_range() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/rest/v1/doctors"))
        .and(header("Prefer", "count=exact"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "0-11/12"))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config_for(&mock_server));
    let total = client.count("/rest/v1/doctors?select=id", None).await.unwrap();

    assert_eq!(total, 12);
}

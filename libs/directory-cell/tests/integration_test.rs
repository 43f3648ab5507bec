use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use directory_cell::models::{CreateDoctorRequest, ServiceType, UpdateDoctorRequest};
use directory_cell::router::{dashboard_routes, department_routes, doctor_routes};
use directory_cell::services::{DashboardService, DoctorDirectory, DoctorService, SupabaseDoctorDirectory};
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

async fn mount_last_code(mock_server: &MockServer, table: &str, code: Option<&str>) {
    let body = match code {
        Some(code) => json!([{ "code": code }]),
        None => json!([]),
    };

    Mock::given(method("GET"))
        .and(path(format!("/rest/v1/{}", table)))
        .and(query_param("select", "code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_create_doctor_generates_next_code_and_links_services() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_app_config();

    let doctor_id = Uuid::new_v4().to_string();
    let department_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    mount_last_code(&mock_server, "doctors", Some("DOC-0041")).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::doctor_row(&doctor_id, "DOC-0042", &department_id.to_string())
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctor_services"))
        .and(body_json(json!([{
            "doctor_id": doctor_id,
            "service_id": service_id,
            "is_active": true
        }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&config);
    let creation = service.create_doctor(CreateDoctorRequest {
        department_id,
        name_ar: "د. سارة".to_string(),
        name_en: "Dr. Sara".to_string(),
        specialization_ar: None,
        specialization_en: None,
        is_active: None,
        service_ids: vec![service_id],
    }).await.unwrap();

    assert_eq!(creation.doctor.code, "DOC-0042");
    assert!(creation.services_linked);

    let requests = mock_server.received_requests().await.unwrap();
    let insert = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path() == "/rest/v1/doctors")
        .unwrap();
    let sent: Value = serde_json::from_slice(&insert.body).unwrap();
    assert_eq!(sent["code"], "DOC-0042");
    assert_eq!(sent["is_active"], true);
}

#[tokio::test]
async fn test_create_doctor_reports_failed_service_link() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_app_config();
    let doctor_id = Uuid::new_v4().to_string();
    let department_id = Uuid::new_v4();

    mount_last_code(&mock_server, "doctors", None).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::doctor_row(&doctor_id, "DOC-0001", &department_id.to_string())
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctor_services"))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            MockSupabaseResponses::error_response("insert failed", "XX000")
        ))
        .mount(&mock_server)
        .await;

    let creation = DoctorService::new(&config).create_doctor(CreateDoctorRequest {
        department_id,
        name_ar: "د. سارة".to_string(),
        name_en: "Dr. Sara".to_string(),
        specialization_ar: None,
        specialization_en: None,
        is_active: Some(true),
        service_ids: vec![Uuid::new_v4()],
    }).await.unwrap();

    assert!(!creation.services_linked);
}

#[tokio::test]
async fn test_update_doctor_replaces_service_links() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_app_config();
    let doctor_id = Uuid::new_v4();
    let department_id = Uuid::new_v4().to_string();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::doctor_row(&doctor_id.to_string(), "DOC-0003", &department_id)
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctor_services"))
        .and(query_param("doctor_id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Clearing the links must not insert anything.
    Mock::given(method("POST"))
        .and(path("/rest/v1/doctor_services"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let doctor = DoctorService::new(&config).update_doctor(doctor_id, UpdateDoctorRequest {
        name_en: Some("Dr. Sara K.".to_string()),
        service_ids: Some(vec![]),
        ..Default::default()
    }).await.unwrap();

    assert_eq!(doctor.id, doctor_id);
}

#[tokio::test]
async fn test_directory_lists_active_doctors_with_services() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_app_config();
    let doctor_id = Uuid::new_v4().to_string();
    let department_id = Uuid::new_v4().to_string();

    let mut row = MockSupabaseResponses::doctor_row(&doctor_id, "DOC-0001", &department_id);
    row["doctor_services"] = json!([{
        "id": Uuid::new_v4(),
        "doctor_id": doctor_id,
        "service_id": Uuid::new_v4(),
        "is_active": true,
        "created_at": "2026-01-01T00:00:00+00:00",
        "service": MockSupabaseResponses::service_row(&Uuid::new_v4().to_string(), "SRV-0001", &department_id)
    }]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("is_active", "eq.true"))
        .and(query_param("order", "name_ar.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(&mock_server)
        .await;

    let directory = SupabaseDoctorDirectory::new(&config);
    let doctors = directory.active_doctors().await.unwrap();

    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0].service_names_en(), vec!["Facial Cleansing".to_string()]);
    let service = doctors[0].doctor_services.as_ref().unwrap()[0].service.as_ref().unwrap();
    assert_eq!(service.service_type, ServiceType::Procedure);

    let listings = directory.listings().await.unwrap();
    assert_eq!(listings[0].display_name, "د. سارة");
    assert_eq!(listings[0].department.as_deref(), Some("الجلدية"));
}

#[tokio::test]
async fn test_get_missing_doctor_returns_404() {
    let mock_server = MockServer::start().await;
    let state = TestConfig::with_url(&mock_server.uri()).to_arc();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = doctor_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_department_returns_404() {
    let mock_server = MockServer::start().await;
    let state = TestConfig::with_url(&mock_server.uri()).to_arc();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", Uuid::new_v4()))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name_en": "Dermatology" }).to_string()))
        .unwrap();

    let response = department_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_department_in_use_reports_specific_message() {
    let mock_server = MockServer::start().await;
    let state = TestConfig::with_url(&mock_server.uri()).to_arc();

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/departments"))
        .respond_with(ResponseTemplate::new(409).set_body_json(
            MockSupabaseResponses::error_response("violates foreign key constraint", "23503")
        ))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = department_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json_response["error"], "خطأ في حذف القسم - قد يكون مرتبطاً بأطباء أو خدمات");
}

#[tokio::test]
async fn test_dashboard_counts_with_failed_table() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_app_config();

    for (table, total) in [("departments", 3), ("doctors", 8), ("services", 21)] {
        Mock::given(method("HEAD"))
            .and(path(format!("/rest/v1/{}", table)))
            .respond_with(
                ResponseTemplate::new(200).insert_header("Content-Range", format!("*/{}", total).as_str()),
            )
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("HEAD"))
        .and(path("/rest/v1/doctor_schedules"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let stats = DashboardService::new(&config).stats().await;

    assert_eq!(stats.departments, 3);
    assert_eq!(stats.doctors, 8);
    assert_eq!(stats.services, 21);
    assert_eq!(stats.schedules, 0);
}

#[tokio::test]
async fn test_dashboard_route() {
    let mock_server = MockServer::start().await;
    let state = TestConfig::with_url(&mock_server.uri()).to_arc();

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "0-1/2"))
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri("/stats")
        .body(Body::empty())
        .unwrap();

    let response = dashboard_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json_response["doctors"], 2);
    assert_eq!(json_response["schedules"], 2);
}

//! Route tests driving the router in-process.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use medibook_core::{BookingCore, Database};
use medibook_server::app;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    let core = BookingCore::open_in_memory()
        .unwrap()
        .with_qr_base_url(Some("https://cdn.example.com/qr/".into()));
    app(core, Duration::from_secs(5))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn booking(email: &str, amount: f64, method: &str) -> Value {
    json!({
        "hospital": "City General",
        "isGovernment": false,
        "service": "Cardiology",
        "doctor": "Dr. A",
        "patientDetails": {"fullName": "Jane Doe", "age": 40, "gender": "Female"},
        "appointments": [{"date": "2025-03-14T00:00:00.000Z", "time": "10:00 AM"}],
        "payment": {"amount": amount, "method": method},
        "userEmail": email
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_and_list_scheduled() {
    let app = test_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/appoint/create-appointment",
        Some(booking("jane@example.com", 1500.0, "Card Payment")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["payment"]["status"], "Completed");
    assert_eq!(created["appointments"][0]["date"], "2025-03-14");

    let (status, listed) = send(
        &app,
        Method::GET,
        "/appoint/scheduled-appointments?userEmail=jane@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_scheduled_requires_email_and_reports_empty() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/appoint/scheduled-appointments", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::GET,
        "/appoint/scheduled-appointments?userEmail=nobody@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No appointments found for this user");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_private_booking_without_payment_is_rejected() {
    let app = test_app();
    let mut request = booking("jane@example.com", 1500.0, "Cash");
    request.as_object_mut().unwrap().remove("payment");

    let (status, body) = send(&app, Method::POST, "/appoint/create-appointment", Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, all) = send(&app, Method::GET, "/appoint/get-all-appointments", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/appoint/create-appointment")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reschedule_and_add_slot() {
    let app = test_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/appoint/create-appointment",
        Some(booking("jane@example.com", 1500.0, "Cash")),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    let slot_id = created["appointments"][0]["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/appoint/reschedule-appointment/{}/{}", id, slot_id),
        Some(json!({"newDate": "2025-04-01", "newTimes": "02:00 PM"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["appointments"][0]["date"], "2025-04-01");
    assert_eq!(updated["appointments"][0]["time"], json!(["02:00 PM"]));

    let (status, updated) = send(
        &app,
        Method::POST,
        &format!("/appoint/add-slot/{}", id),
        Some(json!({"date": "2025-04-02", "times": ["09:00 AM", "09:30 AM"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["appointments"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/appoint/reschedule-appointment/{}/missing", id),
        Some(json!({"newDate": "2025-04-01", "newTimes": "02:00 PM"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Sub-appointment not found");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/appoint/reschedule-appointment/{}/{}", id, slot_id),
        Some(json!({"newDate": "2025-04-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_last_slot_archives_catalog_price() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/service",
        Some(json!({"name": "Cardiology", "amount": 2000})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, created) = send(
        &app,
        Method::POST,
        "/appoint/create-appointment",
        Some(booking("jane@example.com", 1500.0, "Cash")),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    let slot_id = created["appointments"][0]["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/appoint/cancel-appointment/{}/{}", id, slot_id),
        Some(json!({"reason": "Scheduling Conflict"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Appointment fully removed");

    let (status, _) = send(&app, Method::GET, &format!("/appoint/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, archive) = send(
        &app,
        Method::GET,
        "/appoint/cancelled-appointments?userEmail=jane@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archive[0]["servicePrice"], json!(2000.0));
    assert_eq!(archive[0]["reason"], "Scheduling Conflict");

    let archive_id = archive[0]["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/appoint/cancelled-appointments/{}", archive_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/appoint/cancelled-appointments/{}", archive_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_service_crud() {
    let app = test_app();

    let (status, service) = send(
        &app,
        Method::POST,
        "/service",
        Some(json!({"name": "Dermatology", "amount": 800})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = service["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/service",
        Some(json!({"name": "Dermatology", "amount": 900})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, by_name) = send(&app, Method::GET, "/service/name/Dermatology", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_name["id"], service["id"]);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/service/{}", id),
        Some(json!({"name": "Dermatology", "amount": 950})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"], json!(950.0));

    let (status, _) = send(&app, Method::DELETE, &format!("/service/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, &format!("/service/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_hospital_create_and_list() {
    let app = test_app();

    let (status, hospital) = send(
        &app,
        Method::POST,
        "/hospital",
        Some(json!({
            "hospitalId": "H-001",
            "hospitalType": "Government",
            "hospitalName": "National Hospital"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(hospital["hospitalType"], "Government");

    let (status, all) = send(&app, Method::GET, "/hospital", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_and_check_in() {
    let app = test_app();

    let (status, user) = send(
        &app,
        Method::POST,
        "/user/register",
        Some(json!({"fullName": "Jane Doe", "email": "Jane@Example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["aid"], "A0001");
    assert_eq!(user["qrCodeUrl"], "https://cdn.example.com/qr/A0001");

    send(
        &app,
        Method::POST,
        "/appoint/create-appointment",
        Some(booking("jane@example.com", 1500.0, "Cash")),
    )
    .await;

    let (status, check_in) = send(&app, Method::GET, "/user/check-in/A0001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check_in["user"]["email"], "jane@example.com");
    assert_eq!(check_in["appointments"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/user/check-in/A9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_undecodable_path_is_json_bad_request() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/appoint/%FF", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_request_blocked_on_database_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("medibook.db");
    let app = app(BookingCore::open(&path).unwrap(), Duration::from_millis(50));

    // A second connection holds the write lock, so every query waits on it.
    let locker = Database::open(&path).unwrap();
    locker.conn().execute_batch("BEGIN EXCLUSIVE").unwrap();

    let (status, _) = send(&app, Method::GET, "/service", None).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

    locker.conn().execute_batch("COMMIT").unwrap();
}

//! `/service` and `/doctorService` routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use medibook_core::models::{DoctorServiceInput, ServiceInput};
use medibook_core::{DoctorService, Service};
use serde_json::{json, Value};

use super::run_blocking;
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/service", get(list_services).post(create_service))
        .route(
            "/service/:id",
            get(get_service).put(update_service).delete(delete_service),
        )
        .route("/service/name/:name", get(get_service_by_name))
        .route(
            "/doctorService",
            get(list_doctor_services).post(create_doctor_service),
        )
        .route(
            "/doctorService/:id",
            get(get_doctor_service)
                .put(update_doctor_service)
                .delete(delete_doctor_service),
        )
}

// =========================================================================
// Services
// =========================================================================

async fn create_service(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ServiceInput>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    let service = run_blocking(&state.core, move |core| core.create_service(input)).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, ApiError> {
    Ok(Json(run_blocking(&state.core, |core| core.list_services()).await?))
}

async fn get_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Service>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.get_service(&id)).await?,
    ))
}

async fn get_service_by_name(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> Result<Json<Service>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.get_service_by_name(&name)).await?,
    ))
}

async fn update_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<ServiceInput>,
) -> Result<Json<Service>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.update_service(&id, input)).await?,
    ))
}

async fn delete_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(&state.core, move |core| core.delete_service(&id)).await?;
    Ok(Json(json!({ "message": "Service deleted" })))
}

// =========================================================================
// Doctor services
// =========================================================================

async fn create_doctor_service(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<DoctorServiceInput>,
) -> Result<(StatusCode, Json<DoctorService>), ApiError> {
    let offering = run_blocking(&state.core, move |core| core.create_doctor_service(input)).await?;
    Ok((StatusCode::CREATED, Json(offering)))
}

async fn list_doctor_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoctorService>>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, |core| core.list_doctor_services()).await?,
    ))
}

async fn get_doctor_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<DoctorService>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.get_doctor_service(&id)).await?,
    ))
}

async fn update_doctor_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<DoctorServiceInput>,
) -> Result<Json<DoctorService>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.update_doctor_service(&id, input)).await?,
    ))
}

async fn delete_doctor_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(&state.core, move |core| core.delete_doctor_service(&id)).await?;
    Ok(Json(json!({ "message": "Doctor service deleted" })))
}

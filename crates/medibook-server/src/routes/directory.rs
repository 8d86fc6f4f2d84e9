//! `/hospital` and `/doctor` routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use medibook_core::models::{DoctorInput, HospitalInput};
use medibook_core::{Doctor, Hospital};
use serde_json::{json, Value};

use super::run_blocking;
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hospital", get(list_hospitals).post(create_hospital))
        .route(
            "/hospital/:id",
            get(get_hospital).put(update_hospital).delete(delete_hospital),
        )
        .route("/doctor", get(list_doctors).post(create_doctor))
        .route(
            "/doctor/:id",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
}

async fn create_hospital(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<HospitalInput>,
) -> Result<(StatusCode, Json<Hospital>), ApiError> {
    let hospital = run_blocking(&state.core, move |core| core.create_hospital(input)).await?;
    Ok((StatusCode::CREATED, Json(hospital)))
}

async fn list_hospitals(State(state): State<AppState>) -> Result<Json<Vec<Hospital>>, ApiError> {
    Ok(Json(run_blocking(&state.core, |core| core.list_hospitals()).await?))
}

async fn get_hospital(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Hospital>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.get_hospital(&id)).await?,
    ))
}

async fn update_hospital(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<HospitalInput>,
) -> Result<Json<Hospital>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.update_hospital(&id, input)).await?,
    ))
}

async fn delete_hospital(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(&state.core, move |core| core.delete_hospital(&id)).await?;
    Ok(Json(json!({ "message": "Hospital deleted" })))
}

async fn create_doctor(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<DoctorInput>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    let doctor = run_blocking(&state.core, move |core| core.create_doctor(input)).await?;
    Ok((StatusCode::CREATED, Json(doctor)))
}

async fn list_doctors(State(state): State<AppState>) -> Result<Json<Vec<Doctor>>, ApiError> {
    Ok(Json(run_blocking(&state.core, |core| core.list_doctors()).await?))
}

async fn get_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Doctor>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.get_doctor(&id)).await?,
    ))
}

async fn update_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<DoctorInput>,
) -> Result<Json<Doctor>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.update_doctor(&id, input)).await?,
    ))
}

async fn delete_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(&state.core, move |core| core.delete_doctor(&id)).await?;
    Ok(Json(json!({ "message": "Doctor deleted" })))
}

//! `/appoint` routes: booking, rescheduling, cancellation and the archive.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use medibook_core::models::{CancelRequest, CreateAppointmentRequest, RescheduleRequest, SlotInput};
use medibook_core::{Appointment, CancellationOutcome, CancelledAppointment};
use serde::Deserialize;
use serde_json::{json, Value};

use super::run_blocking;
use crate::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/appoint/create-appointment", post(create_appointment))
        .route("/appoint/scheduled-appointments", get(scheduled_appointments))
        .route(
            "/appoint/reschedule-appointment/:id/:appointment_id",
            put(reschedule_appointment),
        )
        .route(
            "/appoint/cancel-appointment/:id/:appointment_id",
            delete(cancel_appointment),
        )
        .route("/appoint/add-slot/:id", post(add_slot))
        .route("/appoint/get-all-appointments", get(list_appointments))
        .route(
            "/appoint/cancelled-appointments",
            get(list_cancelled).delete(purge_all_cancelled),
        )
        .route("/appoint/cancelled-appointments/:id", delete(purge_cancelled))
        .route("/appoint/:id", get(get_appointment))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_email: Option<String>,
}

async fn create_appointment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let appointment = run_blocking(&state.core, move |core| core.create_appointment(request)).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

async fn scheduled_appointments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let user_email = query.user_email.unwrap_or_default();
    let appointments = run_blocking(&state.core, move |core| {
        core.list_appointments_by_owner(&user_email)
    })
    .await?;

    if appointments.is_empty() {
        return Err(ApiError::NotFound(
            "No appointments found for this user".into(),
        ));
    }
    Ok(Json(appointments))
}

async fn reschedule_appointment(
    State(state): State<AppState>,
    ApiPath((id, appointment_id)): ApiPath<(String, String)>,
    ApiJson(request): ApiJson<RescheduleRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = run_blocking(&state.core, move |core| {
        core.reschedule_slot(&id, &appointment_id, request)
    })
    .await?;
    Ok(Json(appointment))
}

async fn cancel_appointment(
    State(state): State<AppState>,
    ApiPath((id, appointment_id)): ApiPath<(String, String)>,
    ApiJson(request): ApiJson<CancelRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = run_blocking(&state.core, move |core| {
        core.cancel_slot(&id, &appointment_id, request)
    })
    .await?;

    Ok(Json(match outcome {
        CancellationOutcome::Updated(appointment) => json!({
            "message": "Sub-appointment cancelled",
            "data": appointment,
        }),
        CancellationOutcome::Removed => json!({
            "message": "Appointment fully removed",
        }),
    }))
}

async fn add_slot(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<SlotInput>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = run_blocking(&state.core, move |core| core.add_slot(&id, input)).await?;
    Ok(Json(appointment))
}

async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let appointments = run_blocking(&state.core, |core| core.list_appointments()).await?;
    Ok(Json(appointments))
}

async fn get_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = run_blocking(&state.core, move |core| core.get_appointment(&id)).await?;
    Ok(Json(appointment))
}

async fn list_cancelled(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<Json<Vec<CancelledAppointment>>, ApiError> {
    let records = run_blocking(&state.core, move |core| {
        core.list_cancelled(query.user_email.as_deref())
    })
    .await?;
    Ok(Json(records))
}

async fn purge_cancelled(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(&state.core, move |core| core.purge_cancelled(&id)).await?;
    Ok(Json(json!({ "message": "Cancelled appointment deleted" })))
}

async fn purge_all_cancelled(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let removed = run_blocking(&state.core, |core| core.purge_all_cancelled()).await?;
    Ok(Json(json!({
        "message": "Cancelled appointments deleted",
        "deletedCount": removed,
    })))
}

//! `/user` routes: registration, lookup and front-desk check-in.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use medibook_core::models::RegisterUserRequest;
use medibook_core::{CheckIn, User};

use super::run_blocking;
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/aid/:aid", get(get_user_by_aid))
        .route("/user/check-in/:aid", get(check_in))
        .route("/user/:id", get(get_user))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = run_blocking(&state.core, move |core| core.register_user(request)).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(run_blocking(&state.core, move |core| core.get_user(&id)).await?))
}

async fn get_user_by_aid(
    State(state): State<AppState>,
    ApiPath(aid): ApiPath<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(
        run_blocking(&state.core, move |core| core.get_user_by_aid(&aid)).await?,
    ))
}

/// Resolve a scanned QR code to the patient and their bookings.
async fn check_in(
    State(state): State<AppState>,
    ApiPath(aid): ApiPath<String>,
) -> Result<Json<CheckIn>, ApiError> {
    Ok(Json(run_blocking(&state.core, move |core| core.check_in(&aid)).await?))
}

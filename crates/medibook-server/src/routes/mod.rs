//! Route handlers, one module per resource.

pub mod appointments;
pub mod catalog;
pub mod directory;
pub mod users;

use axum::Json;
use medibook_core::{BookingCore, MedibookResult};
use serde_json::{json, Value};

use crate::error::ApiError;

/// Run a core call on the blocking pool.
///
/// Every core operation holds the connection lock and waits on SQLite.
pub(crate) async fn run_blocking<T, F>(core: &BookingCore, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&BookingCore) -> MedibookResult<T> + Send + 'static,
{
    let core = core.clone();
    let result = tokio::task::spawn_blocking(move || f(&core)).await?;
    Ok(result?)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

//! Cancellation archive models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Appointment, SubAppointment};

/// Immutable snapshot of a cancelled sub-appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CancelledAppointment {
    pub id: String,
    pub user_email: String,
    pub hospital: String,
    pub service: String,
    /// Catalog price at the moment of cancellation, not the amount paid
    pub service_price: f64,
    pub doctor: String,
    pub cancelled_date: NaiveDate,
    pub cancelled_time: Vec<String>,
    pub reason: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl CancelledAppointment {
    /// Snapshot a slot of `parent` priced at `service_price`.
    pub fn snapshot(
        parent: &Appointment,
        slot: &SubAppointment,
        service_price: f64,
        reason: String,
        description: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_email: parent.user_email.clone(),
            hospital: parent.hospital.clone(),
            service: parent.service.clone(),
            service_price,
            doctor: parent.doctor.clone(),
            cancelled_date: slot.date,
            cancelled_time: slot.time.clone(),
            reason,
            description,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

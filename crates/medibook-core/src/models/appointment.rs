//! Appointment models.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::Gender;

/// Payment methods that settle at booking time.
const CARD_METHODS: [&str; 2] = ["card payment", "card"];

/// Settlement state of an appointment payment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
}

/// Payment attached to an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub amount: f64,
    pub method: Option<String>,
    pub status: PaymentStatus,
}

impl Payment {
    /// Government hospitals never charge.
    pub fn government(method: Option<String>) -> Self {
        Self {
            amount: 0.0,
            method,
            status: PaymentStatus::Completed,
        }
    }

    /// Private booking; card payments complete immediately, anything else waits.
    pub fn private(amount: f64, method: String) -> Self {
        let status = if is_card_method(&method) {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Pending
        };
        Self {
            amount,
            method: Some(method),
            status,
        }
    }
}

/// Check whether a payment method string denotes a card payment.
pub fn is_card_method(method: &str) -> bool {
    let method = method.trim().to_lowercase();
    CARD_METHODS.contains(&method.as_str())
}

/// Patient the booking is made for (not necessarily the account owner).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetails {
    pub full_name: String,
    pub age: u32,
    pub gender: Gender,
    pub description: Option<String>,
}

/// One concrete date/time slot embedded in an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubAppointment {
    pub id: String,
    pub date: NaiveDate,
    pub time: Vec<String>,
}

impl SubAppointment {
    pub fn new(date: NaiveDate, time: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            time,
        }
    }
}

/// Lifecycle state of an appointment.
///
/// An appointment with no remaining slots is deleted, so a stored
/// appointment is always `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentState {
    Active,
    Deleted,
}

/// A booking for a patient at a hospital for a service with a doctor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub hospital: String,
    pub is_government: bool,
    pub service: String,
    pub doctor: String,
    pub patient_details: PatientDetails,
    pub appointments: Vec<SubAppointment>,
    pub payment: Payment,
    pub user_email: String,
    /// Optimistic concurrency counter, bumped on every write
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Appointment {
    pub fn state(&self) -> AppointmentState {
        if self.appointments.is_empty() {
            AppointmentState::Deleted
        } else {
            AppointmentState::Active
        }
    }

    /// Find an embedded slot by id.
    pub fn slot(&self, slot_id: &str) -> Option<&SubAppointment> {
        self.appointments.iter().find(|s| s.id == slot_id)
    }

    /// Remove an embedded slot, returning it.
    pub fn remove_slot(&mut self, slot_id: &str) -> Option<SubAppointment> {
        let index = self.appointments.iter().position(|s| s.id == slot_id)?;
        Some(self.appointments.remove(index))
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Accept either `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping the date.
pub(crate) fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub(crate) fn deserialize_flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flexible_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: u32) -> SubAppointment {
        SubAppointment::new(
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            vec!["10:00 AM".into()],
        )
    }

    #[test]
    fn test_card_detection() {
        assert!(is_card_method("Card Payment"));
        assert!(is_card_method("  card payment "));
        assert!(is_card_method("CARD"));
        assert!(!is_card_method("Cash"));
        assert!(!is_card_method("Cardamom"));
    }

    #[test]
    fn test_private_payment_status() {
        assert_eq!(
            Payment::private(1500.0, "Cash".into()).status,
            PaymentStatus::Pending
        );
        assert_eq!(
            Payment::private(1500.0, "Card Payment".into()).status,
            PaymentStatus::Completed
        );
    }

    #[test]
    fn test_government_payment() {
        let payment = Payment::government(Some("Cash".into()));
        assert_eq!(payment.amount, 0.0);
        assert_eq!(payment.status, PaymentStatus::Completed);
    }

    #[test]
    fn test_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14);
        assert_eq!(parse_flexible_date("2025-03-14"), expected);
        assert_eq!(parse_flexible_date("2025-03-14T00:00:00.000Z"), expected);
        assert_eq!(parse_flexible_date("14/03/2025"), None);
    }

    #[test]
    fn test_remove_slot() {
        let mut appointment = Appointment {
            id: "a1".into(),
            hospital: "City General".into(),
            is_government: false,
            service: "Cardiology".into(),
            doctor: "Dr. A".into(),
            patient_details: PatientDetails {
                full_name: "Jane Doe".into(),
                age: 40,
                gender: Gender::Female,
                description: None,
            },
            appointments: vec![slot(1), slot(2)],
            payment: Payment::private(1500.0, "Cash".into()),
            user_email: "jane@example.com".into(),
            version: 0,
            created_at: String::new(),
            updated_at: String::new(),
        };
        let first = appointment.appointments[0].id.clone();

        assert!(appointment.remove_slot(&first).is_some());
        assert!(appointment.remove_slot(&first).is_none());
        assert_eq!(appointment.state(), AppointmentState::Active);

        let second = appointment.appointments[0].id.clone();
        appointment.remove_slot(&second);
        assert_eq!(appointment.state(), AppointmentState::Deleted);
    }
}

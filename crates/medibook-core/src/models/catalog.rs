//! Service catalog models.

use serde::{Deserialize, Serialize};

/// A bookable service and its current price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    /// Unique service name, referenced by appointments
    pub name: String,
    pub amount: f64,
}

impl Service {
    pub fn new(name: String, amount: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            amount,
        }
    }
}

/// A service offered by a doctor at a hospital.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorService {
    pub id: String,
    pub doctor: String,
    pub service: String,
    pub hospital: String,
}

impl DoctorService {
    pub fn new(doctor: String, service: String, hospital: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            doctor,
            service,
            hospital,
        }
    }
}

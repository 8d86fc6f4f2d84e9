//! Hospital and doctor directory models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HospitalType {
    Government,
    Private,
}

impl HospitalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HospitalType::Government => "Government",
            HospitalType::Private => "Private",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Government" => Some(HospitalType::Government),
            "Private" => Some(HospitalType::Private),
            _ => None,
        }
    }
}

/// A hospital in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    /// Externally assigned hospital code, unique
    pub hospital_id: String,
    pub hospital_type: HospitalType,
    pub hospital_name: String,
}

impl Hospital {
    pub fn is_government(&self) -> bool {
        self.hospital_type == HospitalType::Government
    }
}

/// A doctor in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub specialization: String,
    /// Unique
    pub medical_license_number: String,
    /// Unique
    pub email: String,
    pub phone: String,
    pub years_of_experience: u32,
}

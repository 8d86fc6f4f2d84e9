//! Typed request contracts, validated at the boundary before anything is
//! persisted. Kept separate from the stored entity shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use super::appointment::deserialize_flexible_date;
use super::{
    Doctor, DoctorService, Gender, Hospital, HospitalType, PatientDetails, Role, Service,
    SubAppointment,
};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

fn no_blank_times(times: &[String]) -> Result<(), ValidationError> {
    if times.iter().any(|t| t.trim().is_empty()) {
        return Err(ValidationError::new("blank_time").with_message("times must not be blank".into()));
    }
    Ok(())
}

/// Validates the email as it will be stored: surrounding whitespace is ignored.
fn trimmed_email(value: &str) -> Result<(), ValidationError> {
    if !value.trim().validate_email() {
        return Err(ValidationError::new("email").with_message("invalid email".into()));
    }
    Ok(())
}

/// Canonical form of an email used for ownership and account lookups.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Blank optional text is treated as absent.
fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accept a single time string or a list of them.
fn deserialize_times<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(time) => vec![time],
        OneOrMany::Many(times) => times,
    })
}

// =========================================================================
// Appointments
// =========================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetailsInput {
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
    #[validate(range(max = 150, message = "age out of range"))]
    pub age: u32,
    pub gender: Gender,
    pub description: Option<String>,
}

impl From<PatientDetailsInput> for PatientDetails {
    fn from(input: PatientDetailsInput) -> Self {
        PatientDetails {
            full_name: input.full_name.trim().to_string(),
            age: input.age,
            gender: input.gender,
            description: clean_optional(input.description),
        }
    }
}

/// A requested date with one or more times. Also the body of the add-slot
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SlotInput {
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date: NaiveDate,
    #[serde(alias = "times", deserialize_with = "deserialize_times")]
    #[validate(
        length(min = 1, message = "at least one time is required"),
        custom(function = "no_blank_times")
    )]
    pub time: Vec<String>,
}

impl From<SlotInput> for SubAppointment {
    fn from(input: SlotInput) -> Self {
        let times = input.time.into_iter().map(|t| t.trim().to_string()).collect();
        SubAppointment::new(input.date, times)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: Option<f64>,
    pub method: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    #[validate(custom(function = "not_blank"))]
    pub hospital: String,
    pub is_government: bool,
    #[validate(custom(function = "not_blank"))]
    pub service: String,
    #[validate(custom(function = "not_blank"))]
    pub doctor: String,
    #[validate(nested)]
    pub patient_details: PatientDetailsInput,
    #[validate(length(min = 1, message = "at least one date/time is required"), nested)]
    pub appointments: Vec<SlotInput>,
    #[validate(nested)]
    pub payment: Option<PaymentInput>,
    #[validate(custom(function = "trimmed_email"))]
    pub user_email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub new_date: NaiveDate,
    #[validate(custom(function = "not_blank"))]
    pub new_times: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    #[validate(custom(function = "not_blank"))]
    pub reason: String,
    pub description: Option<String>,
}

impl CancelRequest {
    /// Trimmed reason and cleaned description.
    pub fn into_parts(self) -> (String, Option<String>) {
        (self.reason.trim().to_string(), clean_optional(self.description))
    }
}

// =========================================================================
// Catalog and directory
// =========================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,
}

impl ServiceInput {
    pub fn into_service(self, id: String) -> Service {
        Service {
            id,
            name: self.name.trim().to_string(),
            amount: self.amount,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HospitalInput {
    #[validate(custom(function = "not_blank"))]
    pub hospital_id: String,
    pub hospital_type: HospitalType,
    #[validate(custom(function = "not_blank"))]
    pub hospital_name: String,
}

impl HospitalInput {
    pub fn into_hospital(self, id: String) -> Hospital {
        Hospital {
            id,
            hospital_id: self.hospital_id.trim().to_string(),
            hospital_type: self.hospital_type,
            hospital_name: self.hospital_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DoctorInput {
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[validate(custom(function = "not_blank"))]
    pub specialization: String,
    #[validate(custom(function = "not_blank"))]
    pub medical_license_number: String,
    #[validate(custom(function = "trimmed_email"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    #[validate(range(max = 80, message = "years of experience out of range"))]
    pub years_of_experience: u32,
}

impl DoctorInput {
    pub fn into_doctor(self, id: String) -> Doctor {
        Doctor {
            id,
            full_name: self.full_name.trim().to_string(),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            specialization: self.specialization.trim().to_string(),
            medical_license_number: self.medical_license_number.trim().to_string(),
            email: normalize_email(&self.email),
            phone: self.phone.trim().to_string(),
            years_of_experience: self.years_of_experience,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DoctorServiceInput {
    #[validate(custom(function = "not_blank"))]
    pub doctor: String,
    #[validate(custom(function = "not_blank"))]
    pub service: String,
    #[validate(custom(function = "not_blank"))]
    pub hospital: String,
}

impl DoctorServiceInput {
    pub fn into_doctor_service(self, id: String) -> DoctorService {
        DoctorService {
            id,
            doctor: self.doctor.trim().to_string(),
            service: self.service.trim().to_string(),
            hospital: self.hospital.trim().to_string(),
        }
    }
}

// =========================================================================
// Accounts
// =========================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
    #[validate(custom(function = "trimmed_email"))]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
}

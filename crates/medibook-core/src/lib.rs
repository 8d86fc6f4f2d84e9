//! Medibook Core Library
//!
//! Hospital appointment booking with an immutable cancellation archive and
//! patient account numbering.
//!
//! # Architecture
//!
//! ```text
//!   Service Catalog      Directory (hospitals, doctors)
//!          │                        ·  (names only, not enforced)
//!    price lookup                   ·
//!          │                        ·
//!          ▼                        ·
//!   ┌──────────────────────────────────────────┐
//!   │        Appointment Record Store           │
//!   │  create · list · reschedule · add slot    │
//!   └──────────────────┬───────────────────────┘
//!                      │ cancel slot
//!                      ▼
//!   ┌──────────────────────────────────────────┐
//!   │  one transaction:                         │
//!   │    archive record (current catalog price) │
//!   │    shrink parent  |  delete parent        │
//!   └──────────────────────────────────────────┘
//!
//!   Account registry ── atomic counter ──► A0001, A0002, ...
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite persistence layer
//! - [`models`]: Domain types and typed request contracts
//! - [`lifecycle`]: Booking, rescheduling and the cancellation archive
//! - [`catalog`]: Services and doctor-service offerings
//! - [`directory`]: Hospitals and doctors
//! - [`accounts`]: User registration, AID issuance, check-in

pub mod accounts;
pub mod catalog;
pub mod db;
pub mod directory;
pub mod lifecycle;
pub mod models;

// Re-export commonly used types
pub use accounts::{AccountRegistry, CheckIn};
pub use catalog::Catalog;
pub use db::Database;
pub use directory::Directory;
pub use lifecycle::{AppointmentBook, CancellationArchive, CancellationOutcome};
pub use models::{
    Appointment, CancelledAppointment, Doctor, DoctorService, Hospital, Payment, PaymentStatus,
    Service, SubAppointment, User,
};

use std::path::Path;
use std::sync::{Arc, Mutex};

use models::{
    CancelRequest, CreateAppointmentRequest, DoctorInput, DoctorServiceInput, HospitalInput,
    RegisterUserRequest, RescheduleRequest, ServiceInput, SlotInput,
};

// =========================================================================
// Error Type
// =========================================================================

/// Failure kinds surfaced by every public operation.
#[derive(Debug, thiserror::Error)]
pub enum MedibookError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// A referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Store or infrastructure failure
    #[error("{0}")]
    Internal(String),
}

pub type MedibookResult<T> = Result<T, MedibookError>;

impl From<db::DbError> for MedibookError {
    fn from(e: db::DbError) -> Self {
        if e.is_constraint_violation() {
            return MedibookError::Validation(e.to_string());
        }
        match e {
            db::DbError::NotFound(what) => MedibookError::NotFound(format!("Not found: {}", what)),
            other => MedibookError::Internal(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for MedibookError {
    fn from(e: validator::ValidationErrors) -> Self {
        MedibookError::Validation(e.to_string())
    }
}

impl From<serde_json::Error> for MedibookError {
    fn from(e: serde_json::Error) -> Self {
        MedibookError::Internal(format!("Serialization error: {}", e))
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedibookError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedibookError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe handle over one database connection.
///
/// Cloning is cheap; clones share the connection. Every method blocks on
/// the connection lock and on SQLite, so async callers should run them on
/// a blocking thread.
#[derive(Clone)]
pub struct BookingCore {
    db: Arc<Mutex<Database>>,
    qr_base_url: Option<String>,
}

impl BookingCore {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> MedibookResult<Self> {
        Ok(Self::from_database(Database::open(path)?))
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> MedibookResult<Self> {
        Ok(Self::from_database(Database::open_in_memory()?))
    }

    pub fn from_database(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            qr_base_url: None,
        }
    }

    /// Serve registration QR codes under this base URL.
    pub fn with_qr_base_url(mut self, qr_base_url: Option<String>) -> Self {
        self.qr_base_url = qr_base_url;
        self
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    pub fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> MedibookResult<Appointment> {
        let db = self.db.lock()?;
        AppointmentBook::new(&db).create(request)
    }

    pub fn list_appointments_by_owner(&self, user_email: &str) -> MedibookResult<Vec<Appointment>> {
        let db = self.db.lock()?;
        AppointmentBook::new(&db).list_by_owner(user_email)
    }

    pub fn get_appointment(&self, id: &str) -> MedibookResult<Appointment> {
        let db = self.db.lock()?;
        AppointmentBook::new(&db).get(id)
    }

    pub fn list_appointments(&self) -> MedibookResult<Vec<Appointment>> {
        let db = self.db.lock()?;
        AppointmentBook::new(&db).list_all()
    }

    pub fn reschedule_slot(
        &self,
        id: &str,
        slot_id: &str,
        request: RescheduleRequest,
    ) -> MedibookResult<Appointment> {
        let db = self.db.lock()?;
        AppointmentBook::new(&db).reschedule_slot(id, slot_id, request)
    }

    pub fn add_slot(&self, id: &str, input: SlotInput) -> MedibookResult<Appointment> {
        let db = self.db.lock()?;
        AppointmentBook::new(&db).add_slot(id, input)
    }

    // =========================================================================
    // Cancellation Archive
    // =========================================================================

    pub fn cancel_slot(
        &self,
        id: &str,
        slot_id: &str,
        request: CancelRequest,
    ) -> MedibookResult<CancellationOutcome> {
        let db = self.db.lock()?;
        CancellationArchive::new(&db).archive_and_remove(id, slot_id, request)
    }

    pub fn list_cancelled(
        &self,
        user_email: Option<&str>,
    ) -> MedibookResult<Vec<CancelledAppointment>> {
        let db = self.db.lock()?;
        CancellationArchive::new(&db).list(user_email)
    }

    pub fn purge_cancelled(&self, id: &str) -> MedibookResult<()> {
        let db = self.db.lock()?;
        CancellationArchive::new(&db).purge(id)
    }

    pub fn purge_all_cancelled(&self) -> MedibookResult<usize> {
        let db = self.db.lock()?;
        CancellationArchive::new(&db).purge_all()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn create_service(&self, input: ServiceInput) -> MedibookResult<Service> {
        let db = self.db.lock()?;
        Catalog::new(&db).create_service(input)
    }

    pub fn list_services(&self) -> MedibookResult<Vec<Service>> {
        let db = self.db.lock()?;
        Catalog::new(&db).list_services()
    }

    pub fn get_service(&self, id: &str) -> MedibookResult<Service> {
        let db = self.db.lock()?;
        Catalog::new(&db).get_service(id)
    }

    pub fn get_service_by_name(&self, name: &str) -> MedibookResult<Service> {
        let db = self.db.lock()?;
        Catalog::new(&db).get_service_by_name(name)
    }

    pub fn update_service(&self, id: &str, input: ServiceInput) -> MedibookResult<Service> {
        let db = self.db.lock()?;
        Catalog::new(&db).update_service(id, input)
    }

    pub fn delete_service(&self, id: &str) -> MedibookResult<()> {
        let db = self.db.lock()?;
        Catalog::new(&db).delete_service(id)
    }

    pub fn create_doctor_service(&self, input: DoctorServiceInput) -> MedibookResult<DoctorService> {
        let db = self.db.lock()?;
        Catalog::new(&db).create_doctor_service(input)
    }

    pub fn list_doctor_services(&self) -> MedibookResult<Vec<DoctorService>> {
        let db = self.db.lock()?;
        Catalog::new(&db).list_doctor_services()
    }

    pub fn get_doctor_service(&self, id: &str) -> MedibookResult<DoctorService> {
        let db = self.db.lock()?;
        Catalog::new(&db).get_doctor_service(id)
    }

    pub fn update_doctor_service(
        &self,
        id: &str,
        input: DoctorServiceInput,
    ) -> MedibookResult<DoctorService> {
        let db = self.db.lock()?;
        Catalog::new(&db).update_doctor_service(id, input)
    }

    pub fn delete_doctor_service(&self, id: &str) -> MedibookResult<()> {
        let db = self.db.lock()?;
        Catalog::new(&db).delete_doctor_service(id)
    }

    // =========================================================================
    // Directory
    // =========================================================================

    pub fn create_hospital(&self, input: HospitalInput) -> MedibookResult<Hospital> {
        let db = self.db.lock()?;
        Directory::new(&db).create_hospital(input)
    }

    pub fn list_hospitals(&self) -> MedibookResult<Vec<Hospital>> {
        let db = self.db.lock()?;
        Directory::new(&db).list_hospitals()
    }

    pub fn get_hospital(&self, id: &str) -> MedibookResult<Hospital> {
        let db = self.db.lock()?;
        Directory::new(&db).get_hospital(id)
    }

    pub fn update_hospital(&self, id: &str, input: HospitalInput) -> MedibookResult<Hospital> {
        let db = self.db.lock()?;
        Directory::new(&db).update_hospital(id, input)
    }

    pub fn delete_hospital(&self, id: &str) -> MedibookResult<()> {
        let db = self.db.lock()?;
        Directory::new(&db).delete_hospital(id)
    }

    pub fn create_doctor(&self, input: DoctorInput) -> MedibookResult<Doctor> {
        let db = self.db.lock()?;
        Directory::new(&db).create_doctor(input)
    }

    pub fn list_doctors(&self) -> MedibookResult<Vec<Doctor>> {
        let db = self.db.lock()?;
        Directory::new(&db).list_doctors()
    }

    pub fn get_doctor(&self, id: &str) -> MedibookResult<Doctor> {
        let db = self.db.lock()?;
        Directory::new(&db).get_doctor(id)
    }

    pub fn update_doctor(&self, id: &str, input: DoctorInput) -> MedibookResult<Doctor> {
        let db = self.db.lock()?;
        Directory::new(&db).update_doctor(id, input)
    }

    pub fn delete_doctor(&self, id: &str) -> MedibookResult<()> {
        let db = self.db.lock()?;
        Directory::new(&db).delete_doctor(id)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    pub fn issue_aid(&self) -> MedibookResult<String> {
        let db = self.db.lock()?;
        AccountRegistry::new(&db).issue_aid()
    }

    pub fn register_user(&self, request: RegisterUserRequest) -> MedibookResult<User> {
        let db = self.db.lock()?;
        AccountRegistry::new(&db)
            .with_qr_base_url(self.qr_base_url.as_deref())
            .register(request)
    }

    pub fn get_user(&self, id: &str) -> MedibookResult<User> {
        let db = self.db.lock()?;
        AccountRegistry::new(&db).get_user(id)
    }

    pub fn get_user_by_aid(&self, aid: &str) -> MedibookResult<User> {
        let db = self.db.lock()?;
        AccountRegistry::new(&db).get_user_by_aid(aid)
    }

    pub fn check_in(&self, aid: &str) -> MedibookResult<CheckIn> {
        let db = self.db.lock()?;
        AccountRegistry::new(&db).check_in(aid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        let not_found: MedibookError = db::DbError::NotFound("appointment x".into()).into();
        assert!(matches!(not_found, MedibookError::NotFound(_)));

        let conflict: MedibookError = db::DbError::Conflict("appointment x".into()).into();
        assert!(matches!(conflict, MedibookError::Internal(_)));
    }

    #[test]
    fn test_clones_share_database() {
        let core = BookingCore::open_in_memory().unwrap();
        let clone = core.clone();

        core.create_service(ServiceInput {
            name: "Cardiology".into(),
            amount: 1500.0,
        })
        .unwrap();
        assert_eq!(clone.list_services().unwrap().len(), 1);
    }
}

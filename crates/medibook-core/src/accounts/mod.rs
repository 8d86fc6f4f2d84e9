//! Patient account numbering and registration.

use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::db::Database;
use crate::models::{format_aid, normalize_email, Appointment, RegisterUserRequest, Role, User};
use crate::{MedibookError, MedibookResult};

/// Counter row backing AID issuance.
pub const AID_COUNTER: &str = "aid";

/// Result of scanning a patient's check-in code.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub user: User,
    pub appointments: Vec<Appointment>,
}

pub struct AccountRegistry<'a> {
    db: &'a Database,
    qr_base_url: Option<&'a str>,
}

impl<'a> AccountRegistry<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            qr_base_url: None,
        }
    }

    /// Base URL under which QR images are served, keyed by AID.
    pub fn with_qr_base_url(mut self, qr_base_url: Option<&'a str>) -> Self {
        self.qr_base_url = qr_base_url;
        self
    }

    /// Issue the next AID (`A0001`, `A0002`, ...).
    pub fn issue_aid(&self) -> MedibookResult<String> {
        let value = self.db.next_counter_value(AID_COUNTER)?;
        let aid = format_aid(value);
        info!(aid = %aid, "AID issued");
        Ok(aid)
    }

    /// Register an account. Patients get an AID and a QR code URL.
    ///
    /// The counter increment and the insert share a transaction, so a
    /// rejected registration does not consume an AID.
    pub fn register(&self, request: RegisterUserRequest) -> MedibookResult<User> {
        request.validate()?;

        self.db.in_transaction(|db| {
            let registry = AccountRegistry::new(db).with_qr_base_url(self.qr_base_url);
            let aid = match request.role {
                Role::Patient => Some(registry.issue_aid()?),
                Role::Admin => None,
            };
            let qr_code_url = aid
                .as_deref()
                .zip(self.qr_base_url)
                .map(|(aid, base)| format!("{}/{}", base.trim_end_matches('/'), aid));

            let user = User {
                id: uuid::Uuid::new_v4().to_string(),
                aid,
                full_name: request.full_name.trim().to_string(),
                email: normalize_email(&request.email),
                phone: request
                    .phone
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty()),
                role: request.role,
                qr_code_url,
                created_at: chrono::Utc::now().to_rfc3339(),
            };
            db.insert_user(&user)?;
            info!(user_id = %user.id, aid = ?user.aid, "user registered");
            Ok(user)
        })
    }

    pub fn get_user(&self, id: &str) -> MedibookResult<User> {
        self.db
            .get_user(id)?
            .ok_or_else(|| MedibookError::NotFound("User not found".into()))
    }

    pub fn get_user_by_aid(&self, aid: &str) -> MedibookResult<User> {
        self.db
            .get_user_by_aid(aid.trim())?
            .ok_or_else(|| MedibookError::NotFound(format!("No user with AID {}", aid.trim())))
    }

    /// Resolve a scanned AID to its owner and their scheduled appointments.
    pub fn check_in(&self, aid: &str) -> MedibookResult<CheckIn> {
        let user = self.get_user_by_aid(aid)?;
        let appointments = self.db.list_appointments_by_email(&normalize_email(&user.email))?;
        info!(aid = ?user.aid, appointments = appointments.len(), "patient checked in");
        Ok(CheckIn { user, appointments })
    }
}

//! User account models.

use serde::{Deserialize, Serialize};

/// Prefix of a patient account identifier.
pub const AID_PREFIX: char = 'A';

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Patient,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Admin => "Admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Patient" => Some(Role::Patient),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Human-readable account id (`A0001`), patients only
    pub aid: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    /// Where the check-in QR image for `aid` is served
    pub qr_code_url: Option<String>,
    pub created_at: String,
}

/// Format a counter value as an AID, zero-padded to four digits.
///
/// Values past 9999 keep all their digits.
pub fn format_aid(value: u64) -> String {
    format!("{}{:04}", AID_PREFIX, value)
}

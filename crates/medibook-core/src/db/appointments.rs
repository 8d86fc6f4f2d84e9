//! Appointment database operations.
//!
//! Every write is a compare-and-swap on the row's `version`, so two
//! concurrent reschedules or cancellations of one appointment cannot
//! silently overwrite each other.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::Appointment;

const SELECT_APPOINTMENT: &str = r#"
    SELECT id, hospital, is_government, service, doctor, patient_details,
           slots, payment, user_email, version, created_at, updated_at
    FROM appointments
"#;

impl Database {
    /// Insert a new appointment.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        let patient_json = serde_json::to_string(&appointment.patient_details)?;
        let slots_json = serde_json::to_string(&appointment.appointments)?;
        let payment_json = serde_json::to_string(&appointment.payment)?;

        self.conn.execute(
            r#"
            INSERT INTO appointments (
                id, hospital, is_government, service, doctor, patient_details,
                slots, payment, user_email, version, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                appointment.id,
                appointment.hospital,
                appointment.is_government,
                appointment.service,
                appointment.doctor,
                patient_json,
                slots_json,
                payment_json,
                appointment.user_email,
                appointment.version,
                appointment.created_at,
                appointment.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get an appointment by ID.
    pub fn get_appointment(&self, id: &str) -> DbResult<Option<Appointment>> {
        let sql = format!("{} WHERE id = ?", SELECT_APPOINTMENT);
        self.conn
            .query_row(&sql, [id], AppointmentRow::from_row)
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List appointments owned by an email, oldest first.
    pub fn list_appointments_by_email(&self, user_email: &str) -> DbResult<Vec<Appointment>> {
        let sql = format!(
            "{} WHERE user_email = ? ORDER BY created_at, rowid",
            SELECT_APPOINTMENT
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([user_email], AppointmentRow::from_row)?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }

    /// List all appointments, newest first.
    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        let sql = format!("{} ORDER BY created_at DESC, rowid DESC", SELECT_APPOINTMENT);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], AppointmentRow::from_row)?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }

    /// Write back the mutable parts of an appointment.
    ///
    /// Succeeds only if the stored version still equals `appointment.version`,
    /// which is then bumped in place.
    pub fn update_appointment(&self, appointment: &mut Appointment) -> DbResult<()> {
        let slots_json = serde_json::to_string(&appointment.appointments)?;
        let payment_json = serde_json::to_string(&appointment.payment)?;
        let patient_json = serde_json::to_string(&appointment.patient_details)?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE appointments SET
                patient_details = ?3,
                slots = ?4,
                payment = ?5,
                version = version + 1,
                updated_at = ?6
            WHERE id = ?1 AND version = ?2
            "#,
            params![
                appointment.id,
                appointment.version,
                patient_json,
                slots_json,
                payment_json,
                appointment.updated_at,
            ],
        )?;

        if rows_affected == 0 {
            return Err(self.write_miss(&appointment.id)?);
        }
        appointment.version += 1;
        Ok(())
    }

    /// Delete an appointment if it is still at `version`.
    pub fn delete_appointment(&self, id: &str, version: i64) -> DbResult<()> {
        let rows_affected = self.conn.execute(
            "DELETE FROM appointments WHERE id = ? AND version = ?",
            params![id, version],
        )?;

        if rows_affected == 0 {
            return Err(self.write_miss(id)?);
        }
        Ok(())
    }

    /// Explain why a versioned write touched no row.
    fn write_miss(&self, id: &str) -> DbResult<DbError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM appointments WHERE id = ?)",
            [id],
            |row| row.get(0),
        )?;
        Ok(if exists {
            DbError::Conflict(format!("appointment {} was modified concurrently", id))
        } else {
            DbError::NotFound(format!("appointment {}", id))
        })
    }
}

/// Intermediate row struct for database mapping.
struct AppointmentRow {
    id: String,
    hospital: String,
    is_government: bool,
    service: String,
    doctor: String,
    patient_details: String,
    slots: String,
    payment: String,
    user_email: String,
    version: i64,
    created_at: String,
    updated_at: String,
}

impl AppointmentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(AppointmentRow {
            id: row.get(0)?,
            hospital: row.get(1)?,
            is_government: row.get(2)?,
            service: row.get(3)?,
            doctor: row.get(4)?,
            patient_details: row.get(5)?,
            slots: row.get(6)?,
            payment: row.get(7)?,
            user_email: row.get(8)?,
            version: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DbError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            hospital: row.hospital,
            is_government: row.is_government,
            service: row.service,
            doctor: row.doctor,
            patient_details: serde_json::from_str(&row.patient_details)?,
            appointments: serde_json::from_str(&row.slots)?,
            payment: serde_json::from_str(&row.payment)?,
            user_email: row.user_email,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

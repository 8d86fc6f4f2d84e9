//! Cancellation archive database operations.

use chrono::NaiveDate;
use rusqlite::{params, Row};

use super::{Database, DbError, DbResult};
use crate::models::CancelledAppointment;

const SELECT_CANCELLED: &str = r#"
    SELECT id, user_email, hospital, service, service_price, doctor,
           cancelled_date, cancelled_time, reason, description, created_at
    FROM cancelled_appointments
"#;

impl Database {
    /// Append an archive record.
    pub fn insert_cancelled(&self, record: &CancelledAppointment) -> DbResult<()> {
        let time_json = serde_json::to_string(&record.cancelled_time)?;

        self.conn.execute(
            r#"
            INSERT INTO cancelled_appointments (
                id, user_email, hospital, service, service_price, doctor,
                cancelled_date, cancelled_time, reason, description, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                record.id,
                record.user_email,
                record.hospital,
                record.service,
                record.service_price,
                record.doctor,
                record.cancelled_date.to_string(),
                time_json,
                record.reason,
                record.description,
                record.created_at,
            ],
        )?;
        Ok(())
    }

    /// List archive records, optionally for one owner, newest first.
    pub fn list_cancelled(&self, user_email: Option<&str>) -> DbResult<Vec<CancelledAppointment>> {
        let sql = format!(
            "{} WHERE (?1 IS NULL OR user_email = ?1) ORDER BY created_at DESC, rowid DESC",
            SELECT_CANCELLED
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([user_email], CancelledRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    /// Purge one archive record.
    pub fn delete_cancelled(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM cancelled_appointments WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Purge the whole archive, returning how many records were removed.
    pub fn delete_all_cancelled(&self) -> DbResult<usize> {
        Ok(self.conn.execute("DELETE FROM cancelled_appointments", [])?)
    }
}

/// Intermediate row struct for database mapping.
struct CancelledRow {
    id: String,
    user_email: String,
    hospital: String,
    service: String,
    service_price: f64,
    doctor: String,
    cancelled_date: String,
    cancelled_time: String,
    reason: String,
    description: Option<String>,
    created_at: String,
}

impl CancelledRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(CancelledRow {
            id: row.get(0)?,
            user_email: row.get(1)?,
            hospital: row.get(2)?,
            service: row.get(3)?,
            service_price: row.get(4)?,
            doctor: row.get(5)?,
            cancelled_date: row.get(6)?,
            cancelled_time: row.get(7)?,
            reason: row.get(8)?,
            description: row.get(9)?,
            created_at: row.get(10)?,
        })
    }
}

impl TryFrom<CancelledRow> for CancelledAppointment {
    type Error = DbError;

    fn try_from(row: CancelledRow) -> Result<Self, Self::Error> {
        let cancelled_date = NaiveDate::parse_from_str(&row.cancelled_date, "%Y-%m-%d")
            .map_err(|e| DbError::Corrupt(format!("cancelled_date '{}': {}", row.cancelled_date, e)))?;

        Ok(CancelledAppointment {
            id: row.id,
            user_email: row.user_email,
            hospital: row.hospital,
            service: row.service,
            service_price: row.service_price,
            doctor: row.doctor,
            cancelled_date,
            cancelled_time: serde_json::from_str(&row.cancelled_time)?,
            reason: row.reason,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

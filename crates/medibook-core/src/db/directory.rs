//! Hospital and doctor directory database operations.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{Doctor, Gender, Hospital, HospitalType};

const SELECT_DOCTOR: &str = r#"
    SELECT id, full_name, date_of_birth, gender, specialization,
           medical_license_number, email, phone, years_of_experience
    FROM doctors
"#;

impl Database {
    /// Insert a new hospital.
    pub fn insert_hospital(&self, hospital: &Hospital) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO hospitals (id, hospital_id, hospital_type, hospital_name)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                hospital.id,
                hospital.hospital_id,
                hospital.hospital_type.as_str(),
                hospital.hospital_name,
            ],
        )?;
        Ok(())
    }

    /// Get a hospital by ID.
    pub fn get_hospital(&self, id: &str) -> DbResult<Option<Hospital>> {
        self.conn
            .query_row(
                "SELECT id, hospital_id, hospital_type, hospital_name FROM hospitals WHERE id = ?",
                [id],
                hospital_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all hospitals.
    pub fn list_hospitals(&self) -> DbResult<Vec<Hospital>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, hospital_id, hospital_type, hospital_name FROM hospitals ORDER BY hospital_name",
        )?;
        let rows = stmt.query_map([], hospital_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Update a hospital.
    pub fn update_hospital(&self, hospital: &Hospital) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE hospitals SET
                hospital_id = ?2,
                hospital_type = ?3,
                hospital_name = ?4
            WHERE id = ?1
            "#,
            params![
                hospital.id,
                hospital.hospital_id,
                hospital.hospital_type.as_str(),
                hospital.hospital_name,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a hospital.
    pub fn delete_hospital(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM hospitals WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    // =========================================================================
    // Doctors
    // =========================================================================

    /// Insert a new doctor.
    pub fn insert_doctor(&self, doctor: &Doctor) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO doctors (
                id, full_name, date_of_birth, gender, specialization,
                medical_license_number, email, phone, years_of_experience
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                doctor.id,
                doctor.full_name,
                doctor.date_of_birth.to_string(),
                doctor.gender.as_str(),
                doctor.specialization,
                doctor.medical_license_number,
                doctor.email,
                doctor.phone,
                doctor.years_of_experience,
            ],
        )?;
        Ok(())
    }

    /// Get a doctor by ID.
    pub fn get_doctor(&self, id: &str) -> DbResult<Option<Doctor>> {
        let sql = format!("{} WHERE id = ?", SELECT_DOCTOR);
        self.conn
            .query_row(&sql, [id], doctor_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// List all doctors.
    pub fn list_doctors(&self) -> DbResult<Vec<Doctor>> {
        let sql = format!("{} ORDER BY full_name", SELECT_DOCTOR);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], doctor_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Update a doctor.
    pub fn update_doctor(&self, doctor: &Doctor) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE doctors SET
                full_name = ?2,
                date_of_birth = ?3,
                gender = ?4,
                specialization = ?5,
                medical_license_number = ?6,
                email = ?7,
                phone = ?8,
                years_of_experience = ?9
            WHERE id = ?1
            "#,
            params![
                doctor.id,
                doctor.full_name,
                doctor.date_of_birth.to_string(),
                doctor.gender.as_str(),
                doctor.specialization,
                doctor.medical_license_number,
                doctor.email,
                doctor.phone,
                doctor.years_of_experience,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a doctor.
    pub fn delete_doctor(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM doctors WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

/// Conversion failure for a text column holding an unexpected value.
fn bad_text(column: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Text,
        format!("unexpected value '{}'", value).into(),
    )
}

fn hospital_from_row(row: &Row<'_>) -> rusqlite::Result<Hospital> {
    let hospital_type: String = row.get(2)?;
    Ok(Hospital {
        id: row.get(0)?,
        hospital_id: row.get(1)?,
        hospital_type: HospitalType::from_str(&hospital_type)
            .ok_or_else(|| bad_text(2, &hospital_type))?,
        hospital_name: row.get(3)?,
    })
}

fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    let date_of_birth: String = row.get(2)?;
    let gender: String = row.get(3)?;
    Ok(Doctor {
        id: row.get(0)?,
        full_name: row.get(1)?,
        date_of_birth: NaiveDate::parse_from_str(&date_of_birth, "%Y-%m-%d")
            .map_err(|_| bad_text(2, &date_of_birth))?,
        gender: Gender::from_str(&gender).ok_or_else(|| bad_text(3, &gender))?,
        specialization: row.get(4)?,
        medical_license_number: row.get(5)?,
        email: row.get(6)?,
        phone: row.get(7)?,
        years_of_experience: row.get(8)?,
    })
}

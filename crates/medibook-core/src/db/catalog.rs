//! Service catalog database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{DoctorService, Service};

impl Database {
    /// Insert a new service.
    pub fn insert_service(&self, service: &Service) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO services (id, name, amount) VALUES (?1, ?2, ?3)",
            params![service.id, service.name, service.amount],
        )?;
        Ok(())
    }

    /// Get a service by ID.
    pub fn get_service(&self, id: &str) -> DbResult<Option<Service>> {
        self.conn
            .query_row(
                "SELECT id, name, amount FROM services WHERE id = ?",
                [id],
                service_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a service by its unique name.
    pub fn get_service_by_name(&self, name: &str) -> DbResult<Option<Service>> {
        self.conn
            .query_row(
                "SELECT id, name, amount FROM services WHERE name = ?",
                [name],
                service_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all services.
    pub fn list_services(&self) -> DbResult<Vec<Service>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, amount FROM services ORDER BY name")?;
        let rows = stmt.query_map([], service_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Update a service's name and price.
    pub fn update_service(&self, service: &Service) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE services SET
                name = ?2,
                amount = ?3,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![service.id, service.name, service.amount],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a service.
    pub fn delete_service(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM services WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    // =========================================================================
    // Doctor services
    // =========================================================================

    /// Insert a doctor-service offering.
    pub fn insert_doctor_service(&self, offering: &DoctorService) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO doctor_services (id, doctor, service, hospital) VALUES (?1, ?2, ?3, ?4)",
            params![offering.id, offering.doctor, offering.service, offering.hospital],
        )?;
        Ok(())
    }

    /// Get a doctor-service offering by ID.
    pub fn get_doctor_service(&self, id: &str) -> DbResult<Option<DoctorService>> {
        self.conn
            .query_row(
                "SELECT id, doctor, service, hospital FROM doctor_services WHERE id = ?",
                [id],
                doctor_service_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all doctor-service offerings.
    pub fn list_doctor_services(&self) -> DbResult<Vec<DoctorService>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, doctor, service, hospital FROM doctor_services ORDER BY doctor, service",
        )?;
        let rows = stmt.query_map([], doctor_service_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Update a doctor-service offering.
    pub fn update_doctor_service(&self, offering: &DoctorService) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE doctor_services SET doctor = ?2, service = ?3, hospital = ?4 WHERE id = ?1",
            params![offering.id, offering.doctor, offering.service, offering.hospital],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a doctor-service offering.
    pub fn delete_doctor_service(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM doctor_services WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

fn service_from_row(row: &Row<'_>) -> rusqlite::Result<Service> {
    Ok(Service {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: row.get(2)?,
    })
}

fn doctor_service_from_row(row: &Row<'_>) -> rusqlite::Result<DoctorService> {
    Ok(DoctorService {
        id: row.get(0)?,
        doctor: row.get(1)?,
        service: row.get(2)?,
        hospital: row.get(3)?,
    })
}

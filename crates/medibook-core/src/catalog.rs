//! Service catalog and doctor-service offerings.
//!
//! Reference data read by the booking and cancellation paths. Deleting an
//! entry does not check whether appointments still name it.

use tracing::info;
use validator::Validate;

use crate::db::Database;
use crate::models::{DoctorService, DoctorServiceInput, Service, ServiceInput};
use crate::{MedibookError, MedibookResult};

fn service_not_found() -> MedibookError {
    MedibookError::NotFound("Service not found".into())
}

fn doctor_service_not_found() -> MedibookError {
    MedibookError::NotFound("Doctor service not found".into())
}

pub struct Catalog<'a> {
    db: &'a Database,
}

impl<'a> Catalog<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn create_service(&self, input: ServiceInput) -> MedibookResult<Service> {
        input.validate()?;
        let service = input.into_service(uuid::Uuid::new_v4().to_string());
        self.db.insert_service(&service)?;
        info!(service = %service.name, amount = service.amount, "service created");
        Ok(service)
    }

    pub fn list_services(&self) -> MedibookResult<Vec<Service>> {
        Ok(self.db.list_services()?)
    }

    pub fn get_service(&self, id: &str) -> MedibookResult<Service> {
        self.db.get_service(id)?.ok_or_else(service_not_found)
    }

    /// Current catalog entry for a service name.
    pub fn get_service_by_name(&self, name: &str) -> MedibookResult<Service> {
        self.db
            .get_service_by_name(name.trim())?
            .ok_or_else(service_not_found)
    }

    pub fn update_service(&self, id: &str, input: ServiceInput) -> MedibookResult<Service> {
        input.validate()?;
        let service = input.into_service(id.to_string());
        if !self.db.update_service(&service)? {
            return Err(service_not_found());
        }
        info!(service = %service.name, amount = service.amount, "service updated");
        Ok(service)
    }

    pub fn delete_service(&self, id: &str) -> MedibookResult<()> {
        if !self.db.delete_service(id)? {
            return Err(service_not_found());
        }
        Ok(())
    }

    pub fn create_doctor_service(&self, input: DoctorServiceInput) -> MedibookResult<DoctorService> {
        input.validate()?;
        let offering = input.into_doctor_service(uuid::Uuid::new_v4().to_string());
        self.db.insert_doctor_service(&offering)?;
        Ok(offering)
    }

    pub fn list_doctor_services(&self) -> MedibookResult<Vec<DoctorService>> {
        Ok(self.db.list_doctor_services()?)
    }

    pub fn get_doctor_service(&self, id: &str) -> MedibookResult<DoctorService> {
        self.db
            .get_doctor_service(id)?
            .ok_or_else(doctor_service_not_found)
    }

    pub fn update_doctor_service(
        &self,
        id: &str,
        input: DoctorServiceInput,
    ) -> MedibookResult<DoctorService> {
        input.validate()?;
        let offering = input.into_doctor_service(id.to_string());
        if !self.db.update_doctor_service(&offering)? {
            return Err(doctor_service_not_found());
        }
        Ok(offering)
    }

    pub fn delete_doctor_service(&self, id: &str) -> MedibookResult<()> {
        if !self.db.delete_doctor_service(id)? {
            return Err(doctor_service_not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str, amount: f64) -> ServiceInput {
        ServiceInput {
            name: name.into(),
            amount,
        }
    }

    #[test]
    fn test_service_lifecycle() {
        let db = Database::open_in_memory().unwrap();
        let catalog = Catalog::new(&db);

        let created = catalog.create_service(service(" Cardiology ", 1500.0)).unwrap();
        assert_eq!(created.name, "Cardiology");
        assert_eq!(catalog.get_service_by_name("Cardiology").unwrap(), created);

        let updated = catalog
            .update_service(&created.id, service("Cardiology", 2000.0))
            .unwrap();
        assert_eq!(catalog.get_service(&created.id).unwrap(), updated);

        catalog.delete_service(&created.id).unwrap();
        assert!(matches!(
            catalog.get_service(&created.id).unwrap_err(),
            MedibookError::NotFound(_)
        ));
    }

    #[test]
    fn test_duplicate_service_is_validation_error() {
        let db = Database::open_in_memory().unwrap();
        let catalog = Catalog::new(&db);
        catalog.create_service(service("Cardiology", 1500.0)).unwrap();

        let err = catalog.create_service(service("Cardiology", 10.0)).unwrap_err();
        assert!(matches!(err, MedibookError::Validation(_)));
    }

    #[test]
    fn test_update_missing() {
        let db = Database::open_in_memory().unwrap();
        let catalog = Catalog::new(&db);

        let err = catalog.update_service("nope", service("X", 1.0)).unwrap_err();
        assert!(matches!(err, MedibookError::NotFound(_)));

        let err = catalog
            .update_doctor_service(
                "nope",
                DoctorServiceInput {
                    doctor: "Dr. A".into(),
                    service: "X".into(),
                    hospital: "H".into(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, MedibookError::NotFound(_)));
    }
}

//! Hospital and doctor directory.

use validator::Validate;

use crate::db::Database;
use crate::models::{Doctor, DoctorInput, Hospital, HospitalInput};
use crate::{MedibookError, MedibookResult};

fn hospital_not_found() -> MedibookError {
    MedibookError::NotFound("Hospital not found".into())
}

fn doctor_not_found() -> MedibookError {
    MedibookError::NotFound("Doctor not found".into())
}

pub struct Directory<'a> {
    db: &'a Database,
}

impl<'a> Directory<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn create_hospital(&self, input: HospitalInput) -> MedibookResult<Hospital> {
        input.validate()?;
        let hospital = input.into_hospital(uuid::Uuid::new_v4().to_string());
        self.db.insert_hospital(&hospital)?;
        Ok(hospital)
    }

    pub fn list_hospitals(&self) -> MedibookResult<Vec<Hospital>> {
        Ok(self.db.list_hospitals()?)
    }

    pub fn get_hospital(&self, id: &str) -> MedibookResult<Hospital> {
        self.db.get_hospital(id)?.ok_or_else(hospital_not_found)
    }

    pub fn update_hospital(&self, id: &str, input: HospitalInput) -> MedibookResult<Hospital> {
        input.validate()?;
        let hospital = input.into_hospital(id.to_string());
        if !self.db.update_hospital(&hospital)? {
            return Err(hospital_not_found());
        }
        Ok(hospital)
    }

    pub fn delete_hospital(&self, id: &str) -> MedibookResult<()> {
        if !self.db.delete_hospital(id)? {
            return Err(hospital_not_found());
        }
        Ok(())
    }

    pub fn create_doctor(&self, input: DoctorInput) -> MedibookResult<Doctor> {
        input.validate()?;
        let doctor = input.into_doctor(uuid::Uuid::new_v4().to_string());
        self.db.insert_doctor(&doctor)?;
        Ok(doctor)
    }

    pub fn list_doctors(&self) -> MedibookResult<Vec<Doctor>> {
        Ok(self.db.list_doctors()?)
    }

    pub fn get_doctor(&self, id: &str) -> MedibookResult<Doctor> {
        self.db.get_doctor(id)?.ok_or_else(doctor_not_found)
    }

    pub fn update_doctor(&self, id: &str, input: DoctorInput) -> MedibookResult<Doctor> {
        input.validate()?;
        let doctor = input.into_doctor(id.to_string());
        if !self.db.update_doctor(&doctor)? {
            return Err(doctor_not_found());
        }
        Ok(doctor)
    }

    pub fn delete_doctor(&self, id: &str) -> MedibookResult<()> {
        if !self.db.delete_doctor(id)? {
            return Err(doctor_not_found());
        }
        Ok(())
    }
}

//! Appointment record store.

use tracing::info;
use validator::Validate;

use crate::db::Database;
use crate::models::{
    normalize_email, Appointment, CreateAppointmentRequest, PatientDetails, Payment,
    PaymentInput, RescheduleRequest, SlotInput, SubAppointment,
};
use crate::{MedibookError, MedibookResult};

/// Resolve the stored payment for a booking.
///
/// Government bookings are free and settled. Private bookings need an
/// amount and a method; card payments settle immediately.
pub fn resolve_payment(is_government: bool, input: Option<PaymentInput>) -> MedibookResult<Payment> {
    let input = input.unwrap_or_default();
    let method = input
        .method
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    if is_government {
        return Ok(Payment::government(method));
    }

    let amount = input.amount.ok_or_else(|| {
        MedibookError::Validation("payment amount is required for private hospitals".into())
    })?;
    let method = method.ok_or_else(|| {
        MedibookError::Validation("payment method is required for private hospitals".into())
    })?;
    Ok(Payment::private(amount, method))
}

/// Owns appointment records and their embedded slots.
pub struct AppointmentBook<'a> {
    db: &'a Database,
}

impl<'a> AppointmentBook<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Validate and persist a new booking.
    ///
    /// Identical date/time slots are accepted, within one booking and
    /// across bookings.
    pub fn create(&self, request: CreateAppointmentRequest) -> MedibookResult<Appointment> {
        request.validate()?;
        let payment = resolve_payment(request.is_government, request.payment)?;

        let now = chrono::Utc::now().to_rfc3339();
        let appointment = Appointment {
            id: uuid::Uuid::new_v4().to_string(),
            hospital: request.hospital.trim().to_string(),
            is_government: request.is_government,
            service: request.service.trim().to_string(),
            doctor: request.doctor.trim().to_string(),
            patient_details: PatientDetails::from(request.patient_details),
            appointments: request.appointments.into_iter().map(Into::into).collect(),
            payment,
            user_email: normalize_email(&request.user_email),
            version: 0,
            created_at: now.clone(),
            updated_at: now,
        };

        self.db.insert_appointment(&appointment)?;
        info!(
            appointment_id = %appointment.id,
            slots = appointment.appointments.len(),
            payment_status = ?appointment.payment.status,
            "appointment created"
        );
        Ok(appointment)
    }

    /// All appointments owned by `user_email`, matched case-insensitively.
    /// Empty when none.
    pub fn list_by_owner(&self, user_email: &str) -> MedibookResult<Vec<Appointment>> {
        let user_email = normalize_email(user_email);
        if user_email.is_empty() {
            return Err(MedibookError::Validation("userEmail is required".into()));
        }
        Ok(self.db.list_appointments_by_email(&user_email)?)
    }

    pub fn get(&self, id: &str) -> MedibookResult<Appointment> {
        self.db
            .get_appointment(id)?
            .ok_or_else(|| MedibookError::NotFound("Appointment not found".into()))
    }

    pub fn list_all(&self) -> MedibookResult<Vec<Appointment>> {
        Ok(self.db.list_appointments()?)
    }

    /// Move one slot to a new date with a single time. Other slots are untouched.
    pub fn reschedule_slot(
        &self,
        id: &str,
        slot_id: &str,
        request: RescheduleRequest,
    ) -> MedibookResult<Appointment> {
        request.validate()?;

        self.db.in_transaction(|db| {
            let mut appointment = AppointmentBook::new(db).get(id)?;
            let slot = appointment
                .appointments
                .iter_mut()
                .find(|s| s.id == slot_id)
                .ok_or_else(|| MedibookError::NotFound("Sub-appointment not found".into()))?;

            slot.date = request.new_date;
            slot.time = vec![request.new_times.trim().to_string()];

            appointment.touch();
            db.update_appointment(&mut appointment)?;
            info!(appointment_id = %id, slot_id = %slot_id, "slot rescheduled");
            Ok(appointment)
        })
    }

    /// Append a slot to an existing booking.
    pub fn add_slot(&self, id: &str, input: SlotInput) -> MedibookResult<Appointment> {
        input.validate()?;

        self.db.in_transaction(|db| {
            let mut appointment = AppointmentBook::new(db).get(id)?;
            let slot = SubAppointment::from(input);
            let slot_id = slot.id.clone();
            appointment.appointments.push(slot);

            appointment.touch();
            db.update_appointment(&mut appointment)?;
            info!(appointment_id = %id, slot_id = %slot_id, "slot added");
            Ok(appointment)
        })
    }
}

//! Cancellation archive.
//!
//! Cancelling a slot snapshots it into an immutable archive record priced at
//! the current catalog price, then shrinks or deletes the parent booking.
//! All effects are computed before anything is written, and the archive
//! insert and parent mutation commit in one transaction.

use std::fmt;

use tracing::{error, info};
use validator::Validate;

use crate::db::Database;
use crate::models::{normalize_email, Appointment, CancelRequest, CancelledAppointment};
use crate::{MedibookError, MedibookResult};

/// Steps of a cancellation, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationStep {
    LoadAppointment,
    LocateSlot,
    LookupPrice,
    WriteArchive,
    UpdateAppointment,
    DeleteAppointment,
}

impl fmt::Display for CancellationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CancellationStep::LoadAppointment => "load_appointment",
            CancellationStep::LocateSlot => "locate_slot",
            CancellationStep::LookupPrice => "lookup_price",
            CancellationStep::WriteArchive => "write_archive",
            CancellationStep::UpdateAppointment => "update_appointment",
            CancellationStep::DeleteAppointment => "delete_appointment",
        };
        f.write_str(name)
    }
}

/// What happened to the parent booking.
#[derive(Debug, Clone, PartialEq)]
pub enum CancellationOutcome {
    /// Other slots remain; the updated booking
    Updated(Appointment),
    /// The cancelled slot was the last one; the booking is gone
    Removed,
}

/// Effects of a cancellation, computed before any write.
#[derive(Debug, Clone)]
pub struct CancellationPlan {
    pub record: CancelledAppointment,
    /// Parent with the slot already removed
    pub remaining: Appointment,
}

impl CancellationPlan {
    pub fn removes_parent(&self) -> bool {
        self.remaining.appointments.is_empty()
    }
}

pub struct CancellationArchive<'a> {
    db: &'a Database,
}

impl<'a> CancellationArchive<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Cancel one slot of an appointment.
    pub fn archive_and_remove(
        &self,
        appointment_id: &str,
        slot_id: &str,
        request: CancelRequest,
    ) -> MedibookResult<CancellationOutcome> {
        request.validate()?;
        let (reason, description) = request.into_parts();

        self.db.in_transaction(|db| {
            let plan = plan(db, appointment_id, slot_id, reason, description)?;

            traced(
                appointment_id,
                CancellationStep::WriteArchive,
                db.insert_cancelled(&plan.record).map_err(Into::into),
            )?;

            let removes_parent = plan.removes_parent();
            let mut remaining = plan.remaining;
            let outcome = if removes_parent {
                traced(
                    appointment_id,
                    CancellationStep::DeleteAppointment,
                    db.delete_appointment(&remaining.id, remaining.version)
                        .map_err(Into::into),
                )?;
                CancellationOutcome::Removed
            } else {
                remaining.touch();
                traced(
                    appointment_id,
                    CancellationStep::UpdateAppointment,
                    db.update_appointment(&mut remaining).map_err(Into::into),
                )?;
                CancellationOutcome::Updated(remaining)
            };

            info!(
                appointment_id = %appointment_id,
                slot_id = %slot_id,
                archive_id = %plan.record.id,
                service_price = plan.record.service_price,
                parent_removed = removes_parent,
                "slot cancelled"
            );
            Ok(outcome)
        })
    }

    /// Archive records, optionally for one owner.
    pub fn list(&self, user_email: Option<&str>) -> MedibookResult<Vec<CancelledAppointment>> {
        let user_email = user_email.map(normalize_email).filter(|e| !e.is_empty());
        Ok(self.db.list_cancelled(user_email.as_deref())?)
    }

    /// Administrative purge of one record.
    pub fn purge(&self, id: &str) -> MedibookResult<()> {
        if !self.db.delete_cancelled(id)? {
            return Err(MedibookError::NotFound(
                "Cancelled appointment not found".into(),
            ));
        }
        info!(archive_id = %id, "cancelled appointment purged");
        Ok(())
    }

    /// Administrative purge of the whole archive.
    pub fn purge_all(&self) -> MedibookResult<usize> {
        let removed = self.db.delete_all_cancelled()?;
        info!(removed, "cancellation archive purged");
        Ok(removed)
    }
}

/// Load, locate and price; no writes.
fn plan(
    db: &Database,
    appointment_id: &str,
    slot_id: &str,
    reason: String,
    description: Option<String>,
) -> MedibookResult<CancellationPlan> {
    let parent = traced(
        appointment_id,
        CancellationStep::LoadAppointment,
        db.get_appointment(appointment_id)
            .map_err(MedibookError::from)
            .and_then(|a| a.ok_or_else(|| MedibookError::NotFound("Appointment not found".into()))),
    )?;

    let mut remaining = parent;
    let slot = traced(
        appointment_id,
        CancellationStep::LocateSlot,
        remaining
            .remove_slot(slot_id)
            .ok_or_else(|| MedibookError::NotFound("Sub-appointment not found".into())),
    )?;

    let service = traced(
        appointment_id,
        CancellationStep::LookupPrice,
        db.get_service_by_name(&remaining.service)
            .map_err(MedibookError::from)
            .and_then(|s| {
                s.ok_or_else(|| {
                    MedibookError::NotFound(format!(
                        "Service '{}' not found in catalog",
                        remaining.service
                    ))
                })
            }),
    )?;

    let record =
        CancelledAppointment::snapshot(&remaining, &slot, service.amount, reason, description);
    Ok(CancellationPlan { record, remaining })
}

/// Log the failing step before the error aborts the transaction.
fn traced<T>(
    appointment_id: &str,
    step: CancellationStep,
    result: MedibookResult<T>,
) -> MedibookResult<T> {
    if let Err(e) = &result {
        error!(appointment_id = %appointment_id, step = %step, error = %e, "cancellation aborted");
    }
    result
}

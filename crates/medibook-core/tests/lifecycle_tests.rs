//! Appointment lifecycle integration tests.

use chrono::NaiveDate;
use medibook_core::models::{
    CancelRequest, CreateAppointmentRequest, Gender, PatientDetailsInput, PaymentInput,
    PaymentStatus, RescheduleRequest, ServiceInput, SlotInput,
};
use medibook_core::{BookingCore, CancellationOutcome, MedibookError};

fn slot(day: u32, time: &str) -> SlotInput {
    SlotInput {
        date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        time: vec![time.to_string()],
    }
}

fn booking(slots: Vec<SlotInput>, payment: Option<PaymentInput>) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        hospital: "City General".to_string(),
        is_government: false,
        service: "Cardiology".to_string(),
        doctor: "Dr. A".to_string(),
        patient_details: PatientDetailsInput {
            full_name: "Jane Doe".to_string(),
            age: 40,
            gender: Gender::Female,
            description: Some("follow-up".to_string()),
        },
        appointments: slots,
        payment,
        user_email: "jane@example.com".to_string(),
    }
}

fn cash(amount: f64) -> Option<PaymentInput> {
    Some(PaymentInput {
        amount: Some(amount),
        method: Some("Cash".to_string()),
    })
}

fn core_with_cardiology(price: f64) -> BookingCore {
    let core = BookingCore::open_in_memory().unwrap();
    core.create_service(ServiceInput {
        name: "Cardiology".to_string(),
        amount: price,
    })
    .unwrap();
    core
}

#[test]
fn test_cash_booking_then_cancel_uses_catalog_price() {
    let core = core_with_cardiology(1500.0);

    let appointment = core
        .create_appointment(booking(vec![slot(1, "10:00 AM")], cash(1500.0)))
        .unwrap();
    assert_eq!(appointment.payment.status, PaymentStatus::Pending);

    // Price changes after booking; the archive reflects the new price.
    let service = core.get_service_by_name("Cardiology").unwrap();
    core.update_service(
        &service.id,
        ServiceInput {
            name: "Cardiology".to_string(),
            amount: 1800.0,
        },
    )
    .unwrap();

    let outcome = core
        .cancel_slot(
            &appointment.id,
            &appointment.appointments[0].id,
            CancelRequest {
                reason: "Scheduling Conflict".to_string(),
                description: Some("travelling".to_string()),
            },
        )
        .unwrap();
    assert_eq!(outcome, CancellationOutcome::Removed);

    assert!(matches!(
        core.get_appointment(&appointment.id).unwrap_err(),
        MedibookError::NotFound(_)
    ));

    let archive = core.list_cancelled(Some("jane@example.com")).unwrap();
    assert_eq!(archive.len(), 1);
    assert_eq!(archive[0].service_price, 1800.0);
    assert_eq!(archive[0].hospital, "City General");
    assert_eq!(archive[0].doctor, "Dr. A");
    assert_eq!(archive[0].cancelled_time, vec!["10:00 AM"]);
    assert_eq!(archive[0].description.as_deref(), Some("travelling"));
}

#[test]
fn test_each_cancellation_archives_exactly_once() {
    let core = core_with_cardiology(1500.0);
    let appointment = core
        .create_appointment(booking(
            vec![slot(1, "09:00 AM"), slot(2, "10:00 AM"), slot(3, "11:00 AM")],
            cash(1500.0),
        ))
        .unwrap();

    let middle = appointment.appointments[1].id.clone();
    let outcome = core
        .cancel_slot(
            &appointment.id,
            &middle,
            CancelRequest {
                reason: "Feeling Better".to_string(),
                description: None,
            },
        )
        .unwrap();

    let CancellationOutcome::Updated(updated) = outcome else {
        panic!("parent should survive");
    };
    assert_eq!(
        updated.appointments,
        vec![
            appointment.appointments[0].clone(),
            appointment.appointments[2].clone()
        ]
    );
    assert_eq!(updated.patient_details, appointment.patient_details);
    assert_eq!(updated.payment, appointment.payment);
    assert_eq!(core.list_cancelled(None).unwrap().len(), 1);

    // Cancelling the same slot again finds nothing and archives nothing.
    let err = core
        .cancel_slot(
            &appointment.id,
            &middle,
            CancelRequest {
                reason: "Feeling Better".to_string(),
                description: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, MedibookError::NotFound(_)));
    assert_eq!(core.list_cancelled(None).unwrap().len(), 1);
}

#[test]
fn test_reschedule_touches_only_target_slot() {
    let core = core_with_cardiology(1500.0);
    let appointment = core
        .create_appointment(booking(vec![slot(1, "09:00 AM"), slot(2, "10:00 AM")], cash(10.0)))
        .unwrap();

    let with_many_times = core
        .add_slot(
            &appointment.id,
            SlotInput {
                date: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
                time: vec!["09:00 AM".to_string(), "09:30 AM".to_string()],
            },
        )
        .unwrap();
    let target = with_many_times.appointments[2].id.clone();

    let new_date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
    let rescheduled = core
        .reschedule_slot(
            &appointment.id,
            &target,
            RescheduleRequest {
                new_date,
                new_times: "03:00 PM".to_string(),
            },
        )
        .unwrap();

    let moved = rescheduled.slot(&target).unwrap();
    assert_eq!(moved.date, new_date);
    assert_eq!(moved.time, vec!["03:00 PM"]);
    assert_eq!(rescheduled.appointments[..2], appointment.appointments[..]);
}

#[test]
fn test_duplicate_slots_are_accepted() {
    let core = core_with_cardiology(1500.0);
    let appointment = core
        .create_appointment(booking(vec![slot(1, "09:00 AM"), slot(1, "09:00 AM")], cash(10.0)))
        .unwrap();
    assert_eq!(appointment.appointments.len(), 2);
    assert_ne!(appointment.appointments[0].id, appointment.appointments[1].id);
}

#[test]
fn test_private_booking_without_payment_persists_nothing() {
    let core = core_with_cardiology(1500.0);
    let err = core
        .create_appointment(booking(vec![slot(1, "09:00 AM")], None))
        .unwrap_err();
    assert!(matches!(err, MedibookError::Validation(_)));
    assert!(core.list_appointments().unwrap().is_empty());
}

#[test]
fn test_check_in_correlates_by_email() {
    let core = core_with_cardiology(1500.0);
    let user = core
        .register_user(
            serde_json::from_str(r#"{"fullName": "Jane Doe", "email": "jane@example.com"}"#)
                .unwrap(),
        )
        .unwrap();
    core.create_appointment(booking(vec![slot(1, "09:00 AM")], cash(10.0)))
        .unwrap();

    let check_in = core.check_in(user.aid.as_deref().unwrap()).unwrap();
    assert_eq!(check_in.user, user);
    assert_eq!(check_in.appointments.len(), 1);
}

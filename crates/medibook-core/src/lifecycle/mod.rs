//! Appointment lifecycle: booking, rescheduling and cancellation.
//!
//! ```text
//! create ──► Active ──reschedule / add slot──► Active
//!              │
//!              └──cancel slot──► archive record written
//!                                     │
//!                        ┌────────────┴────────────┐
//!                   slots remain               last slot
//!                        │                         │
//!                     Active                    Deleted
//! ```

mod booking;
mod cancellation;

pub use booking::*;
pub use cancellation::*;

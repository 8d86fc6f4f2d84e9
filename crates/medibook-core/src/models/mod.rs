//! Domain models for the medibook system.

mod appointment;
mod cancelled;
mod catalog;
mod directory;
mod requests;
mod user;

pub use appointment::*;
pub use cancelled::*;
pub use catalog::*;
pub use directory::*;
pub use requests::*;
pub use user::*;

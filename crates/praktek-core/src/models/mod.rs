//! Domain models for the clinic front desk.

mod ids;
mod people;
mod registration;
mod schedule;

pub use ids::*;
pub use people::*;
pub use registration::*;
pub use schedule::*;

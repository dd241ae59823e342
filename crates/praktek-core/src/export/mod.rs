//! Reports: clinic statistics and doctor rosters.

mod roster;
mod stats;

pub use roster::*;
pub use stats::*;

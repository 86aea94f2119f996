//! Domain models for the Raincast platform

mod advisory;
mod weather;

pub use advisory::*;
pub use weather::*;

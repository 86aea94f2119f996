//! Shared types and core transforms for the Raincast farmer advisory platform
//!
//! This crate contains the forecast normalizer and the advisory engine shared
//! between the backend, the browser dashboard (via WASM), and other components
//! of the system. Everything here is a pure function of its input.

pub mod advisory;
pub mod error;
pub mod forecast;
pub mod models;
pub mod types;
pub mod validation;

pub use advisory::*;
pub use error::*;
pub use forecast::{aggregate_daily, normalize, summarize};
pub use models::*;
pub use types::*;
pub use validation::*;

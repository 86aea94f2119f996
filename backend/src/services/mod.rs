//! Business logic services for the Raincast advisory service

pub mod forecast;

pub use forecast::{AdvisoryReport, Forecast, ForecastService};

//! Console client for the gold rate prediction service
//!
//! Talks to the prediction backend's point and range endpoints and renders
//! the results: single-date rate estimates as text, date-range forecasts as
//! saved PNG plots. Transport and output sit behind swappable seams.

pub mod api;
pub mod dispatcher;
pub mod display;
pub mod error;
pub mod models;
pub mod plot;

pub use error::{Error, Result};

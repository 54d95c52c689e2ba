//! Prediction backend integration
//!
//! Provides the interface to the backend's point and range prediction
//! endpoints, with an HTTP implementation and a mock for tests.

pub mod client;
pub mod mock;

pub use client::PredictionClient;
pub use mock::MockPredictionClient;

use crate::models::{PointPrediction, RangePrediction};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict_point(&self, date: &str) -> Result<PointPrediction>;
    async fn predict_range(&self, start_date: &str, end_date: &str) -> Result<RangePrediction>;
}

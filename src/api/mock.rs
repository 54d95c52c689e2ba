use super::PredictionService;
use crate::models::{PointPrediction, RangePrediction, RateValue};
use crate::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted stand-in for the backend. Responses are consumed in FIFO order;
/// an empty queue yields a synthesized success. Clones share the same
/// script and call log.
#[derive(Clone)]
pub struct MockPredictionClient {
    point_responses: Arc<Mutex<VecDeque<Result<PointPrediction>>>>,
    range_responses: Arc<Mutex<VecDeque<Result<RangePrediction>>>>,
    point_calls: Arc<Mutex<Vec<String>>>,
    range_calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockPredictionClient {
    pub fn new() -> Self {
        Self {
            point_responses: Arc::new(Mutex::new(VecDeque::new())),
            range_responses: Arc::new(Mutex::new(VecDeque::new())),
            point_calls: Arc::new(Mutex::new(Vec::new())),
            range_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_point_response(self, response: Result<PointPrediction>) -> Self {
        self.point_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_range_response(self, response: Result<RangePrediction>) -> Self {
        self.range_responses.lock().unwrap().push_back(response);
        self
    }

    /// Total requests issued across both endpoints.
    pub fn get_call_count(&self) -> usize {
        self.point_calls.lock().unwrap().len() + self.range_calls.lock().unwrap().len()
    }

    pub fn point_calls(&self) -> Vec<String> {
        self.point_calls.lock().unwrap().clone()
    }

    pub fn range_calls(&self) -> Vec<(String, String)> {
        self.range_calls.lock().unwrap().clone()
    }
}

impl Default for MockPredictionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionService for MockPredictionClient {
    async fn predict_point(&self, date: &str) -> Result<PointPrediction> {
        self.point_calls.lock().unwrap().push(date.to_string());

        match self.point_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(PointPrediction {
                gold_rate: RateValue::Number(74000.0),
                inr_usd_rate: RateValue::Number(83.0),
                date: Some(date.to_string()),
            }),
        }
    }

    async fn predict_range(&self, start_date: &str, end_date: &str) -> Result<RangePrediction> {
        self.range_calls
            .lock()
            .unwrap()
            .push((start_date.to_string(), end_date.to_string()));

        match self.range_responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(RangePrediction {
                plot_image: Some("aVZCT1J3MEtHZ28=".to_string()),
            }),
        }
    }
}

//! Data models and structures
//!
//! Defines the request and response payloads exchanged with the prediction
//! backend, plus the environment-derived configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A predicted rate as the backend reports it.
///
/// Rates may arrive as JSON numbers or preformatted strings; both shapes are
/// kept as-is and rendered verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for RateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateValue::Number(n) => write!(f, "{}", n),
            RateValue::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PointPredictionRequest {
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangePredictionRequest {
    pub start_date: String,
    pub end_date: String,
}

/// Successful `/predict_point` payload. The backend echoes the requested
/// date alongside the two rates.
#[derive(Debug, Clone, Deserialize)]
pub struct PointPrediction {
    pub gold_rate: RateValue,
    pub inr_usd_rate: RateValue,
    #[serde(default)]
    pub date: Option<String>,
}

/// Successful `/predict_range` payload. `plot_image` is a base64-encoded
/// PNG; a well-formed response without it is representable and handled by
/// the dispatcher, not treated as a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RangePrediction {
    #[serde(default)]
    pub plot_image: Option<String>,
}

/// Error payload the backend attaches to non-success responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub plot_dir: PathBuf,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let backend_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let plot_dir = std::env::var("PLOT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("plots"));

        let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    crate::Error::Generic(format!(
                        "REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            backend_url,
            plot_dir,
            request_timeout,
        })
    }
}

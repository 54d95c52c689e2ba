use super::PredictionService;
use crate::models::{
    ApiErrorBody, PointPrediction, PointPredictionRequest, RangePrediction,
    RangePredictionRequest,
};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// HTTP client for the prediction backend.
///
/// Holds the backend origin explicitly; requests are issued against
/// `{base_url}/predict_point` and `{base_url}/predict_range`.
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    /// Construct a client with its own connection pool.
    ///
    /// `timeout` of `None` leaves requests on the transport's default
    /// behavior (no client-side deadline).
    pub fn new(base_url: String, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to build HTTP client");

        Self::new_with_client(base_url, client)
    }

    /// Construct a client reusing an existing connection pool.
    pub fn new_with_client(base_url: String, client: Client) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn post_json<Req: serde::Serialize>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", url, e);
                e.into()
            })
    }

    /// Parse the backend's error payload out of a non-success body.
    ///
    /// A body that is not JSON at all maps to [`Error::InvalidResponse`];
    /// a JSON body without an `error` field falls back to `default_message`.
    fn api_error(status: StatusCode, body: &str, default_message: &str) -> Error {
        let parsed: std::result::Result<ApiErrorBody, _> = serde_json::from_str(body);
        match parsed {
            Ok(error_body) => {
                let message = error_body
                    .error
                    .unwrap_or_else(|| default_message.to_string());
                tracing::error!("Backend error (status {}): {}", status, message);
                Error::Api {
                    status: status.as_u16(),
                    message,
                }
            }
            Err(e) => {
                tracing::error!(
                    "Unparseable error body (status {}): {}\nBody: {}",
                    status,
                    e,
                    body
                );
                Error::InvalidResponse(format!("unparseable error body: {}", e))
            }
        }
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn predict_point(&self, date: &str) -> Result<PointPrediction> {
        tracing::debug!("Requesting point prediction for {}", date);

        let request = PointPredictionRequest {
            date: date.to_string(),
        };
        let response = self.post_json("/predict_point", &request).await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body, "Prediction failed"));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse prediction response: {}\nBody: {}", e, body);
            Error::InvalidResponse(format!("unparseable prediction response: {}", e))
        })
    }

    async fn predict_range(&self, start_date: &str, end_date: &str) -> Result<RangePrediction> {
        tracing::debug!("Requesting range prediction {} to {}", start_date, end_date);

        let request = RangePredictionRequest {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        };
        let response = self.post_json("/predict_range", &request).await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.text().await?;

        // The backend serves JSON for both success and failure; anything
        // else means the request never reached the handler (proxy error
        // page, stack trace, ...). Raw text goes to the log, never the user.
        if !content_type.contains("application/json") {
            tracing::error!(
                "Non-JSON response from server (status {}, content-type '{}'): {}",
                status,
                content_type,
                body
            );
            return Err(Error::InvalidResponse(format!(
                "unexpected content type '{}'",
                content_type
            )));
        }

        if !status.is_success() {
            return Err(Self::api_error(status, &body, "Plot generation failed."));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse plot response: {}\nBody: {}", e, body);
            Error::InvalidResponse(format!("unparseable plot response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateValue;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PredictionClient {
        PredictionClient::new(server.uri(), None)
    }

    #[tokio::test]
    async fn test_point_prediction_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_point"))
            .and(body_json(serde_json::json!({"date": "2026-08-06"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "gold_rate": 74321.55,
                "inr_usd_rate": 83.12,
                "date": "2026-08-06"
            })))
            .mount(&server)
            .await;

        let prediction = client_for(&server)
            .predict_point("2026-08-06")
            .await
            .unwrap();
        assert_eq!(prediction.gold_rate, RateValue::Number(74321.55));
        assert_eq!(prediction.inr_usd_rate, RateValue::Number(83.12));
        assert_eq!(prediction.date.as_deref(), Some("2026-08-06"));
    }

    #[tokio::test]
    async fn test_point_prediction_sends_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_point"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "gold_rate": 1.0,
                "inr_usd_rate": 2.0
            })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).predict_point("2026-08-06").await.unwrap();
    }

    #[tokio::test]
    async fn test_point_prediction_server_error_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_point"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "Invalid date format. Please use YYYY-MM-DD."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .predict_point("not-a-date")
            .await
            .unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid date format. Please use YYYY-MM-DD.");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_point_prediction_server_error_without_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_point"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .predict_point("2026-08-06")
            .await
            .unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Prediction failed");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_point_prediction_unparseable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_point"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_string("not json"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .predict_point("2026-08-06")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_range_prediction_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_range"))
            .and(body_json(serde_json::json!({
                "start_date": "2026-08-01",
                "end_date": "2026-08-31"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "plot_image": "aGVsbG8="
            })))
            .mount(&server)
            .await;

        let prediction = client_for(&server)
            .predict_range("2026-08-01", "2026-08-31")
            .await
            .unwrap();
        assert_eq!(prediction.plot_image.as_deref(), Some("aGVsbG8="));
    }

    #[tokio::test]
    async fn test_range_prediction_missing_plot_is_not_an_error_here() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_range"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let prediction = client_for(&server)
            .predict_range("2026-08-01", "2026-08-31")
            .await
            .unwrap();
        assert_eq!(prediction.plot_image, None);
    }

    #[tokio::test]
    async fn test_range_prediction_rejects_non_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_range"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string("<html>proxy error</html>"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .predict_range("2026-08-01", "2026-08-31")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_range_prediction_server_error_fallback_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict_range"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .predict_range("2026-08-01", "2026-08-31")
            .await
            .unwrap_err();
        match err {
            Error::Api { message, .. } => assert_eq!(message, "Plot generation failed."),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_http() {
        // Port 9 is the discard service; nothing is listening in the test
        // environment, so the connection is refused.
        let client = PredictionClient::new("http://127.0.0.1:9".to_string(), None);
        let err = client.predict_point("2026-08-06").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = PredictionClient::new("http://localhost:5000/".to_string(), None);
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}

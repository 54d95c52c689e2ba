//! Request dispatch and result rendering.

use crate::api::{PredictionClient, PredictionService};
use crate::display::{ConsoleIndicator, ConsoleRegion, DisplayRegion, LoadingIndicator};
use crate::models::{Config, RangePrediction};
use crate::plot::{PlotService, PlotWriter};
use crate::{Error, Result};
use tracing::{error, info};

/// How a submission resolved. Every path leaves the dispatcher idle again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A result (or a server-reported error) was rendered.
    Rendered,
    /// Input was rejected locally; no request was issued.
    Rejected,
    /// The request or the rendering of its result failed.
    Failed,
}

/// Coordinates input validation, the request lifecycle, and rendering for
/// the two prediction operations.
///
/// Each operation owns a display region and a loading indicator, so the two
/// can run concurrently without contending for output. The indicator is
/// hidden on every exit path via a scoped guard.
pub struct Dispatcher {
    api: Box<dyn PredictionService>,
    plots: Box<dyn PlotService>,
    results_region: Box<dyn DisplayRegion>,
    plot_region: Box<dyn DisplayRegion>,
    point_indicator: Box<dyn LoadingIndicator>,
    range_indicator: Box<dyn LoadingIndicator>,
}

/// Injectable service bundle used to construct [`Dispatcher`] in
/// tests/harnesses.
pub struct DispatcherServices {
    pub api: Box<dyn PredictionService>,
    pub plots: Box<dyn PlotService>,
    pub results_region: Box<dyn DisplayRegion>,
    pub plot_region: Box<dyn DisplayRegion>,
    pub point_indicator: Box<dyn LoadingIndicator>,
    pub range_indicator: Box<dyn LoadingIndicator>,
}

/// Hides the indicator when dropped, so no exit path can leave it showing.
struct IndicatorGuard<'a> {
    indicator: &'a dyn LoadingIndicator,
}

impl<'a> IndicatorGuard<'a> {
    fn show(indicator: &'a dyn LoadingIndicator) -> Self {
        indicator.show();
        Self { indicator }
    }
}

impl Drop for IndicatorGuard<'_> {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

impl Dispatcher {
    /// Build a dispatcher from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_services(services: DispatcherServices) -> Self {
        Self {
            api: services.api,
            plots: services.plots,
            results_region: services.results_region,
            plot_region: services.plot_region,
            point_indicator: services.point_indicator,
            range_indicator: services.range_indicator,
        }
    }

    /// Construct a dispatcher from environment configuration
    /// (`Config::from_env`), wired to the console.
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;

        info!("Using prediction backend at {}", config.backend_url);
        let api = PredictionClient::new(config.backend_url.clone(), config.request_timeout);

        let plots = PlotWriter::new(&config.plot_dir)?;
        info!("Saving range plots to {}", config.plot_dir.display());

        Ok(Self::with_services(DispatcherServices {
            api: Box::new(api),
            plots: Box::new(plots),
            results_region: Box::new(ConsoleRegion),
            plot_region: Box::new(ConsoleRegion),
            point_indicator: Box::new(ConsoleIndicator::new("Contacting prediction service")),
            range_indicator: Box::new(ConsoleIndicator::new("Generating plot")),
        }))
    }

    /// Request the single-date prediction and render both rates.
    pub async fn submit_point_prediction(&self, date: &str) -> Outcome {
        if date.trim().is_empty() {
            self.results_region.show_error("Please select a date.");
            return Outcome::Rejected;
        }

        let _indicator = IndicatorGuard::show(self.point_indicator.as_ref());
        self.results_region.clear();

        match self.api.predict_point(date).await {
            Ok(prediction) => {
                self.results_region.show_message(&format!(
                    "Predicted 24K Gold Rate: INR {}",
                    prediction.gold_rate
                ));
                self.results_region.show_message(&format!(
                    "Predicted USD/INR Rate: {}",
                    prediction.inr_usd_rate
                ));
                Outcome::Rendered
            }
            Err(Error::Api { message, .. }) => {
                self.results_region
                    .show_error(&format!("Error: {}", message));
                Outcome::Failed
            }
            Err(e) => {
                error!("Error during point prediction: {}", e);
                self.results_region
                    .show_error("An error occurred. Check the logs for details.");
                Outcome::Failed
            }
        }
    }

    /// Request the date-range prediction and render the returned plot.
    pub async fn submit_range_prediction(&self, start_date: &str, end_date: &str) -> Outcome {
        if start_date.trim().is_empty() || end_date.trim().is_empty() {
            self.plot_region
                .show_error("Please select both start and end dates.");
            return Outcome::Rejected;
        }

        let _indicator = IndicatorGuard::show(self.range_indicator.as_ref());
        self.plot_region.clear();

        match self.api.predict_range(start_date, end_date).await {
            Ok(RangePrediction {
                plot_image: Some(plot_image),
            }) => {
                let label = format!("{}_{}", start_date.trim(), end_date.trim());
                match self.plots.save_plot(&plot_image, &label).await {
                    Ok(saved) => {
                        self.plot_region.show_message(&format!(
                            "Saved predicted rates plot to {} ({}x{})",
                            saved.path.display(),
                            saved.width,
                            saved.height
                        ));
                        Outcome::Rendered
                    }
                    Err(e) => {
                        error!("Failed to render plot: {}", e);
                        self.plot_region.show_error(
                            "An error occurred while rendering the plot. Check the logs for details.",
                        );
                        Outcome::Failed
                    }
                }
            }
            Ok(RangePrediction { plot_image: None }) => {
                self.plot_region
                    .show_error("Error: Plot image data missing from response.");
                Outcome::Failed
            }
            Err(Error::Api { message, .. }) => {
                error!("Backend server error: {}", message);
                self.plot_region
                    .show_error(&format!("Server Error: {}", message));
                Outcome::Failed
            }
            Err(Error::InvalidResponse(_)) => {
                // Raw response text was already logged where it was read.
                self.plot_region
                    .show_error("Invalid response from server. Check the backend log for errors.");
                Outcome::Failed
            }
            Err(e) => {
                error!("Error during range prediction: {}", e);
                self.plot_region.show_error(&format!(
                    "An error occurred: {}. Check the logs for details.",
                    e
                ));
                Outcome::Failed
            }
        }
    }
}

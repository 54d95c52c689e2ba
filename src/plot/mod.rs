//! Plot image handling
//!
//! Decodes the base64 PNG returned by range predictions, validates it, and
//! writes it to disk for viewing.

pub mod mock;
pub mod writer;

pub use mock::MockPlotWriter;
pub use writer::PlotWriter;

use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug)]
pub struct SavedPlot {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[async_trait]
pub trait PlotService: Send + Sync {
    async fn save_plot(&self, base64_png: &str, label: &str) -> Result<SavedPlot>;
}

use super::{PlotService, SavedPlot};
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockPlotWriter {
    saved: Arc<Mutex<Vec<(String, String)>>>,
    base_path: PathBuf,
    should_fail: Arc<Mutex<bool>>,
}

impl MockPlotWriter {
    pub fn new() -> Self {
        Self {
            saved: Arc::new(Mutex::new(Vec::new())),
            base_path: PathBuf::from("/tmp"),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_base_path(mut self, path: PathBuf) -> Self {
        self.base_path = path;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    /// (base64 payload, label) pairs, in call order.
    pub fn saved_plots(&self) -> Vec<(String, String)> {
        self.saved.lock().unwrap().clone()
    }
}

impl Default for MockPlotWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlotService for MockPlotWriter {
    async fn save_plot(&self, base64_png: &str, label: &str) -> Result<SavedPlot> {
        if *self.should_fail.lock().unwrap() {
            return Err(crate::Error::Generic("Mock plot failure".to_string()));
        }

        self.saved
            .lock()
            .unwrap()
            .push((base64_png.to_string(), label.to_string()));

        Ok(SavedPlot {
            path: self.base_path.join(format!("{}.png", label)),
            width: 1400,
            height: 1000,
        })
    }
}

use super::{PlotService, SavedPlot};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use std::fs;
use std::path::{Path, PathBuf};

pub struct PlotWriter {
    output_dir: PathBuf,
}

impl PlotWriter {
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    fn save_sync(base64_png: String, path: PathBuf) -> Result<SavedPlot> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(base64_png.trim())
            .map_err(|e| Error::Generic(format!("Failed to decode base64 plot image: {}", e)))?;

        // Validate before writing so a truncated payload never lands on disk.
        let decoded = image::load_from_memory(&bytes)?;
        let (width, height) = (decoded.width(), decoded.height());

        // Write the original bytes, not a re-encode, so the file matches the
        // payload the backend produced.
        fs::write(&path, &bytes)?;
        tracing::info!("Saved plot image to {} ({}x{})", path.display(), width, height);

        Ok(SavedPlot {
            path,
            width,
            height,
        })
    }
}

/// Reduce an arbitrary label (built from raw, unvalidated date inputs) to a
/// filesystem-safe file stem.
pub fn sanitize_file_stem(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "plot".to_string()
    } else {
        stem
    }
}

#[async_trait]
impl PlotService for PlotWriter {
    async fn save_plot(&self, base64_png: &str, label: &str) -> Result<SavedPlot> {
        let path = self
            .output_dir
            .join(format!("{}.png", sanitize_file_stem(label)));

        tokio::task::spawn_blocking({
            let base64_png = base64_png.to_string();
            move || Self::save_sync(base64_png, path)
        })
        .await
        .map_err(|e| Error::Generic(format!("Plot writing task join error: {}", e)))?
    }
}

pub mod overlay;
pub mod preprocessing;
pub mod weights;
pub mod yolo;

use std::path::PathBuf;

use image::RgbImage;

use crate::config::AppConfig;
use crate::models::DetectionResult;
use crate::speech::SpeechNotifier;

pub use overlay::Overlay;
pub use yolo::{DecodeParams, YoloModel};

/// Fatal conditions when bringing up the model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("No model weights found in {0:?}")]
    NotFound(PathBuf),
    #[error("Unsupported model output shape {0:?}")]
    UnsupportedOutput(Vec<usize>),
}

/// Inference backend: raw detections for one frame
pub trait ObjectModel {
    fn predict(&self, frame: &RgbImage) -> anyhow::Result<Vec<DetectionResult>>;
}

/// Runs the model on a frame, draws the results onto it, builds the
/// text summary and announces every detection
pub struct Detector {
    model: Box<dyn ObjectModel>,
    overlay: Overlay,
    speech: SpeechNotifier,
}

impl Detector {
    pub fn new(model: Box<dyn ObjectModel>, overlay: Overlay, speech: SpeechNotifier) -> Self {
        Self { model, overlay, speech }
    }

    /// Load the YOLO weights and overlay font named by the config.
    /// Fails with [`ModelError::NotFound`] when the model folder has no checkpoint.
    pub fn from_config(config: &AppConfig, speech: SpeechNotifier) -> anyhow::Result<Self> {
        let (weights, labels) = weights::resolve(&config.model)?;
        log::info!("Loading model: {:?}", weights);
        let model = YoloModel::load(&weights, labels, DecodeParams::from(&config.model))?;
        let overlay = Overlay::load(config.overlay.font.as_deref());
        Ok(Self::new(Box::new(model), overlay, speech))
    }

    /// Detect objects in `frame`, returning it annotated together with the summary text
    pub fn detect(&self, mut frame: RgbImage) -> anyhow::Result<(RgbImage, String)> {
        let detections = self.model.predict(&frame)?;
        log::debug!("{} detections", detections.len());

        for detection in &detections {
            self.overlay.draw(&mut frame, detection);
            self.speech.speak(detection.announcement());
        }

        Ok((frame, summarize(&detections)))
    }
}

/// One `label (confidence%)` line per detection, each newline-terminated
pub fn summarize(detections: &[DetectionResult]) -> String {
    detections
        .iter()
        .map(|d| format!("{}\n", d.summary_line()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoundingBox;

    #[test]
    fn test_summary_has_one_line_per_detection() {
        let detections = vec![
            DetectionResult {
                label: "10 rupees".to_string(),
                confidence: 0.5,
                bbox: BoundingBox { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 },
            },
            DetectionResult {
                label: "10 rupees".to_string(),
                confidence: 0.123,
                bbox: BoundingBox { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 },
            },
        ];
        assert_eq!(summarize(&detections), "10 rupees (50.0%)\n10 rupees (12.3%)\n");
        assert_eq!(summarize(&[]), "");
    }
}

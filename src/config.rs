use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Application settings, read from an optional TOML file.
/// Every field has a default so an empty file is a valid config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub users_file: PathBuf,
    pub model: ModelConfig,
    pub speech: SpeechConfig,
    pub capture: CaptureConfig,
    pub overlay: OverlayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Folder scanned for the weights file
    pub folder: PathBuf,
    /// Weights file extension, without the dot
    pub extension: String,
    /// A weights file name must contain one of these
    pub markers: Vec<String>,
    /// Class names, used when the folder has no labels.txt
    pub labels: Vec<String>,
    pub input_size: u32,
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Words per minute
    pub rate: u32,
    /// Pending phrases beyond this are dropped
    pub queue_capacity: usize,
    pub muted: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub camera_index: u32,
    pub tick_ms: u64,
    pub display_width: u32,
    pub display_height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// TTF/OTF font for box labels; well-known system fonts are tried when unset
    pub font: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            users_file: PathBuf::from("users.json"),
            model: ModelConfig::default(),
            speech: SpeechConfig::default(),
            capture: CaptureConfig::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("weights"),
            extension: "rten".to_string(),
            markers: vec!["best".to_string(), "last".to_string()],
            labels: ["10", "20", "50", "100", "200", "500", "2000"]
                .iter()
                .map(|value| format!("{} rupees", value))
                .collect(),
            input_size: 640,
            confidence_threshold: 0.25,
            iou_threshold: 0.7,
            max_detections: 300,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 150,
            queue_capacity: 8,
            muted: false,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            tick_ms: 30,
            display_width: 700,
            display_height: 400,
        }
    }
}

impl AppConfig {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

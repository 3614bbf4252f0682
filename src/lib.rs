pub mod capture;
pub mod config;
pub mod core;
pub mod detection;
pub mod models;
pub mod speech;

pub use config::AppConfig;
pub use detection::{Detector, ModelError, ObjectModel};
pub use models::{BoundingBox, DetectionResult};
pub use speech::{SpeechEngine, SpeechNotifier, SpeechWorker};

#[cfg(feature = "gui")]
pub mod gui;

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from rupee_lens for tests
pub use rupee_lens::capture::{CaptureOpener, FrameSource, WebcamSession};
pub use rupee_lens::core::{
    AuthForm, AuthMode, AuthOutcome, AuthRequest, CredentialStore, MAX_FAILED_TICKS, NoticeLevel, Screen, Session,
};
pub use rupee_lens::detection::{Detector, ObjectModel, Overlay, summarize};
pub use rupee_lens::models::{BoundingBox, DetectionResult};
pub use rupee_lens::speech::{SpeechEngine, SpeechNotifier, SpeechWorker};

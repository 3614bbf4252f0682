use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::{ImageBuffer, Rgb, RgbImage};
use rupee_lens::capture::{CaptureOpener, FrameSource, WebcamSession};
use rupee_lens::core::{CredentialStore, Session};
use rupee_lens::detection::{Detector, ObjectModel, Overlay};
use rupee_lens::models::{BoundingBox, DetectionResult};
use rupee_lens::speech::{SpeechEngine, SpeechNotifier, SpeechWorker};
use tempfile::NamedTempFile;

/// Display size used by test sessions
pub const TEST_DISPLAY: (u32, u32) = (70, 40);

/// Creates a 100x100 gray test frame
pub fn create_test_frame() -> RgbImage {
    ImageBuffer::from_fn(100, 100, |_, _| Rgb([40u8, 40u8, 40u8]))
}

/// Writes a test frame to a temp .png file.
/// The file will be automatically cleaned up when dropped.
pub fn create_test_image() -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    create_test_frame()
        .save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Creates a CredentialStore in a fresh temp directory.
/// Returns both the store and the temp directory (which must be kept alive).
pub fn create_test_store() -> (CredentialStore, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let store = CredentialStore::open(dir.path().join("users.json"))
        .expect("Failed to create test store");
    (store, dir)
}

pub fn make_detection(label: &str, confidence: f32, x1: f32, y1: f32) -> DetectionResult {
    DetectionResult {
        label: label.to_string(),
        confidence,
        bbox: BoundingBox { x1, y1, x2: x1 + 20.0, y2: y1 + 20.0 },
    }
}

/// Model that reports the same detections for every frame
pub struct FixedModel(pub Vec<DetectionResult>);

impl ObjectModel for FixedModel {
    fn predict(&self, _frame: &RgbImage) -> anyhow::Result<Vec<DetectionResult>> {
        Ok(self.0.clone())
    }
}

/// Speech engine that records what it was asked to say
pub struct RecordingSpeech(pub Arc<Mutex<Vec<String>>>);

impl SpeechEngine for RecordingSpeech {
    fn say(&mut self, text: &str) -> anyhow::Result<()> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Detector over a fixed model, drawing boxes only, with a recording speech worker.
/// Drop the detector then join the worker to read the spoken phrases.
pub fn make_detector(
    detections: Vec<DetectionResult>,
) -> (Detector, SpeechWorker, Arc<Mutex<Vec<String>>>) {
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let (notifier, worker) = SpeechNotifier::spawn(Box::new(RecordingSpeech(spoken.clone())), 64)
        .expect("Failed to start speech worker");
    let detector = Detector::new(Box::new(FixedModel(detections)), Overlay::boxes_only(), notifier);
    (detector, worker, spoken)
}

/// Counters shared between a fake camera and the test
#[derive(Debug, Clone, Default)]
pub struct CameraCounters {
    /// Handles currently held (opened and not yet dropped)
    pub live: Arc<AtomicUsize>,
    /// Total opens
    pub opened: Arc<AtomicUsize>,
    /// Total frames handed out
    pub frames: Arc<AtomicUsize>,
    /// While set, every grab fails as if the device was unplugged
    pub unplugged: Arc<AtomicBool>,
}

impl CameraCounters {
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn frames(&self) -> usize {
        self.frames.load(Ordering::SeqCst)
    }

    pub fn set_unplugged(&self, unplugged: bool) {
        self.unplugged.store(unplugged, Ordering::SeqCst);
    }
}

pub struct FakeCamera {
    pub counters: CameraCounters,
}

struct FakeSource {
    counters: CameraCounters,
}

impl CaptureOpener for FakeCamera {
    fn open(&self) -> anyhow::Result<Box<dyn FrameSource>> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSource {
            counters: self.counters.clone(),
        }))
    }
}

impl FrameSource for FakeSource {
    fn grab(&mut self) -> anyhow::Result<Option<RgbImage>> {
        if self.counters.unplugged.load(Ordering::SeqCst) {
            anyhow::bail!("Camera disconnected");
        }
        self.counters.frames.fetch_add(1, Ordering::SeqCst);
        Ok(Some(create_test_frame()))
    }
}

impl Drop for FakeSource {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Session over a fixed model and a fake camera
pub fn make_session(
    detections: Vec<DetectionResult>,
) -> (Session, CameraCounters, SpeechWorker, Arc<Mutex<Vec<String>>>) {
    let (detector, worker, spoken) = make_detector(detections);
    let counters = CameraCounters::default();
    let webcam = WebcamSession::new(Box::new(FakeCamera {
        counters: counters.clone(),
    }));
    (Session::new(detector, webcam, TEST_DISPLAY), counters, worker, spoken)
}

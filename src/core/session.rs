use std::path::Path;

use image::RgbImage;
use image::imageops::FilterType;

use crate::capture::{self, WebcamSession};
use crate::detection::Detector;

/// Consecutive failed webcam polls before capture is stopped
pub const MAX_FAILED_TICKS: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Auth,
    About,
}

/// Everything the detector screen shows, plus the capture state behind it
pub struct Session {
    screen: Screen,
    detector: Detector,
    webcam: WebcamSession,
    display_size: (u32, u32),
    display: Option<RgbImage>,
    summary: String,
    failed_ticks: u32,
}

impl Session {
    pub fn new(detector: Detector, webcam: WebcamSession, display_size: (u32, u32)) -> Self {
        Self {
            screen: Screen::Home,
            detector,
            webcam,
            display_size,
            display: None,
            summary: String::new(),
            failed_ticks: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Navigation is unconditional; the webcam keeps running off-screen
    pub fn show(&mut self, screen: Screen) {
        self.screen = screen;
    }

    /// Annotated frame scaled to the display size, if any
    pub fn display(&self) -> Option<&RgbImage> {
        self.display.as_ref()
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn webcam_active(&self) -> bool {
        self.webcam.is_active()
    }

    /// Decode, detect and display an image file
    pub fn show_image<P: AsRef<Path>>(&mut self, path: P) -> anyhow::Result<()> {
        let frame = capture::load_image(path)?;
        self.show_frame(frame)
    }

    /// Detect and display one frame
    pub fn show_frame(&mut self, frame: RgbImage) -> anyhow::Result<()> {
        let (annotated, summary) = self.detector.detect(frame)?;
        let (width, height) = self.display_size;
        self.display = Some(image::imageops::resize(&annotated, width, height, FilterType::Triangle));
        self.summary = summary;
        Ok(())
    }

    /// Returns false if the webcam was already running
    pub fn start_webcam(&mut self) -> anyhow::Result<bool> {
        let started = self.webcam.start()?;
        if started {
            self.failed_ticks = 0;
        }
        Ok(started)
    }

    /// Returns false if the webcam was not running
    pub fn stop_webcam(&mut self) -> bool {
        self.webcam.stop()
    }

    /// Webcam polls that have failed in a row
    pub fn failed_ticks(&self) -> u32 {
        self.failed_ticks
    }

    /// One webcam poll. Returns true when the display was updated.
    /// After [`MAX_FAILED_TICKS`] failures in a row the webcam is stopped.
    pub fn tick(&mut self) -> anyhow::Result<bool> {
        if !self.webcam.is_active() {
            return Ok(false);
        }
        match self.poll() {
            Ok(updated) => {
                self.failed_ticks = 0;
                Ok(updated)
            }
            Err(e) => {
                self.failed_ticks += 1;
                if self.failed_ticks >= MAX_FAILED_TICKS {
                    self.stop_webcam();
                    return Err(e.context(format!(
                        "Webcam stopped after {} failed frames",
                        self.failed_ticks
                    )));
                }
                Err(e)
            }
        }
    }

    fn poll(&mut self) -> anyhow::Result<bool> {
        match self.webcam.next_frame()? {
            Some(frame) => {
                self.show_frame(frame)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Blank the image and text and stop the webcam
    pub fn clear_results(&mut self) {
        self.display = None;
        self.summary.clear();
        self.stop_webcam();
    }
}

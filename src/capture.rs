use std::path::Path;

use anyhow::Context;
use image::RgbImage;

/// Image file extensions offered by the upload dialog
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// A live source of frames. Dropping it releases the device.
pub trait FrameSource {
    /// Grab the next frame; `Ok(None)` when the device had nothing this time
    fn grab(&mut self) -> anyhow::Result<Option<RgbImage>>;
}

/// Acquires a fresh capture handle each time the webcam is started
pub trait CaptureOpener {
    fn open(&self) -> anyhow::Result<Box<dyn FrameSource>>;
}

/// Decode an image file into an RGB frame
pub fn load_image<P: AsRef<Path>>(path: P) -> anyhow::Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).with_context(|| format!("Failed to open image {:?}", path))?;
    Ok(img.to_rgb8())
}

/// Webcam mode state: the active flag and the capture handle it guards.
/// The handle is held exactly while the session is active.
pub struct WebcamSession {
    opener: Box<dyn CaptureOpener>,
    handle: Option<Box<dyn FrameSource>>,
}

impl WebcamSession {
    pub fn new(opener: Box<dyn CaptureOpener>) -> Self {
        Self { opener, handle: None }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Acquire a capture handle. Returns false if already running.
    pub fn start(&mut self) -> anyhow::Result<bool> {
        if self.is_active() {
            return Ok(false);
        }
        self.handle = Some(self.opener.open()?);
        log::info!("Webcam started");
        Ok(true)
    }

    /// Release the capture handle. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                drop(handle);
                log::info!("Webcam stopped");
                true
            }
            None => false,
        }
    }

    /// Next frame while active; `Ok(None)` when stopped or the device had nothing
    pub fn next_frame(&mut self) -> anyhow::Result<Option<RgbImage>> {
        match self.handle.as_mut() {
            Some(handle) => handle.grab(),
            None => Ok(None),
        }
    }
}

/// Opener for builds without camera support
pub struct NoCamera;

impl CaptureOpener for NoCamera {
    fn open(&self) -> anyhow::Result<Box<dyn FrameSource>> {
        anyhow::bail!("Built without webcam support")
    }
}

#[cfg(feature = "webcam")]
pub use camera::NokhwaOpener;

#[cfg(feature = "webcam")]
mod camera {
    use anyhow::Context;
    use image::RgbImage;
    use nokhwa::Camera;
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};

    use super::{CaptureOpener, FrameSource};

    /// Opens the system camera at a fixed index
    pub struct NokhwaOpener {
        pub index: u32,
    }

    impl CaptureOpener for NokhwaOpener {
        fn open(&self) -> anyhow::Result<Box<dyn FrameSource>> {
            let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
            let mut camera = Camera::new(CameraIndex::Index(self.index), format)
                .with_context(|| format!("Failed to open camera {}", self.index))?;
            camera
                .open_stream()
                .with_context(|| format!("Failed to start stream on camera {}", self.index))?;
            log::info!("Opened camera {}: {}", self.index, camera.info().human_name());
            Ok(Box::new(NokhwaSource { camera }))
        }
    }

    struct NokhwaSource {
        camera: Camera,
    }

    impl FrameSource for NokhwaSource {
        fn grab(&mut self) -> anyhow::Result<Option<RgbImage>> {
            let buffer = self.camera.frame()?;
            let decoded = buffer.decode_image::<RgbFormat>()?;
            let (width, height) = (decoded.width(), decoded.height());
            Ok(RgbImage::from_raw(width, height, decoded.into_raw()))
        }
    }

    impl Drop for NokhwaSource {
        fn drop(&mut self) {
            if let Err(e) = self.camera.stop_stream() {
                log::warn!("Failed to stop camera stream: {}", e);
            }
        }
    }
}

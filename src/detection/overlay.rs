use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::models::DetectionResult;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const BOX_THICKNESS: u32 = 2;
const LABEL_SCALE: f32 = 20.0;
/// Gap between the label's top edge and the box
const LABEL_OFFSET: i32 = 24;

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Last resort when neither the configured nor a system font loads
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Draws detection boxes and their labels onto frames
pub struct Overlay {
    font: Option<FontArc>,
}

impl Overlay {
    /// Overlay that only draws boxes
    pub fn boxes_only() -> Self {
        Self { font: None }
    }

    pub fn with_font(font: FontArc) -> Self {
        Self { font: Some(font) }
    }

    /// Overlay using the font compiled into the binary
    pub fn bundled() -> anyhow::Result<Self> {
        let font = FontArc::try_from_slice(BUNDLED_FONT)
            .map_err(|e| anyhow::anyhow!("Bundled font is invalid: {}", e))?;
        Ok(Self::with_font(font))
    }

    /// Try the configured font, then the well-known system fonts, then the
    /// bundled one.
    pub fn load(font_path: Option<&Path>) -> Self {
        let candidates = font_path
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    if font_path == Some(path.as_path()) {
                        log::warn!("Cannot read font {:?}: {}", path, e);
                    }
                    continue;
                }
            };
            match FontArc::try_from_vec(bytes) {
                Ok(font) => {
                    log::debug!("Overlay font: {:?}", path);
                    return Self::with_font(font);
                }
                Err(e) => log::warn!("Unusable font {:?}: {}", path, e),
            }
        }

        log::debug!("Overlay font: bundled DejaVu Sans");
        Self::bundled().unwrap_or_else(|e| {
            log::error!("{:#}, labels will not be drawn on frames", e);
            Self::boxes_only()
        })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Draw one detection in place
    pub fn draw(&self, frame: &mut RgbImage, detection: &DetectionResult) {
        let (width, height) = frame.dimensions();
        let Some((x, y, w, h)) = detection.bbox.to_pixel_rect(width, height) else {
            return;
        };

        for inset in 0..BOX_THICKNESS {
            let (w, h) = (w.saturating_sub(2 * inset), h.saturating_sub(2 * inset));
            if w == 0 || h == 0 {
                break;
            }
            let rect = Rect::at(x + inset as i32, y + inset as i32).of_size(w, h);
            draw_hollow_rect_mut(frame, rect, BOX_COLOR);
        }

        if let Some(font) = &self.font {
            let label_y = (y - LABEL_OFFSET).max(0);
            draw_text_mut(
                frame,
                BOX_COLOR,
                x,
                label_y,
                PxScale::from(LABEL_SCALE),
                font,
                &detection.overlay_label(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoundingBox;

    fn detection(x1: f32, y1: f32, x2: f32, y2: f32) -> DetectionResult {
        DetectionResult {
            label: "100 rupees".to_string(),
            confidence: 0.9,
            bbox: BoundingBox { x1, y1, x2, y2 },
        }
    }

    #[test]
    fn test_draws_two_pixel_border() {
        let mut frame = RgbImage::new(50, 50);
        Overlay::boxes_only().draw(&mut frame, &detection(10.0, 10.0, 30.0, 30.0));

        assert_eq!(*frame.get_pixel(10, 20), BOX_COLOR);
        assert_eq!(*frame.get_pixel(11, 20), BOX_COLOR);
        assert_eq!(*frame.get_pixel(12, 20), Rgb([0, 0, 0]));
        assert_eq!(*frame.get_pixel(30, 30), BOX_COLOR);
        assert_eq!(*frame.get_pixel(20, 20), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_box_outside_frame_is_skipped() {
        let mut frame = RgbImage::new(20, 20);
        Overlay::boxes_only().draw(&mut frame, &detection(40.0, 40.0, 60.0, 60.0));
        assert!(frame.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    /// Non-black pixels in the rows above `top`
    fn lit_rows_above(frame: &RgbImage, top: u32) -> usize {
        frame
            .enumerate_pixels()
            .filter(|(_, y, p)| *y < top && **p != Rgb([0, 0, 0]))
            .count()
    }

    #[test]
    fn test_bad_font_path_still_draws_labels() {
        let overlay = Overlay::load(Some(Path::new("/nonexistent/font.ttf")));
        assert!(overlay.has_font());

        let mut frame = RgbImage::new(200, 100);
        overlay.draw(&mut frame, &detection(10.0, 40.0, 60.0, 90.0));
        assert!(lit_rows_above(&frame, 40) > 0);
    }

    #[test]
    fn test_bundled_font_draws_label_above_box() {
        let overlay = Overlay::bundled().unwrap();

        let mut frame = RgbImage::new(200, 100);
        overlay.draw(&mut frame, &detection(10.0, 40.0, 60.0, 90.0));

        assert!(lit_rows_above(&frame, 40) > 0);
    }

    #[test]
    fn test_boxes_only_draws_no_label() {
        let mut frame = RgbImage::new(200, 100);
        Overlay::boxes_only().draw(&mut frame, &detection(10.0, 40.0, 60.0, 90.0));
        assert_eq!(lit_rows_above(&frame, 40), 0);
    }
}

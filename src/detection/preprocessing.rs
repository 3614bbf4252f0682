use image::{Rgb, RgbImage};

/// Gray used by YOLO letterboxing for the padded border
const PAD_VALUE: u8 = 114;

/// Mapping between frame coordinates and letterboxed model-input coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl Letterbox {
    /// Map a point from model-input space back into the original frame
    pub fn to_frame(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}

/// Resize the frame to fit a `size`x`size` square keeping its aspect ratio,
/// centered on a gray canvas
pub fn letterbox(frame: &RgbImage, size: u32) -> (RgbImage, Letterbox) {
    let (width, height) = frame.dimensions();
    let scale = (size as f32 / width as f32).min(size as f32 / height as f32);
    let scaled_w = ((width as f32 * scale).round() as u32).clamp(1, size);
    let scaled_h = ((height as f32 * scale).round() as u32).clamp(1, size);

    let scaled = image::imageops::resize(
        frame,
        scaled_w,
        scaled_h,
        image::imageops::FilterType::Triangle,
    );

    let mut canvas = RgbImage::from_pixel(size, size, Rgb([PAD_VALUE; 3]));
    let offset_x = (size - scaled_w) / 2;
    let offset_y = (size - scaled_h) / 2;
    image::imageops::overlay(&mut canvas, &scaled, offset_x.into(), offset_y.into());

    (
        canvas,
        Letterbox {
            scale,
            pad_x: offset_x as f32,
            pad_y: offset_y as f32,
        },
    )
}

/// Planar (CHW) float data in [0, 1], the layout the detection model expects
pub fn to_chw_floats(img: &RgbImage) -> Vec<f32> {
    let (width, height) = img.dimensions();
    let plane = (width * height) as usize;
    let mut data = vec![0.0f32; plane * 3];

    for (x, y, pixel) in img.enumerate_pixels() {
        let idx = (y * width + x) as usize;
        for channel in 0..3 {
            data[channel * plane + idx] = pixel[channel] as f32 / 255.0;
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_wide_frame() {
        let frame = RgbImage::from_pixel(200, 100, Rgb([255, 0, 0]));
        let (boxed, lb) = letterbox(&frame, 64);

        assert_eq!(boxed.dimensions(), (64, 64));
        assert!((lb.scale - 0.32).abs() < 1e-6);
        assert_eq!(lb.pad_x, 0.0);
        assert_eq!(lb.pad_y, 16.0);
        // Padding rows are gray, content is red
        assert_eq!(*boxed.get_pixel(32, 0), Rgb([PAD_VALUE; 3]));
        assert_eq!(*boxed.get_pixel(32, 32), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_letterbox_maps_back_to_frame() {
        let frame = RgbImage::new(200, 100);
        let (_, lb) = letterbox(&frame, 64);
        let (x, y) = lb.to_frame(32.0, 32.0);
        assert!((x - 100.0).abs() < 1e-3);
        assert!((y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_chw_layout() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));

        assert_eq!(to_chw_floats(&img), vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }
}

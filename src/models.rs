/// Bounding box in pixel coordinates of the frame it was detected in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Intersection over union with another box
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);

        let intersection = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        let union = self.area() + other.area() - intersection;

        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }

    /// Clamp to a frame and round to whole pixels: (x, y, width, height).
    /// Returns None when nothing of the box is left inside the frame.
    pub fn to_pixel_rect(&self, frame_width: u32, frame_height: u32) -> Option<(i32, i32, u32, u32)> {
        let max_x = frame_width.saturating_sub(1) as f32;
        let max_y = frame_height.saturating_sub(1) as f32;
        let x1 = self.x1.clamp(0.0, max_x).round() as i32;
        let y1 = self.y1.clamp(0.0, max_y).round() as i32;
        let x2 = self.x2.clamp(0.0, max_x).round() as i32;
        let y2 = self.y2.clamp(0.0, max_y).round() as i32;

        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some((x1, y1, (x2 - x1 + 1) as u32, (y2 - y1 + 1) as u32))
    }
}

/// One detected object in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub label: String,
    /// Model confidence in [0, 1]
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl DetectionResult {
    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }

    /// Text drawn above the box, e.g. `500 rupees 87.3%`
    pub fn overlay_label(&self) -> String {
        format!("{} {:.1}%", self.label, self.confidence_percent())
    }

    /// Line in the results panel, e.g. `500 rupees (87.3%)`
    pub fn summary_line(&self) -> String {
        format!("{} ({:.1}%)", self.label, self.confidence_percent())
    }

    /// Phrase handed to the speech worker
    pub fn announcement(&self) -> String {
        format!("{} detected", self.label)
    }
}

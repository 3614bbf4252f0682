use std::path::Path;

use image::RgbImage;
use rten::Model;
use rten_tensor::NdTensor;
use rten_tensor::prelude::*;

use crate::config::ModelConfig;
use crate::detection::preprocessing::{self, Letterbox};
use crate::detection::{ModelError, ObjectModel};
use crate::models::{BoundingBox, DetectionResult};

/// YOLOv8-style detector running on the rten runtime
pub struct YoloModel {
    model: Model,
    labels: Vec<String>,
    params: DecodeParams,
}

/// Thresholds applied to raw predictions
#[derive(Debug, Clone, Copy)]
pub struct DecodeParams {
    pub input_size: u32,
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

impl From<&ModelConfig> for DecodeParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            input_size: config.input_size,
            confidence_threshold: config.confidence_threshold,
            iou_threshold: config.iou_threshold,
            max_detections: config.max_detections,
        }
    }
}

impl YoloModel {
    pub fn load<P: AsRef<Path>>(
        weights: P,
        labels: Vec<String>,
        params: DecodeParams,
    ) -> anyhow::Result<Self> {
        let weights = weights.as_ref();
        let model = Model::load_file(weights)
            .map_err(|e| anyhow::anyhow!("Failed to load model {:?}: {}", weights, e))?;
        log::info!("Loaded model {:?} with {} labels", weights, labels.len());
        Ok(Self { model, labels, params })
    }
}

impl ObjectModel for YoloModel {
    fn predict(&self, frame: &RgbImage) -> anyhow::Result<Vec<DetectionResult>> {
        let size = self.params.input_size;
        let (input_img, letterbox) = preprocessing::letterbox(frame, size);
        let input = NdTensor::from_data(
            [1, 3, size as usize, size as usize],
            preprocessing::to_chw_floats(&input_img),
        );

        let output: NdTensor<f32, 3> = self.model.run_one(input.view().into(), None)?.try_into()?;
        let (rows, cols) = (output.size(1), output.size(2));
        let data = output.to_vec();

        // Exports are [1, 4 + classes, anchors]; some tools emit the transpose
        let (features, anchors, data) = if rows <= cols {
            (rows, cols, data)
        } else {
            (cols, rows, transpose(&data, rows, cols))
        };
        if features <= 4 {
            return Err(ModelError::UnsupportedOutput(vec![1, rows, cols]).into());
        }

        let mut detections = decode(&data, features, anchors, &self.params, &letterbox, frame.dimensions());
        non_max_suppression(&mut detections, self.params.iou_threshold, self.params.max_detections);

        Ok(detections
            .into_iter()
            .map(|raw| DetectionResult {
                label: label_for(&self.labels, raw.class_id),
                confidence: raw.confidence,
                bbox: raw.bbox,
            })
            .collect())
    }
}

/// A candidate box before class names are attached
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    pub class_id: usize,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

fn label_for(labels: &[String], class_id: usize) -> String {
    labels
        .get(class_id)
        .cloned()
        .unwrap_or_else(|| format!("class {}", class_id))
}

fn transpose(data: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = vec![0.0; data.len()];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = data[r * cols + c];
        }
    }
    out
}

/// Turn channel-first predictions (`features` rows of `anchors` values:
/// cx, cy, w, h, then one score per class) into boxes in frame coordinates
pub fn decode(
    data: &[f32],
    features: usize,
    anchors: usize,
    params: &DecodeParams,
    letterbox: &Letterbox,
    (frame_w, frame_h): (u32, u32),
) -> Vec<RawDetection> {
    let at = |feature: usize, anchor: usize| data[feature * anchors + anchor];
    let mut detections = Vec::new();

    for anchor in 0..anchors {
        let (class_id, confidence) = (4..features)
            .map(|f| (f - 4, at(f, anchor)))
            .fold((0, f32::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });

        if confidence < params.confidence_threshold {
            continue;
        }

        let (cx, cy, w, h) = (at(0, anchor), at(1, anchor), at(2, anchor), at(3, anchor));
        let (x1, y1) = letterbox.to_frame(cx - w / 2.0, cy - h / 2.0);
        let (x2, y2) = letterbox.to_frame(cx + w / 2.0, cy + h / 2.0);

        detections.push(RawDetection {
            class_id,
            confidence,
            bbox: BoundingBox {
                x1: x1.clamp(0.0, frame_w as f32),
                y1: y1.clamp(0.0, frame_h as f32),
                x2: x2.clamp(0.0, frame_w as f32),
                y2: y2.clamp(0.0, frame_h as f32),
            },
        });
    }

    detections
}

/// Greedy per-class NMS; leaves the survivors sorted by confidence
pub fn non_max_suppression(detections: &mut Vec<RawDetection>, iou_threshold: f32, max_detections: usize) {
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<RawDetection> = Vec::new();
    for candidate in detections.drain(..) {
        if kept.len() >= max_detections {
            break;
        }
        let suppressed = kept.iter().any(|k| {
            k.class_id == candidate.class_id && k.bbox.iou(&candidate.bbox) > iou_threshold
        });
        if !suppressed {
            kept.push(candidate);
        }
    }
    *detections = kept;
}

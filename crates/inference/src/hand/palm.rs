//! Palm detection pre- and post-processing.
//!
//! The palm detector is an SSD network taking a 192x192 RGB image and producing, for each of
//! its 2016 anchors, a box regressor (`[1, 2016, 18]`: centre offset, size and 7 keypoints,
//! all in input pixels) and a logit (`[1, 2016, 1]`).

use {
    crate::InferError,
    base::{Rect, Vec2},
    image::{Image, PixelFormat},
};

use super::roi::sample_bilinear;

/// Side of the square palm detector input, in pixels.
pub const PALM_INPUT_SIZE: usize = 192;

/// Keypoints predicted per palm: wrist, index/middle/ring/pinky bases, two thumb joints.
pub const PALM_KEYPOINT_COUNT: usize = 7;

const PALM_VALUES: usize = 4 + 2 * PALM_KEYPOINT_COUNT;
const ANCHOR_STRIDES: [usize; 4] = [8, 16, 16, 16];
const ANCHORS_PER_LAYER: usize = 2;
const LOGIT_CLAMP: f32 = 100.0;

/// Centre of an SSD anchor, normalized to the detector input. Anchors have a fixed unit size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub center: Vec2<f32>,
}

/// Generates the palm detector anchors.
///
/// Consecutive layers with the same stride share one feature map, so the four layers
/// collapse into a 24x24 map with 2 anchors per cell and a 12x12 map with 6.
pub fn generate_anchors() -> Vec<Anchor> {
    let mut anchors = Vec::new();
    let mut layer = 0;
    while layer < ANCHOR_STRIDES.len() {
        let stride = ANCHOR_STRIDES[layer];
        let mut per_cell = 0;
        while layer < ANCHOR_STRIDES.len() && ANCHOR_STRIDES[layer] == stride {
            per_cell += ANCHORS_PER_LAYER;
            layer += 1;
        }

        let cells = PALM_INPUT_SIZE.div_ceil(stride);
        for y in 0..cells {
            for x in 0..cells {
                let center = Vec2::new(
                    (x as f32 + 0.5) / cells as f32,
                    (y as f32 + 0.5) / cells as f32,
                );
                for _ in 0..per_cell {
                    anchors.push(Anchor { center });
                }
            }
        }
    }
    anchors
}

/// Letterbox transformation parameters for coordinate rescaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    /// Scale factor applied to the frame (192 / longest side)
    pub scale: f32,
    /// Padding added on the left and top (in detector input pixels)
    pub pad: Vec2<f32>,
}

impl LetterboxInfo {
    /// Maps a point normalized to the detector input back to frame pixels.
    pub fn to_frame(&self, normalized: Vec2<f32>) -> Vec2<f32> {
        (normalized * PALM_INPUT_SIZE as f32 - self.pad) / self.scale
    }
}

/// Letterboxes an `Rgb8` frame into the palm detector input.
///
/// Returns NHWC data (1, 192, 192, 3) with values in [0.0, 1.0] and black padding,
/// plus the letterbox parameters.
pub fn letterbox(image: &Image) -> Result<(Vec<f32>, LetterboxInfo), InferError> {
    ensure_rgb(image)?;
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return Err(InferError::Shape(format!("empty frame {}x{}", w, h)));
    }

    let target = PALM_INPUT_SIZE as f32;
    let scale = target / w.max(h) as f32;
    let pad = Vec2::new(
        (target - w as f32 * scale) / 2.0,
        (target - h as f32 * scale) / 2.0,
    );
    let info = LetterboxInfo { scale, pad };

    let mut data = vec![0.0; PALM_INPUT_SIZE * PALM_INPUT_SIZE * 3];
    for oy in 0..PALM_INPUT_SIZE {
        for ox in 0..PALM_INPUT_SIZE {
            // sample at the output pixel centre
            let src = (Vec2::new(ox as f32 + 0.5, oy as f32 + 0.5) - pad) / scale;
            if src.x < 0.0 || src.y < 0.0 || src.x > w as f32 || src.y > h as f32 {
                continue;
            }
            let rgb = sample_bilinear(image, src.x - 0.5, src.y - 0.5);
            let idx = (oy * PALM_INPUT_SIZE + ox) * 3;
            for ch in 0..3 {
                data[idx + ch] = rgb[ch] / 255.0;
            }
        }
    }
    Ok((data, info))
}

/// A detected palm in frame pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PalmDetection {
    pub rect: Rect<f32>,
    pub score: f32,
    pub keypoints: [Vec2<f32>; PALM_KEYPOINT_COUNT],
}

/// Picks the box regressors and the score logits out of the palm detector outputs by size,
/// whatever order the model lists them in.
pub fn select_palm_outputs<'a>(
    outputs: &[&'a [f32]],
    anchor_count: usize,
) -> Result<(&'a [f32], &'a [f32]), InferError> {
    let find = |len: usize| outputs.iter().copied().find(|o| o.len() == len);
    let boxes = find(anchor_count * PALM_VALUES);
    let logits = find(anchor_count);
    match (boxes, logits) {
        (Some(boxes), Some(logits)) => Ok((boxes, logits)),
        _ => Err(InferError::Shape(format!(
            "palm detector outputs {:?} values, expected {} boxes and {} scores",
            outputs.iter().map(|o| o.len()).collect::<Vec<_>>(),
            anchor_count * PALM_VALUES,
            anchor_count,
        ))),
    }
}

/// Decodes raw palm detector output into frame-space detections scoring at least `min_score`.
pub fn decode_palms(
    boxes: &[f32],
    logits: &[f32],
    anchors: &[Anchor],
    letterbox: &LetterboxInfo,
    min_score: f32,
) -> Result<Vec<PalmDetection>, InferError> {
    if boxes.len() != anchors.len() * PALM_VALUES || logits.len() != anchors.len() {
        return Err(InferError::Shape(format!(
            "expected [1, {n}, {PALM_VALUES}] boxes and [1, {n}, 1] scores, got {} and {} values",
            boxes.len(),
            logits.len(),
            n = anchors.len(),
        )));
    }

    let input = PALM_INPUT_SIZE as f32;
    let mut detections = Vec::new();
    for (i, anchor) in anchors.iter().enumerate() {
        let score = sigmoid(logits[i].clamp(-LOGIT_CLAMP, LOGIT_CLAMP));
        if score < min_score {
            continue;
        }

        let raw = &boxes[i * PALM_VALUES..(i + 1) * PALM_VALUES];
        let center = letterbox.to_frame(anchor.center + Vec2::new(raw[0], raw[1]) / input);
        let size = Vec2::new(raw[2], raw[3]) / letterbox.scale;

        let mut keypoints = [Vec2::zero(); PALM_KEYPOINT_COUNT];
        for (k, keypoint) in keypoints.iter_mut().enumerate() {
            let offset = Vec2::new(raw[4 + k * 2], raw[5 + k * 2]) / input;
            *keypoint = letterbox.to_frame(anchor.center + offset);
        }

        detections.push(PalmDetection {
            rect: Rect::new(center - size * 0.5, size),
            score,
            keypoints,
        });
    }
    Ok(detections)
}

/// Compute Intersection over Union (IoU) between two bounding boxes
///
/// Returns 0.0 for non-overlapping boxes or zero-area boxes (no division by zero).
pub fn iou(a: &Rect<f32>, b: &Rect<f32>) -> f32 {
    if a.size.x <= 0.0 || a.size.y <= 0.0 || b.size.x <= 0.0 || b.size.y <= 0.0 {
        return 0.0;
    }

    let intersection_area = match a.intersection(*b) {
        Some(rect) => rect.area(),
        None => 0.0,
    };
    let union_area = a.area() + b.area() - intersection_area;
    if union_area <= 0.0 {
        return 0.0;
    }

    intersection_area / union_area
}

/// Weighted non-maximum suppression.
///
/// Detections overlapping the best remaining one by more than `iou_threshold` are merged
/// into it: box and keypoints become the score-weighted average of the cluster, the score
/// stays the best one. Output is sorted by score descending.
pub fn weighted_nms(mut detections: Vec<PalmDetection>, iou_threshold: f32) -> Vec<PalmDetection> {
    detections.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let mut keep = Vec::new();
    while !detections.is_empty() {
        let best = detections.remove(0);
        let (overlapping, rest): (Vec<_>, Vec<_>) = detections
            .into_iter()
            .partition(|d| iou(&best.rect, &d.rect) > iou_threshold);
        detections = rest;

        let mut cluster = overlapping;
        cluster.push(best);
        let total: f32 = cluster.iter().map(|d| d.score).sum();
        if cluster.len() == 1 || total <= 0.0 {
            keep.push(best);
            continue;
        }

        let mut origin = Vec2::zero();
        let mut size = Vec2::zero();
        let mut keypoints = [Vec2::zero(); PALM_KEYPOINT_COUNT];
        for d in &cluster {
            let w = d.score / total;
            origin += d.rect.origin * w;
            size += d.rect.size * w;
            for (acc, kp) in keypoints.iter_mut().zip(d.keypoints.iter()) {
                *acc += *kp * w;
            }
        }
        keep.push(PalmDetection {
            rect: Rect::new(origin, size),
            score: best.score,
            keypoints,
        });
    }
    keep
}

pub(crate) fn ensure_rgb(image: &Image) -> Result<(), InferError> {
    if image.format != PixelFormat::Rgb8 {
        return Err(InferError::Shape(format!(
            "expected Rgb8 frame, got {:?}",
            image.format
        )));
    }
    image
        .validate()
        .map_err(|e| InferError::Shape(e.to_string()))
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

use {
    crate::{HandLandmarkIndex, PalmDetection},
    base::{Rect, Vec2},
    image::Image,
    std::f32::consts::PI,
};

/// Side of the square landmark network input, in pixels.
pub const LANDMARK_INPUT_SIZE: usize = 224;

const PALM_ROI_SCALE: f32 = 2.6;
const PALM_ROI_SHIFT_Y: f32 = -0.5;
const LANDMARK_ROI_SCALE: f32 = 2.0;
const LANDMARK_ROI_SHIFT_Y: f32 = -0.1;

// palm keypoints used to orient the hand
const PALM_WRIST: usize = 0;
const PALM_MIDDLE_FINGER: usize = 2;

// wrist, thumb base joints and the two lower joints of each finger; fingertips and the
// outer joints stretch the region well past the palm
const ROI_LANDMARKS: [HandLandmarkIndex; 12] = [
    HandLandmarkIndex::Wrist,
    HandLandmarkIndex::ThumbCmc,
    HandLandmarkIndex::ThumbMcp,
    HandLandmarkIndex::ThumbIp,
    HandLandmarkIndex::IndexFingerMcp,
    HandLandmarkIndex::IndexFingerPip,
    HandLandmarkIndex::MiddleFingerMcp,
    HandLandmarkIndex::MiddleFingerPip,
    HandLandmarkIndex::RingFingerMcp,
    HandLandmarkIndex::RingFingerPip,
    HandLandmarkIndex::PinkyMcp,
    HandLandmarkIndex::PinkyPip,
];

/// Rotated region of interest in frame pixels.
///
/// `rotation` is in radians; positive values turn the region's +x axis towards +y. A hand
/// inside an upright region (rotation 0) points its fingers towards -y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roi {
    pub center: Vec2<f32>,
    pub size: Vec2<f32>,
    pub rotation: f32,
}

impl Roi {
    /// Hand region around a detected palm.
    pub fn from_palm(palm: &PalmDetection) -> Self {
        let rotation = hand_rotation(
            palm.keypoints[PALM_WRIST],
            palm.keypoints[PALM_MIDDLE_FINGER],
        );
        Self {
            center: palm.rect.center(),
            size: palm.rect.size,
            rotation,
        }
        .transformed(PALM_ROI_SCALE, PALM_ROI_SHIFT_Y)
    }

    /// Region to search on the next frame, derived from the 21 landmarks in frame pixels.
    ///
    /// Only the palm and lower finger joints are enclosed, so the region matches the one
    /// [`Roi::from_palm`] gives for the same hand. Returns `None` when landmarks are missing.
    pub fn from_landmarks(points: &[Vec2<f32>]) -> Option<Self> {
        let palm = ROI_LANDMARKS
            .iter()
            .map(|&index| points.get(usize::from(index)).copied())
            .collect::<Option<Vec<_>>>()?;
        let wrist = *points.get(usize::from(HandLandmarkIndex::Wrist))?;
        let middle = *points.get(usize::from(HandLandmarkIndex::MiddleFingerMcp))?;
        let rotation = hand_rotation(wrist, middle);

        // bounding box in the hand's own frame
        let bounds = Rect::enclosing(palm.iter().map(|p| p.rotated(-rotation)))?;
        Some(
            Self {
                center: bounds.center().rotated(rotation),
                size: bounds.size,
                rotation,
            }
            .transformed(LANDMARK_ROI_SCALE, LANDMARK_ROI_SHIFT_Y),
        )
    }

    /// Shifts along the rotated y axis by `shift_y` heights, then squares the long side and
    /// scales it.
    fn transformed(self, scale: f32, shift_y: f32) -> Self {
        let offset = Vec2::new(0.0, self.size.y * shift_y).rotated(self.rotation);
        let long = self.size.x.max(self.size.y) * scale;
        Self {
            center: self.center + offset,
            size: Vec2::new(long, long),
            rotation: self.rotation,
        }
    }

    /// Maps a point given in region coordinates ((0, 0) top-left, (1, 1) bottom-right) to frame
    /// pixels.
    pub fn to_frame(&self, local: Vec2<f32>) -> Vec2<f32> {
        let offset = Vec2::new(
            (local.x - 0.5) * self.size.x,
            (local.y - 0.5) * self.size.y,
        );
        self.center + offset.rotated(self.rotation)
    }

    pub fn corners(&self) -> [Vec2<f32>; 4] {
        [
            self.to_frame(Vec2::new(0.0, 0.0)),
            self.to_frame(Vec2::new(1.0, 0.0)),
            self.to_frame(Vec2::new(1.0, 1.0)),
            self.to_frame(Vec2::new(0.0, 1.0)),
        ]
    }

    /// Axis-aligned bounds of the rotated region.
    pub fn bounds(&self) -> Rect<f32> {
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = Vec2::new(min.x.min(c.x), min.y.min(c.y));
            max = Vec2::new(max.x.max(c.x), max.y.max(c.y));
        }
        Rect::new(min, max - min)
    }

    /// Resamples the region into a `size`x`size` NHWC buffer with values in [0.0, 1.0].
    ///
    /// Parts of the region outside the frame read as black.
    pub fn crop(&self, image: &Image, size: usize) -> Vec<f32> {
        let mut data = vec![0.0; size * size * 3];
        for oy in 0..size {
            for ox in 0..size {
                let local = Vec2::new(
                    (ox as f32 + 0.5) / size as f32,
                    (oy as f32 + 0.5) / size as f32,
                );
                let p = self.to_frame(local);
                let rgb = sample_bilinear(image, p.x - 0.5, p.y - 0.5);
                let idx = (oy * size + ox) * 3;
                for ch in 0..3 {
                    data[idx + ch] = rgb[ch] / 255.0;
                }
            }
        }
        data
    }
}

/// Rotation that turns the `wrist` to `finger` direction upright (towards -y).
fn hand_rotation(wrist: Vec2<f32>, finger: Vec2<f32>) -> f32 {
    let angle = (-(finger.y - wrist.y)).atan2(finger.x - wrist.x);
    normalize_radians(PI / 2.0 - angle)
}

fn normalize_radians(angle: f32) -> f32 {
    angle - 2.0 * PI * ((angle + PI) / (2.0 * PI)).floor()
}

/// Bilinear sample of a packed 3-channel image at pixel coordinates `(x, y)`, where integer
/// coordinates hit pixel centres. Pixels outside the image read as zero.
pub(crate) fn sample_bilinear(image: &Image, x: f32, y: f32) -> [f32; 3] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut out = [0.0; 3];
    for (dx, dy, weight) in [
        (0, 0, (1.0 - fx) * (1.0 - fy)),
        (1, 0, fx * (1.0 - fy)),
        (0, 1, (1.0 - fx) * fy),
        (1, 1, fx * fy),
    ] {
        if weight == 0.0 {
            continue;
        }
        let (px, py) = (x0 + dx, y0 + dy);
        if px < 0 || py < 0 || px >= image.width() as i64 || py >= image.height() as i64 {
            continue;
        }
        let idx = (py as usize * image.width() + px as usize) * 3;
        if let Some(pixel) = image.data.get(idx..idx + 3) {
            for ch in 0..3 {
                out[ch] += pixel[ch] as f32 * weight;
            }
        }
    }
    out
}

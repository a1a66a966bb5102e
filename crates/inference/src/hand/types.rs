use base::Vec2;

/// Number of landmarks in a hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// A single hand landmark, normalized to the frame.
///
/// `x` and `y` are fractions of the frame width and height. `z` is depth relative to the
/// wrist, on roughly the same scale as `x`; smaller values are closer to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Hand landmark indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandLandmarkIndex {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl From<HandLandmarkIndex> for usize {
    fn from(index: HandLandmarkIndex) -> usize {
        index as usize
    }
}

impl TryFrom<usize> for HandLandmarkIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        use HandLandmarkIndex::*;
        const ALL: [HandLandmarkIndex; HAND_LANDMARK_COUNT] = [
            Wrist,
            ThumbCmc,
            ThumbMcp,
            ThumbIp,
            ThumbTip,
            IndexFingerMcp,
            IndexFingerPip,
            IndexFingerDip,
            IndexFingerTip,
            MiddleFingerMcp,
            MiddleFingerPip,
            MiddleFingerDip,
            MiddleFingerTip,
            RingFingerMcp,
            RingFingerPip,
            RingFingerDip,
            RingFingerTip,
            PinkyMcp,
            PinkyPip,
            PinkyDip,
            PinkyTip,
        ];
        ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid hand landmark index: {}. Must be in range 0-20.",
                value
            )
        })
    }
}

/// Edges of the hand skeleton, as pairs of landmark indices.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (0, 5),
    (9, 13),
    (13, 17),
    (5, 9),
    (0, 17),
    (1, 2),
    (2, 3),
    (3, 4),
    (5, 6),
    (6, 7),
    (7, 8),
    (9, 10),
    (10, 11),
    (11, 12),
    (13, 14),
    (14, 15),
    (15, 16),
    (17, 18),
    (18, 19),
    (19, 20),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    pub landmarks: [Landmark; HAND_LANDMARK_COUNT],
    pub handedness: Handedness,
    /// Confidence of the handedness classification in [0.5, 1.0].
    pub handedness_score: f32,
    /// Hand presence score reported by the landmark network.
    pub presence: f32,
}

impl HandLandmarks {
    pub fn landmark(&self, index: HandLandmarkIndex) -> &Landmark {
        &self.landmarks[usize::from(index)]
    }

    /// Pixel position of landmark `index` in a frame of `size`.
    ///
    /// Returns `None` for landmarks outside the frame (normalized coordinates outside [0, 1])
    /// and for out-of-range indices.
    pub fn pixel(&self, index: usize, size: Vec2<usize>) -> Option<Vec2<i32>> {
        let landmark = self.landmarks.get(index)?;
        let x = normalized_to_pixel(landmark.x, size.x)?;
        let y = normalized_to_pixel(landmark.y, size.y)?;
        Some(Vec2::new(x, y))
    }
}

fn normalized_to_pixel(value: f32, extent: usize) -> Option<i32> {
    const EPSILON: f32 = 1e-6;
    if !(value > -EPSILON && value < 1.0 + EPSILON) || extent == 0 {
        return None;
    }
    let max = (extent - 1) as f32;
    Some((value * extent as f32).floor().clamp(0.0, max) as i32)
}

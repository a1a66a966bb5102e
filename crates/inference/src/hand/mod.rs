mod detector;
mod landmark;
mod landmarker;
mod palm;
mod roi;
mod tracking;
mod types;

pub use detector::HandDetector;
pub use landmark::{LandmarkOutputs, decode_landmarks, select_landmark_outputs};
pub use landmarker::{HandLandmarker, HandLandmarkerOptions};
pub use palm::{
    Anchor, LetterboxInfo, PALM_INPUT_SIZE, PalmDetection, decode_palms, generate_anchors, iou,
    letterbox, select_palm_outputs, weighted_nms,
};
pub use roi::{LANDMARK_INPUT_SIZE, Roi};
pub use tracking::{HandTracker, ROI_OVERLAP_IOU, overlaps_any};
pub use types::{
    HAND_CONNECTIONS, HAND_LANDMARK_COUNT, HandLandmarkIndex, HandLandmarks, Handedness, Landmark,
};

//! Landmark network post-processing.
//!
//! The landmark network takes a 224x224 RGB crop of a hand region and produces 21 screen
//! landmarks (`[1, 63]`, x/y/z in crop pixels), a presence score (`[1, 1]`), a handedness
//! score (`[1, 1]`, 1.0 = right hand) and 21 world landmarks (`[1, 63]`, unused here).

use {
    crate::{
        HAND_LANDMARK_COUNT, HandLandmarks, Handedness, InferError, LANDMARK_INPUT_SIZE, Landmark,
        Roi,
    },
    base::Vec2,
};

const LANDMARK_VALUES: usize = HAND_LANDMARK_COUNT * 3;

/// Landmark network outputs for one hand region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkOutputs<'a> {
    pub landmarks: &'a [f32],
    pub presence: f32,
    pub handedness: f32,
}

/// Picks the landmark network outputs by size.
///
/// Screen landmarks are the first 63-value output (world landmarks share the size and come
/// after them). The two single-value outputs are presence and handedness, in that order.
pub fn select_landmark_outputs<'a>(
    outputs: &[&'a [f32]],
) -> Result<LandmarkOutputs<'a>, InferError> {
    let landmarks = outputs.iter().copied().find(|o| o.len() == LANDMARK_VALUES);
    let mut scalars = outputs.iter().filter(|o| o.len() == 1).map(|o| o[0]);
    match (landmarks, scalars.next(), scalars.next()) {
        (Some(landmarks), Some(presence), Some(handedness)) => Ok(LandmarkOutputs {
            landmarks,
            presence,
            handedness,
        }),
        _ => Err(InferError::Shape(format!(
            "landmark network outputs {:?} values, expected {} landmarks and two scores",
            outputs.iter().map(|o| o.len()).collect::<Vec<_>>(),
            LANDMARK_VALUES,
        ))),
    }
}

/// Maps the outputs for `roi` back onto a frame of `size` pixels.
///
/// Returns the hand together with the region to search on the next frame, or `None` when
/// presence is below `min_presence`.
pub fn decode_landmarks(
    outputs: &LandmarkOutputs,
    roi: &Roi,
    size: Vec2<usize>,
    min_presence: f32,
) -> Result<Option<(HandLandmarks, Roi)>, InferError> {
    if outputs.landmarks.len() < LANDMARK_VALUES {
        return Err(InferError::Shape(format!(
            "expected {} landmark values, got {}",
            LANDMARK_VALUES,
            outputs.landmarks.len()
        )));
    }
    if outputs.presence < min_presence {
        return Ok(None);
    }

    let width = size.x as f32;
    let height = size.y as f32;
    let crop = LANDMARK_INPUT_SIZE as f32;
    let mut pixels = [Vec2::zero(); HAND_LANDMARK_COUNT];
    let mut landmarks = [Landmark::default(); HAND_LANDMARK_COUNT];
    for (i, values) in outputs
        .landmarks
        .chunks_exact(3)
        .take(HAND_LANDMARK_COUNT)
        .enumerate()
    {
        let p = roi.to_frame(Vec2::new(values[0] / crop, values[1] / crop));
        pixels[i] = p;
        // depth shares the x scale
        let z = values[2] / crop * roi.size.x / width;
        landmarks[i] = Landmark::new(p.x / width, p.y / height, z);
    }

    let (handedness, handedness_score) = if outputs.handedness > 0.5 {
        (Handedness::Right, outputs.handedness)
    } else {
        (Handedness::Left, 1.0 - outputs.handedness)
    };
    let hand = HandLandmarks {
        landmarks,
        handedness,
        handedness_score,
        presence: outputs.presence,
    };
    let next = Roi::from_landmarks(&pixels)
        .ok_or_else(|| InferError::Runtime("no landmarks to track".to_string()))?;
    Ok(Some((hand, next)))
}

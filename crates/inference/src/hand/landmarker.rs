use {
    super::palm::ensure_rgb,
    crate::{
        Anchor, HandDetector, HandLandmarks, HandTracker, InferError, LANDMARK_INPUT_SIZE,
        PALM_INPUT_SIZE, PalmDetection, Roi, decode_landmarks, decode_palms, generate_anchors,
        letterbox, select_landmark_outputs, select_palm_outputs, weighted_nms,
    },
    image::{Image, PixelFormat},
    ort::{session::Session, value::Tensor},
};

const PALM_NMS_IOU: f32 = 0.3;

/// Hand landmarker configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarkerOptions {
    /// Run palm detection on every frame instead of tracking hands between frames.
    pub static_image_mode: bool,
    pub max_num_hands: usize,
    /// Minimum palm detection score for a new hand.
    pub min_detection_confidence: f32,
    /// Minimum hand presence score to keep tracking a hand.
    pub min_tracking_confidence: f32,
}

impl Default for HandLandmarkerOptions {
    fn default() -> Self {
        Self {
            static_image_mode: false,
            max_num_hands: 2,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
        }
    }
}

impl HandLandmarkerOptions {
    pub fn validate(&self) -> Result<(), InferError> {
        if self.max_num_hands == 0 {
            return Err(InferError::Runtime(
                "max_num_hands must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("min_detection_confidence", self.min_detection_confidence),
            ("min_tracking_confidence", self.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(InferError::Runtime(format!(
                    "{} must be in [0.0, 1.0], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Two-stage hand landmark pipeline on ONNX Runtime.
///
/// A palm detector finds new hands; a landmark network then estimates 21 landmarks inside a
/// rotated region around each hand. In stream mode the landmarks of one frame give the regions
/// for the next, and palm detection only runs while fewer than `max_num_hands` are tracked.
pub struct HandLandmarker {
    palm_session: Session,
    landmark_session: Session,
    anchors: Vec<Anchor>,
    options: HandLandmarkerOptions,
    tracker: HandTracker,
}

impl HandLandmarker {
    pub fn new(
        palm_session: Session,
        landmark_session: Session,
        options: HandLandmarkerOptions,
    ) -> Result<Self, InferError> {
        options.validate()?;
        Ok(Self {
            palm_session,
            landmark_session,
            anchors: generate_anchors(),
            options,
            tracker: HandTracker::new(&options),
        })
    }

    pub fn options(&self) -> &HandLandmarkerOptions {
        &self.options
    }

    /// Number of hands carried over to the next frame.
    pub fn tracked_count(&self) -> usize {
        self.tracker.tracked().len()
    }

    fn detect_palms(&mut self, image: &Image) -> Result<Vec<PalmDetection>, InferError> {
        let (input, letterbox) = letterbox(image)?;
        let tensor = Tensor::from_array(([1usize, PALM_INPUT_SIZE, PALM_INPUT_SIZE, 3], input))?;
        let outputs = self.palm_session.run(ort::inputs![tensor])?;
        let tensors = (0..outputs.len())
            .map(|i| outputs[i].try_extract_tensor::<f32>().map(|(_, data)| data))
            .collect::<Result<Vec<_>, _>>()?;

        let (boxes, logits) = select_palm_outputs(&tensors, self.anchors.len())?;
        let detections = decode_palms(
            boxes,
            logits,
            &self.anchors,
            &letterbox,
            self.options.min_detection_confidence,
        )?;
        Ok(weighted_nms(detections, PALM_NMS_IOU))
    }

    /// Estimates landmarks inside `roi`. Returns `None` when the hand is no longer present.
    fn estimate_landmarks(
        &mut self,
        image: &Image,
        roi: &Roi,
    ) -> Result<Option<(HandLandmarks, Roi)>, InferError> {
        let input = roi.crop(image, LANDMARK_INPUT_SIZE);
        let tensor = Tensor::from_array((
            [1usize, LANDMARK_INPUT_SIZE, LANDMARK_INPUT_SIZE, 3],
            input,
        ))?;
        let outputs = self.landmark_session.run(ort::inputs![tensor])?;
        let tensors = (0..outputs.len())
            .map(|i| outputs[i].try_extract_tensor::<f32>().map(|(_, data)| data))
            .collect::<Result<Vec<_>, _>>()?;

        let landmark_outputs = select_landmark_outputs(&tensors)?;
        decode_landmarks(
            &landmark_outputs,
            roi,
            image.size,
            self.options.min_tracking_confidence,
        )
    }
}

impl HandDetector for HandLandmarker {
    fn input_format(&self) -> PixelFormat {
        PixelFormat::Rgb8
    }

    fn detect(&mut self, image: &Image) -> Result<Vec<HandLandmarks>, InferError> {
        ensure_rgb(image)?;

        let mut rois = self.tracker.take_regions();
        if self.tracker.needs_palms(&rois) {
            let palms = self.detect_palms(image)?;
            rois = self.tracker.merge_palms(rois, &palms);
        }

        let mut estimates = Vec::with_capacity(rois.len());
        for roi in &rois {
            if let Some(estimate) = self.estimate_landmarks(image, roi)? {
                estimates.push(estimate);
            }
        }

        let hands = self.tracker.finish_frame(estimates);
        base::log_debug!("Detected {} hand(s)", hands.len());
        Ok(hands)
    }

    fn reset(&mut self) {
        self.tracker.reset();
    }
}

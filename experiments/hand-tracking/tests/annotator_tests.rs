use {
    base::Vec2,
    hand_tracking::{AnnotateError, FrameAnnotator},
    image::{Image, PixelFormat},
    inference::{HAND_LANDMARK_COUNT, HandDetector, HandLandmarks, Handedness, InferError, Landmark},
};

/// Detector stub that reports fixed hands and records what it was given.
#[derive(Default)]
struct ScriptedDetector {
    hands: Vec<HandLandmarks>,
    fail: bool,
    seen: Vec<(PixelFormat, Vec2<usize>, [u8; 3])>,
    resets: usize,
}

impl HandDetector for ScriptedDetector {
    fn input_format(&self) -> PixelFormat {
        PixelFormat::Rgb8
    }

    fn detect(&mut self, image: &Image) -> Result<Vec<HandLandmarks>, InferError> {
        self.seen.push((image.format, image.size, image.pixel(0, 0)));
        if self.fail {
            return Err(InferError::Runtime("model exploded".to_string()));
        }
        Ok(self.hands.clone())
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

fn hand_at(x: f32, y: f32) -> HandLandmarks {
    HandLandmarks {
        landmarks: [Landmark::new(x, y, 0.0); HAND_LANDMARK_COUNT],
        handedness: Handedness::Right,
        handedness_score: 0.9,
        presence: 0.95,
    }
}

fn black_frame(format: PixelFormat) -> Image {
    Image::filled(Vec2::new(640, 480), format, [0, 0, 0])
}

#[test]
fn test_absent_frame_gives_absent_result() {
    let mut annotator = FrameAnnotator::new(ScriptedDetector::default());
    let result = annotator.annotate(None).unwrap();
    assert!(result.is_none());
    assert!(annotator.detector().seen.is_empty());
}

#[test]
fn test_frame_without_hands_is_unchanged() {
    let mut annotator = FrameAnnotator::new(ScriptedDetector::default());
    let frame = black_frame(PixelFormat::Rgb8);

    let annotated = annotator.annotate(Some(&frame)).unwrap().unwrap();

    assert_eq!(annotated, frame);
    assert_eq!(annotated.size, Vec2::new(640, 480));
    assert_eq!(annotated.channels(), 3);
}

#[test]
fn test_one_hand_draws_markers() {
    let detector = ScriptedDetector {
        hands: vec![hand_at(0.5, 0.5)],
        ..Default::default()
    };
    let mut annotator = FrameAnnotator::new(detector);
    let frame = black_frame(PixelFormat::Rgb8);

    let annotated = annotator.annotate(Some(&frame)).unwrap().unwrap();

    assert_eq!(annotated.size, frame.size);
    assert_eq!(annotated.format, PixelFormat::Rgb8);
    assert_ne!(annotated, frame);
    // all landmarks sit on (320, 240)
    assert_eq!(annotated.pixel_rgb(320, 240), [0, 255, 0], "connection");
    assert_eq!(annotated.pixel_rgb(324, 240), [255, 0, 0], "marker");
    assert_eq!(annotated.pixel_rgb(326, 240), [224, 224, 224], "border");
    assert_eq!(annotated.pixel_rgb(330, 240), [0, 0, 0]);
    assert_eq!(annotated.pixel_rgb(0, 0), [0, 0, 0]);
}

#[test]
fn test_input_frame_is_not_modified() {
    let detector = ScriptedDetector {
        hands: vec![hand_at(0.25, 0.75)],
        ..Default::default()
    };
    let mut annotator = FrameAnnotator::new(detector);
    let frame = black_frame(PixelFormat::Rgb8);
    let before = frame.clone();

    let _ = annotator.annotate(Some(&frame)).unwrap();

    assert_eq!(frame, before);
}

#[test]
fn test_bgr_frame_is_converted_for_detector() {
    let detector = ScriptedDetector {
        hands: vec![hand_at(0.5, 0.5)],
        ..Default::default()
    };
    let mut annotator = FrameAnnotator::new(detector);
    let frame = Image::filled(Vec2::new(64, 48), PixelFormat::Bgr8, [10, 20, 30]);

    let annotated = annotator.annotate(Some(&frame)).unwrap().unwrap();

    let (format, size, first) = annotator.detector().seen[0];
    assert_eq!(format, PixelFormat::Rgb8);
    assert_eq!(size, Vec2::new(64, 48));
    assert_eq!(first, [10, 20, 30]);

    // output stays in the frame's own channel order
    assert_eq!(annotated.format, PixelFormat::Bgr8);
    assert_eq!(annotated.pixel(0, 0), [30, 20, 10]);
    assert_eq!(annotated.pixel(36, 24), [0, 0, 255]);
}

#[test]
fn test_frames_reach_detector_in_order() {
    let mut annotator = FrameAnnotator::new(ScriptedDetector::default());
    for shade in [10u8, 20, 30] {
        let frame = Image::filled(Vec2::new(8, 8), PixelFormat::Rgb8, [shade, 0, 0]);
        annotator.annotate(Some(&frame)).unwrap();
    }
    let shades: Vec<u8> = annotator.detector().seen.iter().map(|s| s.2[0]).collect();
    assert_eq!(shades, vec![10, 20, 30]);
}

#[test]
fn test_out_of_frame_hand_draws_nothing() {
    let detector = ScriptedDetector {
        hands: vec![hand_at(1.5, -0.2)],
        ..Default::default()
    };
    let mut annotator = FrameAnnotator::new(detector);
    let frame = black_frame(PixelFormat::Rgb8);

    let annotated = annotator.annotate(Some(&frame)).unwrap().unwrap();

    assert_eq!(annotated, frame);
}

#[test]
fn test_detector_error_propagates() {
    let detector = ScriptedDetector {
        fail: true,
        ..Default::default()
    };
    let mut annotator = FrameAnnotator::new(detector);
    let frame = black_frame(PixelFormat::Rgb8);

    let err = annotator.annotate(Some(&frame)).unwrap_err();
    assert!(matches!(err, AnnotateError::Detect(_)));
    assert!(err.to_string().contains("model exploded"));
}

#[test]
fn test_malformed_frame_is_rejected() {
    let mut annotator = FrameAnnotator::new(ScriptedDetector::default());
    let frame = Image::new(Vec2::new(4, 4), vec![0u8; 10], PixelFormat::Rgb8);

    let err = annotator.annotate(Some(&frame)).unwrap_err();
    assert!(matches!(err, AnnotateError::Image(_)));
    assert!(annotator.detector().seen.is_empty());
}

#[test]
fn test_reset_reaches_detector() {
    let mut annotator = FrameAnnotator::new(ScriptedDetector::default());
    annotator.reset();
    annotator.reset();
    assert_eq!(annotator.detector().resets, 2);
}

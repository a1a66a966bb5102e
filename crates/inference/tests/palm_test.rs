use {
    base::{Rect, Vec2},
    image::{Image, PixelFormat},
    inference::{
        InferError, LetterboxInfo, PALM_INPUT_SIZE, PalmDetection, decode_palms,
        generate_anchors, iou, letterbox, select_palm_outputs, weighted_nms,
    },
};

const EPS: f32 = 1e-4;

fn palm(x: f32, y: f32, size: f32, score: f32) -> PalmDetection {
    PalmDetection {
        rect: Rect::new(Vec2::new(x, y), Vec2::new(size, size)),
        score,
        keypoints: [Vec2::new(x, y); 7],
    }
}

#[test]
fn test_anchor_count() {
    let anchors = generate_anchors();
    assert_eq!(anchors.len(), 2016);
}

#[test]
fn test_anchor_layout() {
    let anchors = generate_anchors();

    // 24x24 map with 2 anchors per cell comes first
    assert!((anchors[0].center.x - 0.5 / 24.0).abs() < EPS);
    assert!((anchors[0].center.y - 0.5 / 24.0).abs() < EPS);
    assert_eq!(anchors[0], anchors[1]);
    assert!((anchors[2].center.x - 1.5 / 24.0).abs() < EPS);

    // then the 12x12 map with 6 anchors per cell
    let first_coarse = 24 * 24 * 2;
    assert!((anchors[first_coarse].center.x - 0.5 / 12.0).abs() < EPS);
    assert_eq!(anchors[first_coarse], anchors[first_coarse + 5]);
    assert!((anchors[first_coarse + 6].center.x - 1.5 / 12.0).abs() < EPS);

    let last = anchors[anchors.len() - 1];
    assert!((last.center.x - 11.5 / 12.0).abs() < EPS);
    assert!((last.center.y - 11.5 / 12.0).abs() < EPS);
}

#[test]
fn test_letterbox_landscape_frame() {
    let image = Image::filled(Vec2::new(640, 480), PixelFormat::Rgb8, [255, 255, 255]);
    let (data, info) = letterbox(&image).unwrap();

    assert_eq!(data.len(), PALM_INPUT_SIZE * PALM_INPUT_SIZE * 3);
    assert!((info.scale - 0.3).abs() < EPS);
    assert!(info.pad.x.abs() < EPS);
    assert!((info.pad.y - 24.0).abs() < EPS);

    // padding rows are black, content is white
    let top = 0;
    let middle = (96 * PALM_INPUT_SIZE + 96) * 3;
    assert_eq!(data[top], 0.0);
    assert!((data[middle] - 1.0).abs() < EPS);
}

#[test]
fn test_letterbox_rejects_bgr() {
    let image = Image::filled(Vec2::new(8, 8), PixelFormat::Bgr8, [0, 0, 0]);
    assert!(matches!(letterbox(&image), Err(InferError::Shape(_))));
}

#[test]
fn test_letterbox_to_frame() {
    let info = LetterboxInfo {
        scale: 0.3,
        pad: Vec2::new(0.0, 24.0),
    };
    let p = info.to_frame(Vec2::new(0.5, 0.5));
    assert!((p.x - 320.0).abs() < 1e-2);
    assert!((p.y - 240.0).abs() < 1e-2);
}

#[test]
fn test_decode_palms_threshold_and_geometry() {
    let anchors = generate_anchors();
    let n = anchors.len();
    let mut boxes = vec![0.0; n * 18];
    let mut logits = vec![-10.0; n];

    // anchor 0 centred at (4, 4) in input pixels; regress a 48x48 box shifted by (+10, +20)
    logits[0] = 5.0;
    boxes[0] = 10.0;
    boxes[1] = 20.0;
    boxes[2] = 48.0;
    boxes[3] = 48.0;
    // keypoint 2 above keypoint 0
    boxes[4] = 0.0;
    boxes[5] = 30.0;
    boxes[8] = 0.0;
    boxes[9] = 0.0;

    let info = LetterboxInfo {
        scale: 1.0,
        pad: Vec2::zero(),
    };
    let palms = decode_palms(&boxes, &logits, &anchors, &info, 0.7).unwrap();

    assert_eq!(palms.len(), 1);
    let palm = palms[0];
    assert!(palm.score > 0.99);
    let center = palm.rect.center();
    assert!((center.x - 14.0).abs() < 1e-3);
    assert!((center.y - 24.0).abs() < 1e-3);
    assert!((palm.rect.size.x - 48.0).abs() < 1e-3);
    assert!((palm.keypoints[0].y - 34.0).abs() < 1e-3);
    assert!((palm.keypoints[2].y - 4.0).abs() < 1e-3);
}

#[test]
fn test_decode_palms_clamps_extreme_logits() {
    let anchors = generate_anchors();
    let n = anchors.len();
    let boxes = vec![0.0; n * 18];
    let mut logits = vec![-1e9; n];
    logits[7] = 1e9;

    let info = LetterboxInfo {
        scale: 1.0,
        pad: Vec2::zero(),
    };
    let palms = decode_palms(&boxes, &logits, &anchors, &info, 0.5).unwrap();
    assert_eq!(palms.len(), 1);
    assert!(palms[0].score.is_finite());
}

#[test]
fn test_decode_palms_shape_mismatch() {
    let anchors = generate_anchors();
    let info = LetterboxInfo {
        scale: 1.0,
        pad: Vec2::zero(),
    };
    let result = decode_palms(&[0.0; 18], &[0.0], &anchors, &info, 0.5);
    assert!(matches!(result, Err(InferError::Shape(_))));
}

#[test]
fn test_select_palm_outputs_in_any_order() {
    let boxes = vec![0.5f32; 4 * 18];
    let logits = vec![1.0f32; 4];

    let (b, l) = select_palm_outputs(&[logits.as_slice(), boxes.as_slice()], 4).unwrap();
    assert_eq!(b.len(), 72);
    assert_eq!(l.len(), 4);

    let (b, l) = select_palm_outputs(&[boxes.as_slice(), logits.as_slice()], 4).unwrap();
    assert_eq!(b.len(), 72);
    assert_eq!(l.len(), 4);
}

#[test]
fn test_select_palm_outputs_wrong_model() {
    let boxes = vec![0.5f32; 4 * 16];
    let logits = vec![1.0f32; 4];

    let result = select_palm_outputs(&[boxes.as_slice(), logits.as_slice()], 4);
    assert!(matches!(result, Err(InferError::Shape(_))));
}

#[test]
fn test_iou_identical_and_disjoint() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let b = Rect::new(Vec2::new(20.0, 20.0), Vec2::new(10.0, 10.0));
    assert!((iou(&a, &a) - 1.0).abs() < EPS);
    assert_eq!(iou(&a, &b), 0.0);
}

#[test]
fn test_iou_half_overlap() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let b = Rect::new(Vec2::new(5.0, 0.0), Vec2::new(10.0, 10.0));
    // 50 / 150
    assert!((iou(&a, &b) - 1.0 / 3.0).abs() < EPS);
}

#[test]
fn test_iou_zero_area() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0));
    assert_eq!(iou(&a, &a), 0.0);
}

#[test]
fn test_weighted_nms_merges_overlaps() {
    let detections = vec![
        palm(0.0, 0.0, 10.0, 0.6),
        palm(100.0, 100.0, 10.0, 0.8),
        palm(2.0, 0.0, 10.0, 0.9),
    ];

    let kept = weighted_nms(detections, 0.3);

    assert_eq!(kept.len(), 2);
    // best first, score kept from the strongest member
    assert!((kept[0].score - 0.9).abs() < EPS);
    // origin is the score-weighted mean: (2 * 0.9 + 0 * 0.6) / 1.5
    assert!((kept[0].rect.origin.x - 1.2).abs() < EPS);
    assert!((kept[1].score - 0.8).abs() < EPS);
    assert_eq!(kept[1].rect.origin, Vec2::new(100.0, 100.0));
}

#[test]
fn test_weighted_nms_keeps_empty_boxes() {
    let detections = vec![palm(0.0, 0.0, 0.0, 0.9), palm(0.0, 0.0, 0.0, 0.8)];
    let kept = weighted_nms(detections, 0.3);
    assert_eq!(kept.len(), 2);
}

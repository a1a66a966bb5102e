use {
    base::Level,
    hand_tracking::{Config, ConfigError},
    std::{collections::HashMap, path::PathBuf},
};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.http_addr, "127.0.0.1:7860");
    assert_eq!(config.ws_addr, "127.0.0.1:7861");
    assert_eq!(config.jpeg_quality, 80);
    assert_eq!(config.landmarker.max_num_hands, 2);
    assert!(!config.landmarker.static_image_mode);
    assert_eq!(config.log_level, Level::Info);
    assert!(config.log_dir.is_none());
}

#[test]
fn test_overrides() {
    let config = Config::from_lookup(lookup(&[
        ("HAND_HTTP_ADDR", "0.0.0.0:8080"),
        ("HAND_WS_ADDR", "0.0.0.0:8081"),
        ("HAND_PALM_MODEL", "/models/palm.onnx"),
        ("HAND_LANDMARK_MODEL", "/models/hand.onnx"),
        ("HAND_JPEG_QUALITY", "95"),
        ("HAND_MAX_HANDS", "1"),
        ("HAND_MIN_DETECTION_CONFIDENCE", "0.6"),
        ("HAND_MIN_TRACKING_CONFIDENCE", " 0.4 "),
        ("HAND_STATIC_IMAGE_MODE", "true"),
        ("HAND_LOG_DIR", "/var/log/hands"),
        ("HAND_LOG_LEVEL", "debug"),
    ]))
    .unwrap();

    assert_eq!(config.http_addr, "0.0.0.0:8080");
    assert_eq!(config.ws_addr, "0.0.0.0:8081");
    assert_eq!(config.palm_model, PathBuf::from("/models/palm.onnx"));
    assert_eq!(config.landmark_model, PathBuf::from("/models/hand.onnx"));
    assert_eq!(config.jpeg_quality, 95);
    assert_eq!(config.landmarker.max_num_hands, 1);
    assert_eq!(config.landmarker.min_detection_confidence, 0.6);
    assert_eq!(config.landmarker.min_tracking_confidence, 0.4);
    assert!(config.landmarker.static_image_mode);
    assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/hands")));
    assert_eq!(config.log_level, Level::Debug);
}

#[test]
fn test_empty_values_use_defaults() {
    let config = Config::from_lookup(lookup(&[("HAND_JPEG_QUALITY", ""), ("HAND_LOG_DIR", "  ")])).unwrap();
    assert_eq!(config.jpeg_quality, 80);
    assert!(config.log_dir.is_none());
}

#[test]
fn test_invalid_number() {
    let err = Config::from_lookup(lookup(&[("HAND_MAX_HANDS", "two")])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Invalid {
            key: "HAND_MAX_HANDS",
            value: "two".to_string()
        }
    );
    assert!(err.to_string().contains("HAND_MAX_HANDS"));
}

#[test]
fn test_out_of_range_values() {
    for (key, value) in [
        ("HAND_JPEG_QUALITY", "0"),
        ("HAND_MAX_HANDS", "0"),
        ("HAND_MIN_DETECTION_CONFIDENCE", "1.5"),
        ("HAND_MIN_TRACKING_CONFIDENCE", "-0.1"),
    ] {
        let err = Config::from_lookup(lookup(&[(key, value)])).unwrap_err();
        assert!(
            matches!(err, ConfigError::OutOfRange { key: k, .. } if k == key),
            "{} = {} should be out of range, got {:?}",
            key,
            value,
            err
        );
    }
}

#[test]
fn test_jpeg_quality_overflow_is_invalid() {
    let err = Config::from_lookup(lookup(&[("HAND_JPEG_QUALITY", "300")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn test_invalid_log_level() {
    let err = Config::from_lookup(lookup(&[("HAND_LOG_LEVEL", "verbose")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "HAND_LOG_LEVEL", .. }));
}

#[test]
fn test_invalid_static_image_mode() {
    let err = Config::from_lookup(lookup(&[("HAND_STATIC_IMAGE_MODE", "maybe")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "HAND_STATIC_IMAGE_MODE", .. }));
}

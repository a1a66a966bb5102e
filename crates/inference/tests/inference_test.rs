use inference::{HandLandmarkerOptions, InferError, Inference};

#[test]
fn test_onnx_session_nonexistent_file() {
    let inference = Inference::cpu();
    let result = inference.onnx_session("nonexistent.onnx");
    match result {
        Err(InferError::Io(msg)) => {
            assert!(
                msg.to_lowercase().contains("not found"),
                "Expected error message about file not found, got: {}",
                msg
            );
        }
        Err(other) => panic!("Expected InferError::Io, got {}", other),
        Ok(_) => panic!("Expected an error for a missing model"),
    }
}

#[test]
fn test_onnx_session_multiple_calls_no_panic() {
    let inference = Inference::cpu();
    // Calling onnx_session multiple times should not panic (OnceLock ensures single init)
    let _result1 = inference.onnx_session("fake1.onnx");
    let _result2 = inference.onnx_session("fake2.onnx");
}

#[test]
fn test_use_hand_landmarker_missing_models() {
    let inference = Inference::cpu();
    let result = inference.use_hand_landmarker(
        "fake_palm.onnx",
        "fake_landmark.onnx",
        HandLandmarkerOptions::default(),
    );
    assert!(matches!(result, Err(InferError::Io(_))));
}

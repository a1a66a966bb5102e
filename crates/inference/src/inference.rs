use {
    crate::{HandLandmarker, HandLandmarkerOptions, InferError},
    ort::session::Session,
    std::{path::Path, sync::OnceLock},
};

static ORT_INIT: OnceLock<()> = OnceLock::new();

fn ensure_ort_init() {
    ORT_INIT.get_or_init(|| {
        let _ = ort::init().commit();
    });
}

#[derive(Debug)]
enum OnnxDevice {
    Cpu,
    #[allow(dead_code)]
    Cuda(usize),
}

#[derive(Debug)]
pub struct Inference {
    onnx_device: OnnxDevice,
}

impl Inference {
    pub fn cpu() -> Self {
        ensure_ort_init();
        base::log_info!("Inference device: CPU");
        Self {
            onnx_device: OnnxDevice::Cpu,
        }
    }

    #[cfg(feature = "cuda")]
    pub fn cuda(ordinal: usize) -> Self {
        ensure_ort_init();
        base::log_info!("Inference device: CUDA (ordinal {})", ordinal);
        Self {
            onnx_device: OnnxDevice::Cuda(ordinal),
        }
    }

    pub fn onnx_session(&self, model_path: impl AsRef<Path>) -> Result<Session, InferError> {
        let path = model_path.as_ref();
        if !path.is_file() {
            return Err(InferError::Io(format!(
                "model file not found: {}",
                path.display()
            )));
        }
        let session = match &self.onnx_device {
            OnnxDevice::Cpu => Session::builder()?
                .with_execution_providers([
                    ort::execution_providers::CPUExecutionProvider::default().build(),
                ])?
                .commit_from_file(path)?,
            #[cfg(feature = "cuda")]
            OnnxDevice::Cuda(ordinal) => Session::builder()?
                .with_execution_providers([
                    ort::execution_providers::CUDAExecutionProvider::default()
                        .with_device_id(*ordinal as i32)
                        .build(),
                    ort::execution_providers::CPUExecutionProvider::default().build(),
                ])?
                .commit_from_file(path)?,
            #[cfg(not(feature = "cuda"))]
            OnnxDevice::Cuda(_) => {
                return Err(InferError::Runtime("CUDA feature not enabled".to_string()));
            }
        };
        base::log_debug!("Loaded ONNX model {}", path.display());
        Ok(session)
    }

    /// Loads the palm detection and hand landmark networks into a stream tracker.
    pub fn use_hand_landmarker(
        &self,
        palm_model_path: impl AsRef<Path>,
        landmark_model_path: impl AsRef<Path>,
        options: HandLandmarkerOptions,
    ) -> Result<HandLandmarker, InferError> {
        let palm_session = self.onnx_session(palm_model_path)?;
        let landmark_session = self.onnx_session(landmark_model_path)?;
        HandLandmarker::new(palm_session, landmark_session, options)
    }
}

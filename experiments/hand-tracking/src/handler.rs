use {
    crate::{AnnotateError, FrameAnnotator},
    com::StreamHandler,
    inference::HandDetector,
};

/// Turns JPEG frames from the viewer into annotated JPEG frames.
///
/// An empty payload means the camera has no frame yet and yields an empty reply.
pub struct FrameHandler<D> {
    annotator: FrameAnnotator<D>,
    jpeg_quality: u8,
}

impl<D: HandDetector> FrameHandler<D> {
    pub fn new(annotator: FrameAnnotator<D>, jpeg_quality: u8) -> Self {
        Self {
            annotator,
            jpeg_quality,
        }
    }

    pub fn annotator(&self) -> &FrameAnnotator<D> {
        &self.annotator
    }
}

impl<D: HandDetector + 'static> StreamHandler for FrameHandler<D> {
    type Error = AnnotateError;

    fn begin(&mut self) {
        self.annotator.reset();
    }

    fn process(&mut self, payload: &[u8]) -> Result<Vec<u8>, AnnotateError> {
        let frame = if payload.is_empty() {
            None
        } else {
            Some(image::decode_jpeg(payload)?)
        };
        match self.annotator.annotate(frame.as_ref())? {
            Some(annotated) => Ok(image::encode_jpeg(&annotated, self.jpeg_quality)?),
            None => Ok(Vec::new()),
        }
    }
}

use {
    crate::{CONNECTION_STYLE, LANDMARK_STYLE, draw_landmarks},
    image::{Image, ImageError},
    inference::{HandDetector, InferError},
    std::fmt,
};

#[derive(Debug)]
pub enum AnnotateError {
    Image(ImageError),
    Detect(InferError),
}

impl fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotateError::Image(err) => write!(f, "frame error: {err}"),
            AnnotateError::Detect(err) => write!(f, "hand detection failed: {err}"),
        }
    }
}

impl std::error::Error for AnnotateError {}

impl From<ImageError> for AnnotateError {
    fn from(err: ImageError) -> Self {
        AnnotateError::Image(err)
    }
}

impl From<InferError> for AnnotateError {
    fn from(err: InferError) -> Self {
        AnnotateError::Detect(err)
    }
}

/// Draws detected hand landmarks onto camera frames.
///
/// The annotator owns its detector. Frames of one stream must be annotated in capture order,
/// since the detector tracks hands from one frame to the next.
pub struct FrameAnnotator<D> {
    detector: D,
}

impl<D: HandDetector> FrameAnnotator<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Starts a new stream.
    pub fn reset(&mut self) {
        self.detector.reset();
    }

    /// Returns a copy of `frame` with all detected hands drawn on it, in the frame's own
    /// channel order. `None` in gives `None` out: there is nothing to display yet.
    pub fn annotate(&mut self, frame: Option<&Image>) -> Result<Option<Image>, AnnotateError> {
        let Some(frame) = frame else {
            return Ok(None);
        };
        frame.validate()?;

        let mut annotated = frame.clone();
        let converted = image::convert(frame, self.detector.input_format())?;
        let hands = self.detector.detect(&converted)?;

        for hand in &hands {
            draw_landmarks(&mut annotated, hand, &LANDMARK_STYLE, &CONNECTION_STYLE);
        }
        Ok(Some(annotated))
    }
}

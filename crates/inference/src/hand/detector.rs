use {
    crate::{HandLandmarks, InferError},
    image::{Image, PixelFormat},
};

/// A stateful hand landmark detector fed with consecutive frames of one stream.
///
/// Implementations may keep tracking state between calls, so frames must be passed in
/// capture order. `&mut self` keeps one instance confined to one stream.
pub trait HandDetector: Send {
    /// Channel order `detect` expects.
    fn input_format(&self) -> PixelFormat;

    /// Detects hands in `image`, which must be in [`Self::input_format`].
    fn detect(&mut self, image: &Image) -> Result<Vec<HandLandmarks>, InferError>;

    /// Forgets any tracking state, so the next frame starts a new stream.
    fn reset(&mut self);
}

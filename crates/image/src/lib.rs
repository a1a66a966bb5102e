//! Frame buffers for the hand tracking pipeline.
//!
//! Raster images are packed 8-bit, 3 channels, HWC layout (`[height, width, 3]`), with the
//! channel order carried in [`PixelFormat`]. JPEG is the wire format between the browser
//! viewer and the server.

pub mod convert;
pub mod draw;
pub mod error;
pub mod image;
pub mod jpeg;
pub mod pixelformat;

pub use convert::*;
pub use draw::*;
pub use error::ImageError;
pub use image::Image;
pub use jpeg::*;
pub use pixelformat::*;

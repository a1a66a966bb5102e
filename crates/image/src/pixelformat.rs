#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Packed 8-bit red, green, blue.
    Rgb8,
    /// Packed 8-bit blue, green, red (the OpenCV default).
    Bgr8,
    /// Compressed JPEG bytestream.
    Jpeg,
}

impl PixelFormat {
    /// Bytes per pixel of raster formats, `None` for compressed ones.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => Some(3),
            PixelFormat::Jpeg => None,
        }
    }

    pub fn is_raster(&self) -> bool {
        self.bytes_per_pixel().is_some()
    }

    /// Reorders an RGB color into this format's channel order.
    pub fn store_rgb(&self, rgb: [u8; 3]) -> [u8; 3] {
        match self {
            PixelFormat::Bgr8 => [rgb[2], rgb[1], rgb[0]],
            _ => rgb,
        }
    }
}

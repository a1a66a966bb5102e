use {crate::*, base::Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl Image {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self { size, data, format }
    }

    /// Raster image with every pixel set to `rgb`.
    pub fn filled(size: Vec2<usize>, format: PixelFormat, rgb: [u8; 3]) -> Self {
        let pixel = format.store_rgb(rgb);
        let count = size.x * size.y;
        let mut data = Vec::with_capacity(count * 3);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self { size, data, format }
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    /// Channel count of raster images, 0 for compressed ones.
    pub fn channels(&self) -> usize {
        self.format.bytes_per_pixel().unwrap_or(0)
    }

    /// Checks that a raster image's buffer matches its declared size.
    pub fn validate(&self) -> Result<(), ImageError> {
        let bpp = self.format.bytes_per_pixel().ok_or_else(|| {
            ImageError::Format(format!("{:?} is not a raster format", self.format))
        })?;
        let expected = self.size.x * self.size.y * bpp;
        if self.data.len() != expected {
            return Err(ImageError::Size {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    /// Pixel at `(x, y)` as stored, in the image's own channel order.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.size.x + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Pixel at `(x, y)` in RGB order regardless of storage order.
    pub fn pixel_rgb(&self, x: usize, y: usize) -> [u8; 3] {
        // the channel swap is its own inverse
        self.format.store_rgb(self.pixel(x, y))
    }
}

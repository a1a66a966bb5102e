use {crate::*, base::Vec2, crates_image::ImageEncoder};

pub fn rgb_to_jpeg(size: Vec2<usize>, data: &[u8], quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            data,
            size.x as u32,
            size.y as u32,
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Encodes a raster image as JPEG. `quality` ranges 1-100, higher is better.
pub fn encode_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    if image.format == PixelFormat::Jpeg {
        return Ok(image.data.clone());
    }
    image.validate()?;
    match image.format {
        PixelFormat::Bgr8 => {
            let rgb = bgr_to_rgb(image.size, &image.data);
            rgb_to_jpeg(image.size, &rgb, quality)
        }
        _ => rgb_to_jpeg(image.size, &image.data, quality),
    }
}

/// Decodes a JPEG (or any format the `image` crate sniffs) into an `Rgb8` image.
pub fn decode_jpeg(data: &[u8]) -> Result<Image, ImageError> {
    let decoded = crates_image::load_from_memory(data)
        .map_err(|e| ImageError::Decode(format!("failed to decode JPEG: {}", e)))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Image::new(
        Vec2::new(width as usize, height as usize),
        rgb.into_raw(),
        PixelFormat::Rgb8,
    ))
}

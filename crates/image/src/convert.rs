use {crate::*, base::Vec2};

/// Swaps the first and third channel of every pixel. Converts RGB to BGR and back.
pub fn swap_red_blue(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(size.x * size.y * 3);
    for chunk in data.chunks_exact(3) {
        out.extend_from_slice(&[chunk[2], chunk[1], chunk[0]]);
    }
    out
}

pub fn bgr_to_rgb(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    swap_red_blue(size, data)
}

/// Returns a new raster image in `target` channel order. `image` is left untouched.
///
/// JPEG input is decoded first. Converting to the format the image already has
/// returns a plain copy.
pub fn convert(image: &Image, target: PixelFormat) -> Result<Image, ImageError> {
    if !target.is_raster() {
        return Err(ImageError::Format(format!(
            "cannot convert to {:?}, use encode_jpeg",
            target
        )));
    }
    let decoded;
    let image = if image.format == PixelFormat::Jpeg {
        decoded = decode_jpeg(&image.data)?;
        &decoded
    } else {
        image.validate()?;
        image
    };
    let data = if image.format == target {
        image.data.clone()
    } else {
        swap_red_blue(image.size, &image.data)
    };
    Ok(Image::new(image.size, data, target))
}

use base::Vec2;
use image::{Image, ImageError, PixelFormat};

#[test]
fn test_image_new_rgb8() {
    let size = Vec2::new(2, 3);
    let data: Vec<u8> = (0..18).collect(); // 2*3*3 = 18 bytes
    let image = Image::new(size, data.clone(), PixelFormat::Rgb8);

    assert_eq!(image.size, size);
    assert_eq!(image.data, data);
    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 3);
    assert_eq!(image.channels(), 3);
    assert!(image.validate().is_ok());
}

#[test]
fn test_image_validate_rejects_short_buffer() {
    let image = Image::new(Vec2::new(4, 4), vec![0u8; 47], PixelFormat::Bgr8);
    match image.validate() {
        Err(ImageError::Size { expected, got }) => {
            assert_eq!(expected, 48);
            assert_eq!(got, 47);
        }
        other => panic!("Expected ImageError::Size, got {:?}", other),
    }
}

#[test]
fn test_image_validate_rejects_jpeg() {
    let image = Image::new(Vec2::new(10, 10), vec![0xFF, 0xD8], PixelFormat::Jpeg);
    assert_eq!(image.channels(), 0);
    assert!(matches!(image.validate(), Err(ImageError::Format(_))));
}

#[test]
fn test_image_filled_respects_channel_order() {
    let rgb = Image::filled(Vec2::new(2, 2), PixelFormat::Rgb8, [10, 20, 30]);
    let bgr = Image::filled(Vec2::new(2, 2), PixelFormat::Bgr8, [10, 20, 30]);

    assert_eq!(rgb.pixel(1, 1), [10, 20, 30]);
    assert_eq!(bgr.pixel(1, 1), [30, 20, 10]);
    assert_eq!(bgr.pixel_rgb(1, 1), [10, 20, 30]);
    assert_eq!(bgr.data.len(), 12);
}

#[test]
fn test_pixel_format_layout() {
    assert_eq!(PixelFormat::Rgb8.bytes_per_pixel(), Some(3));
    assert_eq!(PixelFormat::Bgr8.bytes_per_pixel(), Some(3));
    assert!(!PixelFormat::Jpeg.is_raster());
    assert_eq!(PixelFormat::Bgr8.store_rgb([1, 2, 3]), [3, 2, 1]);
    assert_eq!(PixelFormat::Rgb8.store_rgb([1, 2, 3]), [1, 2, 3]);
}

#[test]
fn test_image_error_from_image_error() {
    let img_err = crates_image::ImageError::Unsupported(
        crates_image::error::UnsupportedError::from_format_and_kind(
            crates_image::error::ImageFormatHint::Unknown,
            crates_image::error::UnsupportedErrorKind::Format(
                crates_image::error::ImageFormatHint::Unknown,
            ),
        ),
    );

    let err: ImageError = img_err.into();
    let err_str = format!("{}", err);
    assert!(err_str.contains("decode error"));
}

#[test]
fn test_image_error_display() {
    let err = ImageError::Decode("test error".to_string());
    assert_eq!(format!("{}", err), "decode error: test error");

    let err = ImageError::Encode("encode failed".to_string());
    assert_eq!(format!("{}", err), "encode error: encode failed");

    let err = ImageError::Size {
        expected: 12,
        got: 3,
    };
    assert_eq!(format!("{}", err), "size error: expected 12 bytes, got 3");
}

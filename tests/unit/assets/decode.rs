use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let src = decode_image(&png_bytes(img)).unwrap();
    assert_eq!((src.width(), src.height()), (1, 1));
    assert_eq!(src.rgba8(), &[100, 50, 200, 128]);
    assert_eq!(src.pixel(0, 0), Some([100, 50, 200, 128]));
    assert_eq!(src.pixel(1, 0), None);
}

#[test]
fn decode_rgb_jpeg_like_input_becomes_opaque_rgba() {
    let rgb = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let src = decode_image(&buf).unwrap();
    assert_eq!(src.size(), ImageSize::new(3, 2));
    assert!(src.rgba8().chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
}

#[test]
fn garbage_bytes_are_a_decode_failure() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, SignetError::Decode(_)));

    let err = decode_image(&[]).unwrap_err();
    assert!(matches!(err, SignetError::Decode(_)));
}

#[test]
fn from_rgba8_validates_shape() {
    assert!(SourceImage::from_rgba8(0, 1, vec![]).is_err());
    assert!(SourceImage::from_rgba8(2, 1, vec![0; 7]).is_err());
    assert!(SourceImage::from_rgba8(2, 1, vec![0; 8]).is_ok());
}

#[test]
fn async_decode_resolves_and_rejects() {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
    let ok = pollster::block_on(decode_image_async(png_bytes(img))).unwrap();
    assert_eq!(ok.size(), ImageSize::new(4, 4));

    let err = pollster::block_on(decode_image_async(vec![0xde, 0xad])).unwrap_err();
    assert!(matches!(err, SignetError::Decode(_)));
}

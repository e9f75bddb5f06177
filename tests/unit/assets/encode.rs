use super::*;

#[test]
fn png_output_decodes_to_identical_pixels() {
    let data: Vec<u8> = (0..3 * 2 * 4).map(|i| (i * 11) as u8).collect();
    let img = RenderedImage {
        width: 3,
        height: 2,
        data: data.clone(),
    };

    let png = img.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (3, 2));
    assert_eq!(back.into_raw(), data);
}

#[test]
fn mismatched_buffer_is_an_encode_failure() {
    let img = RenderedImage {
        width: 2,
        height: 2,
        data: vec![0; 5],
    };
    assert!(matches!(img.encode_png(), Err(SignetError::Encode(_))));
}

#[test]
fn pixel_lookup() {
    let img = RenderedImage {
        width: 1,
        height: 2,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
    };
    assert_eq!(img.pixel(0, 1), Some([5, 6, 7, 8]));
    assert_eq!(img.pixel(0, 2), None);
}

use serde_json::json;

use super::*;

#[test]
fn parses_product_presets() {
    assert_eq!(parse_color("#ffffff").unwrap(), Rgba8::WHITE);
    assert_eq!(parse_color("#111111").unwrap(), Rgba8::rgb(0x11, 0x11, 0x11));
    assert_eq!(parse_color("#FF4DA6").unwrap(), Rgba8::rgb(0xff, 0x4d, 0xa6));
    assert_eq!(parse_color("4dc3ff").unwrap(), Rgba8::rgb(0x4d, 0xc3, 0xff));
}

#[test]
fn parses_short_and_alpha_hex() {
    assert_eq!(parse_color("#f0a").unwrap(), Rgba8::rgb(0xff, 0x00, 0xaa));
    assert_eq!(
        parse_color("#3fe0c580").unwrap(),
        Rgba8::rgba(0x3f, 0xe0, 0xc5, 0x80)
    );
}

#[test]
fn parses_named_colors_case_insensitively() {
    assert_eq!(parse_color("White").unwrap(), Rgba8::WHITE);
    assert_eq!(parse_color(" black ").unwrap(), Rgba8::BLACK);
    assert_eq!(parse_color("transparent").unwrap().a, 0);
}

#[test]
fn rejects_garbage() {
    assert!(parse_color("#12").is_err());
    assert!(parse_color("#gggggg").is_err());
    assert!(parse_color("chartreuse-ish").is_err());
    assert!(parse_color("#ｆｆｆ").is_err());
}

#[test]
fn deserializes_string_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 0, 0));

    let c: Rgba8 = serde_json::from_value(json!({"r": 0.0, "g": 1.0, "b": 0.0, "a": 0.5})).unwrap();
    assert_eq!(c, Rgba8::rgba(0, 255, 0, 128));

    let c: Rgba8 = serde_json::from_value(json!([0.0, 0.0, 1.0])).unwrap();
    assert_eq!(c, Rgba8::rgb(0, 0, 255));

    assert!(serde_json::from_value::<Rgba8>(json!([1.0, 2.0])).is_err());
}

#[test]
fn serializes_as_hex() {
    assert_eq!(
        serde_json::to_value(Rgba8::rgb(255, 77, 166)).unwrap(),
        json!("#ff4da6")
    );
    assert_eq!(
        serde_json::to_value(Rgba8::rgba(0, 0, 0, 128)).unwrap(),
        json!("#00000080")
    );
}

use super::*;

#[test]
fn parses_full_form_with_and_without_hash() {
    assert_eq!(hex_to_rgb("#FF3366"), Rgb8::new(0xff, 0x33, 0x66));
    assert_eq!(hex_to_rgb("ff3366"), Rgb8::new(0xff, 0x33, 0x66));
    assert_eq!(hex_to_rgb("#000000"), Rgb8::BLACK);
    assert_eq!(hex_to_rgb("#FFFFFF"), Rgb8::new(255, 255, 255));
}

#[test]
fn expands_shorthand_digits() {
    assert_eq!(hex_to_rgb("abc"), Rgb8::new(0xaa, 0xbb, 0xcc));
    assert_eq!(hex_to_rgb("#F0a"), Rgb8::new(0xff, 0x00, 0xaa));
}

#[test]
fn malformed_input_falls_back_to_black() {
    for bad in [
        "", "#", "#ff", "#ffff", "#fffffff", "##ffffff", "zzzzzz", "#12345g", "+12345", " 123456",
        "ééé",
    ] {
        assert_eq!(hex_to_rgb(bad), Rgb8::BLACK, "input {bad:?}");
    }
}

#[test]
fn exhaustive_channel_values_round_trip_through_hex() {
    for v in 0..=255u8 {
        let s = format!("#{v:02x}{:02X}{v:02x}", 255 - v);
        assert_eq!(hex_to_rgb(&s), Rgb8::new(v, 255 - v, v));
    }
}

#[test]
fn rgba_is_opaque() {
    assert_eq!(Rgb8::new(1, 2, 3).to_rgba(), image::Rgba([1, 2, 3, 255]));
}

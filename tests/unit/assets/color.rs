use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#4a9eff")).unwrap();
    assert_eq!(c, Color::rgb(0x4a, 0x9e, 0xff));

    let c: Color = serde_json::from_value(json!("#4A9EFF30")).unwrap();
    assert_eq!(c, Color::rgba(0x4a, 0x9e, 0xff, 0x30));

    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#zz0000").is_err());
}

#[test]
fn parses_array_form() {
    let c: Color = serde_json::from_value(json!([1, 2, 3])).unwrap();
    assert_eq!(c, Color::rgb(1, 2, 3));
    assert!(serde_json::from_value::<Color>(json!([1, 2])).is_err());
}

#[test]
fn hex_serialization_is_lowercase_rgba() {
    let v = serde_json::to_value(Color::rgb(0xF9, 0xB5, 0xC3)).unwrap();
    assert_eq!(v, json!("#f9b5c3ff"));
}

#[test]
fn opacity_scales_alpha() {
    let c = Color::rgba(10, 20, 30, 200);
    assert_eq!(c.with_opacity(0.5).a, 100);
    assert_eq!(c.with_opacity(2.0).a, 200);
    assert_eq!(c.with_opacity(f64::NAN).a, 0);
}

#[test]
fn premul_matches_rounding() {
    let c = Color::rgba(100, 50, 200, 128);
    assert_eq!(
        c.to_premul_rgba8(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn palette_partial_override_keeps_defaults() {
    let p: Palette = serde_json::from_value(json!({ "accent": "#000000" })).unwrap();
    assert_eq!(p.accent, Color::rgb(0, 0, 0));
    assert_eq!(p.emblem_petal, Palette::default().emblem_petal);
}

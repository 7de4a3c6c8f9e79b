use super::*;
use crate::canvas::Font;

fn canvas() -> CpuCanvas {
    CpuCanvas::new(CpuCanvasOpts::default()).unwrap()
}

#[test]
fn zero_size_surface_has_no_frame() {
    let mut c = canvas();
    c.begin_frame(Surface::new(0, 10));
    c.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    c.end_frame();
    assert!(c.snapshot().is_none());
}

#[test]
fn solid_fill_covers_rect() {
    let mut c = canvas();
    c.begin_frame(Surface::new(8, 8));
    c.set_fill(Paint::Solid(Color::rgb(255, 0, 0)));
    c.fill_rect(Rect::new(0.0, 0.0, 4.0, 8.0));
    c.end_frame();

    let f = c.snapshot().unwrap();
    assert_eq!((f.width, f.height), (8, 8));
    assert_eq!(f.pixel(1, 4), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(6, 4).map(|p| p[3]), Some(0));
}

#[test]
fn global_alpha_scales_fill() {
    let mut c = canvas();
    c.begin_frame(Surface::new(4, 4));
    c.set_global_alpha(0.5);
    c.set_fill(Paint::Solid(Color::rgb(0, 0, 255)));
    c.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
    c.end_frame();

    let a = c.snapshot().unwrap().pixel(2, 2).unwrap()[3];
    assert!((120..=135).contains(&a), "alpha {a}");
}

#[test]
fn vertical_gradient_runs_top_to_bottom() {
    let mut c = canvas();
    c.begin_frame(Surface::new(4, 64));
    c.set_fill(Paint::LinearGradient(LinearGradient {
        start: Point::ZERO,
        end: Point::new(0.0, 64.0),
        from: Color::rgb(0, 0, 0),
        to: Color::rgb(255, 255, 255),
    }));
    c.fill_rect(Rect::new(0.0, 0.0, 4.0, 64.0));
    c.end_frame();

    let f = c.snapshot().unwrap();
    let top = f.pixel(2, 1).unwrap()[0];
    let bottom = f.pixel(2, 62).unwrap()[0];
    assert!(top < 20, "top {top}");
    assert!(bottom > 235, "bottom {bottom}");
}

#[test]
fn image_is_scaled_into_destination() {
    let img = PreparedImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![0, 255, 0, 255]),
    };
    let mut c = canvas();
    c.begin_frame(Surface::new(10, 10));
    c.draw_image(&img, Rect::new(2.0, 2.0, 8.0, 8.0));
    c.end_frame();

    let f = c.snapshot().unwrap();
    assert_eq!(f.pixel(5, 5), Some([0, 255, 0, 255]));
    assert_eq!(f.pixel(0, 0).map(|p| p[3]), Some(0));
}

#[test]
fn text_without_font_is_skipped() {
    let mut c = canvas();
    assert!(!c.has_font());
    c.begin_frame(Surface::new(16, 16));
    c.set_font(Font::bold(12.0));
    c.fill_text("夢", Point::new(2.0, 12.0));
    c.stroke_text("夢", Point::new(2.0, 12.0));
    assert_eq!(c.measure_text("夢"), 0.0);
    c.end_frame();
    assert!(c.snapshot().unwrap().data.iter().all(|&b| b == 0));
}

#[test]
fn clear_color_fills_frame() {
    let mut c = CpuCanvas::new(CpuCanvasOpts {
        font_bytes: None,
        clear: Some(Color::rgb(10, 20, 30)),
    })
    .unwrap();
    c.begin_frame(Surface::new(3, 3));
    c.end_frame();
    assert_eq!(c.snapshot().unwrap().pixel(1, 1), Some([10, 20, 30, 255]));
}

#[test]
fn straight_alpha_conversion() {
    let f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 128, 128],
        premultiplied: true,
    };
    let s = f.to_straight();
    assert!(!s.premultiplied);
    assert_eq!(s.data, vec![128, 0, 255, 128]);
}

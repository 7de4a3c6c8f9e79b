use super::*;
use crate::canvas::record::{DrawCommand, RecordingCanvas};

fn menu() -> Menu {
    Menu::new(&MenuConfig::default())
}

#[test]
fn regions_follow_row_pitch() {
    let m = menu();
    let r: Vec<Rect> = m.entries().iter().map(|e| e.region).collect();
    assert_eq!(
        r,
        vec![
            Rect::new(120.0, 250.0, 520.0, 390.0),
            Rect::new(120.0, 450.0, 520.0, 590.0),
            Rect::new(120.0, 650.0, 520.0, 790.0),
        ]
    );
}

#[test]
fn hit_test_is_inclusive_on_edges() {
    let m = menu();
    assert_eq!(m.hit_test(Point::new(120.0, 250.0)), Some(0));
    assert_eq!(m.hit_test(Point::new(520.0, 390.0)), Some(0));
    assert_eq!(m.hit_test(Point::new(119.9, 300.0)), None);
    assert_eq!(m.hit_test(Point::new(300.0, 420.0)), None);
    assert_eq!(m.hit_test(Point::new(300.0, 700.0)), Some(2));
}

#[test]
fn hit_test_ignores_previous_hover() {
    let m = menu();
    let p = Point::new(200.0, 500.0);
    let fresh = m.hit_test(p);
    let _ = m.hit_test(Point::new(200.0, 300.0));
    assert_eq!(m.hit_test(p), fresh);
    assert_eq!(fresh, Some(1));
}

#[test]
fn overlapping_regions_prefer_the_last_entry() {
    let cfg = MenuConfig {
        row_pitch: 100.0,
        ..MenuConfig::default()
    };
    let m = Menu::new(&cfg);
    // rows at 320 and 420 overlap in [350, 390]
    assert_eq!(m.hit_test(Point::new(200.0, 370.0)), Some(1));
    assert_eq!(m.hit_test(Point::new(200.0, 300.0)), Some(0));
}

fn render(hovered: Option<usize>) -> RecordingCanvas {
    let mut rng = SceneRng::seeded(11);
    let mut c = RecordingCanvas::new();
    menu().render(&mut c, &Palette::default(), hovered, &mut rng);
    c
}

#[test]
fn idle_render_strokes_two_labels_per_entry() {
    let c = render(None);
    let texts: Vec<_> = c.commands().iter().filter_map(|cmd| cmd.text()).collect();
    assert_eq!(
        texts,
        vec!["SHIBUYA", "渋谷", "AKIHABARA", "秋葉原", "ASAKUSA", "浅草"]
    );
    let Some(DrawCommand::StrokeText { origin, glow, .. }) = c.commands().first() else {
        panic!("expected stroke text first");
    };
    assert_eq!(*origin, Point::new(120.0, 280.0));
    assert_eq!(glow.map(|g| g.blur), Some(20.0));
    assert!(!c.commands().iter().any(|cmd| matches!(cmd, DrawCommand::FillPath { .. })));
}

#[test]
fn hovered_entry_glows_glitches_and_gets_emblem() {
    let palette = Palette::default();
    let c = render(Some(1));

    let hovered: Vec<_> = c
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::StrokeText {
                text, alpha, glow, ..
            } if text == "AKIHABARA" => Some((*alpha, glow.map(|g| g.blur))),
            _ => None,
        })
        .collect();
    assert_eq!(hovered.len(), 3);
    assert_eq!(hovered[0], (1.0, Some(25.0)));
    assert_eq!(hovered[1], (0.4, Some(10.0)));
    assert_eq!(hovered[2], (0.4, Some(10.0)));

    let emblem_fills = c
        .commands()
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::FillPath { .. }))
        .count();
    assert_eq!(emblem_fills, 6);

    // measured width of "AKIHABARA" at 70px is 9 * 42 = 378
    let disc = c
        .commands()
        .iter()
        .rev()
        .find_map(|cmd| match cmd {
            DrawCommand::FillPath { bounds, paint, .. }
                if *paint == crate::canvas::Paint::Solid(palette.emblem_center) =>
            {
                Some(*bounds)
            }
            _ => None,
        })
        .expect("emblem center");
    assert!((disc.center().x - (120.0 + 378.0 + 4.0)).abs() < 1e-6);
    assert!((disc.center().y - (280.0 + 200.0 - 50.0)).abs() < 1e-6);
}

use super::*;
use crate::canvas::record::{DrawCommand, RecordingCanvas};

#[test]
fn background_covers_surface_with_vertical_gradient() {
    let palette = Palette::default();
    let mut c = RecordingCanvas::new();
    draw_background(&mut c, Surface::new(640, 480), &palette);

    let [DrawCommand::FillRect { bounds, paint, .. }] = c.commands() else {
        panic!("expected a single rect, got {:?}", c.commands());
    };
    assert_eq!(*bounds, Rect::new(0.0, 0.0, 640.0, 480.0));
    let Paint::LinearGradient(g) = paint else {
        panic!("expected gradient paint");
    };
    assert_eq!(g.from, palette.background);
    assert_eq!(g.to, palette.background_end);
    assert_eq!(g.end, Point::new(0.0, 480.0));
}

#[test]
fn size_dependent_layers_skip_empty_surface() {
    let palette = Palette::default();
    let mut rng = SceneRng::seeded(1);
    let empty = Surface::new(0, 720);
    let mut c = RecordingCanvas::new();

    draw_background(&mut c, empty, &palette);
    GridLayout::generate(Surface::new(100, 100), &GridConfig::default(), &mut rng)
        .draw(&mut c, empty, &palette);
    draw_central_text(&mut c, empty, &palette, "日本");
    draw_copyright(&mut c, empty, palette.muted_text, "©");

    assert!(c.commands().is_empty());
}

#[test]
fn grid_lines_follow_spacing() {
    let palette = Palette::default();
    let cfg = GridConfig {
        spacing: 82.0,
        dot_probability: 0.0,
    };
    let mut rng = SceneRng::seeded(2);
    let surface = Surface::new(200, 100);
    let grid = GridLayout::generate(surface, &cfg, &mut rng);
    assert!(grid.dots().is_empty());

    let mut c = RecordingCanvas::new();
    grid.draw(&mut c, surface, &palette);
    let strokes = c
        .commands()
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::StrokePath { .. }))
        .count();
    // x = 0, 82, 164 and y = 0, 82
    assert_eq!(strokes, 5);
}

#[test]
fn grid_dots_land_on_intersections() {
    let cfg = GridConfig {
        spacing: 50.0,
        dot_probability: 1.0,
    };
    let mut rng = SceneRng::seeded(3);
    let grid = GridLayout::generate(Surface::new(100, 100), &cfg, &mut rng);
    assert_eq!(grid.dots().len(), 4);
    for d in grid.dots() {
        assert_eq!(d.x % 50.0, 0.0);
        assert_eq!(d.y % 50.0, 0.0);
    }
}

#[test]
fn scatter_is_fixed_and_within_surface() {
    let cfg = ScatterConfig::default();
    let mut rng = SceneRng::seeded(4);
    let surface = Surface::new(300, 200);
    let scatter = GlyphScatter::generate(surface, &cfg, &mut rng);
    assert_eq!(scatter.glyphs().len(), cfg.count);
    for (g, p) in scatter.glyphs() {
        assert!(cfg.alphabet.glyphs().contains(g));
        assert!((0.0..300.0).contains(&p.x));
        assert!((0.0..200.0).contains(&p.y));
    }

    let mut a = RecordingCanvas::new();
    let mut b = RecordingCanvas::new();
    scatter.draw(&mut a, &Palette::default());
    scatter.draw(&mut b, &Palette::default());
    assert_eq!(a.commands(), b.commands());
}

#[test]
fn central_text_stacks_glyphs_vertically() {
    let mut c = RecordingCanvas::new();
    draw_central_text(&mut c, Surface::new(1000, 800), &Palette::default(), "日本の");
    let origins: Vec<Point> = c
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::StrokeText { origin, .. } => Some(*origin),
            _ => None,
        })
        .collect();
    assert_eq!(
        origins,
        vec![
            Point::new(950.0, 550.0),
            Point::new(950.0, 605.0),
            Point::new(950.0, 660.0),
        ]
    );
}

#[test]
fn copyright_sits_in_bottom_left() {
    let palette = Palette::default();
    let mut c = RecordingCanvas::new();
    draw_copyright(&mut c, Surface::new(800, 600), palette.muted_text, "© 2025");
    let [DrawCommand::FillText {
        text,
        origin,
        size_px,
        paint,
        ..
    }] = c.commands()
    else {
        panic!("expected one text draw");
    };
    assert_eq!(text, "© 2025");
    assert_eq!(*origin, Point::new(20.0, 580.0));
    assert_eq!(*size_px, 12.0);
    assert_eq!(*paint, Paint::Solid(palette.muted_text));
}

#[test]
fn title_glows_and_carries_emblem() {
    let mut c = RecordingCanvas::new();
    draw_title(&mut c, &Palette::default(), &TitleConfig::default());
    let texts: Vec<_> = c.commands().iter().filter_map(|cmd| cmd.text()).collect();
    assert_eq!(texts, vec!["TOKYO", "東京"]);

    let Some(DrawCommand::StrokeText { origin, glow, .. }) = c.commands().first() else {
        panic!("title must be drawn first");
    };
    assert_eq!(*origin, Point::new(100.0, 120.0));
    assert_eq!(glow.map(|g| g.blur), Some(20.0));

    let fills = c
        .commands()
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::FillPath { .. }))
        .count();
    assert_eq!(fills, 6);
}

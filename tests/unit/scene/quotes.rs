use super::*;
use crate::canvas::record::{DrawCommand, RecordingCanvas};
use crate::scene::config::{EdgeOffset, SceneConfig};

fn strokes(c: &RecordingCanvas) -> Vec<(Point, f64, Option<Glow>)> {
    c.commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::StrokeText {
                origin,
                alpha,
                glow,
                ..
            } => Some((*origin, *alpha, *glow)),
            _ => None,
        })
        .collect()
}

#[test]
fn quotes_resolve_edge_offsets() {
    let cfg = SceneConfig::default();
    let mut rng = SceneRng::seeded(1);
    let mut c = RecordingCanvas::new();
    draw_quotes(
        &mut c,
        Surface::new(1920, 1080),
        &cfg.palette,
        &cfg.quotes,
        false,
        &mut rng,
    );
    let s = strokes(&c);
    assert_eq!(s.len(), 2);
    assert_eq!(s[0].0, Point::new(1920.0 - 780.0, 230.0));
    assert_eq!(s[1].0, Point::new(60.0, 1000.0));
    assert!(s.iter().all(|(_, a, g)| *a == 1.0 && g.is_none()));
}

#[test]
fn glitch_adds_two_translucent_duplicates_per_quote() {
    let palette = Palette::default();
    let quotes = vec![QuoteConfig {
        text: "七転び八起き".to_owned(),
        x: EdgeOffset::Start(100.0),
        y: EdgeOffset::Start(100.0),
    }];
    let mut rng = SceneRng::seeded(9);
    let mut c = RecordingCanvas::new();
    draw_quotes(&mut c, Surface::new(800, 600), &palette, &quotes, true, &mut rng);

    let s = strokes(&c);
    assert_eq!(s.len(), 3);
    for (origin, alpha, glow) in &s[1..] {
        assert!((origin.x - 100.0).abs() <= 1.0);
        assert!((origin.y - 100.0).abs() <= 1.0);
        assert_eq!(*alpha, 0.6);
        let glow = glow.expect("duplicate glows");
        assert_eq!(glow.blur, 2.0);
        assert!(palette.glitch.contains(&glow.color));
    }
    assert_eq!(c.state().depth(), 0);
}

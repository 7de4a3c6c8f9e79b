use super::*;
use crate::assets::decode::PreparedImage;
use crate::canvas::record::{DrawCommand, RecordingCanvas};
use crate::scene::config::SceneConfig;

fn tiny() -> PreparedImage {
    PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new(vec![255; 16]),
    }
}

#[test]
fn default_layers_are_centered_with_offsets() {
    let cfg = SceneConfig::default();
    let surface = Surface::new(1920, 1080);
    let primary = ImageLayer::new(ImageAsset::ready("a", tiny()), &cfg.images[0]);
    let secondary = ImageLayer::new(ImageAsset::ready("b", tiny()), &cfg.images[1]);

    assert_eq!(primary.dest(surface), Rect::new(760.0, 140.0, 1160.0, 940.0));
    assert_eq!(secondary.dest(surface), Rect::new(860.0, 340.0, 1160.0, 640.0));

    let layers = ImageLayers::from_layers(vec![primary, secondary]);
    let mut c = RecordingCanvas::new();
    layers.render(&mut c, surface);
    let alphas: Vec<f64> = c
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Image { alpha, .. } => Some(*alpha),
            _ => None,
        })
        .collect();
    assert_eq!(alphas, vec![0.7, 0.8]);
    assert_eq!(c.state().current().global_alpha, 1.0);
}

#[test]
fn pending_and_failed_assets_draw_nothing() {
    let cfg = SceneConfig::default();
    let layers = ImageLayers::from_layers(vec![
        ImageLayer::new(ImageAsset::pending("p"), &cfg.images[0]),
        ImageLayer::new(ImageAsset::failed("f"), &cfg.images[1]),
    ]);
    let mut c = RecordingCanvas::new();
    layers.render(&mut c, Surface::new(800, 600));
    assert!(c.commands().is_empty());
}

#[test]
fn missing_fetcher_marks_layers_failed() {
    let cfg = SceneConfig::default();
    let layers = ImageLayers::load(&cfg.images, None);
    assert_eq!(layers.layers().len(), 2);
    assert!(layers.layers().iter().all(|l| l.asset().has_failed()));
}

use super::*;
use serde_json::json;

#[test]
fn empty_document_is_the_builtin_scene() {
    let cfg = SceneConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, SceneConfig::default());
    assert_eq!(cfg.ambient.count, 100);
    assert_eq!(cfg.trail.burst, 5);
    assert_eq!(cfg.trail.life, 80);
    assert_eq!(cfg.menu.entries.len(), 3);
    assert_eq!(cfg.rain.lanes, 8);
    assert_eq!(cfg.rain.cells, 10);
    assert_eq!(cfg.scatter.count, 20);
    assert_eq!(cfg.images.len(), 2);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let doc = json!({
        "seed": 7,
        "trail": { "burst": 3 },
        "palette": { "accent": "#ff0000" },
        "quotes": [{ "text": "hi", "x": { "start": 60 }, "y": { "end": 80 } }]
    });
    let cfg = SceneConfig::from_json_str(&doc.to_string()).unwrap();
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.trail.burst, 3);
    assert_eq!(cfg.trail.life, 80);
    assert_eq!(cfg.palette.accent, crate::Color::rgb(255, 0, 0));
    assert_eq!(cfg.quotes[0].x, EdgeOffset::Start(60.0));
    assert_eq!(cfg.quotes[0].y.resolve(1080.0), 1000.0);
}

#[test]
fn empty_alphabet_is_rejected() {
    let doc = json!({ "rain": { "alphabet": [] } });
    let err = SceneConfig::from_json_str(&doc.to_string()).unwrap_err();
    assert!(err.to_string().contains("alphabet"), "{err}");
    assert!(GlyphSet::new(Vec::new()).is_err());
}

#[test]
fn zero_counts_are_rejected() {
    for doc in [
        json!({ "ambient": { "count": 0 } }),
        json!({ "trail": { "burst": 0 } }),
        json!({ "trail": { "life": 0 } }),
        json!({ "rain": { "lanes": 0 } }),
        json!({ "rain": { "cells": 0 } }),
        json!({ "menu": { "entries": [] } }),
        json!({ "glitch": { "period_ms": 0 } }),
        json!({ "glitch": { "period_ms": 300, "active_ms": 300 } }),
        json!({ "grid": { "spacing": 0.0 } }),
    ] {
        let err = SceneConfig::from_json_str(&doc.to_string()).unwrap_err();
        assert!(matches!(err, SceneError::Validation(_)), "{doc}: {err}");
    }
}

#[test]
fn negative_sizes_and_bad_alpha_are_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.ambient.speed_min = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.trail.size_span = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.images[1].alpha = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.quotes[0].text.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn glyph_set_wraps_indices() {
    let g = GlyphSet::new(vec!['a', 'b']).unwrap();
    assert_eq!(g.get(0), 'a');
    assert_eq!(g.get(3), 'b');
    assert_eq!(g.len(), 2);
}

#[test]
fn config_round_trips_through_json() {
    let cfg = SceneConfig::default();
    let s = serde_json::to_string(&cfg).unwrap();
    assert_eq!(SceneConfig::from_json_str(&s).unwrap(), cfg);
}

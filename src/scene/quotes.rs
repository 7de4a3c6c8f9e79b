use crate::assets::color::Palette;
use crate::canvas::{DrawTarget, Font, Glow};
use crate::foundation::core::{Point, Surface};
use crate::foundation::rng::SceneRng;
use crate::scene::config::QuoteConfig;

const QUOTE_SIZE: f64 = 22.0;
const DUPLICATES: usize = 2;
const DUPLICATE_ALPHA: f64 = 0.6;
const DUPLICATE_GLOW: f64 = 2.0;

/// Stroke each quote; while `glitch` is on, add jittered duplicates in glitch colors.
pub fn draw_quotes(
    target: &mut dyn DrawTarget,
    surface: Surface,
    palette: &Palette,
    quotes: &[QuoteConfig],
    glitch: bool,
    rng: &mut SceneRng,
) {
    if surface.is_empty() {
        return;
    }
    target.save();
    target.set_font(Font::bold(QUOTE_SIZE));
    for q in quotes {
        let at = Point::new(q.x.resolve(surface.w()), q.y.resolve(surface.h()));
        target.set_stroke(palette.accent, 2.0);
        target.set_glow(None);
        target.stroke_text(&q.text, at);

        if !glitch {
            continue;
        }
        for _ in 0..DUPLICATES {
            let offset = Point::new(rng.centered(1.0), rng.centered(1.0));
            let color = palette.glitch[rng.index(palette.glitch.len())];
            target.save();
            target.set_stroke(color, 2.0);
            target.set_global_alpha(DUPLICATE_ALPHA);
            target.set_glow(Some(Glow::new(color, DUPLICATE_GLOW)));
            target.stroke_text(&q.text, Point::new(at.x + offset.x, at.y + offset.y));
            target.restore();
        }
    }
    target.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/scene/quotes.rs"]
mod tests;

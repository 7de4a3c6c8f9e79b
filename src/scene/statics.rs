//! Layers that only depend on the surface, the palette and layouts generated once at start.

use crate::assets::color::{Color, Palette};
use crate::canvas::{DrawTarget, Font, Glow, LinearGradient, Paint, line};
use crate::foundation::core::{Point, Rect, Surface};
use crate::foundation::rng::SceneRng;
use crate::scene::config::{GridConfig, ScatterConfig, TitleConfig};
use crate::scene::emblem::Emblem;

/// Alpha byte of grid lines and dots.
const GRID_ALPHA: u8 = 0x30;
/// Alpha byte of scattered glyphs.
const SCATTER_ALPHA: u8 = 0x40;
/// Central text x as a fraction of the width.
const CENTRAL_X_FRAC: f64 = 0.95;
/// Central text start below the vertical center.
const CENTRAL_Y_OFFSET: f64 = 150.0;
/// Vertical distance between central text glyphs.
const CENTRAL_PITCH: f64 = 55.0;

/// Vertical gradient from `background` to `background_end` across the full surface.
pub fn draw_background(target: &mut dyn DrawTarget, surface: Surface, palette: &Palette) {
    if surface.is_empty() {
        return;
    }
    target.save();
    target.set_fill(Paint::LinearGradient(LinearGradient {
        start: Point::ZERO,
        end: Point::new(0.0, surface.h()),
        from: palette.background,
        to: palette.background_end,
    }));
    target.fill_rect(surface.rect());
    target.restore();
}

/// Jitter dots placed on grid intersections.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    spacing: f64,
    dots: Vec<Point>,
}

impl GridLayout {
    /// Pick dot intersections for `surface`.
    pub fn generate(surface: Surface, cfg: &GridConfig, rng: &mut SceneRng) -> Self {
        let mut dots = Vec::new();
        let mut x = 0.0;
        while x < surface.w() {
            let mut y = 0.0;
            while y < surface.h() {
                if rng.chance(cfg.dot_probability) {
                    dots.push(Point::new(x, y));
                }
                y += cfg.spacing;
            }
            x += cfg.spacing;
        }
        Self {
            spacing: cfg.spacing,
            dots,
        }
    }

    /// Dot positions.
    pub fn dots(&self) -> &[Point] {
        &self.dots
    }

    /// Stroke the grid lines over the current surface, then the dots.
    pub fn draw(&self, target: &mut dyn DrawTarget, surface: Surface, palette: &Palette) {
        if surface.is_empty() {
            return;
        }
        target.save();
        target.set_stroke(palette.accent.with_alpha(GRID_ALPHA), 1.0);
        let mut x = 0.0;
        while x < surface.w() {
            target.stroke_path(&line(Point::new(x, 0.0), Point::new(x, surface.h())));
            x += self.spacing;
        }
        let mut y = 0.0;
        while y < surface.h() {
            target.stroke_path(&line(Point::new(0.0, y), Point::new(surface.w(), y)));
            y += self.spacing;
        }

        target.set_fill(Paint::Solid(palette.muted_text.with_alpha(GRID_ALPHA)));
        for d in &self.dots {
            target.fill_rect(Rect::new(d.x - 1.0, d.y - 1.0, d.x + 1.0, d.y + 1.0));
        }
        target.restore();
    }
}

/// Title block: glowing stroked title, an emblem and a subtitle.
pub fn draw_title(target: &mut dyn DrawTarget, palette: &Palette, title: &TitleConfig) {
    target.save();
    target.translate(title.origin.x, title.origin.y);

    target.set_font(Font::bold(100.0).italic());
    target.set_stroke(palette.accent, 4.0);
    target.set_glow(Some(Glow::new(palette.accent, 20.0)));
    target.stroke_text(&title.text, Point::ZERO);

    Emblem::new(
        Point::new(350.0, -65.0),
        25.0,
        palette.emblem_petal,
        palette.emblem_center,
    )
    .draw(target);

    target.set_font(Font::bold(36.0));
    target.set_stroke(palette.accent, 2.0);
    target.set_glow(Some(Glow::new(palette.accent, 10.0)));
    target.stroke_text(&title.subtitle, Point::new(85.0, 40.0));
    target.restore();
}

/// Glyphs scattered at fixed random positions.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphScatter {
    font_size: f64,
    glyphs: Vec<(char, Point)>,
}

impl GlyphScatter {
    /// Place `cfg.count` glyphs uniformly over `surface`.
    pub fn generate(surface: Surface, cfg: &ScatterConfig, rng: &mut SceneRng) -> Self {
        let glyphs = (0..cfg.count)
            .map(|_| {
                let g = cfg.alphabet.get(rng.index(cfg.alphabet.len()));
                let p = Point::new(rng.below(surface.w()), rng.below(surface.h()));
                (g, p)
            })
            .collect();
        Self {
            font_size: cfg.font_size,
            glyphs,
        }
    }

    /// Glyphs and their baseline origins.
    pub fn glyphs(&self) -> &[(char, Point)] {
        &self.glyphs
    }

    /// Fill every glyph in translucent accent.
    pub fn draw(&self, target: &mut dyn DrawTarget, palette: &Palette) {
        target.save();
        target.set_font(Font::bold(self.font_size));
        target.set_fill(Paint::Solid(palette.accent.with_alpha(SCATTER_ALPHA)));
        let mut buf = [0u8; 4];
        for (g, p) in &self.glyphs {
            target.fill_text(g.encode_utf8(&mut buf), *p);
        }
        target.restore();
    }
}

/// Stroke `text` one character per row near the right edge.
pub fn draw_central_text(
    target: &mut dyn DrawTarget,
    surface: Surface,
    palette: &Palette,
    text: &str,
) {
    if surface.is_empty() {
        return;
    }
    target.save();
    target.set_font(Font::bold(50.0));
    target.set_stroke(palette.accent, 3.0);
    target.set_glow(Some(Glow::new(palette.accent, 20.0)));

    let x = surface.w() * CENTRAL_X_FRAC;
    let mut y = surface.h() / 2.0 + CENTRAL_Y_OFFSET;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        target.stroke_text(ch.encode_utf8(&mut buf), Point::new(x, y));
        y += CENTRAL_PITCH;
    }
    target.restore();
}

/// Copyright mark anchored to the bottom-left corner.
pub fn draw_copyright(target: &mut dyn DrawTarget, surface: Surface, color: Color, text: &str) {
    if surface.is_empty() {
        return;
    }
    target.save();
    target.set_font(Font::bold(12.0));
    target.set_fill(Paint::Solid(color));
    target.fill_text(text, Point::new(20.0, surface.h() - 20.0));
    target.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/scene/statics.rs"]
mod tests;

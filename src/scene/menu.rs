//! Hover-reactive navigation menu.

use crate::assets::color::Palette;
use crate::canvas::{DrawTarget, Font, Glow};
use crate::foundation::core::{Point, Rect};
use crate::foundation::rng::SceneRng;
use crate::scene::config::{MenuConfig, MenuEntryConfig};
use crate::scene::emblem::Emblem;

/// Glow radii `(primary, translated)` for idle and hovered entries.
const IDLE_GLOW: (f64, f64) = (20.0, 15.0);
const HOVER_GLOW: (f64, f64) = (25.0, 20.0);
const GLITCH_GLOW: (f64, f64) = (10.0, 8.0);
const GLITCH_COPIES: usize = 2;
const GLITCH_ALPHA: f64 = 0.4;

/// Menu entry with its resolved hit region.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuEntry {
    /// Large label.
    pub primary: String,
    /// Small label.
    pub translated: String,
    /// Inclusive pointer region in surface coordinates.
    pub region: Rect,
}

/// Navigation menu.
///
/// Hit regions come from fixed pixel constants, so they do not follow the surface size.
#[derive(Clone, Debug, PartialEq)]
pub struct Menu {
    cfg: MenuConfig,
    entries: Vec<MenuEntry>,
}

impl Menu {
    /// Resolve entries and regions.
    pub fn new(cfg: &MenuConfig) -> Self {
        let entries = cfg
            .entries
            .iter()
            .enumerate()
            .map(|(i, MenuEntryConfig { primary, translated })| {
                let y = cfg.hit_origin.y + i as f64 * cfg.row_pitch;
                MenuEntry {
                    primary: primary.clone(),
                    translated: translated.clone(),
                    region: Rect::new(
                        cfg.hit_origin.x,
                        y - cfg.region_half_height,
                        cfg.hit_origin.x + cfg.region_width,
                        y + cfg.region_half_height,
                    ),
                }
            })
            .collect();
        Self {
            cfg: cfg.clone(),
            entries,
        }
    }

    /// Entries in hit-test order.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Index of the entry under `pointer`.
    ///
    /// Regions are inclusive on every edge. When regions overlap the last matching entry wins.
    pub fn hit_test(&self, pointer: Point) -> Option<usize> {
        let mut hovered = None;
        for (i, e) in self.entries.iter().enumerate() {
            let r = e.region;
            if pointer.x >= r.x0 && pointer.x <= r.x1 && pointer.y >= r.y0 && pointer.y <= r.y1 {
                hovered = Some(i);
            }
        }
        hovered
    }

    /// Stroke every entry; the `hovered` one glows brighter, glitches and gets an emblem.
    pub fn render(
        &self,
        target: &mut dyn DrawTarget,
        palette: &Palette,
        hovered: Option<usize>,
        rng: &mut SceneRng,
    ) {
        let cfg = &self.cfg;
        let primary_font = Font::bold(cfg.primary_size).italic();
        let translated_font = Font::bold(cfg.translated_size);
        let sub = cfg.translated_offset;

        target.save();
        target.translate(cfg.render_origin.x, cfg.render_origin.y);
        for (i, e) in self.entries.iter().enumerate() {
            let y = i as f64 * cfg.row_pitch;
            let is_hovered = hovered == Some(i);
            let (glow_primary, glow_translated) = if is_hovered { HOVER_GLOW } else { IDLE_GLOW };

            target.save();
            target.set_font(primary_font);
            target.set_stroke(palette.accent, 4.0);
            target.set_glow(Some(Glow::new(palette.accent, glow_primary)));
            target.stroke_text(&e.primary, Point::new(0.0, y));
            target.restore();

            target.save();
            target.set_font(translated_font);
            target.set_stroke(palette.accent, 2.0);
            target.set_glow(Some(Glow::new(palette.accent, glow_translated)));
            target.stroke_text(&e.translated, Point::new(sub.x, y + sub.y));
            target.restore();

            if !is_hovered {
                continue;
            }

            for _ in 0..GLITCH_COPIES {
                let dx = rng.centered(1.0);
                let dy = rng.centered(0.5);
                let color = palette.glitch[rng.index(palette.glitch.len())];

                target.save();
                target.set_global_alpha(GLITCH_ALPHA);
                target.set_font(primary_font);
                target.set_stroke(color, 4.0);
                target.set_glow(Some(Glow::new(color, GLITCH_GLOW.0)));
                target.stroke_text(&e.primary, Point::new(dx, y + dy));
                target.set_font(translated_font);
                target.set_stroke(color, 2.0);
                target.set_glow(Some(Glow::new(color, GLITCH_GLOW.1)));
                target.stroke_text(&e.translated, Point::new(sub.x + dx, y + sub.y + dy));
                target.restore();
            }

            target.save();
            target.set_font(primary_font);
            let width = target.measure_text(&e.primary);
            Emblem::new(
                Point::new(width + 4.0, y - 50.0),
                cfg.emblem_size,
                palette.emblem_petal,
                palette.emblem_center,
            )
            .draw(target);
            target.restore();
        }
        target.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/menu.rs"]
mod tests;

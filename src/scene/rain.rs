use crate::assets::color::Palette;
use crate::canvas::{DrawTarget, Font, Paint};
use crate::foundation::core::{Point, Surface};
use crate::foundation::rng::SceneRng;
use crate::scene::config::RainConfig;

const RAIN_ALPHA: u8 = 0x40;

/// One falling glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainCell {
    /// Baseline y.
    pub y: f64,
    /// Glyph.
    pub glyph: char,
}

/// Vertical lane of cells sharing a speed.
#[derive(Clone, Debug, PartialEq)]
pub struct RainLane {
    /// Baseline x, fixed at start.
    pub x: f64,
    /// Cells advanced together.
    pub cells: Vec<RainCell>,
    /// Pixels per step.
    pub speed: f64,
}

/// Columns of glyphs that fall forever.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRain {
    cfg: RainConfig,
    lanes: Vec<RainLane>,
}

impl GlyphRain {
    /// Lay out lanes from the initial `surface` width; cells start above the top edge.
    pub fn new(surface: Surface, cfg: &RainConfig, rng: &mut SceneRng) -> Self {
        let x0 = surface.w() * cfg.x_start_frac;
        let lanes = (0..cfg.lanes)
            .map(|i| {
                let cells = (0..cfg.cells)
                    .map(|_| RainCell {
                        y: -rng.below(cfg.initial_spread),
                        glyph: cfg.alphabet.get(rng.index(cfg.alphabet.len())),
                    })
                    .collect();
                RainLane {
                    x: x0 + i as f64 * cfg.lane_spacing,
                    cells,
                    speed: rng.span(cfg.speed_min, cfg.speed_span),
                }
            })
            .collect();
        Self {
            cfg: cfg.clone(),
            lanes,
        }
    }

    /// Lanes in draw order.
    pub fn lanes(&self) -> &[RainLane] {
        &self.lanes
    }

    /// Advance every cell; cells past `height + margin` restart above the top with a new glyph.
    pub fn step(&mut self, surface: Surface, rng: &mut SceneRng) {
        let limit = surface.h() + self.cfg.margin;
        let alphabet = &self.cfg.alphabet;
        for lane in &mut self.lanes {
            for cell in &mut lane.cells {
                cell.y += lane.speed;
                if cell.y > limit {
                    cell.y = -(self.cfg.respawn_min + rng.below(self.cfg.respawn_spread));
                    cell.glyph = alphabet.get(rng.index(alphabet.len()));
                }
            }
        }
    }

    /// Fill every cell as translucent accent text.
    pub fn render(&self, target: &mut dyn DrawTarget, surface: Surface, palette: &Palette) {
        if surface.is_empty() {
            return;
        }
        target.save();
        target.set_font(Font::bold(self.cfg.font_size));
        target.set_fill(Paint::Solid(palette.accent.with_alpha(RAIN_ALPHA)));
        target.set_glow(None);
        let mut buf = [0u8; 4];
        for lane in &self.lanes {
            for cell in &lane.cells {
                target.fill_text(cell.glyph.encode_utf8(&mut buf), Point::new(lane.x, cell.y));
            }
        }
        target.restore();
    }
}

//! Five-petal emblem shared by the title, cursor, trail and menu layers.

use std::f64::consts::TAU;

use crate::assets::color::Color;
use crate::canvas::{DrawTarget, Paint, circle};
use crate::foundation::core::{BezPath, Point};

/// Number of petals.
pub const PETALS: usize = 5;

/// Center disc radius as a fraction of the emblem size.
pub const CORE_RATIO: f64 = 0.2;

/// One emblem draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emblem {
    /// Center point.
    pub center: Point,
    /// Petal length.
    pub size: f64,
    /// Petal color.
    pub petal: Color,
    /// Center disc color.
    pub core: Color,
    /// Opacity applied to both colors.
    pub alpha: f64,
}

impl Emblem {
    /// Opaque emblem.
    pub fn new(center: Point, size: f64, petal: Color, core: Color) -> Self {
        Self {
            center,
            size,
            petal,
            core,
            alpha: 1.0,
        }
    }

    /// Same emblem at `alpha`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Draw onto `target`, leaving its state unchanged.
    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.save();
        target.translate(self.center.x, self.center.y);
        let petal = petal_path(self.size);
        target.set_fill(Paint::Solid(self.petal.with_opacity(self.alpha)));
        for _ in 0..PETALS {
            target.rotate(TAU / PETALS as f64);
            target.fill_path(&petal);
        }
        target.set_fill(Paint::Solid(self.core.with_opacity(self.alpha)));
        target.fill_path(&circle(Point::ZERO, self.size * CORE_RATIO));
        target.restore();
    }
}

/// Petal pointing up from the origin: two quadratic curves out to `size` and back.
pub fn petal_path(size: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(Point::ZERO);
    p.quad_to(Point::new(size * 0.5, -size * 0.5), Point::new(0.0, -size));
    p.quad_to(Point::new(-size * 0.5, -size * 0.5), Point::ZERO);
    p.close_path();
    p
}

#[cfg(test)]
#[path = "../../tests/unit/scene/emblem.rs"]
mod tests;

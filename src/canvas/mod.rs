//! Immediate-mode drawing target abstraction.
//!
//! The scene issues every draw through [`DrawTarget`]; backends only implement the primitive
//! operations and inherit the save/restore state machine from [`StateStack`].

pub mod record;
pub mod state;

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::foundation::core::{BezPath, Point, Rect, Surface};

pub use state::{DrawState, StateStack};

/// Two-stop linear gradient in user space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradient {
    /// Point where `from` applies.
    pub start: Point,
    /// Point where `to` applies.
    pub end: Point,
    /// Color at `start`.
    pub from: Color,
    /// Color at `end`.
    pub to: Color,
}

impl LinearGradient {
    /// Interpolation parameter of `p` projected on the gradient axis, clamped to `[0, 1]`.
    pub fn t_at(&self, p: Point) -> f64 {
        let axis = self.end - self.start;
        let len2 = axis.hypot2();
        if len2 <= f64::EPSILON {
            return 0.0;
        }
        ((p - self.start).dot(axis) / len2).clamp(0.0, 1.0)
    }

    /// Straight-alpha color at parameter `t`.
    pub fn color_at(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| -> u8 {
            let af = f64::from(a);
            let bf = f64::from(b);
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        Color::rgba(
            lerp(self.from.r, self.to.r),
            lerp(self.from.g, self.to.g),
            lerp(self.from.b, self.to.b),
            lerp(self.from.a, self.to.a),
        )
    }
}

/// Fill style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Flat color.
    Solid(Color),
    /// Linear gradient.
    LinearGradient(LinearGradient),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Self::Solid(c)
    }
}

/// Stroke style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Line width in user units.
    pub width: f64,
}

/// Font descriptor. Weight and slant are advisory; backends without a matching face use size only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    /// Em size in pixels.
    pub size_px: f64,
    /// Bold weight requested.
    pub bold: bool,
    /// Italic slant requested.
    pub italic: bool,
}

impl Font {
    /// Regular font at `size_px`.
    pub fn new(size_px: f64) -> Self {
        Self {
            size_px,
            bold: false,
            italic: false,
        }
    }

    /// Bold font at `size_px`.
    pub fn bold(size_px: f64) -> Self {
        Self {
            bold: true,
            ..Self::new(size_px)
        }
    }

    /// Same font, italic.
    pub fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// Text glow (shadow color + blur radius).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    /// Shadow color.
    pub color: Color,
    /// Blur radius in pixels.
    pub blur: f64,
}

impl Glow {
    /// Glow of `color` with `blur` radius.
    pub fn new(color: Color, blur: f64) -> Self {
        Self { color, blur }
    }
}

/// Opaque 2D immediate-mode drawing surface.
///
/// Style and transform setters are provided on top of [`StateStack`]; implementors supply the
/// primitives and read the current state when drawing.
pub trait DrawTarget {
    /// Current style/transform stack.
    fn state(&self) -> &StateStack;

    /// Mutable style/transform stack.
    fn state_mut(&mut self) -> &mut StateStack;

    /// Start a frame for `surface`. Resets the state stack.
    fn begin_frame(&mut self, surface: Surface) {
        let _ = surface;
        self.state_mut().reset();
    }

    /// Finish the current frame.
    fn end_frame(&mut self) {}

    /// Push a copy of the current state.
    fn save(&mut self) {
        self.state_mut().save();
    }

    /// Pop the last saved state; no-op on an empty stack.
    fn restore(&mut self) {
        self.state_mut().restore();
    }

    /// Post-multiply a translation.
    fn translate(&mut self, dx: f64, dy: f64) {
        self.state_mut().translate(dx, dy);
    }

    /// Post-multiply a rotation (radians, clockwise in y-down space).
    fn rotate(&mut self, radians: f64) {
        self.state_mut().rotate(radians);
    }

    /// Global alpha applied to every subsequent draw.
    fn set_global_alpha(&mut self, alpha: f64) {
        self.state_mut().current_mut().global_alpha = alpha.clamp(0.0, 1.0);
    }

    /// Fill paint.
    fn set_fill(&mut self, paint: Paint) {
        self.state_mut().current_mut().fill = paint;
    }

    /// Stroke color and width.
    fn set_stroke(&mut self, color: Color, width: f64) {
        self.state_mut().current_mut().stroke = StrokeStyle { color, width };
    }

    /// Font used by text operations.
    fn set_font(&mut self, font: Font) {
        self.state_mut().current_mut().font = font;
    }

    /// Glow for subsequent draws; `None` disables it.
    fn set_glow(&mut self, glow: Option<Glow>) {
        self.state_mut().current_mut().glow = glow;
    }

    /// Fill an axis-aligned rectangle in user space.
    fn fill_rect(&mut self, rect: Rect);

    /// Fill a path in user space.
    fn fill_path(&mut self, path: &BezPath);

    /// Stroke a path in user space.
    fn stroke_path(&mut self, path: &BezPath);

    /// Fill text with its alphabetic baseline starting at `at`.
    fn fill_text(&mut self, text: &str, at: Point);

    /// Stroke text outlines with the baseline starting at `at`.
    fn stroke_text(&mut self, text: &str, at: Point);

    /// Advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;

    /// Blit `image` scaled into `dest` (user space) at the current global alpha.
    fn draw_image(&mut self, image: &PreparedImage, dest: Rect);
}

/// Straight line path from `a` to `b`.
pub fn line(a: Point, b: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(a);
    p.line_to(b);
    p
}

/// Closed circle path.
pub fn circle(center: Point, radius: f64) -> BezPath {
    use kurbo::Shape;
    kurbo::Circle::new(center, radius).to_path(0.1)
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/mod.rs"]
mod tests;

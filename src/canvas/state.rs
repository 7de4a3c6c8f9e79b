use crate::assets::color::Color;
use crate::canvas::{Font, Glow, Paint, StrokeStyle};
use crate::foundation::core::{Affine, Vec2};

/// Transform and style applied to draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    /// User-to-device transform.
    pub transform: Affine,
    /// Fill paint.
    pub fill: Paint,
    /// Stroke style.
    pub stroke: StrokeStyle,
    /// Text font.
    pub font: Font,
    /// Optional glow.
    pub glow: Option<Glow>,
    /// Global alpha in `[0, 1]`.
    pub global_alpha: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill: Paint::Solid(Color::rgb(0, 0, 0)),
            stroke: StrokeStyle {
                color: Color::rgb(0, 0, 0),
                width: 1.0,
            },
            font: Font::default(),
            glow: None,
            global_alpha: 1.0,
        }
    }
}

/// Canvas-style save/restore stack.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    /// Fresh stack in the default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    /// Mutable current state.
    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    /// Number of outstanding saves.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Push a copy of the current state.
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved state; unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(s) = self.saved.pop() {
            self.current = s;
        }
    }

    /// Back to the default state with an empty stack.
    pub fn reset(&mut self) {
        self.current = DrawState::default();
        self.saved.clear();
    }

    /// Post-multiply a translation.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current.transform = self.current.transform * Affine::translate(Vec2::new(dx, dy));
    }

    /// Post-multiply a rotation.
    pub fn rotate(&mut self, radians: f64) {
        self.current.transform = self.current.transform * Affine::rotate(radians);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/state.rs"]
mod tests;

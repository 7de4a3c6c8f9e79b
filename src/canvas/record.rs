use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::canvas::{DrawTarget, Glow, Paint, StateStack};
use crate::foundation::core::{BezPath, Point, Rect, Surface};
use kurbo::Shape;

/// A draw resolved to device space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Frame start.
    BeginFrame(Surface),
    /// Filled rectangle; `bounds` is the device-space bounding box.
    FillRect {
        /// Device-space bounds.
        bounds: Rect,
        /// Fill paint.
        paint: Paint,
        /// Global alpha at draw time.
        alpha: f64,
    },
    /// Filled path.
    FillPath {
        /// Device-space bounds.
        bounds: Rect,
        /// Fill paint.
        paint: Paint,
        /// Global alpha at draw time.
        alpha: f64,
    },
    /// Stroked path.
    StrokePath {
        /// Device-space bounds of the geometry (stroke width excluded).
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        width: f64,
        /// Global alpha at draw time.
        alpha: f64,
    },
    /// Filled text.
    FillText {
        /// Text content.
        text: String,
        /// Device-space baseline origin.
        origin: Point,
        /// Font size in pixels.
        size_px: f64,
        /// Fill paint.
        paint: Paint,
        /// Global alpha at draw time.
        alpha: f64,
        /// Glow at draw time.
        glow: Option<Glow>,
    },
    /// Stroked text.
    StrokeText {
        /// Text content.
        text: String,
        /// Device-space baseline origin.
        origin: Point,
        /// Font size in pixels.
        size_px: f64,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        width: f64,
        /// Global alpha at draw time.
        alpha: f64,
        /// Glow at draw time.
        glow: Option<Glow>,
    },
    /// Image blit.
    Image {
        /// Device-space destination bounds.
        dest: Rect,
        /// Source image size.
        source_size: (u32, u32),
        /// Global alpha at draw time.
        alpha: f64,
    },
    /// Frame end.
    EndFrame,
}

impl DrawCommand {
    /// Text payload of text commands.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::FillText { text, .. } | Self::StrokeText { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Whether this command puts pixels on the surface.
    pub fn is_draw(&self) -> bool {
        !matches!(self, Self::BeginFrame(_) | Self::EndFrame)
    }
}

/// [`DrawTarget`] that records commands instead of rasterizing.
///
/// Text is measured with a fixed advance of `0.6 em` per character.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    state: StateStack,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drop recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of commands that put pixels on the surface.
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    fn device_bounds(&self, path: &BezPath) -> Rect {
        let mut p = path.clone();
        p.apply_affine(self.state.current().transform);
        p.bounding_box()
    }

    fn alpha(&self) -> f64 {
        self.state.current().global_alpha
    }
}

impl DrawTarget for RecordingCanvas {
    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn begin_frame(&mut self, surface: Surface) {
        self.state.reset();
        self.commands.push(DrawCommand::BeginFrame(surface));
    }

    fn end_frame(&mut self) {
        self.commands.push(DrawCommand::EndFrame);
    }

    fn fill_rect(&mut self, rect: Rect) {
        let cmd = DrawCommand::FillRect {
            bounds: self.state.current().transform.transform_rect_bbox(rect),
            paint: self.state.current().fill,
            alpha: self.alpha(),
        };
        self.commands.push(cmd);
    }

    fn fill_path(&mut self, path: &BezPath) {
        let cmd = DrawCommand::FillPath {
            bounds: self.device_bounds(path),
            paint: self.state.current().fill,
            alpha: self.alpha(),
        };
        self.commands.push(cmd);
    }

    fn stroke_path(&mut self, path: &BezPath) {
        let stroke = self.state.current().stroke;
        let cmd = DrawCommand::StrokePath {
            bounds: self.device_bounds(path),
            color: stroke.color,
            width: stroke.width,
            alpha: self.alpha(),
        };
        self.commands.push(cmd);
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        let s = self.state.current();
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            origin: s.transform * at,
            size_px: s.font.size_px,
            paint: s.fill,
            alpha: s.global_alpha,
            glow: s.glow,
        });
    }

    fn stroke_text(&mut self, text: &str, at: Point) {
        let s = self.state.current();
        self.commands.push(DrawCommand::StrokeText {
            text: text.to_owned(),
            origin: s.transform * at,
            size_px: s.font.size_px,
            color: s.stroke.color,
            width: s.stroke.width,
            alpha: s.global_alpha,
            glow: s.glow,
        });
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.state.current().font.size_px * 0.6
    }

    fn draw_image(&mut self, image: &PreparedImage, dest: Rect) {
        let s = self.state.current();
        self.commands.push(DrawCommand::Image {
            dest: s.transform.transform_rect_bbox(dest),
            source_size: (image.width, image.height),
            alpha: s.global_alpha,
        });
    }
}

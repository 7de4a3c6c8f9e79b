use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::canvas::{DrawTarget, Glow, LinearGradient, Paint, StateStack};
use crate::foundation::core::{Affine, BezPath, Point, Rect, Surface, Vec2};
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::text::{ShapedText, TextEngine};

/// Halo rings drawn under a glowing stroke.
const GLOW_RINGS: u32 = 3;
/// Opacity of each halo ring relative to the glow color.
const GLOW_RING_OPACITY: f64 = 0.18;

/// Options for [`CpuCanvas`].
#[derive(Clone, Debug, Default)]
pub struct CpuCanvasOpts {
    /// Font file used for every text draw; text is skipped without one.
    pub font_bytes: Option<Vec<u8>>,
    /// Color the surface is cleared to at frame start.
    pub clear: Option<Color>,
}

/// Rendered frame in row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`; `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy, as expected by PNG encoders.
    pub fn to_straight(&self) -> FrameRGBA {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    start: [u64; 2],
    end: [u64; 2],
    from: [u8; 4],
    to: [u8; 4],
    region: [u64; 4],
}

impl GradientKey {
    fn new(g: &LinearGradient, region: Rect) -> Self {
        Self {
            start: [g.start.x.to_bits(), g.start.y.to_bits()],
            end: [g.end.x.to_bits(), g.end.y.to_bits()],
            from: [g.from.r, g.from.g, g.from.b, g.from.a],
            to: [g.to.r, g.to.g, g.to.b, g.to.a],
            region: [
                region.x0.to_bits(),
                region.y0.to_bits(),
                region.x1.to_bits(),
                region.y1.to_bits(),
            ],
        }
    }
}

struct Frame {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

/// [`DrawTarget`] rasterizing with `vello_cpu`.
///
/// A zero-size surface has no backing pixmap; draws are then dropped.
pub struct CpuCanvas {
    state: StateStack,
    clear: Option<Color>,
    frame: Option<Frame>,
    text: Option<TextEngine>,
    warned_no_font: bool,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
    image_cache: HashMap<usize, (Arc<Vec<u8>>, vello_cpu::Image)>,
}

impl std::fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("size", &self.frame.as_ref().map(|fr| (fr.width, fr.height)))
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl CpuCanvas {
    /// Canvas with the given options. Fails when the font bytes cannot be registered.
    pub fn new(opts: CpuCanvasOpts) -> SceneResult<Self> {
        let text = opts.font_bytes.map(TextEngine::from_font_bytes).transpose()?;
        Ok(Self {
            state: StateStack::new(),
            clear: opts.clear,
            frame: None,
            text,
            warned_no_font: false,
            gradient_cache: HashMap::new(),
            image_cache: HashMap::new(),
        })
    }

    /// Whether text can be drawn.
    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    /// Copy of the last finished frame; `None` before the first frame or on a zero-size surface.
    pub fn snapshot(&self) -> Option<FrameRGBA> {
        let fr = self.frame.as_ref()?;
        Some(FrameRGBA {
            width: u32::from(fr.width),
            height: u32::from(fr.height),
            data: fr.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn ensure_frame(&mut self, surface: Surface) -> SceneResult<()> {
        if surface.is_empty() {
            self.frame = None;
            return Ok(());
        }
        let width: u16 = surface
            .width
            .try_into()
            .map_err(|_| SceneError::render("surface width exceeds u16"))?;
        let height: u16 = surface
            .height
            .try_into()
            .map_err(|_| SceneError::render("surface height exceeds u16"))?;

        match self.frame.take() {
            Some(mut fr) if fr.width == width && fr.height == height => {
                fr.ctx.reset();
                self.frame = Some(fr);
            }
            _ => {
                self.gradient_cache.clear();
                self.frame = Some(Frame {
                    width,
                    height,
                    ctx: vello_cpu::RenderContext::new(width, height),
                    pixmap: vello_cpu::Pixmap::new(width, height),
                });
            }
        }
        Ok(())
    }

    fn gradient_paint(&mut self, g: &LinearGradient, region: Rect) -> SceneResult<vello_cpu::Image> {
        let key = GradientKey::new(g, region);
        if let Some(img) = self.gradient_cache.get(&key) {
            return Ok(img.clone());
        }
        let w = region.width().ceil().max(1.0) as u32;
        let h = region.height().ceil().max(1.0) as u32;
        let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
        for y in 0..h {
            for x in 0..w {
                let p = Point::new(
                    region.x0 + f64::from(x) + 0.5,
                    region.y0 + f64::from(y) + 0.5,
                );
                let c = g.color_at(g.t_at(p)).to_premul_rgba8();
                let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c);
            }
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }

    fn image_paint(&mut self, image: &PreparedImage) -> SceneResult<vello_cpu::Image> {
        let key = Arc::as_ptr(&image.rgba8_premul) as usize;
        if let Some((_, paint)) = self.image_cache.get(&key) {
            return Ok(paint.clone());
        }
        let paint = rgba_premul_to_image(&image.rgba8_premul, image.width, image.height)?;
        // The Arc is held alongside so the pointer key cannot be reused by another allocation.
        self.image_cache
            .insert(key, (Arc::clone(&image.rgba8_premul), paint.clone()));
        Ok(paint)
    }

    fn shape(&mut self, text: &str) -> Option<Arc<ShapedText>> {
        let size = self.state.current().font.size_px as f32;
        let Some(engine) = self.text.as_mut() else {
            if !self.warned_no_font {
                tracing::warn!("no font configured, text draws are skipped");
                self.warned_no_font = true;
            }
            return None;
        };
        match engine.shape(text, size) {
            Ok(shaped) => Some(shaped),
            Err(e) => {
                tracing::warn!(error = %e, "text shaping failed");
                None
            }
        }
    }

    fn fill(&mut self, path: &BezPath, bounds: Rect) {
        let s = *self.state.current();
        let paint = match s.fill {
            Paint::Solid(c) => Ok(FillPaint::Solid(c.with_opacity(s.global_alpha))),
            Paint::LinearGradient(g) => self.gradient_paint(&g, bounds).map(FillPaint::Image),
        };
        let paint = match paint {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "fill paint unavailable");
                return;
            }
        };
        let Some(fr) = self.frame.as_mut() else {
            return;
        };
        let ctx = &mut fr.ctx;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match paint {
            FillPaint::Solid(c) => {
                ctx.set_transform(affine_to_cpu(s.transform));
                ctx.set_paint(color_to_cpu(c));
                ctx.fill_path(&bezpath_to_cpu(path));
            }
            FillPaint::Image(img) => {
                let origin = Vec2::new(bounds.x0, bounds.y0);
                let local = Affine::translate(-origin) * path.clone();
                ctx.set_transform(affine_to_cpu(s.transform * Affine::translate(origin)));
                ctx.set_paint(img);
                let layered = s.global_alpha < 1.0;
                if layered {
                    ctx.push_opacity_layer(s.global_alpha as f32);
                }
                ctx.fill_path(&bezpath_to_cpu(&local));
                if layered {
                    ctx.pop_layer();
                }
            }
        }
    }

    fn stroke_with_glow(&mut self, mut draw: impl FnMut(&mut vello_cpu::RenderContext)) {
        let s = *self.state.current();
        let Some(fr) = self.frame.as_mut() else {
            return;
        };
        let ctx = &mut fr.ctx;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(s.transform));

        if let Some(Glow { color, blur }) = s.glow.filter(|g| g.blur > 0.0) {
            let ring = color.with_opacity(GLOW_RING_OPACITY * s.global_alpha);
            for i in (1..=GLOW_RINGS).rev() {
                let spread = blur * f64::from(i) / f64::from(GLOW_RINGS);
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(s.stroke.width + spread));
                ctx.set_paint(color_to_cpu(ring));
                draw(ctx);
            }
        }

        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(s.stroke.width));
        ctx.set_paint(color_to_cpu(s.stroke.color.with_opacity(s.global_alpha)));
        draw(ctx);
    }
}

enum FillPaint {
    Solid(Color),
    Image(vello_cpu::Image),
}

impl DrawTarget for CpuCanvas {
    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn begin_frame(&mut self, surface: Surface) {
        self.state.reset();
        if let Err(e) = self.ensure_frame(surface) {
            tracing::warn!(error = %e, "cannot allocate surface, frame dropped");
            self.frame = None;
            return;
        }
        if let (Some(fr), Some(clear)) = (self.frame.as_mut(), self.clear) {
            fr.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            fr.ctx.set_paint(color_to_cpu(clear));
            fr.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(fr.width),
                f64::from(fr.height),
            ));
        }
    }

    fn end_frame(&mut self) {
        if let Some(fr) = self.frame.as_mut() {
            fr.ctx.flush();
            fr.ctx.render_to_pixmap(&mut fr.pixmap);
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        use kurbo::Shape;
        self.fill(&rect.to_path(0.1), rect);
    }

    fn fill_path(&mut self, path: &BezPath) {
        use kurbo::Shape;
        self.fill(path, path.bounding_box());
    }

    fn stroke_path(&mut self, path: &BezPath) {
        let cpu_path = bezpath_to_cpu(path);
        self.stroke_with_glow(|ctx| ctx.stroke_path(&cpu_path));
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        if self.frame.is_none() {
            return;
        }
        let Some(shaped) = self.shape(text) else {
            return;
        };
        let Some(engine) = self.text.as_ref() else {
            return;
        };
        let s = *self.state.current();
        let Some(fr) = self.frame.as_mut() else {
            return;
        };
        let ctx = &mut fr.ctx;
        let color = match s.fill {
            Paint::Solid(c) => c,
            Paint::LinearGradient(g) => g.from,
        };
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(s.transform * Affine::translate(at.to_vec2())));
        ctx.set_paint(color_to_cpu(color.with_opacity(s.global_alpha)));
        ctx.glyph_run(engine.font())
            .font_size(shaped.font_size)
            .fill_glyphs(shaped.glyphs.iter().cloned());
    }

    fn stroke_text(&mut self, text: &str, at: Point) {
        if self.frame.is_none() {
            return;
        }
        let Some(shaped) = self.shape(text) else {
            return;
        };
        let Some(font) = self.text.as_ref().map(|e| e.font().clone()) else {
            return;
        };
        self.state.save();
        self.state.translate(at.x, at.y);
        self.stroke_with_glow(|ctx| {
            ctx.glyph_run(&font)
                .font_size(shaped.font_size)
                .stroke_glyphs(shaped.glyphs.iter().cloned());
        });
        self.state.restore();
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        match self.shape(text) {
            Some(shaped) => shaped.width,
            None => 0.0,
        }
    }

    fn draw_image(&mut self, image: &PreparedImage, dest: Rect) {
        if self.frame.is_none() || image.width == 0 || image.height == 0 {
            return;
        }
        let paint = match self.image_paint(image) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "image paint unavailable");
                return;
            }
        };
        let s = *self.state.current();
        let Some(fr) = self.frame.as_mut() else {
            return;
        };
        let (iw, ih) = (f64::from(image.width), f64::from(image.height));
        let place = Affine::translate(Vec2::new(dest.x0, dest.y0))
            * Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih);

        let ctx = &mut fr.ctx;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(s.transform * place));
        ctx.set_paint(paint);
        let layered = s.global_alpha < 1.0;
        if layered {
            ctx.push_opacity_layer(s.global_alpha as f32);
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        if layered {
            ctx.pop_layer();
        }
    }
}

fn color_to_cpu(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_premul_to_image(bytes: &[u8], width: u32, height: u32) -> SceneResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SceneError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SceneError::render("image height exceeds u16"))?;
    if bytes.len() != width as usize * height as usize * 4 {
        return Err(SceneError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect::<Vec<_>>();

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

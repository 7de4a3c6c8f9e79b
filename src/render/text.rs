use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{SceneError, SceneResult};

/// Layouts kept before the cache is flushed.
const LAYOUT_CACHE_LIMIT: usize = 1024;

/// Brush type carried through Parley layouts. Color is applied at draw time, so it stays unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush;

/// Single-line text shaped for one font size.
///
/// Glyph positions are relative to the start of the alphabetic baseline.
#[derive(Clone, Debug)]
pub struct ShapedText {
    /// Positioned glyphs.
    pub glyphs: Vec<vello_cpu::Glyph>,
    /// Font size the glyphs were shaped at.
    pub font_size: f32,
    /// Advance width.
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ShapeKey {
    text: String,
    size_bits: u32,
}

/// Parley-backed shaper bound to one font face.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    cache: HashMap<ShapeKey, Arc<ShapedText>>,
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("family_name", &self.family_name)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl TextEngine {
    /// Register `font_bytes` and resolve its family name.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> SceneResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SceneError::asset("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SceneError::asset("registered font family has no name"))?
            .to_string();
        tracing::debug!(family = %family_name, "font registered");

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
            cache: HashMap::new(),
        })
    }

    /// Family name of the registered face.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Font handle for glyph drawing.
    pub fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` at `size_px`, reusing earlier results.
    pub fn shape(&mut self, text: &str, size_px: f32) -> SceneResult<Arc<ShapedText>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SceneError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let key = ShapeKey {
            text: text.to_owned(),
            size_bits: size_px.to_bits(),
        };
        if let Some(shaped) = self.cache.get(&key) {
            return Ok(Arc::clone(shaped));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush));
        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        let mut first_baseline = None;
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let baseline = run.baseline();
                let origin = *first_baseline.get_or_insert(baseline);
                let mut x = run.offset();
                for g in run.glyphs() {
                    glyphs.push(vello_cpu::Glyph {
                        id: g.id,
                        x: x + g.x,
                        y: baseline - origin - g.y,
                    });
                    x += g.advance;
                }
            }
        }

        let shaped = Arc::new(ShapedText {
            glyphs,
            font_size: size_px,
            width: f64::from(layout.width()),
        });
        if self.cache.len() >= LAYOUT_CACHE_LIMIT {
            self.cache.clear();
        }
        self.cache.insert(key, Arc::clone(&shaped));
        Ok(shaped)
    }
}

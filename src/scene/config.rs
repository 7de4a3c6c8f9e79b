//! JSON-facing scene configuration.
//!
//! Every section has a `Default` reproducing the built-in scene, so `{}` is a valid document.

use serde::{Deserialize, Serialize};

use crate::assets::color::Palette;
use crate::foundation::core::Point;
use crate::foundation::error::{SceneError, SceneResult};

/// Non-empty glyph alphabet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<char>", into = "Vec<char>")]
pub struct GlyphSet(Vec<char>);

impl GlyphSet {
    /// Build from a list of glyphs; empty lists are rejected.
    pub fn new(glyphs: Vec<char>) -> SceneResult<Self> {
        if glyphs.is_empty() {
            return Err(SceneError::validation("glyph alphabet must not be empty"));
        }
        Ok(Self(glyphs))
    }

    /// Glyphs in declaration order.
    pub fn glyphs(&self) -> &[char] {
        &self.0
    }

    /// Number of glyphs; never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Glyph at `i` wrapped into range.
    pub fn get(&self, i: usize) -> char {
        self.0[i % self.0.len()]
    }

    fn kanji() -> Self {
        Self("夢愛風光心道力星海山".chars().collect())
    }

    fn kanji_and_digits() -> Self {
        Self("夢愛風光心道力星海山107".chars().collect())
    }
}

impl TryFrom<Vec<char>> for GlyphSet {
    type Error = SceneError;

    fn try_from(v: Vec<char>) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<GlyphSet> for Vec<char> {
    fn from(g: GlyphSet) -> Self {
        g.0
    }
}

/// Ambient drifting motes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Fixed population.
    pub count: usize,
    /// Minimum radius.
    pub size_min: f64,
    /// Random radius span added to `size_min`.
    pub size_span: f64,
    /// Minimum fall speed (px per frame).
    pub speed_min: f64,
    /// Random speed span added to `speed_min`.
    pub speed_span: f64,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            count: 100,
            size_min: 1.0,
            size_span: 2.0,
            speed_min: 0.2,
            speed_span: 0.5,
        }
    }
}

/// Click-spawned emblem trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Particles appended per click.
    pub burst: usize,
    /// Lifetime in frames.
    pub life: u32,
    /// Full width of the square spawn jitter around the cursor.
    pub jitter: f64,
    /// Minimum emblem radius.
    pub size_min: f64,
    /// Random radius span added to `size_min`.
    pub size_span: f64,
    /// Full width of the horizontal velocity range, centered on zero.
    pub drift_x: f64,
    /// Vertical velocity span; velocities are drawn from `[-drift_y, 0)` (upward float).
    pub drift_y: f64,
    /// Radius of the emblem that follows the cursor.
    pub cursor_size: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            burst: 5,
            life: 80,
            jitter: 40.0,
            size_min: 5.0,
            size_span: 12.0,
            drift_x: 0.5,
            drift_y: 0.5,
            cursor_size: 15.0,
        }
    }
}

/// One navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntryConfig {
    /// Large stroked label.
    pub primary: String,
    /// Smaller translated label under it.
    pub translated: String,
}

/// Navigation menu layout. Positions are fixed pixels, independent of the surface size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Entries in hit-test order.
    pub entries: Vec<MenuEntryConfig>,
    /// Translation applied before drawing labels.
    pub render_origin: Point,
    /// Top-left anchor of the first hit region's vertical center line.
    pub hit_origin: Point,
    /// Vertical distance between entries.
    pub row_pitch: f64,
    /// Width of each hit region.
    pub region_width: f64,
    /// Half height of each hit region around its center line.
    pub region_half_height: f64,
    /// Primary label font size.
    pub primary_size: f64,
    /// Translated label font size.
    pub translated_size: f64,
    /// Offset of the translated label from the primary baseline.
    pub translated_offset: Point,
    /// Radius of the hover emblem.
    pub emblem_size: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        let entry = |primary: &str, translated: &str| MenuEntryConfig {
            primary: primary.to_owned(),
            translated: translated.to_owned(),
        };
        Self {
            entries: vec![
                entry("SHIBUYA", "渋谷"),
                entry("AKIHABARA", "秋葉原"),
                entry("ASAKUSA", "浅草"),
            ],
            render_origin: Point::new(120.0, 280.0),
            hit_origin: Point::new(120.0, 320.0),
            row_pitch: 200.0,
            region_width: 400.0,
            region_half_height: 70.0,
            primary_size: 70.0,
            translated_size: 40.0,
            translated_offset: Point::new(20.0, 45.0),
            emblem_size: 20.0,
        }
    }
}

/// Falling glyph lanes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Number of lanes.
    pub lanes: usize,
    /// Cells per lane.
    pub cells: usize,
    /// First lane x as a fraction of the initial surface width.
    pub x_start_frac: f64,
    /// Horizontal distance between lanes.
    pub lane_spacing: f64,
    /// Minimum lane speed.
    pub speed_min: f64,
    /// Random span added to `speed_min`.
    pub speed_span: f64,
    /// Distance past the bottom edge before a cell recycles.
    pub margin: f64,
    /// Initial offsets are drawn from `[-initial_spread, 0)`.
    pub initial_spread: f64,
    /// Recycled cells restart at `-(respawn_min + uniform(0, respawn_spread))`.
    pub respawn_min: f64,
    /// See `respawn_min`.
    pub respawn_spread: f64,
    /// Glyph size in pixels.
    pub font_size: f64,
    /// Glyph alphabet.
    pub alphabet: GlyphSet,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            lanes: 8,
            cells: 10,
            x_start_frac: 0.45,
            lane_spacing: 30.0,
            speed_min: 0.3,
            speed_span: 0.2,
            margin: 100.0,
            initial_spread: 400.0,
            respawn_min: 100.0,
            respawn_spread: 200.0,
            font_size: 20.0,
            alphabet: GlyphSet::kanji_and_digits(),
        }
    }
}

/// Fixed random glyph scatter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Number of glyphs.
    pub count: usize,
    /// Glyph size in pixels.
    pub font_size: f64,
    /// Glyph alphabet.
    pub alphabet: GlyphSet,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 20,
            font_size: 24.0,
            alphabet: GlyphSet::kanji(),
        }
    }
}

/// Background grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Line spacing in pixels.
    pub spacing: f64,
    /// Probability that an intersection gets a jitter dot.
    pub dot_probability: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 82.0,
            dot_probability: 0.15,
        }
    }
}

/// Periodic glitch window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchConfig {
    /// Period between glitch onsets in milliseconds.
    pub period_ms: u64,
    /// Duration of each glitch in milliseconds.
    pub active_ms: u64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            period_ms: 5000,
            active_ms: 300,
        }
    }
}

/// One raster image layer, centered on the surface plus `offset`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageLayerConfig {
    /// Source handed to the [`crate::ImageFetcher`].
    pub source: String,
    /// Destination width.
    pub width: f64,
    /// Destination height.
    pub height: f64,
    /// Offset from the centered position.
    #[serde(default)]
    pub offset: Point,
    /// Global alpha.
    pub alpha: f64,
}

fn default_images() -> Vec<ImageLayerConfig> {
    vec![
        ImageLayerConfig {
            source: "images/primary.png".to_owned(),
            width: 400.0,
            height: 800.0,
            offset: Point::ZERO,
            alpha: 0.7,
        },
        ImageLayerConfig {
            source: "images/secondary.png".to_owned(),
            width: 300.0,
            height: 300.0,
            offset: Point::new(50.0, -50.0),
            alpha: 0.8,
        },
    ]
}

/// Position along one axis measured from the leading or trailing edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOffset {
    /// Distance from the left/top edge.
    Start(f64),
    /// Distance from the right/bottom edge.
    End(f64),
}

impl EdgeOffset {
    /// Resolve against an axis length.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Start(d) => d,
            Self::End(d) => extent - d,
        }
    }
}

/// A quote line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Quote text.
    pub text: String,
    /// Horizontal placement.
    pub x: EdgeOffset,
    /// Vertical placement (baseline).
    pub y: EdgeOffset,
}

fn default_quotes() -> Vec<QuoteConfig> {
    vec![
        QuoteConfig {
            text: "七転び八起き - Nanakorobi yaoki (Fall seven times, stand up eight)".to_owned(),
            x: EdgeOffset::End(780.0),
            y: EdgeOffset::Start(230.0),
        },
        QuoteConfig {
            text: "花鳥風月 - Kachō fūgetsu (The beauty of nature and the seasons)".to_owned(),
            x: EdgeOffset::Start(60.0),
            y: EdgeOffset::End(80.0),
        },
    ]
}

/// Title block in the top-left corner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Large stroked title.
    pub text: String,
    /// Smaller subtitle.
    pub subtitle: String,
    /// Translation applied before drawing the block.
    pub origin: Point,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            text: "TOKYO".to_owned(),
            subtitle: "東京".to_owned(),
            origin: Point::new(100.0, 120.0),
        }
    }
}

/// Top-level scene configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed seed for every random draw; entropy when absent.
    pub seed: Option<u64>,
    /// Colors.
    pub palette: Palette,
    /// Ambient motes.
    pub ambient: AmbientConfig,
    /// Emblem trail.
    pub trail: TrailConfig,
    /// Navigation menu.
    pub menu: MenuConfig,
    /// Glyph rain.
    pub rain: RainConfig,
    /// Glyph scatter.
    pub scatter: ScatterConfig,
    /// Background grid.
    pub grid: GridConfig,
    /// Glitch timing.
    pub glitch: GlitchConfig,
    /// Title block.
    pub title: TitleConfig,
    /// Image layers; the first is drawn as the primary, the rest follow in order.
    pub images: Vec<ImageLayerConfig>,
    /// Quote lines.
    pub quotes: Vec<QuoteConfig>,
    /// Vertical central text, one glyph per row.
    pub central_text: String,
    /// Copyright mark.
    pub copyright: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            palette: Palette::default(),
            ambient: AmbientConfig::default(),
            trail: TrailConfig::default(),
            menu: MenuConfig::default(),
            rain: RainConfig::default(),
            scatter: ScatterConfig::default(),
            grid: GridConfig::default(),
            glitch: GlitchConfig::default(),
            title: TitleConfig::default(),
            images: default_images(),
            quotes: default_quotes(),
            central_text: "日本のアート".to_owned(),
            copyright: "© 2025".to_owned(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| SceneError::validation(format!("invalid scene config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations that would make a layer degenerate or divide by zero.
    pub fn validate(&self) -> SceneResult<()> {
        fn finite_non_negative(name: &str, v: f64) -> SceneResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(SceneError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
            Ok(())
        }

        if self.ambient.count == 0 {
            return Err(SceneError::validation("ambient.count must be > 0"));
        }
        finite_non_negative("ambient.size_min", self.ambient.size_min)?;
        finite_non_negative("ambient.size_span", self.ambient.size_span)?;
        finite_non_negative("ambient.speed_min", self.ambient.speed_min)?;
        finite_non_negative("ambient.speed_span", self.ambient.speed_span)?;

        if self.trail.burst == 0 {
            return Err(SceneError::validation("trail.burst must be > 0"));
        }
        if self.trail.life == 0 {
            return Err(SceneError::validation("trail.life must be > 0"));
        }
        finite_non_negative("trail.jitter", self.trail.jitter)?;
        finite_non_negative("trail.size_min", self.trail.size_min)?;
        finite_non_negative("trail.size_span", self.trail.size_span)?;
        finite_non_negative("trail.drift_x", self.trail.drift_x)?;
        finite_non_negative("trail.drift_y", self.trail.drift_y)?;
        finite_non_negative("trail.cursor_size", self.trail.cursor_size)?;

        if self.menu.entries.is_empty() {
            return Err(SceneError::validation("menu.entries must not be empty"));
        }
        finite_non_negative("menu.row_pitch", self.menu.row_pitch)?;
        finite_non_negative("menu.region_width", self.menu.region_width)?;
        finite_non_negative("menu.region_half_height", self.menu.region_half_height)?;
        if !(self.menu.primary_size > 0.0 && self.menu.translated_size > 0.0) {
            return Err(SceneError::validation("menu font sizes must be > 0"));
        }

        if self.rain.lanes == 0 || self.rain.cells == 0 {
            return Err(SceneError::validation("rain.lanes and rain.cells must be > 0"));
        }
        finite_non_negative("rain.speed_min", self.rain.speed_min)?;
        finite_non_negative("rain.speed_span", self.rain.speed_span)?;
        finite_non_negative("rain.margin", self.rain.margin)?;
        finite_non_negative("rain.initial_spread", self.rain.initial_spread)?;
        finite_non_negative("rain.respawn_min", self.rain.respawn_min)?;
        finite_non_negative("rain.respawn_spread", self.rain.respawn_spread)?;

        if !(self.grid.spacing.is_finite() && self.grid.spacing >= 1.0) {
            return Err(SceneError::validation("grid.spacing must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.grid.dot_probability) {
            return Err(SceneError::validation(
                "grid.dot_probability must be in [0, 1]",
            ));
        }

        if self.glitch.period_ms == 0 {
            return Err(SceneError::validation("glitch.period_ms must be > 0"));
        }
        if self.glitch.active_ms >= self.glitch.period_ms {
            return Err(SceneError::validation(
                "glitch.active_ms must be shorter than glitch.period_ms",
            ));
        }

        for (i, img) in self.images.iter().enumerate() {
            if !(img.width > 0.0 && img.height > 0.0) {
                return Err(SceneError::validation(format!(
                    "images[{i}] width and height must be > 0"
                )));
            }
            if !(0.0..=1.0).contains(&img.alpha) {
                return Err(SceneError::validation(format!(
                    "images[{i}].alpha must be in [0, 1]"
                )));
            }
        }

        if self.quotes.iter().any(|q| q.text.is_empty()) {
            return Err(SceneError::validation("quote text must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;

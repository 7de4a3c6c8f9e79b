//! Animated, pointer-reactive 2D scene compositor.
//!
//! A [`Scene`] owns a set of layers (background gradient, grid, title, hover menu, glyph scatter,
//! image layers, ambient motes, vertical text, cursor emblem and click trail, quotes with
//! periodic glitch, glyph rain and a copyright mark) and redraws all of them in a fixed order on
//! every frame.
//!
//! # Runtime model
//!
//! - **Host-driven**: a [`Host`] supplies the surface size, input events and frame scheduling.
//!   [`HeadlessHost`] runs scenes in-process for tests and offline rendering.
//! - **Single-threaded**: each frame runs to completion and schedules the next one. Events are
//!   applied between frames.
//! - **Cancellable**: [`Scene::stop`] fires a one-shot [`CancelToken`]; continuations scheduled
//!   before teardown become inert.
//! - **Backend-agnostic drawing**: every draw goes through [`DrawTarget`]. [`CpuCanvas`]
//!   rasterizes with `vello_cpu`; [`RecordingCanvas`] records resolved commands.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod canvas;
mod foundation;
mod host;
mod render;
mod scene;

pub use assets::color::{Color, Palette};
pub use assets::decode::{PreparedImage, decode_image};
pub use assets::store::{FsFetcher, ImageAsset, ImageFetcher, normalize_rel_path};
pub use canvas::record::{DrawCommand, RecordingCanvas};
pub use canvas::{
    DrawState, DrawTarget, Font, Glow, LinearGradient, Paint, StateStack, StrokeStyle, circle,
    line,
};
pub use foundation::cancel::CancelToken;
pub use foundation::core::{Affine, BezPath, Point, Rect, Surface, Vec2};
pub use foundation::error::{SceneError, SceneResult};
pub use foundation::rng::SceneRng;
pub use host::headless::FRAME_INTERVAL;
pub use host::{EventKind, FrameRequest, FrameTick, HeadlessHost, Host, InputEvent, ListenerId};
pub use render::cpu::{CpuCanvas, CpuCanvasOpts, FrameRGBA};
pub use render::text::{ShapedText, TextBrush, TextEngine};
pub use scene::config::{
    AmbientConfig, EdgeOffset, GlitchConfig, GlyphSet, GridConfig, ImageLayerConfig,
    MenuConfig, MenuEntryConfig, QuoteConfig, RainConfig, SceneConfig, ScatterConfig,
    TitleConfig, TrailConfig,
};
pub use scene::emblem::{CORE_RATIO, Emblem, PETALS, petal_path};
pub use scene::glitch::GlitchClock;
pub use scene::images::{ImageLayer, ImageLayers};
pub use scene::menu::{Menu, MenuEntry};
pub use scene::orchestrator::{Scene, SceneState, SceneStatus};
pub use scene::particles::{AmbientField, AmbientParticle, EmblemTrail, TrailParticle};
pub use scene::quotes::draw_quotes;
pub use scene::rain::{GlyphRain, RainCell, RainLane};
pub use scene::statics::{
    GlyphScatter, GridLayout, draw_background, draw_central_text, draw_copyright, draw_title,
};
pub use scene::surface::SurfaceManager;

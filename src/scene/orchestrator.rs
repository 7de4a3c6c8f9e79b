//! Scene lifecycle and the per-frame draw pipeline.

use std::sync::Arc;
use std::time::Duration;

use crate::assets::color::Palette;
use crate::assets::store::ImageFetcher;
use crate::canvas::DrawTarget;
use crate::foundation::cancel::CancelToken;
use crate::foundation::core::{Point, Surface};
use crate::foundation::error::SceneResult;
use crate::foundation::rng::SceneRng;
use crate::host::{EventKind, FrameRequest, FrameTick, Host, InputEvent, ListenerId};
use crate::scene::config::SceneConfig;
use crate::scene::emblem::Emblem;
use crate::scene::glitch::GlitchClock;
use crate::scene::images::ImageLayers;
use crate::scene::menu::Menu;
use crate::scene::particles::{AmbientField, EmblemTrail};
use crate::scene::quotes::draw_quotes;
use crate::scene::rain::GlyphRain;
use crate::scene::statics::{
    GlyphScatter, GridLayout, draw_background, draw_central_text, draw_copyright, draw_title,
};
use crate::scene::surface::SurfaceManager;

const LISTENED: [EventKind; 3] = [EventKind::PointerMove, EventKind::Click, EventKind::Resize];

/// Lifecycle of a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneStatus {
    /// Created, not started.
    Uninitialized,
    /// Listening and scheduling frames.
    Running,
    /// Stopped for good.
    TornDown,
}

/// Mutable state shared by the layers.
#[derive(Clone, Debug)]
pub struct SceneState {
    /// Surface size.
    pub surface: SurfaceManager,
    /// Colors.
    pub palette: Palette,
    /// Last pointer position; the surface center until the first move.
    pub cursor: Point,
    /// Menu entry under the pointer.
    pub hovered: Option<usize>,
    /// Whether the glitch window is open this frame.
    pub glitch: bool,
    /// Random source for every layout and jitter.
    pub rng: SceneRng,
}

/// Everything generated at start.
#[derive(Clone, Debug)]
struct Layers {
    grid: GridLayout,
    scatter: GlyphScatter,
    menu: Menu,
    images: ImageLayers,
    ambient: AmbientField,
    trail: EmblemTrail,
    rain: GlyphRain,
}

/// Animated scene bound to a [`Host`].
pub struct Scene {
    config: SceneConfig,
    fetcher: Option<Arc<dyn ImageFetcher>>,
    status: SceneStatus,
    state: SceneState,
    glitch_clock: GlitchClock,
    layers: Option<Layers>,
    token: Option<CancelToken>,
    pending: Option<FrameRequest>,
    listeners: Vec<ListenerId>,
    started_at: Duration,
    frames: u64,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("status", &self.status)
            .field("surface", &self.state.surface.current())
            .field("frames", &self.frames)
            .field("has_fetcher", &self.fetcher.is_some())
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Scene for `config`, rejected unless it passes [`SceneConfig::validate`]. Nothing is
    /// generated until [`Scene::start`].
    pub fn new(config: SceneConfig) -> SceneResult<Self> {
        config.validate()?;
        let rng = SceneRng::from_seed_or_entropy(config.seed);
        Ok(Self {
            state: SceneState {
                surface: SurfaceManager::new(),
                palette: config.palette,
                cursor: Point::ZERO,
                hovered: None,
                glitch: false,
                rng,
            },
            glitch_clock: GlitchClock::new(&config.glitch),
            config,
            fetcher: None,
            status: SceneStatus::Uninitialized,
            layers: None,
            token: None,
            pending: None,
            listeners: Vec::new(),
            started_at: Duration::ZERO,
            frames: 0,
        })
    }

    /// Load image layers through `fetcher` when the scene starts.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn ImageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Initialize every layer, register listeners and schedule the first frame.
    ///
    /// No-op unless the scene is uninitialized and the host has a surface; a start without a
    /// surface can be retried.
    #[tracing::instrument(skip_all)]
    pub fn start(&mut self, host: &mut dyn Host) {
        if self.status != SceneStatus::Uninitialized {
            tracing::debug!(status = ?self.status, "start ignored");
            return;
        }
        let Some(surface) = host.surface_size() else {
            tracing::debug!("no drawing surface, start deferred");
            return;
        };

        self.state.surface.initialize(surface);
        self.state.cursor = surface.center();
        self.state.hovered = None;
        self.state.glitch = false;

        let cfg = &self.config;
        let rng = &mut self.state.rng;
        self.layers = Some(Layers {
            grid: GridLayout::generate(surface, &cfg.grid, rng),
            scatter: GlyphScatter::generate(surface, &cfg.scatter, rng),
            menu: Menu::new(&cfg.menu),
            images: ImageLayers::load(&cfg.images, self.fetcher.as_ref()),
            ambient: AmbientField::new(surface, &cfg.ambient, rng),
            trail: EmblemTrail::new(&cfg.trail),
            rain: GlyphRain::new(surface, &cfg.rain, rng),
        });

        self.listeners = LISTENED.iter().map(|k| host.add_listener(*k)).collect();
        let token = CancelToken::new();
        self.pending = Some(host.request_frame(token.clone()));
        self.token = Some(token);
        self.started_at = host.now();
        self.status = SceneStatus::Running;
        tracing::debug!(
            width = surface.width,
            height = surface.height,
            seed = self.state.rng.seed(),
            "scene started"
        );
    }

    /// Tear down: cancel the pending frame, fire the cancellation token, drop listeners.
    ///
    /// Idempotent. Stopping a scene that never started also tears it down.
    #[tracing::instrument(skip_all)]
    pub fn stop(&mut self, host: &mut dyn Host) {
        if self.status == SceneStatus::TornDown {
            return;
        }
        if let Some(token) = self.token.take() {
            token.cancel();
        }
        if let Some(request) = self.pending.take() {
            host.cancel_frame(request);
        }
        for id in self.listeners.drain(..) {
            host.remove_listener(id);
        }
        self.status = SceneStatus::TornDown;
        tracing::debug!(frames = self.frames, "scene stopped");
    }

    /// Apply one input event. Ignored unless running.
    pub fn handle_event(&mut self, event: InputEvent) {
        if self.status != SceneStatus::Running {
            return;
        }
        let Some(layers) = self.layers.as_mut() else {
            return;
        };
        match event {
            InputEvent::PointerMove { x, y } => {
                let p = Point::new(x, y);
                self.state.cursor = p;
                self.state.hovered = layers.menu.hit_test(p);
            }
            InputEvent::Click => {
                layers
                    .trail
                    .spawn_burst(self.state.cursor, &self.state.palette, &mut self.state.rng);
            }
            InputEvent::Resize { width, height } => {
                self.state.surface.on_viewport_resize(width, height);
            }
        }
    }

    /// Run one frame continuation and schedule the next.
    ///
    /// Ticks from a cancelled run or that are not the currently scheduled request are dropped.
    pub fn on_frame(&mut self, tick: FrameTick, host: &mut dyn Host, target: &mut dyn DrawTarget) {
        if self.status != SceneStatus::Running
            || tick.token.is_cancelled()
            || self.pending != Some(tick.request)
        {
            tracing::trace!(request = tick.request.0, "stale frame dropped");
            return;
        }
        self.pending = None;

        let elapsed = host.now().saturating_sub(self.started_at);
        self.state.glitch = self.glitch_clock.is_active(elapsed);
        self.render_frame(target);
        self.frames += 1;
        tracing::trace!(frame = self.frames, glitch = self.state.glitch, "frame");

        if let Some(token) = &self.token {
            self.pending = Some(host.request_frame(token.clone()));
        }
    }

    fn render_frame(&mut self, target: &mut dyn DrawTarget) {
        let Some(layers) = self.layers.as_mut() else {
            return;
        };
        let state = &mut self.state;
        let cfg = &self.config;
        let surface = state.surface.current();
        let palette = state.palette;

        target.begin_frame(surface);
        draw_background(target, surface, &palette);
        layers.grid.draw(target, surface, &palette);
        draw_title(target, &palette, &cfg.title);
        layers
            .menu
            .render(target, &palette, state.hovered, &mut state.rng);
        layers.scatter.draw(target, &palette);
        layers.images.render(target, surface);

        layers.ambient.step(surface, &mut state.rng);
        layers.ambient.render(target, surface, &palette);

        draw_central_text(target, surface, &palette, &cfg.central_text);

        Emblem::new(
            state.cursor,
            cfg.trail.cursor_size,
            palette.emblem_petal,
            palette.emblem_center,
        )
        .draw(target);
        layers.trail.render(target);
        layers.trail.step();

        draw_quotes(
            target,
            surface,
            &palette,
            &cfg.quotes,
            state.glitch,
            &mut state.rng,
        );

        layers.rain.step(surface, &mut state.rng);
        layers.rain.render(target, surface, &palette);

        draw_copyright(target, surface, palette.muted_text, &cfg.copyright);
        target.end_frame();
    }

    /// Lifecycle status.
    pub fn status(&self) -> SceneStatus {
        self.status
    }

    /// Shared state.
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Configuration the scene was built from.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current surface size.
    pub fn surface(&self) -> Surface {
        self.state.surface.current()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Token of the current run.
    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.token.as_ref()
    }

    /// Ambient motes, once started.
    pub fn ambient(&self) -> Option<&AmbientField> {
        self.layers.as_ref().map(|l| &l.ambient)
    }

    /// Emblem trail, once started.
    pub fn trail(&self) -> Option<&EmblemTrail> {
        self.layers.as_ref().map(|l| &l.trail)
    }

    /// Glyph rain, once started.
    pub fn rain(&self) -> Option<&GlyphRain> {
        self.layers.as_ref().map(|l| &l.rain)
    }

    /// Menu, once started.
    pub fn menu(&self) -> Option<&Menu> {
        self.layers.as_ref().map(|l| &l.menu)
    }

    /// Image layers, once started.
    pub fn images(&self) -> Option<&ImageLayers> {
        self.layers.as_ref().map(|l| &l.images)
    }

    /// Grid layout, once started.
    pub fn grid(&self) -> Option<&GridLayout> {
        self.layers.as_ref().map(|l| &l.grid)
    }

    /// Glyph scatter, once started.
    pub fn scatter(&self) -> Option<&GlyphScatter> {
        self.layers.as_ref().map(|l| &l.scatter)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/orchestrator.rs"]
mod tests;

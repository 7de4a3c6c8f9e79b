//! Ambient motes and the click-spawned emblem trail.

use crate::assets::color::{Color, Palette};
use crate::canvas::{DrawTarget, Paint, circle};
use crate::foundation::core::{Point, Surface};
use crate::foundation::rng::SceneRng;
use crate::scene::config::{AmbientConfig, TrailConfig};
use crate::scene::emblem::Emblem;

/// One drifting mote.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientParticle {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Radius.
    pub size: f64,
    /// Fall speed per step.
    pub speed: f64,
}

/// Fixed population of motes falling down the surface.
///
/// The population never changes after construction; particles that leave the bottom edge are
/// recycled to the top at a fresh random x.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientField {
    motes: Vec<AmbientParticle>,
}

impl AmbientField {
    /// Scatter `cfg.count` motes uniformly over `surface`.
    pub fn new(surface: Surface, cfg: &AmbientConfig, rng: &mut SceneRng) -> Self {
        let motes = (0..cfg.count)
            .map(|_| AmbientParticle {
                x: rng.below(surface.w()),
                y: rng.below(surface.h()),
                size: rng.span(cfg.size_min, cfg.size_span),
                speed: rng.span(cfg.speed_min, cfg.speed_span),
            })
            .collect();
        Self { motes }
    }

    /// Motes in draw order.
    pub fn motes(&self) -> &[AmbientParticle] {
        &self.motes
    }

    /// Population size.
    pub fn len(&self) -> usize {
        self.motes.len()
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.motes.is_empty()
    }

    /// Advance every mote by its speed, recycling those past the bottom edge.
    pub fn step(&mut self, surface: Surface, rng: &mut SceneRng) {
        let h = surface.h();
        for m in &mut self.motes {
            m.y += m.speed;
            if m.y > h {
                m.y = 0.0;
                m.x = rng.below(surface.w());
            }
        }
    }

    /// Fill each mote as a translucent circle.
    pub fn render(&self, target: &mut dyn DrawTarget, surface: Surface, palette: &Palette) {
        if surface.is_empty() {
            return;
        }
        target.save();
        target.set_fill(Paint::Solid(palette.mote));
        for m in &self.motes {
            target.fill_path(&circle(Point::new(m.x, m.y), m.size));
        }
        target.restore();
    }
}

/// One trail emblem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailParticle {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Emblem size.
    pub size: f64,
    /// Remaining frames.
    pub life: u32,
    /// Frames at spawn.
    pub max_life: u32,
    /// Petal color.
    pub petal: Color,
    /// Center color.
    pub core: Color,
    /// Horizontal velocity.
    pub vx: f64,
    /// Vertical velocity.
    pub vy: f64,
}

impl TrailParticle {
    /// Fade factor `life / max_life`.
    pub fn alpha(&self) -> f64 {
        if self.max_life == 0 {
            return 0.0;
        }
        f64::from(self.life) / f64::from(self.max_life)
    }
}

/// Emblems spawned in bursts on click that drift and fade out.
#[derive(Clone, Debug, PartialEq)]
pub struct EmblemTrail {
    cfg: TrailConfig,
    particles: Vec<TrailParticle>,
}

impl EmblemTrail {
    /// Empty trail.
    pub fn new(cfg: &TrailConfig) -> Self {
        Self {
            cfg: cfg.clone(),
            particles: Vec::new(),
        }
    }

    /// Live particles in spawn order.
    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particle is alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Append a burst of fully formed particles around `origin`.
    pub fn spawn_burst(&mut self, origin: Point, palette: &Palette, rng: &mut SceneRng) {
        let half_jitter = self.cfg.jitter / 2.0;
        let life = self.cfg.life;
        self.particles.reserve(self.cfg.burst);
        for _ in 0..self.cfg.burst {
            self.particles.push(TrailParticle {
                x: origin.x + rng.centered(half_jitter),
                y: origin.y + rng.centered(half_jitter),
                size: rng.span(self.cfg.size_min, self.cfg.size_span),
                life,
                max_life: life,
                petal: palette.emblem_petal,
                core: palette.emblem_center,
                vx: rng.centered(self.cfg.drift_x / 2.0),
                vy: -rng.below(self.cfg.drift_y),
            });
        }
        tracing::trace!(live = self.particles.len(), "trail burst");
    }

    /// Move every particle, age it by one frame and drop the expired ones.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    /// Draw each live particle faded by its remaining life.
    pub fn render(&self, target: &mut dyn DrawTarget) {
        for p in &self.particles {
            Emblem::new(Point::new(p.x, p.y), p.size, p.petal, p.core)
                .with_alpha(p.alpha())
                .draw(target);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/particles.rs"]
mod tests;

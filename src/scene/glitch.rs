use std::time::Duration;

use crate::scene::config::GlitchConfig;

/// Periodic glitch window measured from scene start.
///
/// The first window opens one full period after start, then every period for `active` long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlitchClock {
    period: Duration,
    active: Duration,
}

impl GlitchClock {
    /// Clock for the configured period and window.
    pub fn new(cfg: &GlitchConfig) -> Self {
        Self {
            period: Duration::from_millis(cfg.period_ms),
            active: Duration::from_millis(cfg.active_ms),
        }
    }

    /// Whether the glitch is on `elapsed` after start.
    pub fn is_active(&self, elapsed: Duration) -> bool {
        let period = self.period.as_millis();
        if period == 0 {
            return false;
        }
        let ms = elapsed.as_millis();
        ms >= period && ms % period < self.active.as_millis()
    }
}

impl Default for GlitchClock {
    fn default() -> Self {
        Self::new(&GlitchConfig::default())
    }
}

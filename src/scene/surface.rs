use crate::foundation::core::Surface;

/// Owns the drawing-surface dimensions.
///
/// Resizing only updates the size; particle and layout state generated at initialization is
/// left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceManager {
    surface: Surface,
    initialized: bool,
}

impl SurfaceManager {
    /// Manager with a zero-size, uninitialized surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the viewport size at scene start.
    pub fn initialize(&mut self, viewport: Surface) {
        self.surface = viewport;
        self.initialized = true;
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "surface initialized"
        );
    }

    /// Track a viewport resize.
    pub fn on_viewport_resize(&mut self, width: u32, height: u32) {
        self.surface = Surface::new(width, height);
        tracing::trace!(width, height, "surface resized");
    }

    /// Current size.
    pub fn current(&self) -> Surface {
        self.surface
    }

    /// Whether [`SurfaceManager::initialize`] ran.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

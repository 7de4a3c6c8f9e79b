//! Environment the scene runs in: viewport size, input events and frame scheduling.

pub mod headless;

use std::time::Duration;

use crate::foundation::cancel::CancelToken;
use crate::foundation::core::Surface;

pub use headless::HeadlessHost;

/// Input delivered to registered listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to surface coordinates.
    PointerMove {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// Primary button click at the current pointer position.
    Click,
    /// Viewport resized.
    Resize {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
}

impl InputEvent {
    /// Listener kind this event is routed to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::Click => EventKind::Click,
            Self::Resize { .. } => EventKind::Resize,
        }
    }
}

/// Listener category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// [`InputEvent::PointerMove`].
    PointerMove,
    /// [`InputEvent::Click`].
    Click,
    /// [`InputEvent::Resize`].
    Resize,
}

/// Handle of a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Handle of a scheduled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequest(pub u64);

/// A scheduled frame continuation as handed back to the scene.
#[derive(Clone, Debug)]
pub struct FrameTick {
    /// Request this tick fulfils.
    pub request: FrameRequest,
    /// Token of the run that scheduled it.
    pub token: CancelToken,
}

/// Host environment of a scene.
///
/// All calls happen on the scene's thread; a host never runs a tick re-entrantly.
pub trait Host {
    /// Current drawing-surface size, `None` while no surface is attached.
    fn surface_size(&self) -> Option<Surface>;

    /// Monotonic time.
    fn now(&self) -> Duration;

    /// Start delivering events of `kind` to the scene.
    fn add_listener(&mut self, kind: EventKind) -> ListenerId;

    /// Stop delivering events for `id`. Unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);

    /// Schedule one frame carrying `token`.
    fn request_frame(&mut self, token: CancelToken) -> FrameRequest;

    /// Drop a scheduled frame if it has not fired yet.
    fn cancel_frame(&mut self, request: FrameRequest);
}

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use crate::canvas::DrawTarget;
use crate::foundation::cancel::CancelToken;
use crate::foundation::core::Surface;
use crate::host::{EventKind, FrameRequest, FrameTick, Host, InputEvent, ListenerId};
use crate::scene::orchestrator::Scene;

/// Default frame interval (60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// In-process host with a queued event stream and a manual clock.
///
/// Holds at most one pending frame; [`HeadlessHost::run_frame`] delivers queued events to the
/// registered listeners, advances the clock by one interval and fires the pending frame.
#[derive(Debug)]
pub struct HeadlessHost {
    surface: Option<Surface>,
    clock: Duration,
    interval: Duration,
    next_id: u64,
    listeners: BTreeMap<ListenerId, EventKind>,
    queue: VecDeque<InputEvent>,
    pending: Option<FrameTick>,
}

impl HeadlessHost {
    /// Host with an attached `width`×`height` surface.
    pub fn new(width: u32, height: u32) -> Self {
        let mut host = Self::detached();
        host.surface = Some(Surface::new(width, height));
        host
    }

    /// Host without a surface; scenes cannot start until [`HeadlessHost::attach`].
    pub fn detached() -> Self {
        Self {
            surface: None,
            clock: Duration::ZERO,
            interval: FRAME_INTERVAL,
            next_id: 0,
            listeners: BTreeMap::new(),
            queue: VecDeque::new(),
            pending: None,
        }
    }

    /// Replace the frame interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Attach a surface.
    pub fn attach(&mut self, surface: Surface) {
        self.surface = Some(surface);
    }

    /// Queue a pointer move.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.queue.push_back(InputEvent::PointerMove { x, y });
    }

    /// Queue a click.
    pub fn click(&mut self) {
        self.queue.push_back(InputEvent::Click);
    }

    /// Resize the surface and queue the matching event.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface = Some(Surface::new(width, height));
        self.queue.push_back(InputEvent::Resize { width, height });
    }

    /// Whether a listener of `kind` is registered.
    pub fn has_listener(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// The scheduled frame, if any.
    pub fn pending_tick(&self) -> Option<&FrameTick> {
        self.pending.as_ref()
    }

    /// Remove and return the scheduled frame without firing it.
    pub fn take_pending_tick(&mut self) -> Option<FrameTick> {
        self.pending.take()
    }

    /// Deliver every queued event; events without a matching listener are dropped.
    pub fn dispatch_events(&mut self, scene: &mut Scene) {
        while let Some(event) = self.queue.pop_front() {
            if self.has_listener(event.kind()) {
                scene.handle_event(event);
            } else {
                tracing::trace!(?event, "no listener, event dropped");
            }
        }
    }

    /// Deliver events, advance the clock and fire the pending frame.
    ///
    /// Returns whether a frame fired.
    pub fn run_frame(&mut self, scene: &mut Scene, target: &mut dyn DrawTarget) -> bool {
        self.dispatch_events(scene);
        let Some(tick) = self.pending.take() else {
            return false;
        };
        self.clock += self.interval;
        scene.on_frame(tick, self, target);
        true
    }

    /// Run up to `n` frames, stopping early once nothing is scheduled. Returns frames fired.
    pub fn run_frames(&mut self, scene: &mut Scene, target: &mut dyn DrawTarget, n: usize) -> usize {
        let mut fired = 0;
        for _ in 0..n {
            if !self.run_frame(scene, target) {
                break;
            }
            fired += 1;
        }
        fired
    }
}

impl Host for HeadlessHost {
    fn surface_size(&self) -> Option<Surface> {
        self.surface
    }

    fn now(&self) -> Duration {
        self.clock
    }

    fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn request_frame(&mut self, token: CancelToken) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        if let Some(old) = self.pending.replace(FrameTick { request, token }) {
            tracing::trace!(request = old.request.0, "pending frame superseded");
        }
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending.as_ref().is_some_and(|t| t.request == request) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;

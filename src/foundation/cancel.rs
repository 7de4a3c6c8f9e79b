use std::cell::Cell;
use std::rc::Rc;

/// One-shot cancellation flag shared between a scene and its scheduled frame continuations.
///
/// Clones observe the same flag. Once cancelled it never resets; a new token is minted per run.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every clone of this token. Repeated calls are no-ops.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether [`CancelToken::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Whether both handles refer to the same underlying flag.
    pub fn same_as(&self, other: &CancelToken) -> bool {
        Rc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/cancel.rs"]
mod tests;

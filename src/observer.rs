//! Observer contract for committed state changes.

/// Receiver side of store notifications.
///
/// Registered via [`Store::add_observer`](crate::Store::add_observer).
/// Called synchronously, in registration order, after every committed
/// (post-init, non-batched) state change. Implementations must treat the
/// state as read-only and must not assume how many times they will fire
/// over a component's lifetime.
pub trait StoreObserver<S>: Send + Sync {
    /// The store committed `state`.
    fn on_state_changed(&self, state: &S);
}

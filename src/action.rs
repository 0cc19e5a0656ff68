//! Base trait for actions dispatched through a store.

/// Marker trait for action objects.
///
/// An action is a named unit of state-change intent:
/// - User input (clicks, key presses)
/// - System events (responses arriving, timers firing)
///
/// Actions are consumed exactly once by a [`Reducer`](crate::Reducer) to
/// produce the next state. `Send + 'static` lets deferred work carry an
/// action across tasks before dispatching it.
pub trait Action: Send + 'static {}

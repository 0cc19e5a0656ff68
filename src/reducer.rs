//! Reducer trait: the single place state transitions happen.

use crate::action::Action;
use crate::state::StoreState;

/// Transforms state in response to actions.
///
/// Must be a pure function: `(State, Action) -> State`, no side effects.
/// Taking the previous state by value and returning the next one makes
/// in-place mutation of an already-observed state unrepresentable, which
/// is what keeps identity-based change detection downstream honest.
///
/// The `'static` bound lets stores, dispatchers, and queued deferred
/// actions parameterized by a reducer live inside trait objects.
pub trait Reducer: 'static {
    /// The state type this reducer operates on.
    type State: StoreState;

    /// The action type this reducer handles.
    type Action: Action;

    /// Produce the next state from the current one and an action.
    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}

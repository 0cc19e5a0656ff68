//! Unidirectional data-flow state container.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Observers
//!    ↑                               │
//!    └────────── dispatch ───────────┘
//! ```
//!
//! - [`Store`] holds one state value, applies a pure [`Reducer`] to every
//!   dispatched [`Action`], and notifies [`StoreObserver`]s synchronously
//!   after each committed change.
//! - Deferred actions receive a clonable [`Dispatcher`] and may call it
//!   any number of times, immediately or from a later task, keeping
//!   asynchronous multi-step mutations outside the store itself.
//! - [`StoreClient`] mirrors named slices of state into a per-component
//!   map, rewriting a slice only when its identity actually changed
//!   ([`WatchedValue`]).
//!
//! Dispatching before [`Store::init`] is legal: actions queue and replay,
//! in order, once the real initial state arrives. Batch updates
//! ([`Store::begin_batch_update`]) suppress notifications across a run of
//! reductions and fire a single one at the end.

mod action;
mod client;
mod error;
mod observer;
mod reducer;
mod state;
mod store;
mod watch;

pub use action::Action;
pub use client::StoreClient;
pub use error::WatchError;
pub use observer::StoreObserver;
pub use reducer::Reducer;
pub use state::StoreState;
pub use store::{DeferredAction, Dispatcher, Store};
pub use watch::WatchedValue;

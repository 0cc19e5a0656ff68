//! Per-component state mirror.
//!
//! A `StoreClient` gives a host component a declarative way to mirror
//! named slices of store state into local values, diffed by identity so
//! only slices that actually changed are rewritten, and to dispatch
//! actions back without holding the store directly.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::WatchError;
use crate::observer::StoreObserver;
use crate::reducer::Reducer;
use crate::store::{Dispatcher, Store};
use crate::watch::WatchedValue;

/// One registered watch: recomputes its slice from incoming state and
/// keeps the last value that differed.
trait WatchSlot<S>: Send {
    /// Recompute from `state`; true when the mirrored value was replaced.
    fn refresh(&mut self, state: &S) -> bool;

    /// The mirrored value, type-erased. `None` until a getter has
    /// produced one.
    fn value_any(&self) -> Option<&(dyn Any + Send)>;
}

struct TypedSlot<S, V> {
    getter: Box<dyn Fn(&S) -> Option<V> + Send>,
    value: Option<V>,
}

impl<S, V: WatchedValue> WatchSlot<S> for TypedSlot<S, V> {
    fn refresh(&mut self, state: &S) -> bool {
        // `None` from the getter means "not ready": skip, never clear.
        let Some(new) = (self.getter)(state) else {
            return false;
        };
        if matches!(&self.value, Some(current) if current.same_as(&new)) {
            return false;
        }
        self.value = Some(new);
        true
    }

    fn value_any(&self) -> Option<&(dyn Any + Send)> {
        self.value.as_ref().map(|value| value as &(dyn Any + Send))
    }
}

struct WatchEntry<S> {
    key: String,
    slot: Box<dyn WatchSlot<S>>,
}

/// Binding between one host component and a [`Store`].
///
/// Explicitly composed: the host owns the `Arc<StoreClient>`, delegates
/// watching/dispatching to it, and the same `Arc` is what [`attach`]
/// registers as the store observer. The binding has exactly two states —
/// detached (watches may exist, no notifications arrive) and attached —
/// and may cycle between them any number of times without leaking
/// observer registrations.
///
/// Watch getters run inside the notification pass and must be pure reads
/// of the state; they must not call back into the binding or the store.
///
/// [`attach`]: StoreClient::attach
pub struct StoreClient<R: Reducer> {
    store: Store<R>,
    /// Self-reference for observer registration; the binding always lives
    /// inside the `Arc` handed out by [`new`](StoreClient::new).
    weak_self: Weak<StoreClient<R>>,
    watches: Mutex<Vec<WatchEntry<R::State>>>,
    changed: Mutex<Vec<String>>,
    attached: AtomicBool,
}

impl<R: Reducer> StoreClient<R> {
    pub fn new(store: Store<R>) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            store,
            weak_self: weak.clone(),
            watches: Mutex::new(Vec::new()),
            changed: Mutex::new(Vec::new()),
            attached: AtomicBool::new(false),
        })
    }

    /// Mirror `getter(state)` under `key`.
    ///
    /// Re-watching an existing key replaces the previous registration,
    /// mirrored value included; the slot reads as not-ready until the
    /// next pass delivers a value through the new getter.
    pub fn watch<V, F>(&self, key: impl Into<String>, getter: F)
    where
        V: WatchedValue,
        F: Fn(&R::State) -> Option<V> + Send + 'static,
    {
        let key = key.into();
        let slot: Box<dyn WatchSlot<R::State>> = Box::new(TypedSlot {
            getter: Box::new(getter),
            value: None,
        });
        let mut watches = self.watches.lock();
        match watches.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.slot = slot,
            None => watches.push(WatchEntry { key, slot }),
        }
    }

    /// Typed read of the mirrored value under `key`.
    pub fn get<V: WatchedValue + Clone>(&self, key: &str) -> Result<V, WatchError> {
        let watches = self.watches.lock();
        let entry = watches
            .iter()
            .find(|entry| entry.key == key)
            .ok_or_else(|| WatchError::NotWatched {
                key: key.to_string(),
            })?;
        let value = entry.slot.value_any().ok_or_else(|| WatchError::NotReady {
            key: key.to_string(),
        })?;
        value
            .downcast_ref::<V>()
            .cloned()
            .ok_or_else(|| WatchError::TypeMismatch {
                key: key.to_string(),
            })
    }

    /// Forward to [`Store::dispatch`].
    pub fn dispatch(&self, action: impl Into<Option<R::Action>>) {
        self.store.dispatch(action);
    }

    /// Forward to [`Store::dispatch_async`].
    pub fn dispatch_async(&self, f: impl FnOnce(Dispatcher<R>) + Send + 'static) {
        self.store.dispatch_async(f);
    }

    /// Pull a snapshot now if the store is already initialized; no-op
    /// otherwise. For hosts that attach after `init` already fired its
    /// one notification.
    pub fn update_from_store(&self) {
        if self.store.is_initialized() {
            let state = self.store.state();
            self.on_state_changed(&state);
        }
    }

    /// Register this binding as a store observer. Returns `false` (and
    /// does nothing) when already attached.
    pub fn attach(&self) -> bool {
        if self.attached.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.store.add_observer(self.strong_self());
        true
    }

    /// Unregister from the store. Returns `false` when not attached.
    pub fn detach(&self) -> bool {
        if !self.attached.swap(false, Ordering::SeqCst) {
            return false;
        }
        self.store.remove_observer(&self.strong_self())
    }

    fn strong_self(&self) -> Arc<dyn StoreObserver<R::State>> {
        self.weak_self
            .upgrade()
            .expect("binding always lives in an Arc")
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// Keys rewritten by notification passes since the last call. The
    /// host's re-render hook: drain and redraw only what moved.
    pub fn take_changed(&self) -> Vec<String> {
        std::mem::take(&mut *self.changed.lock())
    }

    /// The bound store.
    pub fn store(&self) -> &Store<R> {
        &self.store
    }
}

impl<R: Reducer> StoreObserver<R::State> for StoreClient<R> {
    fn on_state_changed(&self, state: &R::State) {
        let mut rewritten = Vec::new();
        {
            let mut watches = self.watches.lock();
            for entry in watches.iter_mut() {
                if entry.slot.refresh(state) {
                    rewritten.push(entry.key.clone());
                }
            }
        }
        if !rewritten.is_empty() {
            tracing::trace!(keys = ?rewritten, "watched slices rewritten");
            self.changed.lock().extend(rewritten);
        }
    }
}

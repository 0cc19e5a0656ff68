//! The state container: one state value, a pure reducer, and synchronous
//! observer notification after each committed change.
//!
//! A `Store` is a cheap clonable handle; every clone points at the same
//! state. The lock serializing reductions is never held while user code
//! runs (observers, deferred actions), so both may dispatch re-entrantly.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::observer::StoreObserver;
use crate::reducer::Reducer;

/// A deferred unit of work: receives a [`Dispatcher`] and may invoke it
/// zero or more times, immediately or from a later task. This is the shape
/// pre-init dispatches are queued in.
pub type DeferredAction<R> = Box<dyn FnOnce(Dispatcher<R>) + Send>;

struct StoreInner<R: Reducer> {
    data: R::State,
    /// Set as soon as `init` begins; guards against a second `init`.
    init_called: bool,
    /// Set once the pre-init queue has drained; gates notifications.
    initialized: bool,
    batch_depth: u32,
    queued_actions: VecDeque<DeferredAction<R>>,
    observers: Vec<Arc<dyn StoreObserver<R::State>>>,
}

/// Unidirectional state container.
///
/// Holds a single state value, applies [`Reducer::reduce`] to every
/// dispatched action, and notifies registered observers synchronously
/// after each committed change. Actions dispatched before [`init`] are
/// queued and replayed, in order, when the initial state arrives.
///
/// [`init`]: Store::init
pub struct Store<R: Reducer> {
    inner: Arc<Mutex<StoreInner<R>>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reducer> Store<R> {
    /// Create an uninitialized store holding the placeholder
    /// `R::State::default()`.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                data: R::State::default(),
                init_called: false,
                initialized: false,
                batch_depth: 0,
                queued_actions: VecDeque::new(),
                observers: Vec::new(),
            })),
        }
    }

    /// Replace the placeholder with `initial`, replay every action queued
    /// before this point in FIFO order against the evolving state, then
    /// notify observers exactly once with the final state.
    ///
    /// A second call is ignored and returns `false`.
    pub fn init(&self, initial: R::State) -> bool {
        let queued = {
            let mut inner = self.inner.lock();
            if inner.init_called {
                tracing::warn!("store already initialized, ignoring init");
                return false;
            }
            inner.init_called = true;
            inner.data = initial;
            inner.queued_actions.len()
        };

        // Replay the queue. Reductions stay silent while `initialized` is
        // false; the single notification below covers the whole replay.
        // Deferred actions may queue further work mid-replay, so loop
        // until the queue is observed empty under the lock.
        loop {
            let drained: Vec<DeferredAction<R>> = {
                let mut inner = self.inner.lock();
                if inner.queued_actions.is_empty() {
                    inner.initialized = true;
                    break;
                }
                inner.queued_actions.drain(..).collect()
            };
            let dispatcher = self.dispatcher();
            for action in drained {
                action(dispatcher.clone());
            }
        }

        tracing::debug!(replayed = queued, "store initialized");
        notify(&self.inner);
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock().initialized
    }

    /// Clone of the current state.
    pub fn state(&self) -> R::State {
        self.inner.lock().data.clone()
    }

    /// Register `observer` for committed changes. Registration order is
    /// notification order; nothing deduplicates, so registering the same
    /// observer twice means it fires twice. A panicking observer unwinds
    /// through the notification pass and starves the observers after it.
    pub fn add_observer(&self, observer: Arc<dyn StoreObserver<R::State>>) {
        self.inner.lock().observers.push(observer);
    }

    /// Remove the first registration of `observer`, matched by allocation
    /// identity. Returns whether a registration was removed; removing an
    /// observer that was never added is a `false` no-op.
    pub fn remove_observer(&self, observer: &Arc<dyn StoreObserver<R::State>>) -> bool {
        let mut inner = self.inner.lock();
        let position = inner.observers.iter().position(|registered| {
            std::ptr::addr_eq(Arc::as_ptr(registered), Arc::as_ptr(observer))
        });
        match position {
            Some(index) => {
                inner.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Enter batch mode: reductions keep applying, observers stay quiet
    /// until the matching [`end_batch_update`](Store::end_batch_update).
    /// Batches nest; only the outermost end resumes notifications.
    pub fn begin_batch_update(&self) {
        self.inner.lock().batch_depth += 1;
    }

    /// Leave batch mode. When the outermost batch ends, forces exactly one
    /// notification with the then-current state. Ending with no batch
    /// active still forces a notification.
    pub fn end_batch_update(&self) {
        let resumed = {
            let mut inner = self.inner.lock();
            inner.batch_depth = inner.batch_depth.saturating_sub(1);
            inner.batch_depth == 0
        };
        if resumed {
            notify(&self.inner);
        }
    }

    /// Dispatch a single action. `None` is a legal no-op: nothing reduces,
    /// nobody is notified.
    ///
    /// Sugar over [`dispatch_async`](Store::dispatch_async) with a
    /// one-shot deferred action, so pre-init dispatches queue like any
    /// other deferred work.
    pub fn dispatch(&self, action: impl Into<Option<R::Action>>) {
        let action = action.into();
        self.dispatch_async(move |dispatcher| dispatcher.dispatch(action));
    }

    /// Hand `f` a raw-dispatch handle: immediately and synchronously if
    /// the store is initialized, otherwise once [`init`](Store::init)
    /// replays the queue. `f` may call the handle any number of times,
    /// from this call stack or from a later task; the store places no
    /// restriction on timing once the handle is out.
    pub fn dispatch_async(&self, f: impl FnOnce(Dispatcher<R>) + Send + 'static) {
        {
            let mut inner = self.inner.lock();
            if !inner.initialized {
                inner.queued_actions.push_back(Box::new(f));
                return;
            }
        }
        f(self.dispatcher());
    }

    /// The raw-dispatch handle deferred actions receive. Cheap to clone
    /// and `Send`, so it can move into spawned tasks.
    pub fn dispatcher(&self) -> Dispatcher<R> {
        Dispatcher {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Raw-dispatch handle into a [`Store`].
///
/// Handed to deferred actions; keeps the store alive while any holder can
/// still dispatch into it.
pub struct Dispatcher<R: Reducer> {
    inner: Arc<Mutex<StoreInner<R>>>,
}

impl<R: Reducer> Clone for Dispatcher<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Dispatcher<R> {
    /// Apply `action` through the reducer. `None` returns immediately
    /// without touching state or observers. Observers are notified only
    /// when the store is initialized and no batch is active.
    pub fn dispatch(&self, action: impl Into<Option<R::Action>>) {
        let Some(action) = action.into() else {
            return;
        };
        let committed = {
            let mut inner = self.inner.lock();
            let previous = std::mem::take(&mut inner.data);
            inner.data = R::reduce(previous, action);
            inner.initialized && inner.batch_depth == 0
        };
        if committed {
            notify(&self.inner);
        }
    }
}

/// One notification pass: snapshot observers and state under the lock,
/// release it, then call out in registration order. Observers added or
/// removed during a pass take effect from the next pass.
fn notify<R: Reducer>(inner: &Arc<Mutex<StoreInner<R>>>) {
    let (observers, state) = {
        let guard = inner.lock();
        (guard.observers.clone(), guard.data.clone())
    };
    tracing::trace!(observers = observers.len(), "notifying observers");
    for observer in &observers {
        observer.on_state_changed(&state);
    }
}

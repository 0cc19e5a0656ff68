//! Shared test fixtures: a small document-editing domain with an
//! Arc-shared slice, plus a recording observer.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use unistore::{Action, Reducer, StoreObserver, StoreState};

/// State under test: a plain counter, an `Arc`-shared tag list, and an
/// optional title, so tests can exercise value-diffed, identity-diffed,
/// and not-ready-skipped slices in one domain.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DocState {
    pub revision: u64,
    pub tags: Arc<Vec<String>>,
    pub title: Option<String>,
}

impl StoreState for DocState {}

#[derive(Clone, Debug)]
pub enum DocAction {
    Bump,
    BumpBy(u64),
    AddTag(String),
    SetTitle(String),
}

impl Action for DocAction {}

pub struct DocReducer;

impl Reducer for DocReducer {
    type State = DocState;
    type Action = DocAction;

    fn reduce(state: DocState, action: DocAction) -> DocState {
        match action {
            DocAction::Bump => DocState {
                revision: state.revision + 1,
                ..state
            },
            DocAction::BumpBy(n) => DocState {
                revision: state.revision + n,
                ..state
            },
            DocAction::AddTag(tag) => {
                let mut tags = state.tags.as_ref().clone();
                tags.push(tag);
                DocState {
                    tags: Arc::new(tags),
                    ..state
                }
            }
            DocAction::SetTitle(title) => DocState {
                title: Some(title),
                ..state
            },
        }
    }
}

/// Observer that records every state it is handed.
#[derive(Default)]
pub struct Recorder {
    seen: Mutex<Vec<DocState>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn last(&self) -> Option<DocState> {
        self.seen.lock().last().cloned()
    }

    pub fn states(&self) -> Vec<DocState> {
        self.seen.lock().clone()
    }
}

impl StoreObserver<DocState> for Recorder {
    fn on_state_changed(&self, state: &DocState) {
        self.seen.lock().push(state.clone());
    }
}

/// Install a fmt subscriber once, honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

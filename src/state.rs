//! Base trait for state values held by a store.

/// Marker trait for store state.
///
/// State values should be:
/// - Immutable (Clone to derive the next state, never patch the old one)
/// - Self-contained (everything downstream consumers need to react)
/// - Comparable (PartialEq for detecting changes)
///
/// `Default` supplies the placeholder a [`Store`](crate::Store) holds
/// before [`init`](crate::Store::init) delivers the real initial state.
pub trait StoreState: Clone + PartialEq + Default + Send + 'static {}

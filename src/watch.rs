//! Identity comparison for watched state slices.

use std::sync::Arc;

/// Decides whether a freshly computed watch value counts as unchanged
/// against the one a [`StoreClient`](crate::StoreClient) already mirrors.
///
/// Primitives and strings compare by value; shared slices (`Arc`) compare
/// by allocation, never by contents. A reducer that allocates a new `Arc`
/// only for the slices it actually changed gets precise change detection;
/// one that rebuilds unchanged slices causes spurious rewrites, never
/// missed ones.
pub trait WatchedValue: Send + 'static {
    /// True when `other` should not be treated as a change.
    fn same_as(&self, other: &Self) -> bool;
}

macro_rules! watched_by_value {
    ($($ty:ty),* $(,)?) => {$(
        impl WatchedValue for $ty {
            fn same_as(&self, other: &Self) -> bool {
                self == other
            }
        }
    )*};
}

watched_by_value!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str,
);

impl<T: ?Sized + Send + Sync + 'static> WatchedValue for Arc<T> {
    /// Same allocation, not equal contents.
    fn same_as(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(self), Arc::as_ptr(other))
    }
}

impl<T: WatchedValue> WatchedValue for Option<T> {
    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_as(b),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_compare_by_value() {
        assert!(3_u64.same_as(&3));
        assert!(!3_u64.same_as(&4));
        assert!("a".to_string().same_as(&"a".to_string()));
    }

    #[test]
    fn arcs_compare_by_allocation() {
        let a = Arc::new(vec![1, 2, 3]);
        let same = Arc::clone(&a);
        let equal_contents = Arc::new(vec![1, 2, 3]);
        assert!(a.same_as(&same));
        assert!(!a.same_as(&equal_contents));
    }

    #[test]
    fn unsized_arcs_compare_by_allocation() {
        let a: Arc<str> = Arc::from("slice");
        let same = Arc::clone(&a);
        let rebuilt: Arc<str> = Arc::from("slice");
        assert!(a.same_as(&same));
        assert!(!a.same_as(&rebuilt));
    }

    #[test]
    fn options_delegate_to_inner() {
        assert!(Some(1_u32).same_as(&Some(1)));
        assert!(!Some(1_u32).same_as(&Some(2)));
        assert!(None::<u32>.same_as(&None));
        assert!(!Some(1_u32).same_as(&None));
    }

    #[test]
    fn nan_is_never_the_same() {
        // Float identity follows IEEE equality, so a NaN slice always
        // registers as changed.
        assert!(!f64::NAN.same_as(&f64::NAN));
    }
}

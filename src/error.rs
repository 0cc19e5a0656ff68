//! Error types for typed reads out of a client binding.

use thiserror::Error;

/// Errors from [`StoreClient::get`](crate::StoreClient::get).
///
/// Store misuse itself stays lenient (`bool` returns, silent no-ops);
/// these errors cover the one surface where silence would hide a real
/// caller bug: reading a mirrored value back out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchError {
    /// No watch was registered under this key.
    #[error("no watch registered for '{key}'")]
    NotWatched { key: String },

    /// The watch exists but no value has been delivered yet: either no
    /// notification pass has run, or the getter has returned `None` on
    /// every pass so far.
    #[error("watch '{key}' has no value yet")]
    NotReady { key: String },

    /// The mirrored value is not of the requested type.
    #[error("watch '{key}' holds a different type")]
    TypeMismatch { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_key() {
        let err = WatchError::NotWatched {
            key: "items".to_string(),
        };
        assert_eq!(err.to_string(), "no watch registered for 'items'");

        let err = WatchError::NotReady {
            key: "items".to_string(),
        };
        assert_eq!(err.to_string(), "watch 'items' has no value yet");
    }
}

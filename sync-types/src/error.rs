//! Error types for the meshsync wire format.

use thiserror::Error;

/// Errors that can occur while encoding or decoding wire messages.
#[derive(Debug, Error)]
pub enum WireError {
    /// MessagePack serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[source] rmp_serde::encode::Error),

    /// MessagePack deserialization failed
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] rmp_serde::decode::Error),

    /// Decoded a different message than the caller expected
    #[error("unexpected message: expected {expected}, got {actual}")]
    UnexpectedMessage {
        /// Expected message kind.
        expected: &'static str,
        /// Kind actually decoded.
        actual: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WireError::UnexpectedMessage {
            expected: "Index",
            actual: "Request",
        };
        assert_eq!(
            err.to_string(),
            "unexpected message: expected Index, got Request"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WireError>();
    }
}

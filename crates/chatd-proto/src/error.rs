//! Error types for the chat line protocol.

use thiserror::Error;

/// Framing-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the configured maximum length.
    ///
    /// Recoverable: the codec skips to the next terminator.
    #[error("line too long: {actual} bytes (limit {limit})")]
    LineTooLong {
        /// Bytes seen before the limit tripped.
        actual: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Invalid UTF-8 bytes in a line.
    #[error("invalid utf-8 at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// Offset of the first invalid byte.
        byte_pos: usize,
        /// Decoder message.
        details: String,
    },

    /// A control character that has no place in a chat line.
    ///
    /// Recoverable: the offending line is dropped whole.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),
}

impl ProtocolError {
    /// Whether the session may keep reading after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::LineTooLong { .. } | Self::IllegalControlChar(_))
    }
}

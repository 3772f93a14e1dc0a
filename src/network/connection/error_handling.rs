//! Error handling utilities for connection management.
//!
//! Classifies inbound framing errors into what the connection does next.

use chatd_proto::ProtocolError;

/// Classification of read errors for appropriate handling.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum ReadErrorAction {
    /// Recoverable line-too-long error - notify and keep reading
    InputTooLong,
    /// Line dropped for a control character - notify and keep reading
    IllegalCharacters,
    /// Undecodable input - disconnect
    FatalProtocolError { error_msg: String },
    /// I/O error - connection is broken, just log and disconnect
    IoError,
}

/// Classify a read error into an actionable category.
pub(super) fn classify_read_error(e: &ProtocolError) -> ReadErrorAction {
    match e {
        ProtocolError::LineTooLong { .. } => ReadErrorAction::InputTooLong,
        ProtocolError::IllegalControlChar(_) => ReadErrorAction::IllegalCharacters,
        ProtocolError::InvalidUtf8 { details, .. } => ReadErrorAction::FatalProtocolError {
            error_msg: format!("Invalid UTF-8 in line: {details}"),
        },
        ProtocolError::Io(_) => ReadErrorAction::IoError,
        // Handle future variants gracefully
        _ => ReadErrorAction::FatalProtocolError {
            error_msg: format!("Protocol error: {e}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_line_too_long() {
        let err = ProtocolError::LineTooLong {
            actual: 5000,
            limit: 4096,
        };
        assert_eq!(classify_read_error(&err), ReadErrorAction::InputTooLong);
    }

    #[test]
    fn test_classify_illegal_control_char() {
        let err = ProtocolError::IllegalControlChar('\u{7}');
        assert_eq!(classify_read_error(&err), ReadErrorAction::IllegalCharacters);
    }

    #[test]
    fn test_classify_invalid_utf8_is_fatal() {
        let err = ProtocolError::InvalidUtf8 {
            byte_pos: 0,
            details: "bad".into(),
        };
        assert!(matches!(
            classify_read_error(&err),
            ReadErrorAction::FatalProtocolError { .. }
        ));
    }

    #[test]
    fn test_classify_io_error() {
        let err = ProtocolError::Io(std::io::Error::from(std::io::ErrorKind::ConnectionReset));
        assert_eq!(classify_read_error(&err), ReadErrorAction::IoError);
    }
}

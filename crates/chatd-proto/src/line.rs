//! Line-based codec for tokio.
//!
//! Reads and writes newline-terminated UTF-8 lines. Decoded lines have the
//! terminator (and a preceding `\r`) stripped; encoded lines get a single `\n`.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::ProtocolError;

/// Default maximum line length in bytes, terminator included.
pub const DEFAULT_MAX_LINE_LEN: usize = 4096;

/// Line codec with a bounded line length.
///
/// An overlong line is reported once as [`ProtocolError::LineTooLong`]; the
/// remainder of that line is discarded and decoding resumes after its
/// terminator.
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Skipping the tail of an overlong line
    discarding: bool,
}

impl LineCodec {
    /// Create a codec with [`DEFAULT_MAX_LINE_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    fn validate_line(s: &str) -> Result<(), ProtocolError> {
        match s.chars().find(|&ch| ch.is_control() && ch != '\t') {
            Some(ch) => Err(ProtocolError::IllegalControlChar(ch)),
            None => Ok(()),
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        loop {
            let newline = src[self.next_index..].iter().position(|b| *b == b'\n');

            if self.discarding {
                match newline {
                    Some(offset) => {
                        src.advance(self.next_index + offset + 1);
                        self.next_index = 0;
                        self.discarding = false;
                        continue;
                    }
                    None => {
                        src.clear();
                        self.next_index = 0;
                        return Ok(None);
                    }
                }
            }

            let Some(offset) = newline else {
                // No complete line yet - remember where we stopped
                self.next_index = src.len();

                if src.len() > self.max_len {
                    let actual = src.len();
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    return Err(ProtocolError::LineTooLong {
                        actual,
                        limit: self.max_len,
                    });
                }
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if line.len() > self.max_len {
                return Err(ProtocolError::LineTooLong {
                    actual: line.len(),
                    limit: self.max_len,
                });
            }

            let mut end = line.len() - 1;
            if end > 0 && line[end - 1] == b'\r' {
                end -= 1;
            }

            let data = std::str::from_utf8(&line[..end]).map_err(|e| ProtocolError::InvalidUtf8 {
                byte_pos: e.valid_up_to(),
                details: e.to_string(),
            })?;

            Self::validate_line(data)?;

            return Ok(Some(data.to_owned()));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        // A final unterminated line is still a line.
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if self.discarding || src.is_empty() {
            src.clear();
            self.discarding = false;
            self.next_index = 0;
            return Ok(None);
        }
        src.extend_from_slice(b"\n");
        self.decode(src)
    }
}

// A single item type keeps `FramedWrite<_, LineCodec>` a `Sink<String>` only.
impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        dst.reserve(msg.len() + 1);
        dst.extend_from_slice(msg.as_bytes());
        dst.extend_from_slice(b"\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("/name Alice\r\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result, Some("/name Alice".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("/list_");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"users\n");
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some("/list_users".to_string())
        );
    }

    #[test]
    fn test_decode_multiple_lines() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("one\ntwo\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("one".to_string()));
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("two".to_string()));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_decode_too_long_then_recovers() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\nok\n");

        let result = codec.decode(&mut buf);
        assert!(matches!(result, Err(ProtocolError::LineTooLong { .. })));
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("ok".to_string()));
    }

    #[test]
    fn test_decode_too_long_partial_discards_tail() {
        let mut codec = LineCodec::with_max_len(8);
        let mut buf = BytesMut::from("0123456789");

        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::LineTooLong { .. })
        ));

        buf.extend_from_slice(b"still the same line\nnext\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("next".to_string()));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"bad \xff byte\n"[..]);

        let err = codec.decode(&mut buf).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidUtf8 { byte_pos: 4, .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_decode_rejects_nul() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"hi\0there\n"[..]);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::IllegalControlChar('\0'))
        ));
    }

    #[test]
    fn test_decode_resumes_after_control_char() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("ding\x07 wake up\nstill here\n");

        let err = codec.decode(&mut buf).unwrap_err();
        assert!(matches!(err, ProtocolError::IllegalControlChar('\x07')));
        assert!(err.is_recoverable());
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("still here".to_string()));
    }

    #[test]
    fn test_decode_allows_tab() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("a\tb\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("a\tb".to_string()));
    }

    #[test]
    fn test_decode_eof_unterminated() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("/exit");
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), Some("/exit".to_string()));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_encode() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec.encode("Goodbye!".to_string(), &mut buf).unwrap();
        assert_eq!(&buf[..], b"Goodbye!\n");
    }
}

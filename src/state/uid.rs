//! Session identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a connection, assigned on accept.
pub type SessionId = String;

/// Generates connection identifiers for log correlation.
///
/// Format: `C` + 6 chars base36 = 7 chars total. Example: "CAAAAAB".
/// Identifiers are never reused within a process.
pub struct SessionIdGenerator {
    counter: AtomicU64,
}

impl SessionIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Generate the next unique id.
    pub fn next(&self) -> SessionId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("C{}", base36_encode_6(n))
    }
}

impl Default for SessionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a number as a 6-character base36 string.
fn base36_encode_6(mut n: u64) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut result = [b'A'; 6];

    for i in (0..6).rev() {
        result[i] = CHARS[(n % 36) as usize];
        n /= 36;
    }

    String::from_utf8_lossy(&result).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let generator = SessionIdGenerator::new();
        assert_eq!(generator.next(), "CAAAAAA");
        assert_eq!(generator.next(), "CAAAAAB");
        assert_eq!(generator.next(), "CAAAAAC");
    }

    #[test]
    fn test_base36_encode() {
        assert_eq!(base36_encode_6(0), "AAAAAA");
        assert_eq!(base36_encode_6(35), "AAAAA9");
        assert_eq!(base36_encode_6(36), "AAAABA");
    }
}

//! Per-session limits configuration.

use serde::Deserialize;
use std::time::Duration;

/// Per-session limits.
///
/// These bound what one client can cost the server: line size, flood rate,
/// and how long the server waits on a slow peer.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum input line length in bytes (default: 4096).
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Maximum display name length in characters (default: 32).
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    /// Sustained lines per second per session (default: 10).
    #[serde(default = "default_message_rate")]
    pub message_rate_per_second: u32,
    /// Burst allowance above the sustained rate (default: 20).
    #[serde(default = "default_message_burst")]
    pub message_burst: u32,
    /// Consecutive flood strikes before disconnect (default: 3).
    #[serde(default = "default_max_flood_violations")]
    pub max_flood_violations: u8,
    /// Outbound queue depth per session (default: 256).
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
    /// Milliseconds to wait for room in a full outbound queue (default: 5000).
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
    /// Milliseconds allowed to flush queued lines on close (default: 2000).
    #[serde(default = "default_flush_timeout_ms")]
    pub flush_timeout_ms: u64,
    /// Seconds allowed to complete `/name`; 0 disables (default: 120).
    #[serde(default = "default_naming_timeout_secs")]
    pub naming_timeout_secs: u64,
}

impl LimitsConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_millis(self.flush_timeout_ms)
    }

    pub fn naming_timeout(&self) -> Option<Duration> {
        (self.naming_timeout_secs > 0).then(|| Duration::from_secs(self.naming_timeout_secs))
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            max_name_length: default_max_name_length(),
            message_rate_per_second: default_message_rate(),
            message_burst: default_message_burst(),
            max_flood_violations: default_max_flood_violations(),
            outbound_queue: default_outbound_queue(),
            send_timeout_ms: default_send_timeout_ms(),
            flush_timeout_ms: default_flush_timeout_ms(),
            naming_timeout_secs: default_naming_timeout_secs(),
        }
    }
}

fn default_max_line_length() -> usize {
    chatd_proto::DEFAULT_MAX_LINE_LEN
}

fn default_max_name_length() -> usize {
    32
}

fn default_message_rate() -> u32 {
    10
}

fn default_message_burst() -> u32 {
    20
}

fn default_max_flood_violations() -> u8 {
    3
}

fn default_outbound_queue() -> usize {
    256
}

fn default_send_timeout_ms() -> u64 {
    5000
}

fn default_flush_timeout_ms() -> u64 {
    2000
}

fn default_naming_timeout_secs() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.max_line_length, 4096);
        assert_eq!(limits.max_name_length, 32);
        assert_eq!(limits.message_rate_per_second, 10);
        assert_eq!(limits.message_burst, 20);
        assert_eq!(limits.max_flood_violations, 3);
        assert_eq!(limits.outbound_queue, 256);
        assert_eq!(limits.send_timeout(), Duration::from_secs(5));
        assert_eq!(limits.flush_timeout(), Duration::from_secs(2));
        assert_eq!(limits.naming_timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn zero_naming_timeout_disables_it() {
        let limits = LimitsConfig {
            naming_timeout_secs: 0,
            ..LimitsConfig::default()
        };
        assert_eq!(limits.naming_timeout(), None);
    }
}

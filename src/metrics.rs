//! Prometheus metrics collection for chatd.
//!
//! Exposed on an HTTP endpoint (see [`crate::http`]) when `metrics_port` is
//! configured. Every `record_*` helper is a no-op until [`init`] runs, so
//! tests and embedders pay nothing.
//!
//! - `chatd_command_total{command}` - Commands processed by verb
//! - `chatd_command_duration_seconds{command}` - Command latency histogram
//! - `chatd_broadcast_fanout` - Recipients per broadcast (histogram)

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Private messages delivered.
pub static PRIVATE_MESSAGES: OnceLock<IntCounter> = OnceLock::new();

/// Lines dropped for a peer whose outbound queue stayed full.
pub static LINES_DROPPED: OnceLock<IntCounter> = OnceLock::new();

/// Flood strikes issued.
pub static FLOOD_STRIKES: OnceLock<IntCounter> = OnceLock::new();

/// History store failures by operation.
pub static HISTORY_FAILURES: OnceLock<IntCounterVec> = OnceLock::new();

/// Moderation actions by verb.
pub static MODERATION_ACTIONS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Gauges (can increase/decrease)
// ========================================================================

/// Currently registered (named) users.
pub static CONNECTED_USERS: OnceLock<IntGauge> = OnceLock::new();

// ========================================================================
// Command metrics
// ========================================================================

/// Commands processed by verb.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command processing latency by verb.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Command errors by verb and error code.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Broadcast fan-out: recipients per broadcast line.
pub static BROADCAST_FANOUT: OnceLock<Histogram> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call once at startup before serving `/metrics`.
pub fn init() {
    let r = registry();

    // Helper macro to register metric
    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                }
            }
        };
    }

    register!(PRIVATE_MESSAGES, IntCounter::new("chatd_private_messages_total", "Private messages delivered"));
    register!(LINES_DROPPED, IntCounter::new("chatd_lines_dropped_total", "Lines dropped due to backpressure"));
    register!(FLOOD_STRIKES, IntCounter::new("chatd_flood_strikes_total", "Flood strikes issued"));
    register!(HISTORY_FAILURES, IntCounterVec::new(Opts::new("chatd_history_failures_total", "History store failures"), &["op"]));
    register!(MODERATION_ACTIONS, IntCounterVec::new(Opts::new("chatd_moderation_actions_total", "Moderation actions by verb"), &["action"]));
    register!(CONNECTED_USERS, IntGauge::new("chatd_connected_users", "Currently registered users"));

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("chatd_command_total", "Commands processed by verb"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("chatd_command_duration_seconds", "Command latency by verb")
            .buckets(vec![0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("chatd_command_errors_total", "Command errors by verb"), &["command", "error"]));
    register!(BROADCAST_FANOUT, Histogram::with_opts(
        HistogramOpts::new("chatd_broadcast_fanout", "Recipients per broadcast line")
            .buckets(vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0])));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions for metric updates
// ============================================================================

/// Record a processed command and its latency.
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(counter) = COMMAND_COUNTER.get() {
        counter.with_label_values(&[command]).inc();
    }
    if let Some(hist) = COMMAND_LATENCY.get() {
        hist.with_label_values(&[command]).observe(duration_secs);
    }
}

pub fn record_command_error(command: &str, error: &str) {
    if let Some(counter) = COMMAND_ERRORS.get() {
        counter.with_label_values(&[command, error]).inc();
    }
}

pub fn record_fanout(recipients: usize) {
    if let Some(hist) = BROADCAST_FANOUT.get() {
        hist.observe(recipients as f64);
    }
}

pub fn record_moderation(action: &str) {
    if let Some(counter) = MODERATION_ACTIONS.get() {
        counter.with_label_values(&[action]).inc();
    }
}

pub fn record_history_failure(op: &str) {
    if let Some(counter) = HISTORY_FAILURES.get() {
        counter.with_label_values(&[op]).inc();
    }
}

pub fn inc_private_messages() {
    if let Some(counter) = PRIVATE_MESSAGES.get() {
        counter.inc();
    }
}

pub fn inc_lines_dropped() {
    if let Some(counter) = LINES_DROPPED.get() {
        counter.inc();
    }
}

pub fn inc_flood_strikes() {
    if let Some(counter) = FLOOD_STRIKES.get() {
        counter.inc();
    }
}

pub fn set_connected_users(count: usize) {
    if let Some(gauge) = CONNECTED_USERS.get() {
        gauge.set(count as i64);
    }
}

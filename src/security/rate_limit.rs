//! Rate limiting for flood protection.
//!
//! Each active session owns a [`FloodGuard`]: a governor token bucket plus
//! a strike counter. Over-limit lines earn strikes; a line within limit
//! clears them; reaching the strike limit ends the session.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use tracing::debug;

/// Outcome of checking one inbound line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodVerdict {
    /// Process the line.
    Allowed,
    /// Drop the line and warn; carries the current strike count.
    Warned(u8),
    /// Strike limit reached; disconnect.
    Exceeded,
}

pub struct FloodGuard {
    limiter: DefaultDirectRateLimiter,
    strikes: u8,
    max_strikes: u8,
}

impl FloodGuard {
    pub fn new(rate_per_second: u32, burst: u32, max_strikes: u8) -> Self {
        let rate = NonZeroU32::new(rate_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst).unwrap_or(rate);
        Self {
            limiter: RateLimiter::direct(Quota::per_second(rate).allow_burst(burst)),
            strikes: 0,
            max_strikes: max_strikes.max(1),
        }
    }

    pub fn max_strikes(&self) -> u8 {
        self.max_strikes
    }

    pub fn check(&mut self) -> FloodVerdict {
        if self.limiter.check().is_ok() {
            self.strikes = 0;
            return FloodVerdict::Allowed;
        }

        self.strikes = self.strikes.saturating_add(1);
        debug!(strikes = self.strikes, max = self.max_strikes, "line rate limit exceeded");
        if self.strikes >= self.max_strikes {
            FloodVerdict::Exceeded
        } else {
            FloodVerdict::Warned(self.strikes)
        }
    }
}

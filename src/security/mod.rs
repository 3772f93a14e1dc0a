//! Security module for chatd.
//!
//! - **Moderation Policy**: the single admin identity and what it may do
//! - **Flood Protection**: governor-based per-session line rate limiting
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │             Security Module              │
//! ├────────────────────┬─────────────────────┤
//! │ ModerationPolicy   │ FloodGuard          │
//! │ admin == sender    │ Governor            │
//! │ mute gate          │ Token Bucket+strikes│
//! └────────────────────┴─────────────────────┘
//! ```

pub mod policy;
pub mod rate_limit;

pub use policy::ModerationPolicy;
pub use rate_limit::{FloodGuard, FloodVerdict};

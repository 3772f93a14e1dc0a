//! chatd - line-oriented multi-client chat broadcaster.
//!
//! Clients connect over TCP, claim a display name with `/name`, and then
//! chat, whisper with `/pm`, and read back recent `/history`. A single
//! configured admin may ban and mute.
//!
//! The binary in `main.rs` wires these modules together; integration tests
//! use the same pieces to run an in-process server.

pub mod config;
pub mod error;
pub mod handlers;
pub mod history;
pub mod http;
pub mod metrics;
pub mod network;
pub mod security;
pub mod state;
pub mod telemetry;

//! # chatd-proto
//!
//! Wire vocabulary for the chatd line-oriented chat protocol.
//!
//! ## Features
//!
//! - Newline-delimited UTF-8 framing with a bounded line length
//! - Zero-copy classification of client lines into commands
//! - Canonical text for every server-to-client line
//!
//! ## Quick Start
//!
//! ```rust
//! use chatd_proto::{Command, Verb};
//!
//! let cmd = Command::parse("/pm Bob Hello, Bob!").expect("valid command");
//! assert_eq!(cmd.verb(), Some(Verb::Pm));
//!
//! let line = chatd_proto::reply::private_message("Alice", "Hello, Bob!");
//! assert_eq!(line, "📩 [PM from Alice]: Hello, Bob!");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod reply;

pub use command::{parse_name, Command, CommandError, NameError, Verb};
pub use error::ProtocolError;
#[cfg(feature = "tokio")]
pub use line::{LineCodec, DEFAULT_MAX_LINE_LEN};

//! Integration test common infrastructure.
//!
//! Provides an in-process test server, line-oriented test clients, and
//! history store doubles.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::{FailingHistory, TestServer, test_config};

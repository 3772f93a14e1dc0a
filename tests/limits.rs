//! Input limit tests: over-length lines, control characters, flood control,
//! naming timeout.

mod common;

use chatd::history::MemoryHistory;
use chatd_proto::reply;
use common::{TestServer, test_config};
use std::sync::Arc;

#[tokio::test]
async fn overlong_line_is_rejected_and_session_continues() {
    let mut config = test_config();
    config.limits.max_line_length = 64;
    let server = TestServer::spawn_with(config, Arc::new(MemoryHistory::new(50)))
        .await
        .expect("spawn");
    let mut alice = server.login("Alice").await.expect("alice");

    alice.send(&"y".repeat(200)).await.expect("send");
    assert_eq!(alice.recv().await.expect("notice"), reply::INPUT_TOO_LONG);

    alice.send("short").await.expect("send");
    assert_eq!(alice.recv().await.expect("echo"), reply::chat("Alice", "short"));
}

#[tokio::test]
async fn control_characters_are_rejected_and_session_continues() {
    let server = TestServer::spawn().await.expect("spawn");
    let mut alice = server.login("Alice").await.expect("alice");
    let mut bob = server.login("Bob").await.expect("bob");
    alice.expect(&reply::joined("Bob")).await.expect("join");

    bob.send("ding\x07 wake up").await.expect("send");
    assert_eq!(bob.recv().await.expect("notice"), reply::ILLEGAL_CHARACTERS);

    bob.send("sorry").await.expect("send");
    assert_eq!(bob.recv().await.expect("echo"), reply::chat("Bob", "sorry"));
    // Alice never sees the rejected line, only the follow-up.
    assert_eq!(alice.recv().await.expect("delivery"), reply::chat("Bob", "sorry"));
    assert!(server.hub().registry.is_online("Bob"));
}

#[tokio::test]
async fn control_characters_during_naming_are_rejected() {
    let server = TestServer::spawn().await.expect("spawn");
    let mut client = server.connect().await.expect("connect");
    client.expect(reply::NAME_PROMPT).await.expect("prompt");

    client.send("/name Al\x1bice").await.expect("send");
    assert_eq!(client.recv().await.expect("notice"), reply::ILLEGAL_CHARACTERS);

    client.send("/name Alice").await.expect("send");
    assert_eq!(client.recv().await.expect("join"), reply::joined("Alice"));
}

#[tokio::test]
async fn flooding_warns_then_disconnects() {
    let mut config = test_config();
    config.limits.message_rate_per_second = 1;
    config.limits.message_burst = 2;
    config.limits.max_flood_violations = 2;
    let server = TestServer::spawn_with(config, Arc::new(MemoryHistory::new(50)))
        .await
        .expect("spawn");
    let mut watcher = server.login("Watcher").await.expect("watcher");
    let mut spammer = server.login("Spammer").await.expect("spammer");
    watcher.expect(&reply::joined("Spammer")).await.expect("join");

    // Two lines fit in the burst, the third earns a warning, the fourth
    // reaches the strike limit.
    spammer
        .send_raw(b"one\ntwo\nthree\nfour\n")
        .await
        .expect("send");

    let rest = spammer.expect_closed().await.expect("closed");
    assert_eq!(
        rest,
        vec![
            reply::chat("Spammer", "one"),
            reply::chat("Spammer", "two"),
            reply::flood_warning(1, 2),
            reply::EXCESS_FLOOD.to_string(),
        ]
    );

    watcher.expect(&reply::left("Spammer")).await.expect("departure");
}

#[tokio::test]
async fn idle_naming_phase_times_out() {
    let mut config = test_config();
    config.limits.naming_timeout_secs = 1;
    let server = TestServer::spawn_with(config, Arc::new(MemoryHistory::new(50)))
        .await
        .expect("spawn");

    let mut client = server.connect().await.expect("connect");
    let lines = client.expect_closed().await.expect("closed");
    assert_eq!(
        lines,
        vec![
            reply::NAME_PROMPT.to_string(),
            reply::NAMING_TIMEOUT.to_string(),
        ]
    );
}

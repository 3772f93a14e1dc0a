//! Admin moderation tests: ban, unban, mute, unmute.

mod common;

use chatd_proto::{Verb, reply};
use common::TestServer;
use std::time::Duration;

#[tokio::test]
async fn non_admin_cannot_moderate() {
    let server = TestServer::spawn().await.expect("spawn");
    let mut alice = server.login("Alice").await.expect("alice");
    let _bob = server.login("Bob").await.expect("bob");
    alice.expect(&reply::joined("Bob")).await.expect("join");

    for (line, verb) in [
        ("/ban Bob", Verb::Ban),
        ("/unban Bob", Verb::Unban),
        ("/mute Bob", Verb::Mute),
        ("/unmute Bob", Verb::Unmute),
        ("/mute", Verb::Mute),
    ] {
        alice.send(line).await.expect("send");
        assert_eq!(alice.recv().await.expect("reply"), reply::admin_only(verb));
    }

    let registry = &server.hub().registry;
    assert!(registry.is_online("Bob"));
    assert!(!registry.is_banned("Bob"));
    assert!(!registry.is_muted("Bob"));
}

#[tokio::test]
async fn ban_disconnects_and_announces() {
    let server = TestServer::spawn().await.expect("spawn");
    let mut admin = server.login("admin").await.expect("admin");
    let mut bob = server.login("Bob").await.expect("bob");
    let mut carol = server.login("Carol").await.expect("carol");
    admin.expect(&reply::joined("Carol")).await.expect("join");
    bob.expect(&reply::joined("Carol")).await.expect("join");

    admin.send("/ban Bob").await.expect("send");

    let rest = bob.expect_closed().await.expect("bob closed");
    assert_eq!(rest.last(), Some(&reply::banned_by("admin")));

    let announcement = reply::was_banned("Bob", "admin");
    carol.expect(&announcement).await.expect("carol sees ban");
    admin.expect(&announcement).await.expect("admin sees ban");

    let mut again = server.connect().await.expect("connect");
    again.expect(reply::NAME_PROMPT).await.expect("prompt");
    again.send("/name Bob").await.expect("send");
    assert_eq!(
        again.expect_closed().await.expect("refused"),
        vec![reply::BANNED.to_string()]
    );
}

#[tokio::test]
async fn ban_of_offline_user_is_not_found() {
    let server = TestServer::spawn().await.expect("spawn");
    let mut admin = server.login("admin").await.expect("admin");

    admin.send("/ban Ghost").await.expect("send");
    assert_eq!(admin.recv().await.expect("reply"), reply::USER_NOT_FOUND);
    assert!(!server.hub().registry.is_banned("Ghost"));
}

#[tokio::test]
async fn unban_allows_rejoin() {
    let server = TestServer::spawn().await.expect("spawn");
    let mut admin = server.login("admin").await.expect("admin");
    server.hub().registry.ban("Bob");

    admin.send("/unban Bob").await.expect("send");
    admin
        .expect(&reply::was_unbanned("Bob", "admin"))
        .await
        .expect("announcement");

    let _bob = server.login("Bob").await.expect("bob rejoins");
}

#[tokio::test]
async fn mute_suppresses_chat_but_not_commands() {
    let server = TestServer::spawn().await.expect("spawn");
    let mut admin = server.login("admin").await.expect("admin");
    let mut bob = server.login("Bob").await.expect("bob");
    admin.expect(&reply::joined("Bob")).await.expect("join");

    admin.send("/mute Bob").await.expect("send");
    assert_eq!(admin.recv().await.expect("confirm"), reply::muted("Bob"));

    bob.send("can you hear me").await.expect("send");
    assert_eq!(bob.recv().await.expect("notice"), reply::MUTED);
    admin
        .assert_silent(Duration::from_millis(200))
        .await
        .expect("nothing delivered");

    bob.send("/list_users").await.expect("send");
    assert_eq!(bob.recv().await.expect("header"), reply::ONLINE_USERS_HEADER);
    // Byte order: uppercase sorts before lowercase.
    assert_eq!(bob.recv().await.expect("row"), reply::user_entry("Bob"));
    assert_eq!(bob.recv().await.expect("row"), reply::user_entry("admin"));

    admin.send("/unmute Bob").await.expect("send");
    assert_eq!(admin.recv().await.expect("confirm"), reply::unmuted("Bob"));

    bob.send("back").await.expect("send");
    admin.expect(&reply::chat("Bob", "back")).await.expect("delivered");
}

#[tokio::test]
async fn mute_survives_reconnect() {
    let server = TestServer::spawn().await.expect("spawn");
    let mut admin = server.login("admin").await.expect("admin");
    let bob = server.login("Bob").await.expect("bob");
    admin.expect(&reply::joined("Bob")).await.expect("join");

    admin.send("/mute Bob").await.expect("send");
    admin.expect(&reply::muted("Bob")).await.expect("confirm");
    drop(bob);
    admin.expect(&reply::left("Bob")).await.expect("left");

    let mut bob = server.login("Bob").await.expect("bob again");
    bob.send("still here").await.expect("send");
    assert_eq!(bob.recv().await.expect("notice"), reply::MUTED);
}

#[tokio::test]
async fn admin_without_argument_gets_usage() {
    let server = TestServer::spawn().await.expect("spawn");
    let mut admin = server.login("admin").await.expect("admin");

    admin.send("/ban").await.expect("send");
    assert_eq!(admin.recv().await.expect("reply"), reply::usage(Verb::Ban));
}

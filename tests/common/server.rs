//! Test server management.
//!
//! Runs a chatd gateway inside the test's runtime on an ephemeral port.

use async_trait::async_trait;
use chatd::config::Config;
use chatd::history::{HistoryError, HistoryStore, MemoryHistory};
use chatd::network::Gateway;
use chatd::state::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::client::TestClient;

/// Config with limits loose enough that tests never trip flood protection.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.limits.message_rate_per_second = 10_000;
    config.limits.message_burst = 10_000;
    config
}

/// A test server instance.
pub struct TestServer {
    addr: SocketAddr,
    hub: Arc<Hub>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a server with the test config and an in-memory history.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(test_config(), Arc::new(MemoryHistory::new(50))).await
    }

    /// Spawn a server with a custom configuration and history store.
    pub async fn spawn_with(config: Config, history: Arc<dyn HistoryStore>) -> anyhow::Result<Self> {
        let hub = Arc::new(Hub::new(&config, history));
        let gateway = Gateway::bind("127.0.0.1:0".parse()?, Arc::clone(&hub)).await?;
        let addr = gateway.local_addr()?;
        let task = tokio::spawn(async move {
            let _ = gateway.run().await;
        });
        Ok(Self { addr, hub, task })
    }

    #[allow(dead_code)]
    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    /// Open a raw connection (still in the naming phase).
    pub async fn connect(&self) -> anyhow::Result<TestClient> {
        TestClient::connect(self.addr).await
    }

    /// Connect and complete `/name`, consuming the prompt and own join line.
    pub async fn login(&self, name: &str) -> anyhow::Result<TestClient> {
        let mut client = self.connect().await?;
        client.expect(chatd_proto::reply::NAME_PROMPT).await?;
        client.send(&format!("/name {name}")).await?;
        client.expect(&chatd_proto::reply::joined(name)).await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// History store that is always unreachable.
pub struct FailingHistory;

#[async_trait]
impl HistoryStore for FailingHistory {
    async fn append(&self, _line: &str) -> Result<(), HistoryError> {
        Err(HistoryError::Database("store offline".into()))
    }

    async fn read_all(&self) -> Result<Vec<String>, HistoryError> {
        Err(HistoryError::Database("store offline".into()))
    }
}

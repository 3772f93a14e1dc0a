//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds a socket and spawns one [`Connection`] task per
//! accepted client. Nothing a single connection does can stop the accept
//! loop.

use crate::handlers::Dispatcher;
use crate::network::Connection;
use crate::state::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    hub: Arc<Hub>,
    dispatcher: Arc<Dispatcher>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(addr: SocketAddr, hub: Arc<Hub>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "Listener bound");
        Ok(Self {
            listener,
            hub,
            dispatcher: Arc::new(Dispatcher::new()),
        })
    }

    /// The bound address (useful when binding port 0).
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway", fields(server = %self.hub.server_name))]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let id = self.hub.session_ids.next();
                    info!(session = %id, %addr, "Connection accepted");

                    let connection = Connection::new(
                        id.clone(),
                        stream,
                        addr,
                        Arc::clone(&self.hub),
                        Arc::clone(&self.dispatcher),
                    );
                    tokio::spawn(async move {
                        if let Err(e) = connection.run().await {
                            error!(session = %id, %addr, error = %e, "Connection error");
                        }
                        info!(session = %id, %addr, "Connection closed");
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}

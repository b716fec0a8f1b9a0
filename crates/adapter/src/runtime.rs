//! Adapter runtime integration.
//!
//! Bridges the sync game loop with the async TCP server: the server owns a
//! multi-threaded tokio runtime, writes commands into the shared slot and receives
//! status messages over an unbounded channel.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::core::ControlSlot;
use crate::protocol::ServerMessage;
use crate::server::{bind, serve, ServerConfig};

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    events_tx: mpsc::UnboundedSender<ServerMessage>,
    addr: SocketAddr,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns `Ok(None)` if `SNAKE_REMOTE_DISABLED` is set.
    pub fn start_from_env(slot: ControlSlot) -> anyhow::Result<Option<Self>> {
        if ServerConfig::is_disabled() {
            info!("remote control disabled");
            return Ok(None);
        }
        Self::start(ServerConfig::from_env(), slot).map(Some)
    }

    /// Bind synchronously (so address errors surface here) and serve in the background.
    pub fn start(config: ServerConfig, slot: ControlSlot) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let listener = rt.block_on(bind(&config))?;
        let addr = listener.local_addr()?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        rt.spawn(async move {
            if let Err(err) = serve(listener, slot, events_rx).await {
                warn!(%err, "control server stopped");
            }
        });

        Ok(Self {
            _rt: rt,
            events_tx,
            addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Broadcast a status message to every connected client.
    pub fn publish(&self, msg: ServerMessage) {
        let _ = self.events_tx.send(msg);
    }
}

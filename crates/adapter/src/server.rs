//! TCP server for remote control
//!
//! Every connected client may steer: received bytes go straight into the shared
//! control slot (latest write wins). Status messages are broadcast to all clients.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::core::ControlSlot;
use crate::protocol::ServerMessage;

pub const HOST_VAR: &str = "SNAKE_HOST";
pub const PORT_VAR: &str = "SNAKE_PORT";
pub const DISABLED_VAR: &str = "SNAKE_REMOTE_DISABLED";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup(HOST_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup(PORT_VAR)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        Self { host, port }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn is_disabled() -> bool {
        Self::disabled_in(|var| std::env::var(var).ok())
    }

    pub fn disabled_in<F>(lookup: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(DISABLED_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }
}

struct ClientHandle {
    id: usize,
    tx: mpsc::UnboundedSender<String>,
}

type Clients = Arc<RwLock<Vec<ClientHandle>>>;

pub async fn bind(config: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind control server on {addr}"))?;
    info!(addr = %listener.local_addr()?, "control server listening");
    Ok(listener)
}

/// Bind and serve until the listener fails.
pub async fn run_server(
    config: ServerConfig,
    slot: ControlSlot,
    events_rx: mpsc::UnboundedReceiver<ServerMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = bind(&config).await?;
    if let Some(tx) = ready_tx {
        let _ = tx.send(listener.local_addr()?);
    }
    serve(listener, slot, events_rx).await
}

/// Accept clients on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    slot: ControlSlot,
    mut events_rx: mpsc::UnboundedReceiver<ServerMessage>,
) -> anyhow::Result<()> {
    let clients: Clients = Arc::new(RwLock::new(Vec::new()));

    // Broadcast dispatcher.
    {
        let clients = Arc::clone(&clients);
        tokio::spawn(async move {
            while let Some(msg) = events_rx.recv().await {
                let line = match msg.to_line() {
                    Ok(line) => line,
                    Err(err) => {
                        warn!(%err, "dropping unserializable status message");
                        continue;
                    }
                };
                for c in clients.read().await.iter() {
                    let _ = c.tx.send(line.clone());
                }
            }
        });
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %addr, "client connected");

        let clients = Arc::clone(&clients);
        let slot = slot.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_client(socket, client_id, &clients, &slot).await {
                warn!(client_id, %err, "client error");
            }
            clients.write().await.retain(|c| c.id != client_id);
            info!(client_id, "client disconnected");
        });
    }
}

async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    clients: &Clients,
    slot: &ControlSlot,
) -> anyhow::Result<()> {
    let (mut reader, mut writer) = socket.into_split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    tx.send(ServerMessage::welcome().to_line()?)?;
    clients.write().await.push(ClientHandle { id: client_id, tx });

    let write_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let mut buf = [0u8; 64];
    let result = loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break Ok(()),
            Ok(n) => n,
            Err(err) => break Err(err.into()),
        };
        for &byte in &buf[..n] {
            if let Some(byte) = control_byte(byte) {
                debug!(client_id, byte = %char::from(byte).escape_default(), "control byte");
                slot.push(byte);
            }
        }
    };

    write_task.abort();
    result
}

/// Bytes that reach the control slot; line endings and padding are dropped.
///
/// Only the socket filters them. [`ControlSymbol::from_byte`](crate::types::ControlSymbol::from_byte)
/// still decodes whitespace as `Unknown`, so a local producer writing `\n` pauses the game.
pub fn control_byte(byte: u8) -> Option<u8> {
    if byte == 0 || byte.is_ascii_whitespace() {
        None
    } else {
        Some(byte)
    }
}

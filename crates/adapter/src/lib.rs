//! Adapter module - remote control over a TCP socket
//!
//! A remote client steers the snake with the same one-byte alphabet the keyboard
//! uses. The server never parses frames: every non-whitespace byte is written to
//! the shared [`ControlSlot`](crate::core::ControlSlot), and the game loop picks it
//! up on its next tick.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: client connects (default `0.0.0.0:8000`)
//! 2. **Welcome**: server sends `{"type":"welcome","protocol":"snake-byte/1","commands":"WASDPQ"}`
//! 3. **Commanding**: client sends raw bytes `W` `A` `S` `D` `P` `Q`; anything else pauses
//! 4. **Status**: server broadcasts `round_started` / `round_ended` JSON lines
//!
//! # Environment Variables
//!
//! - `SNAKE_HOST`: listen address (default `0.0.0.0`)
//! - `SNAKE_PORT`: listen port (default `8000`)
//! - `SNAKE_REMOTE_DISABLED`: `1`/`true` turns the server off

pub mod protocol;
pub mod runtime;
pub mod server;

pub use remote_snake_core as core;
pub use remote_snake_types as types;

pub use protocol::ServerMessage;
pub use runtime::Adapter;
pub use server::{run_server, ServerConfig};

//! Protocol module - what the server says to its clients.
//!
//! Inbound traffic is the raw one-byte command alphabet, no framing. Outbound
//! traffic is line-delimited JSON, one object per line, tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::types::RoundOutcome;

pub const PROTOCOL_NAME: &str = "snake-byte/1";
pub const COMMAND_ALPHABET: &str = "WASDPQ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once, right after a client connects.
    Welcome { protocol: String, commands: String },
    RoundStarted { round: u32 },
    RoundEnded {
        round: u32,
        outcome: String,
        length: usize,
        tick: u32,
    },
}

impl ServerMessage {
    pub fn welcome() -> Self {
        ServerMessage::Welcome {
            protocol: PROTOCOL_NAME.to_string(),
            commands: COMMAND_ALPHABET.to_string(),
        }
    }

    pub fn round_started(round: u32) -> Self {
        ServerMessage::RoundStarted { round }
    }

    pub fn round_ended(round: u32, outcome: RoundOutcome, length: usize, tick: u32) -> Self {
        ServerMessage::RoundEnded {
            round,
            outcome: outcome.as_str().to_string(),
            length,
            tick,
        }
    }

    /// JSON line including the trailing newline.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

//! Terminal input module.
//!
//! Maps `crossterm` key events onto the one-byte control alphabet and writes them
//! into the shared [`ControlSlot`](crate::core::ControlSlot), exactly as a TCP client
//! would. Keyboard and network are interchangeable producers.

pub mod feed;
pub mod map;

pub use remote_snake_core as core;
pub use remote_snake_types as types;

pub use feed::{feed_key, poll_into, KeyboardPoll};
pub use map::{handle_key_event, should_exit};

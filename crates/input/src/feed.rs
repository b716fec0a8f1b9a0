//! Keyboard feed into the pending-control slot.
//!
//! Polled from the game loop's maintenance hook, so every call returns within the
//! given timeout.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::core::ControlSlot;
use crate::map::{handle_key_event, should_exit};
use crate::types::ControlSymbol;

/// What one keyboard poll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardPoll {
    Idle,
    Pushed(ControlSymbol),
    /// Esc / Ctrl-C: Quit was pushed and the program should stop after this round.
    Exit,
}

/// Route one key press into `slot`.
pub fn feed_key(slot: &ControlSlot, key: KeyEvent) -> KeyboardPoll {
    if key.kind != KeyEventKind::Press {
        return KeyboardPoll::Idle;
    }
    if should_exit(key) {
        slot.push(ControlSymbol::Quit.as_byte());
        return KeyboardPoll::Exit;
    }
    match handle_key_event(key) {
        Some(symbol) => {
            slot.push(symbol.as_byte());
            KeyboardPoll::Pushed(symbol)
        }
        None => KeyboardPoll::Idle,
    }
}

/// Wait up to `timeout` for a terminal event and feed it into `slot`.
pub fn poll_into(slot: &ControlSlot, timeout: Duration) -> io::Result<KeyboardPoll> {
    if !event::poll(timeout)? {
        return Ok(KeyboardPoll::Idle);
    }
    match event::read()? {
        Event::Key(key) => Ok(feed_key(slot, key)),
        _ => Ok(KeyboardPoll::Idle),
    }
}

//! Pending-control slot shared between the control receiver and the game loop.
//!
//! A single byte, written by exactly one producer (TCP task or keyboard poll) and
//! consumed by the direction arbiter with an atomic swap, so a command is observed
//! at most once.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::types::ControlSymbol;

const EMPTY: u8 = 0;

#[derive(Debug, Clone, Default)]
pub struct ControlSlot {
    byte: Arc<AtomicU8>,
}

impl ControlSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a protocol byte, replacing any command not yet consumed.
    pub fn push(&self, byte: u8) {
        self.byte.store(byte, Ordering::Release);
    }

    /// Take the pending command, leaving the slot empty.
    pub fn take(&self) -> Option<ControlSymbol> {
        ControlSymbol::from_byte(self.byte.swap(EMPTY, Ordering::AcqRel))
    }

    pub fn is_empty(&self) -> bool {
        self.byte.load(Ordering::Acquire) == EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_slot() {
        let slot = ControlSlot::new();
        assert_eq!(slot.take(), None);

        slot.push(b'D');
        assert!(!slot.is_empty());
        assert_eq!(slot.take(), Some(ControlSymbol::Right));
        assert!(slot.is_empty());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn latest_write_wins_and_clones_share_storage() {
        let producer = ControlSlot::new();
        let consumer = producer.clone();
        producer.push(b'W');
        producer.push(b'A');
        assert_eq!(consumer.take(), Some(ControlSymbol::Left));
    }

    #[test]
    fn producer_thread_hands_over_one_byte() {
        let slot = ControlSlot::new();
        let producer = slot.clone();
        std::thread::spawn(move || producer.push(b'Q'))
            .join()
            .unwrap();
        assert_eq!(slot.take(), Some(ControlSymbol::Quit));
    }
}

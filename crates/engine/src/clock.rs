//! Tick clock and the bounded inter-tick wait.

use std::time::Instant;

use crate::types::TICK_GUARD_MS;

/// Monotonic millisecond counter. Wraps at `u32::MAX`.
pub trait TickClock {
    fn now_ms(&mut self) -> u32;
}

impl<C: TickClock + ?Sized> TickClock for &mut C {
    fn now_ms(&mut self) -> u32 {
        (**self).now_ms()
    }
}

/// Wall-clock ticks measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock for MonotonicClock {
    fn now_ms(&mut self) -> u32 {
        // Truncation is the wrap.
        self.origin.elapsed().as_millis() as u32
    }
}

/// Clock that advances a fixed step per query; for tests and benches.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteppingClock {
    now: u32,
    step: u32,
}

impl SteppingClock {
    pub fn new(start: u32, step: u32) -> Self {
        Self { now: start, step }
    }
}

impl TickClock for SteppingClock {
    fn now_ms(&mut self) -> u32 {
        let now = self.now;
        self.now = self.now.wrapping_add(self.step);
        now
    }
}

/// Spin until `delay_ms` (plus the guard millisecond) has passed, calling `maintenance`
/// on every iteration. Returns the number of maintenance calls.
///
/// The guard keeps a zero delay from degenerating into no wait at all.
pub fn wait_with_polling<C, F>(clock: &mut C, delay_ms: u32, mut maintenance: F) -> u32
where
    C: TickClock,
    F: FnMut(),
{
    let budget = delay_ms.saturating_add(TICK_GUARD_MS);
    let start = clock.now_ms();
    let mut polls = 0u32;
    while clock.now_ms().wrapping_sub(start) < budget {
        maintenance();
        polls = polls.saturating_add(1);
    }
    polls
}

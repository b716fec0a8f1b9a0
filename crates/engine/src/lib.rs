//! Engine crate - the tick driver that strings the core rules together.
//!
//! - [`game_loop`]: per-tick ordering, round lifecycle and outcome banners
//! - [`clock`]: monotonic tick clock and the polling inter-tick wait
//! - [`config`]: environment-driven runtime configuration

pub mod clock;
pub mod config;
pub mod game_loop;

pub use remote_snake_core as core;
pub use remote_snake_types as types;

pub use clock::{wait_with_polling, MonotonicClock, SteppingClock, TickClock};
pub use config::{ConfigError, RuntimeConfig};
pub use game_loop::{GameLoop, LoopPhase, RoundReport, Session, TickOutcome, TickReport};

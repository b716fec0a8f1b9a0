//! Core game logic module - deterministic, allocation-free per tick, and testable
//!
//! Everything that decides what happens in a tick lives here. Drawing, randomness and
//! the pending command arrive through small traits and a shared slot, so every rule can
//! be driven from a test with scripted input and a recording surface.
//!
//! # Module Structure
//!
//! - [`snake`]: fixed-capacity body, movement, collision and growth
//! - [`arbiter`]: one control symbol per tick to a heading change, pause bookkeeping
//! - [`food`]: placement windows, bounded sampling, exhaustion policy, consumption
//! - [`render`]: the [`Surface`] trait and the O(1) per-tick render differ
//! - [`rng`]: 16-bit LFSR randomizer and its entropy sources
//! - [`control`]: the single-byte pending-command slot
//!
//! # Tick Order
//!
//! The engine crate drives these in a fixed order: arbitrate, move, (stop if the round
//! ended), consume, render, place food.
//!
//! # Example
//!
//! ```
//! use remote_snake_core::{DirectionArbiter, DrawLog, Snake, render_tick};
//! use remote_snake_core::types::{ControlSymbol, Direction, GameConfig};
//!
//! let config = GameConfig::default();
//! let mut snake = Snake::new(&config);
//! let mut arbiter = DirectionArbiter::new();
//! let mut surface = DrawLog::new();
//!
//! render_tick(&mut snake, &mut surface);
//! // The opening command starts the game without moving the snake.
//! arbiter.apply(Some(ControlSymbol::Up), &mut snake);
//! assert_eq!(snake.direction(), Direction::Up);
//!
//! // Once started, directions are ignored while paused; P resumes the saved heading.
//! arbiter.apply(Some(ControlSymbol::Pause), &mut snake);
//! arbiter.apply(Some(ControlSymbol::Left), &mut snake);
//! assert_eq!(snake.direction(), Direction::Pause);
//! arbiter.apply(Some(ControlSymbol::Pause), &mut snake);
//! assert_eq!(snake.direction(), Direction::Up);
//! ```

pub mod arbiter;
pub mod control;
pub mod food;
pub mod render;
pub mod rng;
pub mod snake;

pub use remote_snake_types as types;

pub use arbiter::{Arbitration, DirectionArbiter};
pub use control::ControlSlot;
pub use food::{Food, FoodManager, PlacementOutcome};
pub use render::{render_tick, DrawLog, DrawOp, RenderPass, Surface};
pub use rng::{EntropySource, Lfsr16, Randomizer, SimpleRng, ThreadEntropy};
pub use snake::{CrashKind, MoveOutcome, Snake};

//! Remote snake (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so binaries, tests and
//! benches can reach everything through `remote_snake::{core, engine, ...}`.

pub use remote_snake_adapter as adapter;
pub use remote_snake_core as core;
pub use remote_snake_engine as engine;
pub use remote_snake_input as input;
pub use remote_snake_term as term;
pub use remote_snake_types as types;

//! Terminal "game renderer" module.
//!
//! The core draws through cell-addressed [`Surface`](crate::core::Surface) calls.
//! Here those calls land in a framebuffer, and each `present` flushes only the
//! terminal cells that changed since the previous frame.
//!
//! - [`fb`]: styled character framebuffer
//! - [`renderer`]: crossterm backend with run-length diffing
//! - [`surface`]: arena-to-terminal mapping (2 columns per cell)

pub mod fb;
pub mod renderer;
pub mod surface;

pub use remote_snake_core as core;
pub use remote_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::TermSurface;

//! Render differ and the drawing surface it talks to.
//!
//! The first frame of a round paints everything once. After that a tick costs at
//! most one erase (the ghost cell) and one draw (the new head), whatever the
//! snake's length.

use crate::snake::Snake;
use crate::types::{Coord, TextColor};

/// Cell-addressed drawing primitives.
///
/// Calls never fail from the caller's point of view and are idempotent.
pub trait Surface {
    fn draw_cell(&mut self, at: Coord);
    fn erase_cell(&mut self, at: Coord);
    fn draw_food(&mut self, at: Coord);
    fn erase_food(&mut self, at: Coord);
    fn draw_border(&mut self);
    fn clear_screen(&mut self);
    fn print_text(&mut self, text: &str, color: TextColor);

    /// Make everything drawn so far visible. Immediate-mode surfaces ignore this.
    fn present(&mut self) {}
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn draw_cell(&mut self, at: Coord) {
        (**self).draw_cell(at)
    }

    fn erase_cell(&mut self, at: Coord) {
        (**self).erase_cell(at)
    }

    fn draw_food(&mut self, at: Coord) {
        (**self).draw_food(at)
    }

    fn erase_food(&mut self, at: Coord) {
        (**self).erase_food(at)
    }

    fn draw_border(&mut self) {
        (**self).draw_border()
    }

    fn clear_screen(&mut self) {
        (**self).clear_screen()
    }

    fn print_text(&mut self, text: &str, color: TextColor) {
        (**self).print_text(text, color)
    }

    fn present(&mut self) {
        (**self).present()
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Cell(Coord),
    EraseCell(Coord),
    Food(Coord),
    EraseFood(Coord),
    Border,
    Clear,
    Text(String, TextColor),
    Present,
}

/// Surface that records every call; used by tests and headless runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawLog {
    ops: Vec<DrawOp>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded calls.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for DrawLog {
    fn draw_cell(&mut self, at: Coord) {
        self.ops.push(DrawOp::Cell(at));
    }

    fn erase_cell(&mut self, at: Coord) {
        self.ops.push(DrawOp::EraseCell(at));
    }

    fn draw_food(&mut self, at: Coord) {
        self.ops.push(DrawOp::Food(at));
    }

    fn erase_food(&mut self, at: Coord) {
        self.ops.push(DrawOp::EraseFood(at));
    }

    fn draw_border(&mut self) {
        self.ops.push(DrawOp::Border);
    }

    fn clear_screen(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn print_text(&mut self, text: &str, color: TextColor) {
        self.ops.push(DrawOp::Text(text.to_string(), color));
    }

    fn present(&mut self) {
        self.ops.push(DrawOp::Present);
    }
}

/// What a render pass drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    Full { cells: usize },
    Incremental { erased: Option<Coord>, drawn: Coord },
    /// Paused (or empty body): nothing to redraw.
    Skipped,
}

/// Draw the changes of the last tick.
pub fn render_tick<S: Surface>(snake: &mut Snake, surface: &mut S) -> RenderPass {
    if snake.needs_full_paint() {
        surface.clear_screen();
        surface.draw_border();
        for &cell in snake.body() {
            surface.draw_cell(cell);
        }
        surface.present();
        snake.mark_painted();
        return RenderPass::Full { cells: snake.len() };
    }

    if !snake.direction().is_moving() {
        return RenderPass::Skipped;
    }
    let Some(head) = snake.head() else {
        return RenderPass::Skipped;
    };

    let erased = snake.ghost();
    if let Some(ghost) = erased {
        surface.erase_cell(ghost);
    }
    surface.draw_cell(head);
    surface.present();
    RenderPass::Incremental {
        erased,
        drawn: head,
    }
}

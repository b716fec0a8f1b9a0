//! Terminal implementation of the core drawing surface.
//!
//! Arena cells are 2 columns wide and 1 row tall, which keeps the grid roughly
//! square in a typical terminal font. Drawing calls only touch the framebuffer;
//! [`Surface::present`] pushes the frame through the diffing renderer.

use std::io::{self, Write};

use tracing::warn;

use crate::core::Surface;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::renderer::TerminalRenderer;
use crate::types::{Arena, Coord, TextColor};

const CELL_W: u16 = 2;
const STATUS_ROW: u16 = 6;
const HINT: &str = "WASD move P pause Q quit";

const BODY: CellStyle = CellStyle::fg(Rgb::new(220, 80, 220)).bold();
const FOOD: CellStyle = CellStyle::fg(Rgb::new(100, 220, 120)).bold();
const BORDER: CellStyle = CellStyle::fg(Rgb::new(235, 235, 235));
const HINT_STYLE: CellStyle = CellStyle::fg(Rgb::new(120, 120, 130));

pub struct TermSurface<W: Write = io::Stdout> {
    arena: Arena,
    fb: FrameBuffer,
    renderer: Option<TerminalRenderer<W>>,
}

impl TermSurface<io::Stdout> {
    /// Surface that only draws into its framebuffer.
    pub fn headless(arena: Arena) -> Self {
        Self::build(arena, None)
    }
}

impl<W: Write> TermSurface<W> {
    pub fn new(arena: Arena, renderer: TerminalRenderer<W>) -> Self {
        Self::build(arena, Some(renderer))
    }

    fn build(arena: Arena, renderer: Option<TerminalRenderer<W>>) -> Self {
        let width = (arena.max_x + 1) * CELL_W;
        let height = arena.max_y + 2;
        Self {
            arena,
            fb: FrameBuffer::new(width, height),
            renderer,
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn renderer_mut(&mut self) -> Option<&mut TerminalRenderer<W>> {
        self.renderer.as_mut()
    }

    fn paint(&mut self, at: Coord, glyph: &str, style: CellStyle) {
        if at.x > self.arena.max_x || at.y > self.arena.max_y {
            return;
        }
        self.fb.put_str(at.x * CELL_W, at.y, glyph, style);
    }
}

impl<W: Write> Surface for TermSurface<W> {
    fn draw_cell(&mut self, at: Coord) {
        self.paint(at, "██", BODY);
    }

    fn erase_cell(&mut self, at: Coord) {
        self.paint(at, "  ", CellStyle::default());
    }

    fn draw_food(&mut self, at: Coord) {
        self.paint(at, "● ", FOOD);
    }

    fn erase_food(&mut self, at: Coord) {
        self.paint(at, "  ", CellStyle::default());
    }

    fn draw_border(&mut self) {
        let width = self.fb.width();
        self.fb.draw_box(0, 0, width, self.arena.max_y + 1, BORDER);
        self.fb
            .put_str_centered(0, width, self.arena.max_y + 1, HINT, HINT_STYLE);
    }

    fn clear_screen(&mut self) {
        self.fb.clear();
    }

    fn print_text(&mut self, text: &str, color: TextColor) {
        let style = CellStyle::fg(text_rgb(color)).bold();
        let width = self.fb.width();
        self.fb.put_str_centered(0, width, STATUS_ROW, text, style);
    }

    fn present(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            if let Err(err) = renderer.draw(&self.fb) {
                warn!(%err, "terminal draw failed");
            }
        }
    }
}

fn text_rgb(color: TextColor) -> Rgb {
    match color {
        TextColor::Red => Rgb::new(230, 70, 70),
        TextColor::Green => Rgb::new(100, 220, 120),
        TextColor::Yellow => Rgb::new(240, 220, 80),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_two_columns_wide() {
        let mut surface = TermSurface::headless(Arena::default());
        surface.draw_cell(Coord::new(3, 10));
        surface.draw_food(Coord::new(5, 10));

        let row = surface.framebuffer().row_text(10);
        assert_eq!(&row.chars().skip(6).take(6).collect::<String>(), "██  ● ");

        surface.erase_cell(Coord::new(3, 10));
        let row = surface.framebuffer().row_text(10);
        assert_eq!(&row.chars().skip(6).take(2).collect::<String>(), "  ");
    }

    #[test]
    fn border_encloses_arena_and_status_is_centered() {
        let mut surface = TermSurface::headless(Arena::default());
        surface.draw_border();
        surface.print_text("GAME OVER", TextColor::Red);

        let fb = surface.framebuffer();
        assert_eq!(fb.width(), 30);
        assert!(fb.row_text(0).starts_with('┌'));
        assert!(fb.row_text(21).ends_with('┘'));
        assert_eq!(fb.row_text(6).trim_matches(|c: char| c == ' ' || c == '│'), "GAME OVER");
        assert_eq!(fb.get(10, 6).map(|c| c.style.fg), Some(Rgb::new(230, 70, 70)));
    }

    #[test]
    fn present_flushes_through_the_renderer() {
        let renderer = TerminalRenderer::with_writer(Vec::new());
        let mut surface = TermSurface::new(Arena::default(), renderer);
        surface.draw_border();
        surface.present();
        let written = surface.renderer_mut().map(|r| r.writer().len()).unwrap_or(0);
        assert!(written > 0);
    }
}

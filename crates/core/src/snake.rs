//! Snake body and the movement engine.
//!
//! The body is a fixed-capacity array, tail at index 0 and head at the last index.
//! A move shifts every cell one slot towards the tail and writes the new head into
//! the freed last slot, so the cell that just left the tail is available as the
//! "ghost" the renderer has to erase.

use arrayvec::ArrayVec;

use crate::types::{Arena, Coord, Direction, GameConfig, SnakeState, BODY_CAPACITY};

/// Why a move ended the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashKind {
    Wall,
    SelfBite,
}

/// Result of [`Snake::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Paused, or no longer playing: nothing changed.
    Idle,
    Moved { head: Coord },
    Crashed(CrashKind),
    Won { head: Coord },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: ArrayVec<Coord, BODY_CAPACITY>,
    direction: Direction,
    state: SnakeState,
    ghost: Option<Coord>,
    needs_full_paint: bool,
    win_length: usize,
}

impl Snake {
    /// Fresh snake for a new round: initial body, paused, full paint pending.
    pub fn new(config: &GameConfig) -> Self {
        let body = config.initial_body().take(BODY_CAPACITY).collect();
        Self {
            body,
            direction: Direction::Pause,
            state: SnakeState::Playing,
            ghost: None,
            needs_full_paint: true,
            win_length: config.win_length().min(BODY_CAPACITY - 1),
        }
    }

    /// Build a snake from an explicit body (tail first).
    ///
    /// Cells beyond [`BODY_CAPACITY`] are dropped.
    pub fn from_body(body: &[Coord], direction: Direction, win_length: usize) -> Self {
        Self {
            body: body.iter().copied().take(BODY_CAPACITY).collect(),
            direction,
            state: SnakeState::Playing,
            ghost: None,
            needs_full_paint: true,
            win_length: win_length.min(BODY_CAPACITY - 1),
        }
    }

    pub fn body(&self) -> &[Coord] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Option<Coord> {
        self.body.last().copied()
    }

    pub fn tail(&self) -> Option<Coord> {
        self.body.first().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> SnakeState {
        self.state
    }

    pub fn ghost(&self) -> Option<Coord> {
        self.ghost
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn needs_full_paint(&self) -> bool {
        self.needs_full_paint
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.body.contains(&c)
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn mark_painted(&mut self) {
        self.needs_full_paint = false;
    }

    pub(crate) fn quit(&mut self) {
        if self.state == SnakeState::Playing {
            self.state = SnakeState::Quit;
        }
    }

    /// Advance the body one cell in the current direction.
    ///
    /// Both collision checks run against the shifted body before the new head is
    /// written: the vacated tail cell is free, while the old head (still present in
    /// the last slot) counts as occupied. On a crash the last slot keeps the old
    /// head value.
    pub fn advance(&mut self, arena: &Arena) -> MoveOutcome {
        if self.state != SnakeState::Playing || !self.direction.is_moving() {
            return MoveOutcome::Idle;
        }
        let (Some(old_tail), Some(old_head)) = (self.tail(), self.head()) else {
            return MoveOutcome::Idle;
        };

        self.ghost = Some(old_tail);
        self.body.copy_within(1.., 0);

        let next = match old_head.step(self.direction) {
            Some(c) if arena.is_interior(c) => c,
            _ => {
                self.state = SnakeState::Crashed;
                return MoveOutcome::Crashed(CrashKind::Wall);
            }
        };

        if self.body.contains(&next) {
            self.state = SnakeState::Crashed;
            return MoveOutcome::Crashed(CrashKind::SelfBite);
        }

        let last = self.body.len() - 1;
        self.body[last] = next;

        if self.body.len() >= self.win_length {
            self.state = SnakeState::Won;
            return MoveOutcome::Won { head: next };
        }

        MoveOutcome::Moved { head: next }
    }

    /// Re-attach the ghost cell as the new tail.
    ///
    /// Returns false (and changes nothing) when there is no ghost or the snake is
    /// already at its winning length.
    pub fn grow(&mut self) -> bool {
        if self.body.len() >= self.win_length {
            return false;
        }
        let Some(ghost) = self.ghost else {
            return false;
        };
        if self.body.try_insert(0, ghost).is_err() {
            return false;
        }
        self.ghost = None;
        true
    }
}

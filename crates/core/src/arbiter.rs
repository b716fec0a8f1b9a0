//! Direction arbiter - turns one pending control symbol per tick into a heading change.
//!
//! Rules:
//! - No command: nothing changes.
//! - `P` toggles pause. Pausing remembers the heading; the next `P` restores it.
//! - A byte outside the alphabet forces a pause with the same bookkeeping.
//! - A direction is taken only while moving, and never as a 180° reversal. The one
//!   exception is the opening pause of a round: until the snake first moves, a
//!   direction (other than the reverse of the saved heading) starts it, and the
//!   first move happens on the following tick.
//! - `Q` ends the round whether the snake is moving or paused.

use crate::control::ControlSlot;
use crate::snake::Snake;
use crate::types::{ControlSymbol, Direction};

/// What the arbiter did with this tick's command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arbitration {
    NoCommand,
    Turned(Direction),
    /// Direction refused: paused, reversal, or already heading that way.
    Ignored(ControlSymbol),
    Paused,
    Resumed(Direction),
    /// Opening direction of a round; the snake starts moving on the next tick.
    Started(Direction),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionArbiter {
    /// Heading restored by the next resume.
    saved: Direction,
    /// Set once the snake has moved this round.
    started: bool,
}

impl Default for DirectionArbiter {
    fn default() -> Self {
        Self {
            saved: Direction::Right,
            started: false,
        }
    }
}

impl DirectionArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved_direction(&self) -> Direction {
        self.saved
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Consume the pending command (if any) and apply it.
    pub fn arbitrate(&mut self, slot: &ControlSlot, snake: &mut Snake) -> Arbitration {
        self.apply(slot.take(), snake)
    }

    pub fn apply(&mut self, symbol: Option<ControlSymbol>, snake: &mut Snake) -> Arbitration {
        let Some(symbol) = symbol else {
            return Arbitration::NoCommand;
        };
        let current = snake.direction();

        match symbol {
            ControlSymbol::Quit => {
                snake.quit();
                Arbitration::Quit
            }
            ControlSymbol::Pause => {
                if current.is_moving() {
                    self.pause(snake)
                } else {
                    self.started = true;
                    snake.set_direction(self.saved);
                    Arbitration::Resumed(self.saved)
                }
            }
            ControlSymbol::Unknown(_) => {
                if current.is_moving() {
                    self.pause(snake)
                } else {
                    // Already paused: keep the remembered heading.
                    Arbitration::Paused
                }
            }
            ControlSymbol::Up => self.steer(symbol, Direction::Up, current, snake),
            ControlSymbol::Down => self.steer(symbol, Direction::Down, current, snake),
            ControlSymbol::Left => self.steer(symbol, Direction::Left, current, snake),
            ControlSymbol::Right => self.steer(symbol, Direction::Right, current, snake),
        }
    }

    fn steer(
        &mut self,
        symbol: ControlSymbol,
        wanted: Direction,
        current: Direction,
        snake: &mut Snake,
    ) -> Arbitration {
        if !current.is_moving() {
            if self.started || wanted == self.saved.opposite() {
                return Arbitration::Ignored(symbol);
            }
            self.started = true;
            snake.set_direction(wanted);
            return Arbitration::Started(wanted);
        }
        if wanted == current.opposite() || wanted == current {
            return Arbitration::Ignored(symbol);
        }
        self.started = true;
        snake.set_direction(wanted);
        Arbitration::Turned(wanted)
    }

    fn pause(&mut self, snake: &mut Snake) -> Arbitration {
        self.started = true;
        self.saved = snake.direction();
        snake.set_direction(Direction::Pause);
        Arbitration::Paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, GameConfig, SnakeState};

    fn moving(direction: Direction) -> Snake {
        Snake::from_body(
            &[Coord::new(5, 10), Coord::new(6, 10), Coord::new(7, 10)],
            direction,
            99,
        )
    }

    #[test]
    fn no_command_changes_nothing() {
        let mut arb = DirectionArbiter::new();
        let mut snake = moving(Direction::Up);
        assert_eq!(arb.apply(None, &mut snake), Arbitration::NoCommand);
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn reversal_is_refused() {
        for (dir, reverse) in [
            (Direction::Up, ControlSymbol::Down),
            (Direction::Down, ControlSymbol::Up),
            (Direction::Left, ControlSymbol::Right),
            (Direction::Right, ControlSymbol::Left),
        ] {
            let mut arb = DirectionArbiter::new();
            let mut snake = moving(dir);
            assert_eq!(
                arb.apply(Some(reverse), &mut snake),
                Arbitration::Ignored(reverse)
            );
            assert_eq!(snake.direction(), dir);
        }
    }

    #[test]
    fn each_direction_symbol_steers_its_own_heading() {
        for (from, symbol, to) in [
            (Direction::Left, ControlSymbol::Up, Direction::Up),
            (Direction::Left, ControlSymbol::Down, Direction::Down),
            (Direction::Up, ControlSymbol::Left, Direction::Left),
            (Direction::Up, ControlSymbol::Right, Direction::Right),
        ] {
            let mut arb = DirectionArbiter::new();
            let mut snake = moving(from);
            assert_eq!(arb.apply(Some(symbol), &mut snake), Arbitration::Turned(to));
            assert_eq!(snake.direction(), to);
        }
    }

    #[test]
    fn perpendicular_turn_is_taken() {
        let mut arb = DirectionArbiter::new();
        let mut snake = moving(Direction::Right);
        assert_eq!(
            arb.apply(Some(ControlSymbol::Up), &mut snake),
            Arbitration::Turned(Direction::Up)
        );
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn opening_direction_starts_a_new_game() {
        let mut arb = DirectionArbiter::new();
        let mut snake = Snake::new(&GameConfig::default());
        let body = snake.body().to_vec();
        assert_eq!(
            arb.apply(Some(ControlSymbol::Right), &mut snake),
            Arbitration::Started(Direction::Right)
        );
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.body(), &body[..]);
        assert!(arb.started());
    }

    #[test]
    fn opening_reversal_into_the_neck_is_ignored() {
        let mut arb = DirectionArbiter::new();
        let mut snake = Snake::new(&GameConfig::default());
        assert_eq!(
            arb.apply(Some(ControlSymbol::Left), &mut snake),
            Arbitration::Ignored(ControlSymbol::Left)
        );
        assert_eq!(snake.direction(), Direction::Pause);
    }

    #[test]
    fn direction_while_paused_is_ignored() {
        let mut arb = DirectionArbiter::new();
        let mut snake = moving(Direction::Down);
        arb.apply(Some(ControlSymbol::Pause), &mut snake);
        assert_eq!(
            arb.apply(Some(ControlSymbol::Left), &mut snake),
            Arbitration::Ignored(ControlSymbol::Left)
        );
        assert_eq!(snake.direction(), Direction::Pause);
    }

    #[test]
    fn pause_round_trip_restores_direction() {
        let mut arb = DirectionArbiter::new();
        let mut snake = moving(Direction::Down);
        assert_eq!(
            arb.apply(Some(ControlSymbol::Pause), &mut snake),
            Arbitration::Paused
        );
        assert_eq!(snake.direction(), Direction::Pause);
        assert_eq!(
            arb.apply(Some(ControlSymbol::Pause), &mut snake),
            Arbitration::Resumed(Direction::Down)
        );
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn first_resume_of_a_new_game_heads_right() {
        let mut arb = DirectionArbiter::new();
        let mut snake = Snake::new(&GameConfig::default());
        assert_eq!(
            arb.apply(Some(ControlSymbol::Pause), &mut snake),
            Arbitration::Resumed(Direction::Right)
        );
    }

    #[test]
    fn unknown_byte_forces_pause_and_resume_restores() {
        let mut arb = DirectionArbiter::new();
        let mut snake = moving(Direction::Up);
        assert_eq!(
            arb.apply(Some(ControlSymbol::Unknown(b'x')), &mut snake),
            Arbitration::Paused
        );
        assert_eq!(snake.direction(), Direction::Pause);

        // A second unknown byte while paused must not forget the heading.
        arb.apply(Some(ControlSymbol::Unknown(b'\r')), &mut snake);
        assert_eq!(arb.saved_direction(), Direction::Up);

        arb.apply(Some(ControlSymbol::Pause), &mut snake);
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn quit_ends_round_even_when_paused() {
        let mut arb = DirectionArbiter::new();
        let mut snake = moving(Direction::Pause);
        assert_eq!(
            arb.apply(Some(ControlSymbol::Quit), &mut snake),
            Arbitration::Quit
        );
        assert_eq!(snake.state(), SnakeState::Quit);
    }

    #[test]
    fn arbitrate_consumes_slot_once() {
        let slot = ControlSlot::new();
        let mut arb = DirectionArbiter::new();
        let mut snake = moving(Direction::Right);
        slot.push(b'W');
        assert_eq!(
            arb.arbitrate(&slot, &mut snake),
            Arbitration::Turned(Direction::Up)
        );
        assert_eq!(arb.arbitrate(&slot, &mut snake), Arbitration::NoCommand);
    }
}

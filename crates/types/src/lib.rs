//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data used by every other crate in the workspace:
//! grid coordinates, directions, the one-byte control alphabet, lifecycle enums and
//! the [`GameConfig`] that sizes an arena. Nothing here performs I/O or allocates.
//!
//! # Arena Geometry
//!
//! The arena is addressed in cells. Column 0 / row 0 and the `max_x` / `max_y`
//! columns and rows are walls; the snake lives strictly between them.
//!
//! ```text
//!     0  1 ~~ 13 14
//!   0 ###########
//!   1 #         #
//!  ~~ #  ARENA  #
//!  20 #         #
//!  21 ###########
//! ```
//!
//! # Default Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ARENA_MAX_X` | 14 | Right wall column |
//! | `ARENA_MAX_Y` | 21 | Bottom wall row |
//! | `BODY_CAPACITY` | 100 | Body slots; the game is won at `capacity - 1` |
//! | `INITIAL_LENGTH` | 3 | Body length at (re)start |
//! | `FOOD_MAX_ITER` | 10 | Samples per placement attempt before the exhaustion policy kicks in |
//! | `PLACEMENT_PERIOD` | 10 | Ticks between periodic placement windows |
//! | `TICK_MS` | 150 | Inter-tick delay |
//!
//! # Control Protocol
//!
//! One byte per command: `W` up, `S` down, `A` left, `D` right, `P` pause, `Q` quit.
//! Any other non-zero byte is [`ControlSymbol::Unknown`]; zero means "no command".
//!
//! # Examples
//!
//! ```
//! use remote_snake_types::{ControlSymbol, Direction, GameConfig};
//!
//! assert_eq!(ControlSymbol::from_byte(b'D'), Some(ControlSymbol::Right));
//! assert_eq!(ControlSymbol::from_byte(0), None);
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//!
//! let config = GameConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.win_length(), 99);
//! ```

use std::fmt;

/// Left/top wall coordinate.
pub const ARENA_MIN: u16 = 0;

/// Right wall column.
pub const ARENA_MAX_X: u16 = 14;

/// Bottom wall row.
pub const ARENA_MAX_Y: u16 = 21;

/// Number of body slots available to a snake.
pub const BODY_CAPACITY: usize = 100;

/// Body length at game (re)start.
pub const INITIAL_LENGTH: usize = 3;

/// Tail cell of the initial body; the rest extends towards +x.
pub const INITIAL_TAIL: Coord = Coord::new(1, 10);

/// Samples per placement attempt.
pub const FOOD_MAX_ITER: u16 = 10;

/// Ticks between periodic placement windows.
pub const PLACEMENT_PERIOD: u32 = 10;

/// Inter-tick delay in milliseconds.
pub const TICK_MS: u32 = 150;

/// Guard added to every inter-tick wait so the delay is never shorter than requested.
pub const TICK_GUARD_MS: u32 = 1;

/// A cell position in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction`.
    ///
    /// Returns `None` when the step would leave the unsigned coordinate space, and
    /// `Some(self)` for [`Direction::Pause`].
    pub fn step(self, direction: Direction) -> Option<Coord> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx as i16)?;
        let y = self.y.checked_add_signed(dy as i16)?;
        Some(Coord { x, y })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Heading of the snake.
///
/// `Pause` is a heading of its own: a paused snake keeps its body still and the
/// arbiter remembers which way it was going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Pause,
}

impl Direction {
    /// Unit vector of the heading (y grows downwards).
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Pause => (0, 0),
        }
    }

    /// The 180° reverse. `Pause` is its own opposite.
    ///
    /// # Examples
    ///
    /// ```
    /// use remote_snake_types::Direction;
    ///
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// assert_eq!(Direction::Pause.opposite(), Direction::Pause);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Pause => Direction::Pause,
        }
    }

    pub fn is_moving(self) -> bool {
        self != Direction::Pause
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Pause => "pause",
        }
    }
}

/// One decoded command from the control channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlSymbol {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Quit,
    /// Any byte outside the protocol alphabet (the raw byte is kept for logging).
    Unknown(u8),
}

impl ControlSymbol {
    /// Decode a protocol byte. Zero is the empty slot and decodes to `None`.
    ///
    /// The alphabet is case-sensitive: `b'w'` is [`ControlSymbol::Unknown`].
    pub fn from_byte(byte: u8) -> Option<Self> {
        let symbol = match byte {
            0 => return None,
            b'W' => ControlSymbol::Up,
            b'S' => ControlSymbol::Down,
            b'A' => ControlSymbol::Left,
            b'D' => ControlSymbol::Right,
            b'P' => ControlSymbol::Pause,
            b'Q' => ControlSymbol::Quit,
            other => ControlSymbol::Unknown(other),
        };
        Some(symbol)
    }

    /// Encode back to the protocol byte.
    pub fn as_byte(self) -> u8 {
        match self {
            ControlSymbol::Up => b'W',
            ControlSymbol::Down => b'S',
            ControlSymbol::Left => b'A',
            ControlSymbol::Right => b'D',
            ControlSymbol::Pause => b'P',
            ControlSymbol::Quit => b'Q',
            ControlSymbol::Unknown(b) => b,
        }
    }
}

/// Snake lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakeState {
    Playing,
    Crashed,
    Won,
    /// The player asked to end the round with a `Q` command.
    Quit,
}

impl SnakeState {
    pub fn is_terminal(self) -> bool {
        self != SnakeState::Playing
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SnakeState::Playing => "playing",
            SnakeState::Crashed => "crashed",
            SnakeState::Won => "won",
            SnakeState::Quit => "quit",
        }
    }
}

/// Food lifecycle: `Waiting -> Placed -> Eaten -> Waiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodState {
    Waiting,
    Placed,
    Eaten,
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    Crashed,
    Won,
    Quit,
    /// Food placement gave up under [`ExhaustionPolicy::Halt`].
    Fatal,
}

impl RoundOutcome {
    /// Outcome matching a terminal snake state; `None` while still playing.
    pub fn from_state(state: SnakeState) -> Option<Self> {
        match state {
            SnakeState::Playing => None,
            SnakeState::Crashed => Some(RoundOutcome::Crashed),
            SnakeState::Won => Some(RoundOutcome::Won),
            SnakeState::Quit => Some(RoundOutcome::Quit),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoundOutcome::Crashed => "crashed",
            RoundOutcome::Won => "won",
            RoundOutcome::Quit => "quit",
            RoundOutcome::Fatal => "fatal",
        }
    }

    /// Banner shown when the round ends.
    pub fn banner(self) -> (&'static str, TextColor) {
        match self {
            RoundOutcome::Crashed => ("GAME OVER", TextColor::Red),
            RoundOutcome::Won => ("YOU WON", TextColor::Green),
            RoundOutcome::Quit => ("QUIT", TextColor::Yellow),
            RoundOutcome::Fatal => ("FATAL ERROR", TextColor::Red),
        }
    }
}

/// What the food manager does when a placement attempt runs out of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExhaustionPolicy {
    /// Reseed the randomizer and keep sampling.
    #[default]
    Reseed,
    /// Give up; the round ends with a fatal outcome.
    Halt,
}

impl ExhaustionPolicy {
    /// Parse from string (case-insensitive)
    ///
    /// ```
    /// use remote_snake_types::ExhaustionPolicy;
    ///
    /// assert_eq!(ExhaustionPolicy::from_str("HALT"), Some(ExhaustionPolicy::Halt));
    /// assert_eq!(ExhaustionPolicy::from_str("sometimes"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reseed" => Some(ExhaustionPolicy::Reseed),
            "halt" | "fatal" => Some(ExhaustionPolicy::Halt),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExhaustionPolicy::Reseed => "reseed",
            ExhaustionPolicy::Halt => "halt",
        }
    }
}

/// Colors available to status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    Red,
    Green,
    Yellow,
}

/// Inclusive coordinate range on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisRange {
    pub min: u16,
    pub max: u16,
}

impl AxisRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// Number of values in the range.
    pub fn span(self) -> u32 {
        if self.max < self.min {
            0
        } else {
            (self.max - self.min) as u32 + 1
        }
    }

    pub fn contains(self, v: u16) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Arena walls. The playable interior is `1..max_x` by `1..max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arena {
    pub max_x: u16,
    pub max_y: u16,
}

impl Arena {
    pub const fn new(max_x: u16, max_y: u16) -> Self {
        Self { max_x, max_y }
    }

    /// True when `c` lies strictly between the walls.
    pub fn is_interior(&self, c: Coord) -> bool {
        c.x > ARENA_MIN && c.y > ARENA_MIN && c.x < self.max_x && c.y < self.max_y
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ARENA_MAX_X, ARENA_MAX_Y)
    }
}

/// Reason a [`GameConfig`] was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
    CapacityTooLarge { capacity: usize },
    CapacityTooSmall { capacity: usize, initial_length: usize },
    InitialBodyOutsideArena,
    FoodRangeOutsideArena,
    FoodAreaTooSmall { cells: u32, win_length: usize },
    ZeroRetryBound,
    ZeroPlacementPeriod,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::CapacityTooLarge { capacity } => {
                write!(f, "capacity {capacity} exceeds {BODY_CAPACITY} body slots")
            }
            ConfigIssue::CapacityTooSmall {
                capacity,
                initial_length,
            } => write!(
                f,
                "capacity {capacity} leaves no room to grow from length {initial_length}"
            ),
            ConfigIssue::InitialBodyOutsideArena => {
                write!(f, "initial body does not fit inside the arena walls")
            }
            ConfigIssue::FoodRangeOutsideArena => {
                write!(f, "food range reaches into the arena walls")
            }
            ConfigIssue::FoodAreaTooSmall { cells, win_length } => write!(
                f,
                "food area of {cells} cells cannot hold a {win_length}-cell snake plus food"
            ),
            ConfigIssue::ZeroRetryBound => write!(f, "placement retry bound must be non-zero"),
            ConfigIssue::ZeroPlacementPeriod => write!(f, "placement period must be non-zero"),
        }
    }
}

/// Everything that sizes and paces a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub arena: Arena,
    pub food_x: AxisRange,
    pub food_y: AxisRange,
    /// Body slots in use; must not exceed [`BODY_CAPACITY`].
    pub capacity: usize,
    pub initial_tail: Coord,
    pub initial_length: usize,
    pub retry_bound: u16,
    pub placement_period: u32,
    pub tick_ms: u32,
    pub exhaustion: ExhaustionPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            food_x: AxisRange::new(1, ARENA_MAX_X - 1),
            food_y: AxisRange::new(1, ARENA_MAX_Y - 1),
            capacity: BODY_CAPACITY,
            initial_tail: INITIAL_TAIL,
            initial_length: INITIAL_LENGTH,
            retry_bound: FOOD_MAX_ITER,
            placement_period: PLACEMENT_PERIOD,
            tick_ms: TICK_MS,
            exhaustion: ExhaustionPolicy::Reseed,
        }
    }
}

impl GameConfig {
    /// Length at which the game is won.
    pub fn win_length(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    /// Cells of the initial body, tail first.
    pub fn initial_body(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.initial_length)
            .map(move |i| Coord::new(self.initial_tail.x + i as u16, self.initial_tail.y))
    }

    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.capacity > BODY_CAPACITY {
            return Err(ConfigIssue::CapacityTooLarge {
                capacity: self.capacity,
            });
        }
        if self.initial_length == 0 || self.capacity < self.initial_length + 2 {
            return Err(ConfigIssue::CapacityTooSmall {
                capacity: self.capacity,
                initial_length: self.initial_length,
            });
        }
        let last_x = self.initial_tail.x as usize + self.initial_length - 1;
        if last_x >= self.arena.max_x as usize
            || !self.arena.is_interior(self.initial_tail)
        {
            return Err(ConfigIssue::InitialBodyOutsideArena);
        }
        let food_inside = self.food_x.min > ARENA_MIN
            && self.food_y.min > ARENA_MIN
            && self.food_x.max < self.arena.max_x
            && self.food_y.max < self.arena.max_y;
        if !food_inside || self.food_x.span() == 0 || self.food_y.span() == 0 {
            return Err(ConfigIssue::FoodRangeOutsideArena);
        }
        let cells = self.food_x.span() * self.food_y.span();
        if cells as usize <= self.win_length() {
            return Err(ConfigIssue::FoodAreaTooSmall {
                cells,
                win_length: self.win_length(),
            });
        }
        if self.retry_bound == 0 {
            return Err(ConfigIssue::ZeroRetryBound);
        }
        if self.placement_period == 0 {
            return Err(ConfigIssue::ZeroPlacementPeriod);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_tft_port() {
        let config = GameConfig::default();
        assert_eq!(config.arena, Arena::new(14, 21));
        assert_eq!(config.food_x, AxisRange::new(1, 13));
        assert_eq!(config.food_y, AxisRange::new(1, 20));
        assert_eq!(config.win_length(), 99);
        assert_eq!(config.retry_bound, 10);
        assert_eq!(config.placement_period, 10);
        assert_eq!(config.tick_ms, 150);
        assert_eq!(config.exhaustion, ExhaustionPolicy::Reseed);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn initial_body_runs_tail_to_head_along_x() {
        let config = GameConfig::default();
        let body: Vec<Coord> = config.initial_body().collect();
        assert_eq!(
            body,
            vec![Coord::new(1, 10), Coord::new(2, 10), Coord::new(3, 10)]
        );
    }

    #[test]
    fn control_bytes_decode_case_sensitively() {
        assert_eq!(ControlSymbol::from_byte(b'W'), Some(ControlSymbol::Up));
        assert_eq!(ControlSymbol::from_byte(b'S'), Some(ControlSymbol::Down));
        assert_eq!(ControlSymbol::from_byte(b'A'), Some(ControlSymbol::Left));
        assert_eq!(ControlSymbol::from_byte(b'D'), Some(ControlSymbol::Right));
        assert_eq!(ControlSymbol::from_byte(b'P'), Some(ControlSymbol::Pause));
        assert_eq!(ControlSymbol::from_byte(b'Q'), Some(ControlSymbol::Quit));
        assert_eq!(
            ControlSymbol::from_byte(b'w'),
            Some(ControlSymbol::Unknown(b'w'))
        );
        assert_eq!(ControlSymbol::from_byte(0), None);

        for b in *b"WSADPQx" {
            assert_eq!(ControlSymbol::from_byte(b).unwrap().as_byte(), b);
        }
    }

    #[test]
    fn step_follows_screen_axes() {
        let c = Coord::new(5, 5);
        assert_eq!(c.step(Direction::Up), Some(Coord::new(5, 4)));
        assert_eq!(c.step(Direction::Down), Some(Coord::new(5, 6)));
        assert_eq!(c.step(Direction::Left), Some(Coord::new(4, 5)));
        assert_eq!(c.step(Direction::Right), Some(Coord::new(6, 5)));
        assert_eq!(c.step(Direction::Pause), Some(c));
        assert_eq!(Coord::new(0, 3).step(Direction::Left), None);
    }

    #[test]
    fn round_outcome_follows_terminal_state() {
        assert_eq!(RoundOutcome::from_state(SnakeState::Playing), None);
        assert_eq!(
            RoundOutcome::from_state(SnakeState::Crashed),
            Some(RoundOutcome::Crashed)
        );
        assert_eq!(RoundOutcome::Won.banner(), ("YOU WON", TextColor::Green));
        assert_eq!(RoundOutcome::Fatal.as_str(), "fatal");
    }

    #[test]
    fn arena_interior_excludes_walls() {
        let arena = Arena::default();
        assert!(arena.is_interior(Coord::new(1, 1)));
        assert!(arena.is_interior(Coord::new(13, 20)));
        assert!(!arena.is_interior(Coord::new(0, 5)));
        assert!(!arena.is_interior(Coord::new(14, 5)));
        assert!(!arena.is_interior(Coord::new(5, 0)));
        assert!(!arena.is_interior(Coord::new(5, 21)));
    }

    #[test]
    fn validate_rejects_food_area_smaller_than_snake() {
        let config = GameConfig {
            food_x: AxisRange::new(1, 3),
            food_y: AxisRange::new(1, 3),
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigIssue::FoodAreaTooSmall { cells: 9, .. })
        ));
    }

    #[test]
    fn validate_rejects_oversized_capacity_and_walls() {
        let config = GameConfig {
            capacity: BODY_CAPACITY + 1,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigIssue::CapacityTooLarge { .. })
        ));

        let config = GameConfig {
            food_x: AxisRange::new(0, 13),
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigIssue::FoodRangeOutsideArena));

        let config = GameConfig {
            initial_tail: Coord::new(12, 10),
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigIssue::InitialBodyOutsideArena));
    }
}

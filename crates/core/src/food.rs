//! Food manager - placement windows, bounded sampling and consumption.
//!
//! Lifecycle is `Waiting -> Placed -> Eaten -> Waiting`. The rearm from `Eaten` back
//! to `Waiting` happens at the start of the next placement evaluation.

use tracing::{debug, warn};

use crate::render::Surface;
use crate::rng::Randomizer;
use crate::snake::Snake;
use crate::types::{AxisRange, Coord, ExhaustionPolicy, FoodState, GameConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub coord: Coord,
    pub state: FoodState,
    /// A window passed while food was still on the board; the next tick re-evaluates.
    pub elapsed: bool,
}

impl Default for Food {
    fn default() -> Self {
        Self {
            coord: Coord::new(0, 0),
            state: FoodState::Waiting,
            elapsed: false,
        }
    }
}

/// Result of [`FoodManager::place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Neither the periodic window nor the elapsed flag applies.
    NotDue,
    /// Window open but food is still on the board; elapsed flag set.
    Deferred,
    Placed {
        at: Coord,
        attempts: u32,
        reseeds: u32,
    },
    /// Retry bound hit under [`ExhaustionPolicy::Halt`].
    Exhausted { attempts: u32 },
}

#[derive(Debug, Clone)]
pub struct FoodManager {
    food: Food,
    range_x: AxisRange,
    range_y: AxisRange,
    retry_bound: u16,
    period: u32,
    policy: ExhaustionPolicy,
}

impl FoodManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            food: Food::default(),
            range_x: non_empty(config.food_x),
            range_y: non_empty(config.food_y),
            retry_bound: config.retry_bound.max(1),
            period: config.placement_period.max(1),
            policy: config.exhaustion,
        }
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn policy(&self) -> ExhaustionPolicy {
        self.policy
    }

    /// Put food at `at` without sampling. Used to script rounds.
    pub fn place_at<S: Surface>(&mut self, at: Coord, surface: &mut S) {
        self.food = Food {
            coord: at,
            state: FoodState::Placed,
            elapsed: false,
        };
        surface.draw_food(at);
        surface.present();
    }

    /// Evaluate the placement window for `tick` and place food if it is due.
    pub fn place<R, S>(
        &mut self,
        tick: u32,
        snake: &Snake,
        rng: &mut R,
        surface: &mut S,
    ) -> PlacementOutcome
    where
        R: Randomizer,
        S: Surface,
    {
        if self.food.state == FoodState::Eaten {
            self.food.state = FoodState::Waiting;
        }

        if tick % self.period != 0 && !self.food.elapsed {
            return PlacementOutcome::NotDue;
        }
        if self.food.state == FoodState::Placed {
            self.food.elapsed = true;
            return PlacementOutcome::Deferred;
        }

        let bound = self.retry_bound as u32;
        let mut attempts = 0u32;
        let mut reseeds = 0u32;
        loop {
            for _ in 0..bound {
                attempts += 1;
                let candidate = self.sample(rng);
                if !snake.contains(candidate) {
                    self.food = Food {
                        coord: candidate,
                        state: FoodState::Placed,
                        elapsed: false,
                    };
                    surface.draw_food(candidate);
                    surface.present();
                    debug!(tick, x = candidate.x, y = candidate.y, attempts, "food placed");
                    return PlacementOutcome::Placed {
                        at: candidate,
                        attempts,
                        reseeds,
                    };
                }
            }

            match self.policy {
                ExhaustionPolicy::Reseed => {
                    warn!(tick, attempts, "food placement retries exhausted, reseeding");
                    rng.reseed();
                    reseeds += 1;
                }
                ExhaustionPolicy::Halt => {
                    warn!(tick, attempts, "food placement retries exhausted, halting");
                    return PlacementOutcome::Exhausted { attempts };
                }
            }
        }
    }

    /// Eat the food if the head is on it. Returns true when the snake grew.
    pub fn consume(&mut self, snake: &mut Snake) -> bool {
        if self.food.state != FoodState::Placed || snake.head() != Some(self.food.coord) {
            return false;
        }
        let grew = snake.grow();
        self.food.state = FoodState::Eaten;
        debug!(length = snake.len(), grew, "food eaten");
        grew
    }

    fn sample<R: Randomizer>(&self, rng: &mut R) -> Coord {
        let x = rng.next_random() % self.range_x.span() + self.range_x.min as u32;
        let y = rng.next_random() % self.range_y.span() + self.range_y.min as u32;
        Coord::new(x as u16, y as u16)
    }
}

/// An inverted range collapses to its lower bound so sampling always has a span.
fn non_empty(range: AxisRange) -> AxisRange {
    if range.span() == 0 {
        AxisRange::new(range.min, range.min)
    } else {
        range
    }
}

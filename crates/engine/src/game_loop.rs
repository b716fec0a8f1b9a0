//! Game loop driver.
//!
//! Per tick while playing, in order: arbitrate the pending command, move, stop if the
//! round ended, consume food, render, evaluate food placement, bump the tick counter.
//! [`GameLoop::run_round`] adds the bounded inter-tick wait between ticks.

use std::time::Instant;

use tracing::{debug, info};

use crate::clock::{wait_with_polling, TickClock};
use crate::core::{
    render_tick, Arbitration, ControlSlot, DirectionArbiter, FoodManager, MoveOutcome,
    PlacementOutcome, Randomizer, RenderPass, Snake, Surface,
};
use crate::types::{GameConfig, RoundOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Initializing,
    Playing,
    Terminated,
}

/// Everything that lives for one round.
#[derive(Debug, Clone)]
pub struct Session {
    snake: Snake,
    food: FoodManager,
    arbiter: DirectionArbiter,
    tick: u32,
    phase: LoopPhase,
    outcome: Option<RoundOutcome>,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        Self::from_parts(Snake::new(config), FoodManager::new(config))
    }

    /// Session around a prepared snake and food manager.
    pub fn from_parts(snake: Snake, food: FoodManager) -> Self {
        Self {
            snake,
            food,
            arbiter: DirectionArbiter::new(),
            tick: 0,
            phase: LoopPhase::Initializing,
            outcome: None,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &FoodManager {
        &self.food
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }
}

/// What one playing tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u32,
    pub arbitration: Arbitration,
    pub movement: MoveOutcome,
    pub grew: bool,
    pub render: RenderPass,
    pub placement: PlacementOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue(TickReport),
    Terminated(RoundOutcome),
}

/// Summary of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub outcome: RoundOutcome,
    pub ticks: u32,
    pub length: usize,
}

pub struct GameLoop<S, R, C> {
    config: GameConfig,
    surface: S,
    rng: R,
    clock: C,
    controls: ControlSlot,
}

impl<S, R, C> GameLoop<S, R, C>
where
    S: Surface,
    R: Randomizer,
    C: TickClock,
{
    pub fn new(config: GameConfig, surface: S, rng: R, clock: C, controls: ControlSlot) -> Self {
        Self {
            config,
            surface,
            rng,
            clock,
            controls,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn controls(&self) -> &ControlSlot {
        &self.controls
    }

    /// Fresh session, already moved from Initializing to Playing.
    pub fn start_session(&mut self) -> Session {
        let mut session = Session::new(&self.config);
        session.phase = LoopPhase::Playing;
        info!(length = session.snake.len(), "round started");
        session
    }

    /// Run one tick without the inter-tick wait.
    pub fn step(&mut self, session: &mut Session) -> TickOutcome {
        let started = Instant::now();
        let tick = session.tick;
        let outcome = self.run_tick(session);
        debug!(
            tick,
            elapsed_us = started.elapsed().as_micros() as u64,
            "tick finished"
        );
        outcome
    }

    fn run_tick(&mut self, session: &mut Session) -> TickOutcome {
        match session.phase {
            LoopPhase::Terminated => {
                return TickOutcome::Terminated(session.outcome.unwrap_or(RoundOutcome::Quit));
            }
            LoopPhase::Initializing => session.phase = LoopPhase::Playing,
            LoopPhase::Playing => {}
        }

        let arbitration = session
            .arbiter
            .arbitrate(&self.controls, &mut session.snake);
        if arbitration != Arbitration::NoCommand {
            debug!(tick = session.tick, ?arbitration, "control applied");
        }

        let movement = match arbitration {
            Arbitration::Started(_) => MoveOutcome::Idle,
            _ => session.snake.advance(&self.config.arena),
        };

        if let Some(outcome) = RoundOutcome::from_state(session.snake.state()) {
            return TickOutcome::Terminated(self.terminate(session, outcome));
        }

        let grew = session.food.consume(&mut session.snake);
        // The opening command leaves the body where the last frame drew it.
        let render = match arbitration {
            Arbitration::Started(_) if !session.snake.needs_full_paint() => RenderPass::Skipped,
            _ => render_tick(&mut session.snake, &mut self.surface),
        };
        let placement = session.food.place(
            session.tick,
            &session.snake,
            &mut self.rng,
            &mut self.surface,
        );
        if let PlacementOutcome::Exhausted { .. } = placement {
            return TickOutcome::Terminated(self.terminate(session, RoundOutcome::Fatal));
        }

        let report = TickReport {
            tick: session.tick,
            arbitration,
            movement,
            grew,
            render,
            placement,
        };
        session.tick = session.tick.wrapping_add(1);
        TickOutcome::Continue(report)
    }

    /// Bounded inter-tick wait, calling `maintenance` while it spins.
    pub fn wait<F: FnMut()>(&mut self, maintenance: F) -> u32 {
        wait_with_polling(&mut self.clock, self.config.tick_ms, maintenance)
    }

    /// Play one round to completion.
    pub fn run_round<F: FnMut()>(&mut self, mut maintenance: F) -> RoundReport {
        let mut session = self.start_session();
        loop {
            match self.step(&mut session) {
                TickOutcome::Continue(_) => {
                    self.wait(&mut maintenance);
                }
                TickOutcome::Terminated(outcome) => {
                    return RoundReport {
                        outcome,
                        ticks: session.tick,
                        length: session.snake.len(),
                    };
                }
            }
        }
    }

    fn terminate(&mut self, session: &mut Session, outcome: RoundOutcome) -> RoundOutcome {
        session.phase = LoopPhase::Terminated;
        session.outcome = Some(outcome);

        let (text, color) = outcome.banner();
        self.surface.print_text(text, color);
        self.surface.present();

        info!(
            outcome = outcome.as_str(),
            tick = session.tick,
            length = session.snake.len(),
            "round ended"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SteppingClock;
    use crate::core::{DrawLog, DrawOp};
    use crate::types::{AxisRange, Coord, Direction, ExhaustionPolicy, TextColor};

    /// Always lands on the same raw value.
    struct Constant(u32);

    impl Randomizer for Constant {
        fn next_random(&mut self) -> u32 {
            self.0
        }

        fn reseed(&mut self) {}
    }

    fn game(config: GameConfig) -> GameLoop<DrawLog, Constant, SteppingClock> {
        // Raw 5 lands food on (6, 6).
        GameLoop::new(
            config,
            DrawLog::new(),
            Constant(5),
            SteppingClock::new(0, 50),
            ControlSlot::new(),
        )
    }

    #[test]
    fn first_tick_paints_and_places_food() {
        let mut game = game(GameConfig::default());
        let mut session = game.start_session();
        assert_eq!(session.phase(), LoopPhase::Playing);

        let TickOutcome::Continue(report) = game.step(&mut session) else {
            panic!("round ended on the first tick");
        };
        assert_eq!(report.movement, MoveOutcome::Idle);
        assert_eq!(report.render, RenderPass::Full { cells: 3 });
        assert_eq!(
            report.placement,
            PlacementOutcome::Placed {
                at: Coord::new(6, 6),
                attempts: 1,
                reseeds: 0
            }
        );
        assert_eq!(session.tick(), 1);
        assert!(game.surface().ops().contains(&DrawOp::Food(Coord::new(6, 6))));
    }

    #[test]
    fn opening_command_moves_on_the_next_tick() {
        let mut game = game(GameConfig::default());
        let mut session = game.start_session();
        game.step(&mut session);

        game.controls().push(b'D');
        let TickOutcome::Continue(report) = game.step(&mut session) else {
            panic!("round ended");
        };
        assert_eq!(report.arbitration, Arbitration::Started(Direction::Right));
        assert_eq!(report.movement, MoveOutcome::Idle);
        assert_eq!(report.render, RenderPass::Skipped);
        assert_eq!(session.snake().head(), Some(Coord::new(3, 10)));

        game.step(&mut session);
        assert_eq!(session.snake().head(), Some(Coord::new(4, 10)));
    }

    #[test]
    fn quit_terminates_and_prints_banner() {
        let mut game = game(GameConfig::default());
        let mut session = game.start_session();
        game.controls().push(b'Q');

        assert_eq!(
            game.step(&mut session),
            TickOutcome::Terminated(RoundOutcome::Quit)
        );
        assert_eq!(session.phase(), LoopPhase::Terminated);
        assert!(game
            .surface()
            .ops()
            .contains(&DrawOp::Text("QUIT".into(), TextColor::Yellow)));
        // Stepping a finished session is a no-op.
        assert_eq!(
            game.step(&mut session),
            TickOutcome::Terminated(RoundOutcome::Quit)
        );
    }

    #[test]
    fn halt_policy_ends_round_as_fatal() {
        let config = GameConfig {
            exhaustion: ExhaustionPolicy::Halt,
            ..GameConfig::default()
        };
        // Raw 1 lands on (2, 2); occupy it so every sample fails.
        let mut game = GameLoop::new(
            config,
            DrawLog::new(),
            Constant(1),
            SteppingClock::new(0, 50),
            ControlSlot::new(),
        );
        let snake = Snake::from_body(
            &[Coord::new(2, 4), Coord::new(2, 3), Coord::new(2, 2)],
            Direction::Pause,
            99,
        );
        let mut session = Session::from_parts(snake, FoodManager::new(&config));
        assert_eq!(
            game.step(&mut session),
            TickOutcome::Terminated(RoundOutcome::Fatal)
        );
        assert!(game
            .surface()
            .ops()
            .contains(&DrawOp::Text("FATAL ERROR".into(), TextColor::Red)));
    }

    #[test]
    fn run_round_waits_between_ticks_and_reports() {
        let mut game = game(GameConfig::default());
        game.controls().push(b'P');
        let slot = game.controls().clone();
        let mut polls = 0u32;

        // Snake resumes right on tick 0 and hits the wall at x = 14 on tick 10.
        let report = game.run_round(|| {
            polls += 1;
            slot.push(0);
        });
        assert_eq!(report.outcome, RoundOutcome::Crashed);
        assert_eq!(report.ticks, 10);
        assert_eq!(report.length, 3);
        assert!(polls > 0);
    }

    #[test]
    fn opening_command_on_first_tick_still_paints_the_board() {
        let mut game = game(GameConfig::default());
        let mut session = game.start_session();
        game.controls().push(b'S');

        let TickOutcome::Continue(report) = game.step(&mut session) else {
            panic!("round ended");
        };
        assert_eq!(report.arbitration, Arbitration::Started(Direction::Down));
        assert_eq!(report.render, RenderPass::Full { cells: 3 });
        assert_eq!(game.surface().count(|op| *op == DrawOp::Border), 1);
    }

    #[test]
    fn inverted_food_range_places_on_its_lower_bound() {
        let config = GameConfig {
            food_x: AxisRange::new(5, 4),
            ..GameConfig::default()
        };
        let mut game = game(config);
        let mut session = game.start_session();

        let TickOutcome::Continue(report) = game.step(&mut session) else {
            panic!("round ended");
        };
        assert_eq!(
            report.placement,
            PlacementOutcome::Placed {
                at: Coord::new(5, 6),
                attempts: 1,
                reseeds: 0
            }
        );
    }

    #[test]
    fn step_logs_under_a_debug_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let mut game = game(GameConfig::default());
        let mut session = game.start_session();

        let outcome = tracing::subscriber::with_default(subscriber, || game.step(&mut session));
        assert!(matches!(outcome, TickOutcome::Continue(_)));
        assert_eq!(session.tick(), 1);
    }
}

//! Terminal snake runner (default binary).
//!
//! Plays rounds back to back in the terminal. Keyboard and TCP clients both write
//! into the same control slot; the game loop services the keyboard from its
//! inter-tick wait.

use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{info, warn};

use remote_snake::adapter::{Adapter, ServerMessage};
use remote_snake::core::{ControlSlot, Lfsr16, Randomizer, SimpleRng, ThreadEntropy};
use remote_snake::engine::{wait_with_polling, GameLoop, MonotonicClock, RuntimeConfig};
use remote_snake::input::{poll_into, KeyboardPoll};
use remote_snake::term::{TermSurface, TerminalRenderer};
use remote_snake::types::RoundOutcome;

/// Pause between rounds, with the final banner on screen.
const ROUND_BREAK_MS: u32 = 2_000;
const KEY_POLL: Duration = Duration::from_millis(1);

fn main() -> Result<()> {
    init_tracing();
    let config = RuntimeConfig::from_env()?;
    let controls = ControlSlot::new();
    let adapter = Adapter::start_from_env(controls.clone())?;
    if let Some(adapter) = &adapter {
        info!(addr = %adapter.local_addr(), "remote control enabled");
    }

    let mut surface = TermSurface::new(config.game.arena, TerminalRenderer::new());
    if let Some(renderer) = surface.renderer_mut() {
        renderer.enter()?;
    }

    let result = match config.seed {
        Some(seed) => run(
            &config,
            &mut surface,
            Lfsr16::new(SimpleRng::new(seed)),
            &controls,
            adapter.as_ref(),
        ),
        None => run(
            &config,
            &mut surface,
            Lfsr16::new(ThreadEntropy),
            &controls,
            adapter.as_ref(),
        ),
    };

    // Always try to restore terminal state.
    if let Some(renderer) = surface.renderer_mut() {
        let _ = renderer.exit();
    }
    result
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn run<R: Randomizer>(
    config: &RuntimeConfig,
    surface: &mut TermSurface,
    rng: R,
    controls: &ControlSlot,
    adapter: Option<&Adapter>,
) -> Result<()> {
    let mut game = GameLoop::new(
        config.game,
        surface,
        rng,
        MonotonicClock::new(),
        controls.clone(),
    );
    let mut exit = false;
    let mut round = 0u32;

    while !exit {
        round += 1;
        publish(adapter, ServerMessage::round_started(round));

        let report = game.run_round(|| service_keyboard(controls, &mut exit));
        publish(
            adapter,
            ServerMessage::round_ended(round, report.outcome, report.length, report.ticks),
        );

        if report.outcome == RoundOutcome::Fatal {
            bail!("food placement ran out of retries in round {round}");
        }
        if exit {
            break;
        }

        let mut clock = MonotonicClock::new();
        wait_with_polling(&mut clock, ROUND_BREAK_MS, || {
            service_keyboard(controls, &mut exit)
        });
        // Commands given while the banner was up belong to no round.
        controls.take();
    }

    info!(rounds = round, "exiting");
    Ok(())
}

fn service_keyboard(controls: &ControlSlot, exit: &mut bool) {
    match poll_into(controls, KEY_POLL) {
        Ok(KeyboardPoll::Exit) => *exit = true,
        Ok(_) => {}
        Err(err) => warn!(%err, "keyboard poll failed"),
    }
}

fn publish(adapter: Option<&Adapter>, msg: ServerMessage) {
    if let Some(adapter) = adapter {
        adapter.publish(msg);
    }
}

//! Plays a full duel without any frontend: scripted policies on both boards, fixed 50 Hz
//! tick. Settings and flags come from the `ARENA_*` environment variables.

use anyhow::{bail, Context};
use candy_arena::prelude::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const TICK: f32 = 1.0 / 50.0;
/// One simulated hour.
const MAX_TICKS: u64 = 180_000;

fn main() -> anyhow::Result<()> {
    let config = Configuration::from_env();
    let settings = MatchSettingsBuilder::from_env()
        .build()
        .context("invalid ARENA_* settings")?;

    // the orchestrator installs the file logger itself
    if config.verbose() && !config.log() {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .without_time()
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("failed to install the console logger")?;
    }

    let rounds_to_win = settings.rounds_to_win();
    let mut orchestrator = Orchestrator::new(
        settings,
        config,
        config.rng(),
        ScoreBoard::new(rounds_to_win),
        TracingTelemetry::new(),
    );
    orchestrator.start()?;

    let mut moves = Sides::new(ChaseNearest::default(), ChaseHighestValue);
    let mut ticks = 0;
    while orchestrator.state() != GameState::CompetitionFinished {
        if ticks == MAX_TICKS {
            orchestrator.shutdown();
            bail!(
                "match not finished after {} simulated seconds ({})",
                MAX_TICKS as f32 * TICK,
                orchestrator.score()
            );
        }
        ticks += 1;

        for event in orchestrator.tick(TICK, &mut moves) {
            match event {
                MatchEvent::RoundEnded(summary) if config.verbose() => println!("{summary}"),
                MatchEvent::RoundSkipped { round, error } if config.verbose() => {
                    println!("round {round} skipped: {error}")
                }
                MatchEvent::TutorialAdvanced { step, points } if config.verbose() => {
                    println!("tutorial step {} done with {points} points", step.number())
                }
                _ => {}
            }
        }
    }

    let hud = orchestrator.hooks();
    println!(
        "{} | {} / {}",
        orchestrator.score(),
        hud.progress(Side::Human).filled(),
        hud.progress(Side::Computer).filled()
    );
    orchestrator.shutdown();
    Ok(())
}

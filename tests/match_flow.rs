use candy_arena::episode::EpisodeOutcome;
use candy_arena::prelude::*;
use candy_arena::scoring::EndReason;
use candy_arena::settings::{MatchSettingsBuilder, TutorialStage, DEFAULT_TUTORIAL};
use rand::rngs::StdRng;
use tracing::{Level, Metadata};
use tracing_subscriber::{
    fmt,
    layer::{Context, Filter, SubscriberExt},
    Layer, Registry,
};

const TICK: f32 = 0.02;

struct CustomLevelFilter;
impl<S> Filter<S> for CustomLevelFilter {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        meta.level() <= &Level::DEBUG
    }
}

fn init_debug_logger() {
    let format = tracing_subscriber::fmt::format()
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    let reg = Registry::default().with(
        fmt::layer()
            .event_format(format)
            .with_test_writer()
            .with_filter(CustomLevelFilter),
    );

    let _ = tracing::subscriber::set_global_default(reg);
}

type Duel<H> = Orchestrator<StdRng, H, MemoryTelemetry>;

fn duel<H: PresentationHooks>(settings: MatchSettings, skip_tutorial: bool, hooks: H) -> Duel<H> {
    let config = Configuration::new()
        .with_verbose(false)
        .with_skip_tutorial(skip_tutorial)
        .with_seed(Some(2024));
    Orchestrator::new(
        settings,
        config,
        config.rng(),
        hooks,
        MemoryTelemetry::default(),
    )
}

/// Ticks until `done` holds or `max_ticks` ran out, returning every event seen.
fn run_until<H: PresentationHooks, M: MoveSource>(
    o: &mut Duel<H>,
    moves: &mut M,
    max_ticks: usize,
    done: impl Fn(&Duel<H>) -> bool,
) -> Vec<MatchEvent> {
    let mut events = vec![];
    for _ in 0..max_ticks {
        if done(o) {
            break;
        }
        events.extend(o.tick(TICK, moves));
    }
    events
}

fn round_summaries(events: &[MatchEvent]) -> Vec<RoundSummary> {
    events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::RoundEnded(summary) => Some(*summary),
            _ => None,
        })
        .collect()
}

#[test]
fn match_ends_exactly_at_threshold() {
    let settings = MatchSettingsBuilder::new()
        .with_rounds_to_win(3)
        .build()
        .unwrap();
    let mut o = duel(settings, true, ScoreBoard::new(3));
    o.start().unwrap();

    let mut moves = Sides::new(ChaseNearest::default(), Stand);
    let events = run_until(&mut o, &mut moves, 50_000, |o| {
        o.state() == GameState::CompetitionFinished
    });
    assert_eq!(o.state(), GameState::CompetitionFinished);

    let rounds = round_summaries(&events);
    assert_eq!(rounds.len(), 3);
    assert!(rounds.iter().all(|r| r.winner == Some(Side::Human)));
    assert_eq!(
        rounds.iter().map(|r| r.round).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(o.wins(Side::Human), 3);
    assert_eq!(o.wins(Side::Computer), 0);

    let ended: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::MatchEnded(summary) => Some(*summary),
            _ => None,
        })
        .collect();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].winner, Side::Human);
    assert_eq!(ended[0].wins, [3, 0]);

    assert_eq!(o.telemetry().rounds().count(), 3);
    let record = o.telemetry().match_record().unwrap();
    assert_eq!(record.human_wins, 3);

    assert_eq!(o.hooks().progress(Side::Human).filled(), 3);
    assert_eq!(o.hooks().points_text(Side::Human), "Human: 0");
    assert_eq!(o.hooks().round_label(), "Human wins");

    // nothing moves once finished
    let late = run_until(&mut o, &mut moves, 500, |_| false);
    assert!(round_summaries(&late).is_empty());
    assert_eq!(o.wins(Side::Human), 3);
}

#[test]
fn round_points_start_from_zero_every_round() {
    let settings = MatchSettingsBuilder::new()
        .with_rounds_to_win(3)
        .build()
        .unwrap();
    let mut o = duel(settings, true, ());
    o.start().unwrap();

    let mut moves = Sides::new(ChaseNearest::default(), ChaseHighestValue);
    let mut first_of_round = [true; 2];
    for _ in 0..50_000 {
        if o.state() == GameState::CompetitionFinished {
            break;
        }
        for event in o.tick(TICK, &mut moves) {
            match event {
                MatchEvent::RewardCollected {
                    side,
                    value,
                    round_points,
                    ..
                } => {
                    if first_of_round[side.index()] {
                        assert_eq!(round_points, value);
                        first_of_round[side.index()] = false;
                    }
                }
                MatchEvent::RoundEnded(_) => {
                    first_of_round = [true; 2];
                    assert_eq!(o.round_points(Side::Human), 0);
                    assert_eq!(o.round_points(Side::Computer), 0);
                }
                _ => {}
            }
        }
    }
    assert_eq!(o.state(), GameState::CompetitionFinished);
}

#[test]
fn tie_on_timeout_still_advances_the_round() {
    let settings = MatchSettingsBuilder::new()
        .with_rounds_to_win(2)
        .with_round_time(3.0, 3.0)
        .build()
        .unwrap();
    let mut o = duel(settings, true, ());
    o.start().unwrap();

    let events = run_until(&mut o, &mut Stand, 10_000, |o| o.round_number() == 2);
    let rounds = round_summaries(&events);
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].winner, None);
    assert_eq!(rounds[0].reason, EndReason::Timeout);
    assert_eq!(rounds[0].points, [0, 0]);
    assert!(events.contains(&MatchEvent::EpisodeEnded {
        side: Side::Computer,
        outcome: EpisodeOutcome::TimedOut
    }));

    assert_eq!(o.round_number(), 2);
    assert_eq!(o.score().draws, 1);
    assert_eq!(o.state(), GameState::CompetitionActive);
}

#[test]
fn reports_after_the_round_are_dropped() {
    let settings = MatchSettingsBuilder::new()
        .with_rounds_to_win(2)
        .build()
        .unwrap();
    let mut o = duel(settings, true, ());
    o.start().unwrap();
    run_until(&mut o, &mut Stand, 10_000, |o| o.is_round_live());

    let events = o.report_collision(Side::Computer, Collider::Candy(1));
    assert_eq!(o.round_points(Side::Computer), 4);
    assert!(events.iter().all(|e| !matches!(e, MatchEvent::RoundEnded(_))));

    let events = o.report_collision(Side::Human, Collider::Wall);
    let rounds = round_summaries(&events);
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].winner, Some(Side::Computer));

    assert!(o.report_collision(Side::Computer, Collider::Candy(2)).is_empty());
    assert!(o.report_collision(Side::Human, Collider::Wall).is_empty());
    assert_eq!(o.round_points(Side::Computer), 0);
    assert_eq!(o.wins(Side::Computer), 1);
    assert_eq!(o.wins(Side::Human), 0);
}

#[test]
fn collisions_while_placing_are_dropped() {
    let mut o = duel(MatchSettings::default(), true, ());
    o.start().unwrap();
    o.start_competition().unwrap();
    assert!(!o.is_round_live());
    assert!(o.report_collision(Side::Human, Collider::Wall).is_empty());
    assert!(o.report_collision(Side::Human, Collider::Candy(0)).is_empty());
    assert_eq!(o.wins(Side::Computer), 0);
}

#[test]
fn tutorial_walks_every_step_before_the_competition() {
    init_debug_logger();

    let settings = MatchSettingsBuilder::new()
        .with_competition_start_delay(None)
        .build()
        .unwrap();
    let mut o = duel(settings, false, ScoreBoard::new(10));
    o.start().unwrap();
    assert_eq!(o.state(), GameState::Hello);

    let mut moves = Sides::new(ChaseNearest::default(), Stand);
    let events = run_until(&mut o, &mut moves, 200_000, |o| {
        o.state() == GameState::CompetitionPending
    });
    assert_eq!(o.state(), GameState::CompetitionPending);

    let steps: Vec<TutorialStep> = events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::TutorialAdvanced { step, .. } => Some(*step),
            _ => None,
        })
        .collect();
    assert_eq!(
        steps,
        vec![
            TutorialStep::OneCandy,
            TutorialStep::TwoCandies,
            TutorialStep::FourCandies,
            TutorialStep::TimedTen,
            TutorialStep::TimedFive
        ]
    );
    assert!(o.tutorial_points() >= 90);
    // the HUD shows the running tutorial total, not the last episode
    assert_eq!(
        o.hooks().points_text(Side::Human),
        format!("Human: {}", o.tutorial_points())
    );
    assert_eq!(o.board(Side::Computer).episodes_started(), 0);
    assert!(events
        .iter()
        .all(|e| !matches!(e, MatchEvent::RewardCollected { side: Side::Computer, .. })));

    // waits for the host without a start delay
    run_until(&mut o, &mut moves, 1_000, |_| false);
    assert_eq!(o.state(), GameState::CompetitionPending);
    o.start_competition().unwrap();
    assert_eq!(o.state(), GameState::CompetitionActive);
    assert_eq!(o.round_number(), 1);
}

/// Tutorial settings with short pauses and `first` as the one-candy step.
fn quick_tutorial(first: TutorialStage) -> MatchSettingsBuilder {
    let mut stages = DEFAULT_TUTORIAL;
    stages[0] = first;
    MatchSettingsBuilder::new()
        .with_tutorial(stages)
        .with_hello_duration(0.1)
        .with_show_board_delay(0.1)
        .with_presentation_delay(0.1)
        .with_round_end_pause(0.5)
}

fn count_endings(events: &[MatchEvent], wanted: EpisodeOutcome) -> usize {
    events
        .iter()
        .filter(|e| match e {
            MatchEvent::EpisodeEnded {
                side: Side::Human,
                outcome,
            } => *outcome == wanted,
            _ => false,
        })
        .count()
}

#[test]
fn timed_out_tutorial_episode_restarts_the_step() {
    let settings = quick_tutorial(TutorialStage {
        candies: 1,
        time_budget: Some(1.0),
        points_to_advance: 3,
    })
    .build()
    .unwrap();
    let mut o = duel(settings, false, ScoreBoard::new(10));
    o.start().unwrap();

    // candies spawn out of pickup reach, so standing still never scores
    let events = run_until(&mut o, &mut Stand, 5_000, |o| {
        o.board(Side::Human).episodes_started() >= 3
    });
    assert_eq!(o.board(Side::Human).episodes_started(), 3);
    assert_eq!(o.state(), GameState::Tutorial(TutorialStep::OneCandy));
    assert_eq!(count_endings(&events, EpisodeOutcome::TimedOut), 2);
    assert!(events
        .iter()
        .all(|e| !matches!(e, MatchEvent::TutorialAdvanced { .. })));
    assert_eq!(o.tutorial_points(), 0);
    assert_eq!(o.board(Side::Computer).episodes_started(), 0);
}

#[test]
fn wall_hit_in_the_tutorial_restarts_the_step() {
    let settings = quick_tutorial(TutorialStage {
        candies: 1,
        time_budget: None,
        points_to_advance: 1_000,
    })
    .build()
    .unwrap();
    let mut o = duel(settings, false, ());
    o.start().unwrap();

    // straight away from the only candy, so it is never picked up
    let mut flee = |_: Side, board: &BoardView<'_>| {
        board.candies.first().map_or(Vec2::ZERO, |candy| {
            (board.agent - candy.position()).normalized_or_zero()
        })
    };
    let events = run_until(&mut o, &mut flee, 5_000, |o| {
        o.board(Side::Human).episodes_started() >= 3
    });
    assert_eq!(o.board(Side::Human).episodes_started(), 3);
    assert_eq!(o.state(), GameState::Tutorial(TutorialStep::OneCandy));
    assert_eq!(count_endings(&events, EpisodeOutcome::HitWall), 2);
    assert!(events.contains(&MatchEvent::WallHit(Side::Human)));
    assert_eq!(o.tutorial_points(), 0);
}

#[test]
fn tutorial_layout_failures_are_retried() {
    // five candies at least 1.38 from the center of a 2x2 board cannot all fit
    let settings = quick_tutorial(TutorialStage {
        candies: 5,
        time_budget: None,
        points_to_advance: 3,
    })
    .with_stage_size(1.0)
    .with_min_separation(1.4)
    .with_max_placement_attempts(20)
    .with_relaxation(0.99, 1)
    .build()
    .unwrap();
    let mut o = duel(settings, false, ());
    o.start().unwrap();

    let events = run_until(&mut o, &mut Stand, 500, |_| false);
    assert_eq!(o.state(), GameState::Tutorial(TutorialStep::OneCandy));
    assert_eq!(o.board(Side::Human).episodes_started(), 0);
    assert!(events
        .iter()
        .all(|e| !matches!(e, MatchEvent::EpisodeStarted { .. })));

    // still waiting on a layout, the tutorial can be left
    o.skip_tutorial().unwrap();
    assert_eq!(o.state(), GameState::CompetitionPending);
}

#[test]
fn skipping_the_tutorial_waits_for_the_competition() {
    let settings = MatchSettingsBuilder::new()
        .with_competition_start_delay(None)
        .build()
        .unwrap();
    let mut o = duel(settings, false, ());
    o.start().unwrap();

    assert_eq!(
        o.start_competition(),
        Err(ArenaError::InvalidTransition {
            action: "start_competition",
            state: GameState::Hello
        })
    );

    // into the first tutorial episode, then skip it
    let mut moves = Sides::new(Stand, Stand);
    run_until(&mut o, &mut moves, 10_000, |o| o.is_round_live());
    assert_eq!(o.state(), GameState::Tutorial(TutorialStep::OneCandy));
    o.skip_tutorial().unwrap();
    assert_eq!(o.state(), GameState::CompetitionPending);
    assert!(!o.is_round_live());
    assert!(o.skip_tutorial().is_err());

    run_until(&mut o, &mut moves, 1_000, |_| false);
    assert_eq!(o.state(), GameState::CompetitionPending);
    o.start_competition().unwrap();
    assert_eq!(o.state(), GameState::CompetitionActive);
}

#[test]
fn finished_competition_can_be_replayed() {
    let settings = MatchSettingsBuilder::new()
        .with_rounds_to_win(1)
        .build()
        .unwrap();
    let mut o = duel(settings, true, ());
    o.start().unwrap();
    let mut moves = Sides::new(Stand, ChaseNearest::default());
    run_until(&mut o, &mut moves, 20_000, |o| {
        o.state() == GameState::CompetitionFinished
    });
    assert_eq!(o.wins(Side::Computer), 1);

    o.start_competition().unwrap();
    assert_eq!(o.state(), GameState::CompetitionActive);
    assert_eq!(o.wins(Side::Computer), 0);
    assert_eq!(o.round_number(), 1);
}

#[test]
fn impossible_layouts_skip_rounds() {
    // five candies at least 1.38 from the center of a 2x2 board cannot all fit
    let settings = MatchSettingsBuilder::new()
        .with_stage_size(1.0)
        .with_min_separation(1.4)
        .with_competition_candies(5)
        .with_max_placement_attempts(20)
        .with_relaxation(0.99, 1)
        .build()
        .unwrap();
    let mut o = duel(settings, true, ());
    o.start().unwrap();
    let events = o.start_competition().unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        MatchEvent::RoundSkipped {
            round: 1,
            error: ArenaError::PlacementExhausted { .. }
        }
    )));

    let events = run_until(&mut o, &mut Stand, 100, |_| false);
    assert!(events
        .iter()
        .any(|e| matches!(e, MatchEvent::RoundSkipped { round: 2, .. })));
    assert_eq!(o.state(), GameState::CompetitionActive);
    assert_eq!(o.score().rounds_played(), 0);
}

#[test]
fn seeded_duels_replay_identically() {
    let play = || {
        let settings = MatchSettingsBuilder::new()
            .with_rounds_to_win(2)
            .with_agent_random(true)
            .build()
            .unwrap();
        let mut o = duel(settings, true, ());
        o.start().unwrap();
        let mut moves = Sides::new(ChaseNearest::default(), ChaseHighestValue);
        run_until(&mut o, &mut moves, 50_000, |o| {
            o.state() == GameState::CompetitionFinished
        });
        o.telemetry().records.clone()
    };
    let first = play();
    assert!(!first.is_empty());
    assert_eq!(first, play());
}

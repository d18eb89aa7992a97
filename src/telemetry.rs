//! Outcome records and the built-in telemetry sinks.

use tracing::info;

use crate::game_interface::{Side, TelemetrySink};
use crate::scoring::{EndReason, MatchSummary, RoundSummary};

/// Which boundary produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// End of a competition round.
    Round,
    /// End of the competition.
    Match,
}

/// One structured outcome, emitted at round and match boundaries only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeRecord {
    /// Round or match.
    pub kind: RecordKind,
    /// Round number (last played round for match records).
    pub round: u32,
    /// `None` for a tied round.
    pub winner: Option<Side>,
    /// What ended the round. `None` for match records.
    pub reason: Option<EndReason>,
    /// Human win counter.
    pub human_wins: u32,
    /// Computer win counter.
    pub computer_wins: u32,
    /// Human round points. Zero for match records.
    pub human_points: u32,
    /// Computer round points. Zero for match records.
    pub computer_points: u32,
}

impl From<&RoundSummary> for OutcomeRecord {
    fn from(summary: &RoundSummary) -> Self {
        Self {
            kind: RecordKind::Round,
            round: summary.round,
            winner: summary.winner,
            reason: Some(summary.reason),
            human_wins: summary.wins[0],
            computer_wins: summary.wins[1],
            human_points: summary.points[0],
            computer_points: summary.points[1],
        }
    }
}

impl From<&MatchSummary> for OutcomeRecord {
    fn from(summary: &MatchSummary) -> Self {
        Self {
            kind: RecordKind::Match,
            round: summary.rounds_played,
            winner: Some(summary.winner),
            reason: None,
            human_wins: summary.wins[0],
            computer_wins: summary.wins[1],
            human_points: 0,
            computer_points: 0,
        }
    }
}

/// Emits every record as a structured `info!` event.
#[derive(Debug, Default)]
pub struct TracingTelemetry {
    records: u64,
}

impl TracingTelemetry {
    /// A sink that has not seen any record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records emitted so far.
    pub fn records(&self) -> u64 {
        self.records
    }
}

impl TelemetrySink for TracingTelemetry {
    fn record(&mut self, record: &OutcomeRecord) {
        self.records += 1;
        info!(
            kind = ?record.kind,
            round = record.round,
            winner = ?record.winner,
            reason = ?record.reason,
            human_wins = record.human_wins,
            computer_wins = record.computer_wins,
            human_points = record.human_points,
            computer_points = record.computer_points,
            "outcome"
        );
    }

    fn teardown(&mut self) {
        info!(records = self.records, "telemetry closed");
    }
}

/// Keeps every record in memory. Handy for tests and replays.
#[derive(Debug, Default, Clone)]
pub struct MemoryTelemetry {
    /// Records in emission order.
    pub records: Vec<OutcomeRecord>,
}

impl MemoryTelemetry {
    /// Round records only.
    pub fn rounds(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter().filter(|r| r.kind == RecordKind::Round)
    }

    /// The match record, once the competition finished.
    pub fn match_record(&self) -> Option<&OutcomeRecord> {
        self.records.iter().rev().find(|r| r.kind == RecordKind::Match)
    }
}

impl TelemetrySink for MemoryTelemetry {
    fn record(&mut self, record: &OutcomeRecord) {
        self.records.push(*record);
    }
}

//! Score bookkeeping and the session-report boundary.
//!
//! Scoring is purely advisory: it never affects move legality. The engine
//! accumulates deltas per move class and hands the final tally to an external
//! [`ScoreSink`] once per completed session (win or voluntary quit).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Score deltas per move class.
pub mod delta {
    /// A card arrives on a foundation pile.
    pub const FOUNDATION_IN: i32 = 10;
    /// A card leaves a foundation pile.
    pub const FOUNDATION_OUT: i32 = -10;
    /// A completed stock turn (cards dealt stock to waste).
    pub const STOCK_TURN: i32 = 50;
    /// The waste is redealt back onto the stock.
    pub const REDEAL: i32 = -50;
    /// A face-down card is turned face-up in place.
    pub const TURN_CARD: i32 = 5;
    /// One undo.
    pub const UNDO: i32 = -20;
    /// One redo.
    pub const REDO: i32 = 20;
}

/// Outcome of one finished session, as reported to the scoring collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Key of the game that was played.
    pub game_name: String,
    /// Whether the win condition was met.
    pub victory: bool,
    /// Accumulated score (can be negative).
    pub score: i32,
    /// Number of applied moves, net of undo/redo.
    pub moves: u32,
    /// Wall-clock play time.
    pub duration: Duration,
}

/// Receiver for completed-session results.
///
/// Implemented by the external scoring/statistics collaborator; the engine
/// never reads or writes a persistent store itself.
pub trait ScoreSink {
    /// Called exactly once when a session completes.
    fn record_session(&mut self, summary: &SessionSummary);
}

/// A sink that drops every report, for callers that don't track scores.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ScoreSink for NullSink {
    fn record_session(&mut self, _summary: &SessionSummary) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_are_symmetric_where_required() {
        // Undo then redo must cancel so a move replays to the same score.
        assert_eq!(delta::UNDO + delta::REDO, 0);
        assert_eq!(delta::FOUNDATION_IN + delta::FOUNDATION_OUT, 0);
    }

    #[test]
    fn test_summary_serde() {
        let summary = SessionSummary {
            game_name: "klondike".into(),
            victory: true,
            score: 420,
            moves: 96,
            duration: Duration::from_secs(300),
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }

    #[test]
    fn test_null_sink_accepts_reports() {
        let mut sink = NullSink;
        sink.record_session(&SessionSummary {
            game_name: "freecell".into(),
            victory: false,
            score: -20,
            moves: 3,
            duration: Duration::ZERO,
        });
    }
}

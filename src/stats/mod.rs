//! Statistics sink seam.
//!
//! The engine reports two facts outward: how many turns a round took
//! and how many rounds a match took. Everything else (aggregation,
//! plotting, persistence) lives with the embedding orchestrator.

use std::cell::RefCell;
use std::rc::Rc;

/// Receiver for round/match boundary events. A no-op implementation is
/// always acceptable.
pub trait StatsSink {
    /// Called once per completed round with that round's turn count.
    fn record_turn_count(&mut self, turns: u32);

    /// Called once per completed match with that match's round count.
    fn record_round_count(&mut self, rounds: u32);
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl StatsSink for NullSink {
    fn record_turn_count(&mut self, _turns: u32) {}

    fn record_round_count(&mut self, _rounds: u32) {}
}

/// In-memory recorder: per-match lists of round turn counts, plus the
/// round count of every finished match.
#[derive(Clone, Debug)]
pub struct MatchStats {
    turns: Vec<Vec<u32>>,
    rounds: Vec<u32>,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self {
            turns: vec![Vec::new()],
            rounds: Vec::new(),
        }
    }
}

impl MatchStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn counts of the rounds in each match. The final entry is the
    /// match currently in progress and may be empty.
    #[must_use]
    pub fn turns(&self) -> &[Vec<u32>] {
        &self.turns
    }

    /// Round counts of the finished matches.
    #[must_use]
    pub fn rounds(&self) -> &[u32] {
        &self.rounds
    }

    /// Mean turns per round for each finished match.
    #[must_use]
    pub fn turn_averages(&self) -> Vec<f64> {
        self.turns[..self.turns.len() - 1]
            .iter()
            .map(|round_turns| {
                if round_turns.is_empty() {
                    0.0
                } else {
                    f64::from(round_turns.iter().sum::<u32>()) / round_turns.len() as f64
                }
            })
            .collect()
    }
}

impl StatsSink for MatchStats {
    fn record_turn_count(&mut self, turns: u32) {
        self.turns
            .last_mut()
            .expect("always one open match segment")
            .push(turns);
    }

    fn record_round_count(&mut self, rounds: u32) {
        self.rounds.push(rounds);
        self.turns.push(Vec::new());
    }
}

/// Lets an orchestrator keep a readable handle on a recorder while the
/// game owns the sink. The engine is single-threaded, so a `Rc` cell
/// is all the sharing that is ever needed.
impl<S: StatsSink> StatsSink for Rc<RefCell<S>> {
    fn record_turn_count(&mut self, turns: u32) {
        self.borrow_mut().record_turn_count(turns);
    }

    fn record_round_count(&mut self, rounds: u32) {
        self.borrow_mut().record_round_count(rounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_stats_segments() {
        let mut stats = MatchStats::new();
        stats.record_turn_count(12);
        stats.record_turn_count(30);
        stats.record_round_count(2);
        stats.record_turn_count(7);

        assert_eq!(stats.rounds(), &[2]);
        assert_eq!(stats.turns(), &[vec![12, 30], vec![7]]);
    }

    #[test]
    fn test_turn_averages_skip_open_segment() {
        let mut stats = MatchStats::new();
        stats.record_turn_count(10);
        stats.record_turn_count(20);
        stats.record_round_count(2);
        stats.record_turn_count(99);

        assert_eq!(stats.turn_averages(), vec![15.0]);
    }

    #[test]
    fn test_shared_sink() {
        let shared = Rc::new(RefCell::new(MatchStats::new()));
        {
            let mut sink = Rc::clone(&shared);
            sink.record_turn_count(5);
            sink.record_round_count(1);
        }
        assert_eq!(shared.borrow().rounds(), &[1]);
    }

    #[test]
    fn test_null_sink_is_a_noop() {
        let mut sink = NullSink;
        sink.record_turn_count(3);
        sink.record_round_count(9);
    }
}

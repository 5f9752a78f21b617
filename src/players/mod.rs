//! The player capability seam and per-seat state.
//!
//! The engine never holds a concrete player type — only
//! `Box<dyn Strategy>`. Strategies return *proposals* (hand/meld
//! indices); the engine applies each one tentatively through meld
//! reclassification and silently drops whatever would be illegal, so a
//! malformed or adversarial strategy degrades to "no action taken"
//! instead of corrupting shared state. Consumed hand cards are removed
//! in a single two-phase pass (collect indices, then remove in
//! descending order), never while a scan is still walking the hand.

mod greedy;
mod random;

pub use greedy::GreedyStrategy;
pub use random::RandomStrategy;

use crate::cards::{card_points, Card};
use crate::core::GameRng;
use crate::melds::Meld;

/// Where to draw from at the start of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawChoice {
    /// Take the top card of the draw pile.
    Stock,
    /// Take the entire discard pile.
    DiscardPile,
}

/// Proposal to attach one hand card to one owned meld.
///
/// `hand_index` addresses the hand as it stood when the proposal list
/// was produced; the engine resolves the whole list against that
/// snapshot before removing anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeldExtension {
    pub hand_index: usize,
    pub meld_index: usize,
}

/// Decision interface every player variant satisfies.
///
/// The engine drives a strategy through the four turn phases; each
/// call sees the seat's current state and the shared RNG, so a seeded
/// game is fully reproducible regardless of the mix of strategies.
/// Learned-model and human variants live outside this crate and plug
/// in through the same four methods.
pub trait Strategy {
    /// Drawing phase: stock card or the whole discard pile.
    fn choose_draw(
        &mut self,
        state: &PlayerState,
        discard_pile: &[Card],
        rng: &mut GameRng,
    ) -> DrawChoice;

    /// Meld-extension phase: ordered attachment proposals. Later
    /// proposals may rely on earlier ones having grown a meld.
    fn propose_extensions(&mut self, state: &PlayerState, rng: &mut GameRng)
        -> Vec<MeldExtension>;

    /// Meld-laying phase: hand index groups to lay as new melds.
    fn propose_melds(&mut self, state: &PlayerState, rng: &mut GameRng) -> Vec<Vec<usize>>;

    /// Discarding phase: hand index of the card to discard.
    fn choose_discard(&mut self, state: &PlayerState, rng: &mut GameRng) -> usize;
}

/// One seat's cards, melds, and running counters.
#[derive(Debug, Default)]
pub struct PlayerState {
    pub name: String,
    pub hand: Vec<Card>,
    pub melds: Vec<Meld>,
    /// Cumulative score across the rounds of the current match.
    pub score: i32,
    /// Turns taken in the current round.
    pub turn: u32,
    /// Rounds played in the current match.
    pub round: u32,
    /// Whether this seat has already claimed its secondary pile this
    /// round.
    pub secondary_deck_taken: bool,
    /// Turns per completed round, archived at each round reset.
    pub turn_history: Vec<u32>,
    /// Score-per-turn snapshots, archived at each match reset.
    pub score_history: Vec<f64>,
}

impl PlayerState {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Meld value minus unplayed hand value.
    #[must_use]
    pub fn points(&self) -> i32 {
        let meld_points: i32 = self.melds.iter().map(Meld::points).sum();
        meld_points - card_points(&self.hand)
    }

    /// Whether any owned meld has reached seven cards.
    #[must_use]
    pub fn has_burraco(&self) -> bool {
        self.melds.iter().any(|meld| meld.len() >= 7)
    }

    /// Average score per turn over the archived rounds of this match.
    #[must_use]
    pub fn score_per_turn(&self) -> f64 {
        let turns: u32 = self.turn_history.iter().sum();
        if turns == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(turns)
        }
    }

    /// Apply attachment proposals in order, dropping every one that is
    /// out of range, reuses a hand card, or would invalidate the target
    /// meld. Returns the number of hand cards consumed.
    pub fn apply_extensions(&mut self, proposals: &[MeldExtension]) -> usize {
        let mut used = vec![false; self.hand.len()];
        for proposal in proposals {
            if proposal.hand_index >= self.hand.len() || used[proposal.hand_index] {
                continue;
            }
            let Some(meld) = self.melds.get(proposal.meld_index) else {
                continue;
            };
            let tentative = meld.extended(self.hand[proposal.hand_index]);
            if tentative.is_valid() {
                self.melds[proposal.meld_index] = tentative;
                used[proposal.hand_index] = true;
            }
        }

        let mut consumed = 0;
        for index in (0..used.len()).rev() {
            if used[index] {
                self.hand.remove(index);
                consumed += 1;
            }
        }
        consumed
    }

    /// Lay the given hand cards as a brand-new meld. The whole group is
    /// accepted or rejected: duplicated or out-of-range indices, or a
    /// group that does not classify, leave hand and melds untouched.
    pub fn lay_meld(&mut self, hand_indices: &[usize]) -> bool {
        let mut seen = vec![false; self.hand.len()];
        for &index in hand_indices {
            if index >= self.hand.len() || seen[index] {
                return false;
            }
            seen[index] = true;
        }

        let cards: Vec<Card> = hand_indices.iter().map(|&i| self.hand[i]).collect();
        let meld = Meld::new(cards);
        if !meld.is_valid() {
            return false;
        }

        let mut sorted: Vec<usize> = hand_indices.to_vec();
        sorted.sort_unstable();
        for &index in sorted.iter().rev() {
            self.hand.remove(index);
        }
        self.melds.push(meld);
        true
    }
}

//! Random baseline player.
//!
//! Draws from stock every turn, throws a random group of 3-6 cards at
//! the meld-laying phase (almost always rejected), and discards at
//! random. Useful as a training opponent and as a fuzzer for the
//! engine's legality checks.

use crate::cards::Card;
use crate::core::GameRng;

use super::{DrawChoice, MeldExtension, PlayerState, Strategy};

const MAX_PROPOSAL_SIZE: usize = 6;

/// The uniformly random strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl RandomStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for RandomStrategy {
    fn choose_draw(
        &mut self,
        _state: &PlayerState,
        _discard_pile: &[Card],
        _rng: &mut GameRng,
    ) -> DrawChoice {
        DrawChoice::Stock
    }

    fn propose_extensions(
        &mut self,
        _state: &PlayerState,
        _rng: &mut GameRng,
    ) -> Vec<MeldExtension> {
        Vec::new()
    }

    fn propose_melds(&mut self, state: &PlayerState, rng: &mut GameRng) -> Vec<Vec<usize>> {
        let hand_len = state.hand.len();
        if hand_len < 3 {
            return Vec::new();
        }

        let size = rng.gen_range_inclusive(3..=hand_len.min(MAX_PROPOSAL_SIZE));
        let mut indices: Vec<usize> = (0..hand_len).collect();
        rng.shuffle(&mut indices);
        indices.truncate(size);
        vec![indices]
    }

    fn choose_discard(&mut self, state: &PlayerState, rng: &mut GameRng) -> usize {
        if state.hand.is_empty() {
            0
        } else {
            rng.gen_range(0..state.hand.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn filler_hand(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| {
                let suit = Suit::STANDARD[i % 4];
                let rank = Rank::STANDARD[i % 13];
                Card::new(suit, rank)
            })
            .collect()
    }

    #[test]
    fn test_always_draws_from_stock() {
        let mut rng = GameRng::new(3);
        let state = PlayerState::new("rnd");
        assert_eq!(
            RandomStrategy::new().choose_draw(&state, &[], &mut rng),
            DrawChoice::Stock
        );
    }

    #[test]
    fn test_proposal_size_bounds() {
        let mut rng = GameRng::new(3);
        let mut state = PlayerState::new("rnd");
        state.hand = filler_hand(11);

        for _ in 0..50 {
            let groups = RandomStrategy::new().propose_melds(&state, &mut rng);
            assert_eq!(groups.len(), 1);
            let group = &groups[0];
            assert!((3..=MAX_PROPOSAL_SIZE).contains(&group.len()));

            // Distinct, in-range indices.
            let mut sorted = group.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), group.len());
            assert!(sorted.iter().all(|&i| i < state.hand.len()));
        }
    }

    #[test]
    fn test_no_proposal_with_small_hand() {
        let mut rng = GameRng::new(3);
        let mut state = PlayerState::new("rnd");
        state.hand = filler_hand(2);

        assert!(RandomStrategy::new().propose_melds(&state, &mut rng).is_empty());
        assert!(RandomStrategy::new()
            .propose_extensions(&state, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_discard_index_in_range() {
        let mut rng = GameRng::new(3);
        let mut state = PlayerState::new("rnd");
        state.hand = filler_hand(5);

        for _ in 0..20 {
            assert!(RandomStrategy::new().choose_discard(&state, &mut rng) < 5);
        }
    }
}

//! Rule-based player.
//!
//! Mirrors a competent human's routine: take the discard pile when it
//! is worth more than a blind draw, attach whatever fits onto existing
//! melds without playing the hand down past the discard gate, lay the
//! single best meld the hand search can find, and throw a random card.

use crate::cards::Card;
use crate::core::GameRng;
use crate::melds::Meld;
use crate::search::find_best_meld;

use super::{DrawChoice, MeldExtension, PlayerState, Strategy};

/// The coded heuristic strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyStrategy;

impl GreedyStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for GreedyStrategy {
    fn choose_draw(
        &mut self,
        state: &PlayerState,
        discard_pile: &[Card],
        _rng: &mut GameRng,
    ) -> DrawChoice {
        let burraco = state.has_burraco();
        let hand_len = state.hand.len();
        let pile_len = discard_pile.len();

        let take_pile = (!burraco && (hand_len == 1 || pile_len > 3))
            || (burraco && hand_len == 2 && pile_len > 1);
        if take_pile {
            DrawChoice::DiscardPile
        } else {
            DrawChoice::Stock
        }
    }

    fn propose_extensions(
        &mut self,
        state: &PlayerState,
        _rng: &mut GameRng,
    ) -> Vec<MeldExtension> {
        let hand_len = state.hand.len();
        let may_extend = hand_len > 2
            || (hand_len == 2 && (!state.secondary_deck_taken || state.has_burraco()));
        if !may_extend {
            return Vec::new();
        }

        // First-fit scan, simulated forward so later cards can land on
        // a meld grown by an earlier attachment.
        let mut melds: Vec<Meld> = state.melds.clone();
        let mut proposals = Vec::new();
        for (hand_index, &card) in state.hand.iter().enumerate() {
            for (meld_index, meld) in melds.iter_mut().enumerate() {
                let tentative = meld.extended(card);
                if tentative.is_valid() {
                    *meld = tentative;
                    proposals.push(MeldExtension {
                        hand_index,
                        meld_index,
                    });
                    break;
                }
            }

            // Stop at the discard-gate floor: keep two cards without a
            // burraco once the secondary pile is gone, one otherwise.
            let remaining = hand_len - proposals.len();
            let burraco = melds.iter().any(|meld| meld.len() >= 7);
            if (remaining == 2 && state.secondary_deck_taken && !burraco) || remaining == 1 {
                break;
            }
        }
        proposals
    }

    fn propose_melds(&mut self, state: &PlayerState, _rng: &mut GameRng) -> Vec<Vec<usize>> {
        let Some(best) = find_best_meld(&state.hand, state.has_burraco()) else {
            return Vec::new();
        };

        // Map the chosen cards back to distinct hand positions; the
        // double deck means values alone are ambiguous.
        let mut used = vec![false; state.hand.len()];
        let mut indices = Vec::with_capacity(best.len());
        for card in best {
            if let Some(index) = state
                .hand
                .iter()
                .enumerate()
                .position(|(i, &held)| held == card && !used[i])
            {
                used[index] = true;
                indices.push(index);
            }
        }
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

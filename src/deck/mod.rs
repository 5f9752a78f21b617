//! Draw and discard pile management.
//!
//! A match plays from two standard 52-card decks plus four jokers,
//! 108 cards in all. The top of each pile is the end of its vector.
//! When the draw pile runs dry mid-round the discard pile is shuffled
//! back in; only if both piles are empty is drawing an error, which
//! under the card-conservation invariant means something upstream
//! leaked cards.

use crate::cards::{Card, Rank, Suit};
use crate::core::GameRng;
use crate::errors::EngineError;

/// Number of cards in play for a whole match.
pub const DECK_SIZE: usize = 108;

const JOKER_COUNT: usize = 4;

/// The shared draw and discard piles.
#[derive(Clone, Debug)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    /// Build and shuffle a full 108-card deck.
    #[must_use]
    pub fn new(rng: &mut GameRng) -> Self {
        let mut draw_pile = Vec::with_capacity(DECK_SIZE);
        for _ in 0..2 {
            for suit in Suit::STANDARD {
                for rank in Rank::STANDARD {
                    draw_pile.push(Card::new(suit, rank));
                }
            }
        }
        draw_pile.extend(std::iter::repeat(Card::joker()).take(JOKER_COUNT));
        rng.shuffle(&mut draw_pile);

        Self {
            draw_pile,
            discard_pile: Vec::new(),
        }
    }

    /// Pop the top card of the draw pile, reshuffling the discard pile
    /// in first if the draw pile is empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Result<Card, EngineError> {
        if self.draw_pile.is_empty() {
            self.reshuffle_discard_pile(rng);
        }
        self.draw_pile.pop().ok_or(EngineError::EmptyDeck)
    }

    /// Put a card on top of the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Take the entire discard pile, top card first.
    pub fn take_discard_pile(&mut self) -> Vec<Card> {
        let mut cards = std::mem::take(&mut self.discard_pile);
        cards.reverse();
        cards
    }

    /// The discard pile, bottom to top.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Shuffle the discard pile into a fresh draw pile.
    pub fn reshuffle_discard_pile(&mut self, rng: &mut GameRng) {
        self.draw_pile = std::mem::take(&mut self.discard_pile);
        rng.shuffle(&mut self.draw_pile);
    }

    /// Number of cards left in the draw pile.
    #[must_use]
    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// Number of cards in the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_full_deck_composition() {
        let mut rng = GameRng::new(42);
        let mut deck = Deck::new(&mut rng);
        assert_eq!(deck.draw_len(), DECK_SIZE);

        let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
        while deck.draw_len() > 0 {
            let card = deck.draw(&mut rng).unwrap();
            *counts.entry(card).or_default() += 1;
        }

        assert_eq!(counts[&Card::joker()], JOKER_COUNT);
        for suit in Suit::STANDARD {
            for rank in Rank::STANDARD {
                assert_eq!(counts[&Card::new(suit, rank)], 2, "{}", Card::new(suit, rank));
            }
        }
    }

    #[test]
    fn test_shuffle_depends_on_seed() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);
        let deck1 = Deck::new(&mut rng1);
        let deck2 = Deck::new(&mut rng2);
        assert_ne!(deck1.draw_pile, deck2.draw_pile);

        let mut rng3 = GameRng::new(1);
        let deck3 = Deck::new(&mut rng3);
        assert_eq!(deck1.draw_pile, deck3.draw_pile);
    }

    #[test]
    fn test_discard_and_take_pile() {
        let mut rng = GameRng::new(42);
        let mut deck = Deck::new(&mut rng);

        let a = deck.draw(&mut rng).unwrap();
        let b = deck.draw(&mut rng).unwrap();
        deck.discard(a);
        deck.discard(b);
        assert_eq!(deck.discard_pile(), &[a, b]);

        // Top of the pile comes out first.
        let taken = deck.take_discard_pile();
        assert_eq!(taken, vec![b, a]);
        assert_eq!(deck.discard_len(), 0);
    }

    #[test]
    fn test_draw_reshuffles_exhausted_pile() {
        let mut rng = GameRng::new(42);
        let mut deck = Deck::new(&mut rng);

        // Run the whole draw pile through the discard pile.
        let mut drawn = Vec::new();
        while deck.draw_len() > 0 {
            drawn.push(deck.draw(&mut rng).unwrap());
        }
        for card in drawn {
            deck.discard(card);
        }

        let card = deck.draw(&mut rng).unwrap();
        assert_eq!(deck.draw_len() + deck.discard_len() + 1, DECK_SIZE);
        let _ = card;
    }

    #[test]
    fn test_draw_errors_when_both_piles_empty() {
        let mut rng = GameRng::new(42);
        let mut deck = Deck::new(&mut rng);
        while deck.draw_len() > 0 {
            deck.draw(&mut rng).unwrap();
        }

        assert_eq!(deck.draw(&mut rng), Err(EngineError::EmptyDeck));
    }
}

//! Card values for Burraco.
//!
//! A Burraco deck is two standard 52-card decks plus four jokers
//! (108 cards total). Rank 2 and the joker are wildcards; everything
//! else is a regular card.
//!
//! ## Run ordering
//!
//! Runs order ranks as `2, 3, .., 10, J, Q, K, A`. The ace normally
//! sits above the king but may rotate below the 2 in an ace-low run;
//! that rotation is handled by meld classification, not here.

use serde::{Deserialize, Serialize};

/// Card suit. `Joker` is the sentinel suit carried only by jokers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    Joker,
}

impl Suit {
    /// The four playable suits, excluding the joker sentinel.
    pub const STANDARD: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    fn letter(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
            Suit::Joker => 'J',
        }
    }
}

/// Card rank. Discriminants follow the run sequence order, with the
/// joker sentinel last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 0,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Joker,
}

impl Rank {
    /// The thirteen regular deck ranks in run sequence order.
    pub const STANDARD: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Position in the run sequence (`Two` = 0 .. `Ace` = 12).
    ///
    /// The joker has no position of its own; it borrows one when it
    /// substitutes for a missing rank in a run.
    #[must_use]
    pub const fn sequence_index(self) -> usize {
        self as usize
    }

    /// Counting value of a card of this rank.
    #[must_use]
    pub const fn point_value(self) -> i32 {
        match self {
            Rank::Two => 20,
            Rank::Three | Rank::Four | Rank::Five | Rank::Six | Rank::Seven => 5,
            Rank::Eight
            | Rank::Nine
            | Rank::Ten
            | Rank::Jack
            | Rank::Queen
            | Rank::King => 10,
            Rank::Ace => 15,
            Rank::Joker => 30,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Joker => "Joker",
        }
    }
}

/// An immutable playing card. Equality is structural over (suit, rank);
/// the double deck deliberately contains two of every standard card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Create a regular card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Create a joker.
    #[must_use]
    pub const fn joker() -> Self {
        Self {
            suit: Suit::Joker,
            rank: Rank::Joker,
        }
    }

    /// A card is a joker iff both fields are the joker sentinel.
    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self.suit, Suit::Joker) && matches!(self.rank, Rank::Joker)
    }

    /// Wildcards substitute for missing ranks in runs and pad sets:
    /// every rank-2 card and every joker.
    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        matches!(self.rank, Rank::Two | Rank::Joker)
    }

    /// Counting value used by round scoring.
    #[must_use]
    pub const fn point_value(self) -> i32 {
        self.rank.point_value()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_joker() {
            write!(f, "Joker")
        } else {
            write!(f, "{}-{}", self.rank.label(), self.suit.letter())
        }
    }
}

/// Total point value of a group of cards.
#[must_use]
pub fn card_points(cards: &[Card]) -> i32 {
    cards.iter().map(|card| card.point_value()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcards() {
        assert!(Card::new(Suit::Hearts, Rank::Two).is_wildcard());
        assert!(Card::joker().is_wildcard());
        assert!(!Card::new(Suit::Spades, Rank::Three).is_wildcard());
        assert!(!Card::new(Suit::Spades, Rank::Ace).is_wildcard());
    }

    #[test]
    fn test_joker_needs_both_sentinels() {
        assert!(Card::joker().is_joker());
        assert!(!Card::new(Suit::Hearts, Rank::Two).is_joker());
    }

    #[test]
    fn test_sequence_index_order() {
        assert_eq!(Rank::Two.sequence_index(), 0);
        assert_eq!(Rank::Ten.sequence_index(), 8);
        assert_eq!(Rank::Ace.sequence_index(), 12);
        for pair in Rank::STANDARD.windows(2) {
            assert_eq!(pair[1].sequence_index(), pair[0].sequence_index() + 1);
        }
    }

    #[test]
    fn test_point_values() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Two).point_value(), 20);
        assert_eq!(Card::new(Suit::Hearts, Rank::Five).point_value(), 5);
        assert_eq!(Card::new(Suit::Hearts, Rank::Eight).point_value(), 10);
        assert_eq!(Card::new(Suit::Hearts, Rank::King).point_value(), 10);
        assert_eq!(Card::new(Suit::Hearts, Rank::Ace).point_value(), 15);
        assert_eq!(Card::joker().point_value(), 30);
    }

    #[test]
    fn test_card_points_sum() {
        let cards = [
            Card::new(Suit::Clubs, Rank::Three),
            Card::new(Suit::Clubs, Rank::Nine),
            Card::joker(),
        ];
        assert_eq!(card_points(&cards), 5 + 10 + 30);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Four).to_string(), "4-H");
        assert_eq!(Card::new(Suit::Diamonds, Rank::Ten).to_string(), "10-D");
        assert_eq!(Card::new(Suit::Spades, Rank::Jack).to_string(), "J-S");
        assert_eq!(Card::joker().to_string(), "Joker");
    }

    #[test]
    fn test_serde_round_trip() {
        let card = Card::new(Suit::Diamonds, Rank::Queen);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}

//! Meld classification.
//!
//! A meld is either a **Set** (three or more cards of one rank) or a
//! **Run** (three or more consecutive cards of one suit), holding at
//! most one wildcard. Classification is a pure function of the card
//! multiset: a `Meld` is regenerated from scratch on construction and
//! on every extension, so derived state can never go stale or be
//! forged out of sync (deserialization reclassifies too).
//!
//! ## Canonical ordering
//!
//! Valid melds store their cards in canonical order:
//! - Set: regular cards first, the wildcard last.
//! - Run: ascending rank, with the wildcard interleaved at the exact
//!   gap it bridges, or appended at the top when it bridges nothing.
//!
//! ## Ace handling
//!
//! The ace sits above the king by default. It rotates below the 2
//! (ace-low) when the two highest regular cards are ace and a non-king
//! — additionally a non-queen when a wildcard is present, since the
//! wildcard can stand in for the king and keep the ace high.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{card_points, Card, Rank};

/// How a valid meld is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldKind {
    /// Three or more cards of the same rank.
    Set,
    /// Three or more rank-consecutive cards of the same suit.
    Run,
}

type CardSeq = SmallVec<[Card; 8]>;

/// A classified group of cards.
///
/// Invalid groups keep their presentation order; valid groups are
/// stored canonically. Equality compares the rank-sorted regular cards
/// plus the wildcard multiset, so two melds are "the same meld" no
/// matter how their wildcards were positioned.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "Vec<Card>", into = "Vec<Card>")]
pub struct Meld {
    cards: CardSeq,
    kind: Option<MeldKind>,
}

impl Meld {
    /// Classify a group of cards.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        let cards: CardSeq = cards.into();
        match classify(&cards) {
            Some((kind, ordered)) => Self {
                cards: ordered,
                kind: Some(kind),
            },
            None => Self { cards, kind: None },
        }
    }

    /// Reclassify with one more card. The receiver is untouched, so an
    /// attachment that would break the meld is rejected by simply
    /// dropping the returned value.
    #[must_use]
    pub fn extended(&self, card: Card) -> Self {
        let mut cards = self.cards.to_vec();
        cards.push(card);
        Self::new(cards)
    }

    /// The cards, in canonical order when the meld is valid.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// `Some` for a valid Set or Run, `None` otherwise.
    #[must_use]
    pub fn kind(&self) -> Option<MeldKind> {
        self.kind
    }

    /// Whether the cards form a playable meld.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.kind.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The wildcards in this meld (at most one for a valid meld).
    pub fn wildcards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(|card| card.is_wildcard())
    }

    /// The non-wildcard cards, sorted by rank sequence.
    #[must_use]
    pub fn regular_cards(&self) -> Vec<Card> {
        let mut regular: Vec<Card> = self
            .cards
            .iter()
            .copied()
            .filter(|card| !card.is_wildcard())
            .collect();
        regular.sort_by_key(|card| card.rank.sequence_index());
        regular
    }

    /// Counting value of the whole meld.
    #[must_use]
    pub fn points(&self) -> i32 {
        card_points(&self.cards)
    }

    fn equality_key(&self) -> (Vec<Card>, Vec<Card>) {
        let mut regular: Vec<Card> = Vec::with_capacity(self.cards.len());
        let mut wild: Vec<Card> = Vec::new();
        for &card in &self.cards {
            if card.is_wildcard() {
                wild.push(card);
            } else {
                regular.push(card);
            }
        }
        regular.sort_by_key(|card| (card.rank.sequence_index(), card.suit));
        wild.sort();
        (regular, wild)
    }
}

impl PartialEq for Meld {
    fn eq(&self, other: &Self) -> bool {
        self.equality_key() == other.equality_key()
    }
}

impl Eq for Meld {}

impl From<Vec<Card>> for Meld {
    fn from(cards: Vec<Card>) -> Self {
        Meld::new(cards)
    }
}

impl From<Meld> for Vec<Card> {
    fn from(meld: Meld) -> Self {
        meld.cards.into_vec()
    }
}

impl std::fmt::Display for Meld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            Some(MeldKind::Set) => "Set",
            Some(MeldKind::Run) => "Run",
            None => "None",
        };
        write!(f, "{}[", kind)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        write!(f, "]")
    }
}

/// Rank distance from `low` up to `high`, in run sequence steps.
///
/// An ace in the `low` position counts as one-below-2 (the ace-low
/// seat), so `rank_gap(three, ace)` is 2. An ace in the `high`
/// position compares by plain sequence index, so `rank_gap(ace, king)`
/// is 1.
#[must_use]
pub fn rank_gap(high: Card, low: Card) -> isize {
    if low.rank == Rank::Ace {
        high.rank.sequence_index() as isize + 1
    } else {
        high.rank.sequence_index() as isize - low.rank.sequence_index() as isize
    }
}

fn classify(cards: &[Card]) -> Option<(MeldKind, CardSeq)> {
    let wildcards: CardSeq = cards.iter().copied().filter(|c| c.is_wildcard()).collect();
    let mut regular: CardSeq = cards.iter().copied().filter(|c| !c.is_wildcard()).collect();
    regular.sort_by_key(|card| card.rank.sequence_index());

    if cards.len() < 3 || wildcards.len() > 1 {
        return None;
    }

    if all_same_rank(&regular) {
        let mut ordered = regular;
        ordered.extend(wildcards);
        return Some((MeldKind::Set, ordered));
    }

    let has_wildcard = !wildcards.is_empty();
    if all_same_suit(&regular) {
        rotate_ace_low(&mut regular, has_wildcard);
        if is_consecutive(&regular, has_wildcard) {
            return Some((MeldKind::Run, interleave_run(&regular, wildcards)));
        }
    }

    None
}

fn all_same_rank(cards: &[Card]) -> bool {
    cards
        .first()
        .map_or(true, |first| cards.iter().all(|c| c.rank == first.rank))
}

fn all_same_suit(cards: &[Card]) -> bool {
    cards
        .first()
        .map_or(true, |first| cards.iter().all(|c| c.suit == first.suit))
}

/// Move a trailing ace to the front when it must play low.
fn rotate_ace_low(regular: &mut CardSeq, has_wildcard: bool) {
    let n = regular.len();
    if n < 2 {
        return;
    }
    let top = regular[n - 1].rank;
    let below = regular[n - 2].rank;
    if top == Rank::Ace && below != Rank::King && (!has_wildcard || below != Rank::Queen) {
        regular.rotate_right(1);
    }
}

/// Whether the (possibly ace-rotated) regular cards climb by single
/// steps, with one gap of 2 allowed when a wildcard is there to fill it.
fn is_consecutive(regular: &[Card], has_wildcard: bool) -> bool {
    let mut gap_filled = !has_wildcard;
    for i in 1..regular.len() {
        let gap = rank_gap(regular[i], regular[i - 1]);
        if gap != 1 {
            if gap_filled || gap != 2 {
                return false;
            }
            gap_filled = true;
        }
    }
    true
}

/// Rebuild a valid run with the wildcard at the rank it substitutes.
fn interleave_run(regular: &[Card], mut wildcards: CardSeq) -> CardSeq {
    let mut ordered: CardSeq = SmallVec::with_capacity(regular.len() + wildcards.len());
    ordered.push(regular[0]);
    for i in 1..regular.len() {
        if rank_gap(regular[i], regular[i - 1]) != 1 {
            // is_consecutive guaranteed the wildcard exists for the gap
            ordered.push(wildcards.pop().expect("gap in run with no wildcard"));
        }
        ordered.push(regular[i]);
    }
    if let Some(wild) = wildcards.pop() {
        ordered.push(wild);
    }
    ordered
}

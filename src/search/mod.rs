//! Heuristic meld discovery over a hand.
//!
//! Rule-based strategies use this scan to decide what to propose; meld
//! classification stays the sole arbiter of legality. The scan is a
//! local heuristic, not an optimal partition of the hand into melds:
//! candidates may overlap (the same wildcard can appear in several),
//! and the greedy run walk never attaches an ace — ace runs only enter
//! play through extension of melds already on the table. Both quirks
//! are load-bearing for the rule-based player's behavior and are kept
//! as-is.

use rustc_hash::FxHashMap;

use crate::cards::{Card, Rank, Suit};
use crate::melds::rank_gap;

/// Candidate sets: rank groups of three or more, counting at most one
/// borrowed wildcard per group.
#[must_use]
pub fn find_sets(hand: &[Card]) -> Vec<Vec<Card>> {
    let mut rank_groups: FxHashMap<Rank, Vec<Card>> = FxHashMap::default();
    let mut group_order: Vec<Rank> = Vec::new();
    for &card in hand {
        if !card.is_wildcard() {
            let group = rank_groups.entry(card.rank).or_default();
            if group.is_empty() {
                group_order.push(card.rank);
            }
            group.push(card);
        }
    }

    let wildcard = hand.iter().copied().find(|card| card.is_wildcard());

    let mut sets = Vec::new();
    for rank in group_order {
        let mut group = rank_groups.remove(&rank).unwrap_or_default();
        if let Some(wild) = wildcard {
            group.push(wild);
        }
        if group.len() >= 3 {
            sets.push(group);
        }
    }
    sets
}

/// Candidate runs among one suit's cards (plus wildcards, which join
/// any suit).
///
/// Greedy left-to-right walk over the regular cards in rank order:
/// extend while consecutive, spend at most one wildcard to bridge a
/// single one-rank gap, and record every breaking sequence of length
/// three or more.
#[must_use]
pub fn find_runs(suited_cards: &[Card]) -> Vec<Vec<Card>> {
    if suited_cards.len() < 3 {
        return Vec::new();
    }

    let mut wildcard = suited_cards.iter().copied().find(|card| card.is_wildcard());
    let mut regular: Vec<Card> = suited_cards
        .iter()
        .copied()
        .filter(|card| !card.is_wildcard())
        .collect();
    regular.sort_by_key(|card| card.rank.sequence_index());

    let mut runs = Vec::new();
    let mut run: Vec<Card> = Vec::new();
    for &card in &regular {
        let gap = run.last().map(|&last| rank_gap(last, card));
        if gap.is_none() || gap == Some(-1) {
            run.push(card);
        } else if gap == Some(-2) && wildcard.is_some() {
            run.push(wildcard.take().expect("checked above"));
            run.push(card);
        } else {
            if run.len() >= 3 {
                runs.push(std::mem::take(&mut run));
            } else {
                run.clear();
            }
            run.push(card);
        }
    }
    if run.len() >= 3 {
        runs.push(run);
    }

    runs
}

/// All candidate melds in a hand: runs per suit, then sets.
#[must_use]
pub fn find_all_melds(hand: &[Card]) -> Vec<Vec<Card>> {
    let mut candidates = Vec::new();

    for suit in Suit::STANDARD {
        let suited: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|card| card.suit == suit || card.is_wildcard())
            .collect();
        candidates.extend(find_runs(&suited));
    }

    candidates.extend(find_sets(hand));
    candidates
}

/// The largest candidate the player could afford to lay down.
///
/// Without a burraco the hand must keep at least two cards after the
/// lay; with one, going down to a single card is allowed. Ties are
/// broken arbitrarily.
#[must_use]
pub fn find_best_meld(hand: &[Card], has_burraco: bool) -> Option<Vec<Card>> {
    let candidates = find_all_melds(hand);

    candidates
        .into_iter()
        .filter(|candidate| {
            if has_burraco {
                candidate.len() < hand.len()
            } else {
                candidate.len() + 1 < hand.len()
            }
        })
        .max_by_key(Vec::len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::melds::{Meld, MeldKind};

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn test_find_sets_plain_group() {
        let hand = vec![
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Diamonds, Rank::Nine),
            card(Suit::Clubs, Rank::Four),
        ];
        let sets = find_sets(&hand);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].len(), 3);
        assert!(sets[0].iter().all(|c| c.rank == Rank::Nine));
    }

    #[test]
    fn test_find_sets_borrows_wildcard() {
        let hand = vec![
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Clubs, Rank::Two),
        ];
        let sets = find_sets(&hand);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].len(), 3);
        assert!(sets[0].contains(&card(Suit::Clubs, Rank::Two)));
    }

    #[test]
    fn test_find_sets_same_wildcard_may_back_several_groups() {
        let hand = vec![
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Jack),
            card(Suit::Spades, Rank::Jack),
            Card::joker(),
        ];
        let sets = find_sets(&hand);
        // Overlapping candidates; play lays at most one per turn.
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|s| s.len() == 3));
    }

    #[test]
    fn test_find_sets_pairs_without_wildcard_ignored() {
        let hand = vec![
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Clubs, Rank::Four),
        ];
        assert!(find_sets(&hand).is_empty());
    }

    #[test]
    fn test_find_runs_plain() {
        let suited = vec![
            card(Suit::Hearts, Rank::Five),
            card(Suit::Hearts, Rank::Three),
            card(Suit::Hearts, Rank::Four),
        ];
        let runs = find_runs(&suited);
        assert_eq!(runs.len(), 1);
        assert_eq!(
            runs[0],
            vec![
                card(Suit::Hearts, Rank::Three),
                card(Suit::Hearts, Rank::Four),
                card(Suit::Hearts, Rank::Five),
            ]
        );
    }

    #[test]
    fn test_find_runs_bridges_one_gap() {
        let suited = vec![
            card(Suit::Hearts, Rank::Three),
            card(Suit::Hearts, Rank::Five),
            Card::joker(),
        ];
        let runs = find_runs(&suited);
        assert_eq!(runs.len(), 1);
        assert_eq!(
            runs[0],
            vec![
                card(Suit::Hearts, Rank::Three),
                Card::joker(),
                card(Suit::Hearts, Rank::Five),
            ]
        );
    }

    #[test]
    fn test_find_runs_breaks_on_second_gap() {
        let suited = vec![
            card(Suit::Hearts, Rank::Three),
            card(Suit::Hearts, Rank::Four),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Hearts, Rank::Ten),
        ];
        let runs = find_runs(&suited);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0][0].rank, Rank::Three);
        assert_eq!(runs[1][0].rank, Rank::Eight);
    }

    #[test]
    fn test_find_runs_discards_short_fragment() {
        let suited = vec![
            card(Suit::Hearts, Rank::Three),
            card(Suit::Hearts, Rank::Four),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Hearts, Rank::Jack),
        ];
        let runs = find_runs(&suited);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0][0].rank, Rank::Nine);
    }

    #[test]
    fn test_find_runs_candidates_classify_as_runs() {
        let suited = vec![
            card(Suit::Spades, Rank::Six),
            card(Suit::Spades, Rank::Seven),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Two),
        ];
        for candidate in find_runs(&suited) {
            assert_eq!(Meld::new(candidate).kind(), Some(MeldKind::Run));
        }
    }

    #[test]
    fn test_find_best_meld_keeps_two_cards_in_hand() {
        // Hand of four: a 3-card candidate would leave only one card.
        let hand = vec![
            card(Suit::Hearts, Rank::Three),
            card(Suit::Hearts, Rank::Four),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Spades, Rank::Nine),
        ];
        assert_eq!(find_best_meld(&hand, false), None);

        // With a burraco the same lay is allowed.
        let best = find_best_meld(&hand, true).unwrap();
        assert_eq!(best.len(), 3);
    }

    #[test]
    fn test_find_best_meld_prefers_largest() {
        let hand = vec![
            card(Suit::Hearts, Rank::Three),
            card(Suit::Hearts, Rank::Four),
            card(Suit::Hearts, Rank::Five),
            card(Suit::Hearts, Rank::Six),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Clubs, Rank::Nine),
            card(Suit::Diamonds, Rank::Nine),
            card(Suit::Spades, Rank::King),
            card(Suit::Clubs, Rank::Queen),
        ];
        let best = find_best_meld(&hand, false).unwrap();
        assert_eq!(best.len(), 4);
        assert!(best.iter().all(|c| c.suit == Suit::Hearts));
    }

    #[test]
    fn test_find_best_meld_empty_hand() {
        assert_eq!(find_best_meld(&[], false), None);
    }
}

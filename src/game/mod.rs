//! The turn state machine and round/match progression.
//!
//! A `Game` owns the deck, the seats, one hidden secondary pile per
//! seat, and the strategy driving each seat. Every turn walks four
//! phases in order:
//!
//! 1. **Drawing** — the strategy takes the top stock card or the whole
//!    discard pile.
//! 2. **Extending melds** — attachment proposals are applied one by
//!    one; any that would invalidate the target meld is dropped.
//! 3. **Laying melds** — brand-new meld proposals are validated as
//!    whole groups and laid or dropped.
//! 4. **Discarding** — gated by hand size, burraco, and the secondary
//!    pile. A seat that empties its hand before claiming its secondary
//!    pile picks the pile up instead of discarding and takes another
//!    full turn.
//!
//! ## Discard gate
//!
//! A seat may discard while holding more than one card, or exactly one
//! card if it has a burraco or has not yet claimed its secondary pile.
//! Discarding to an empty hand with a burraco and a spent secondary
//! pile closes the round. Reaching the discard phase in any other
//! ineligible state is a strategy contract violation and fatal.
//!
//! ## Rounds and matches
//!
//! A round runs until someone closes or the shared turn counter hits
//! the configured limit. Round scoring: the closer earns 100, every
//! seat still holding an unclaimed secondary pile loses 100, and every
//! seat adds its meld-minus-hand points. The match ends when a score
//! reaches the winning threshold or the round limit is hit (highest
//! score wins); otherwise hands and piles are redealt, the first seat
//! rotates, and the next round begins. After a match the per-seat
//! score snapshots are archived and the same `Game` can play again.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::Card;
use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::deck::{Deck, DECK_SIZE};
use crate::errors::EngineError;
use crate::melds::Meld;
use crate::players::{DrawChoice, PlayerState, Strategy};
use crate::stats::{NullSink, StatsSink};

/// Tunable match parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each hand and each secondary pile per round.
    pub initial_hand_size: usize,
    /// Full table rotations before a round is cut off.
    pub turn_limit: u32,
    /// Completed rounds before a match is cut off.
    pub round_limit: u32,
    /// Cumulative score that ends the match.
    pub winning_score: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_hand_size: 11,
            turn_limit: 100,
            round_limit: 5,
            winning_score: 1000,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_initial_hand_size(mut self, cards: usize) -> Self {
        self.initial_hand_size = cards;
        self
    }

    #[must_use]
    pub fn with_turn_limit(mut self, turns: u32) -> Self {
        self.turn_limit = turns;
        self
    }

    #[must_use]
    pub fn with_round_limit(mut self, rounds: u32) -> Self {
        self.round_limit = rounds;
        self
    }

    #[must_use]
    pub fn with_winning_score(mut self, score: i32) -> Self {
        self.winning_score = score;
        self
    }
}

/// What a single turn did to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Turn complete; play passes to the next seat.
    Continue,
    /// The seat emptied its hand without discarding, picked up its
    /// secondary pile, and takes another full turn.
    SecondaryPickup,
    /// The turn ended the round. `closed` is true for a clean close
    /// (empty hand, burraco, secondary pile spent), false for the
    /// turn-limit cutoff.
    RoundOver { closed: bool },
}

/// Terminal facts of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: PlayerId,
    /// Rounds played, including the final one.
    pub rounds: u32,
    /// Final cumulative score per seat.
    pub scores: Vec<i32>,
}

/// One Burraco table: deck, seats, secondary piles, and the strategies
/// playing them.
///
/// `play_match` is the usual driver. `setup_round`, `play_round`, and
/// `play_turn` are exposed for embeddings that need to step the engine
/// themselves (a human session showing state between turns, say).
pub struct Game {
    config: GameConfig,
    rng: GameRng,
    deck: Deck,
    secondary_decks: PlayerMap<Vec<Card>>,
    players: Vec<PlayerState>,
    strategies: Vec<Box<dyn Strategy>>,
    sink: Box<dyn StatsSink>,
    initial_player_index: usize,
    current_player_index: usize,
    turn: u32,
    round: u32,
    round_over: bool,
    winner: Option<PlayerId>,
}

impl Game {
    /// Create an empty table. Seats are added with [`Game::add_player`].
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let deck = Deck::new(&mut rng);
        Self {
            config,
            rng,
            deck,
            secondary_decks: PlayerMap::with_default(0),
            players: Vec::new(),
            strategies: Vec::new(),
            sink: Box::new(NullSink),
            initial_player_index: 0,
            current_player_index: 0,
            turn: 0,
            round: 0,
            round_over: false,
            winner: None,
        }
    }

    /// Replace the statistics sink (a [`NullSink`] by default).
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn StatsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Seat a player. The first seat added is `PlayerId(0)`.
    pub fn add_player(&mut self, name: impl Into<String>, strategy: Box<dyn Strategy>) -> PlayerId {
        assert!(self.players.len() < 4, "a Burraco table seats at most 4 players");
        let id = PlayerId::new(self.players.len() as u8);
        self.players.push(PlayerState::new(name));
        self.strategies.push(strategy);
        id
    }

    /// Play a full match and reset for the next one.
    ///
    /// Errors only on the fatal conditions of [`EngineError`]; the
    /// match state is not meaningful afterwards.
    pub fn play_match(&mut self) -> Result<MatchOutcome, EngineError> {
        assert!(
            (2..=4).contains(&self.players.len()),
            "a Burraco match needs 2-4 seated players"
        );

        self.setup_match();
        loop {
            self.setup_round()?;
            self.play_round()?;

            if let Some(winner) = self.evaluate_match_end() {
                self.winner = Some(winner);
                let rounds = self.round + 1;
                self.sink.record_round_count(rounds);
                info!(
                    winner = %self.players[winner.index()].name,
                    score = self.players[winner.index()].score,
                    rounds,
                    "match over"
                );
                let outcome = MatchOutcome {
                    winner,
                    rounds,
                    scores: self.players.iter().map(|player| player.score).collect(),
                };
                self.reset_match();
                return Ok(outcome);
            }

            self.round += 1;
            self.reset_round();
        }
    }

    /// Deal a fresh deck into hands and secondary piles, one card per
    /// seat per pass.
    pub fn setup_round(&mut self) -> Result<(), EngineError> {
        self.deck = Deck::new(&mut self.rng);
        self.secondary_decks = PlayerMap::with_default(self.players.len());
        self.round_over = false;

        for _ in 0..self.config.initial_hand_size {
            for player in &mut self.players {
                player.hand.push(self.deck.draw(&mut self.rng)?);
            }
            for (_, pile) in self.secondary_decks.iter_mut() {
                pile.push(self.deck.draw(&mut self.rng)?);
            }
        }
        Ok(())
    }

    /// Play turns until the round ends, then report the turn count.
    pub fn play_round(&mut self) -> Result<(), EngineError> {
        while !self.round_over {
            self.play_turn()?;
        }
        self.sink.record_turn_count(self.turn + 1);
        Ok(())
    }

    /// Drive the current seat through one full turn.
    pub fn play_turn(&mut self) -> Result<TurnOutcome, EngineError> {
        debug_assert!(!self.round_over, "turn played after the round ended");
        let seat = self.current_player_index;

        self.draw_phase(seat)?;
        self.meld_phases(seat);
        let outcome = self.discard_phase(seat)?;

        debug_assert_eq!(self.card_census(), DECK_SIZE, "card leaked during turn");
        Ok(outcome)
    }

    fn draw_phase(&mut self, seat: usize) -> Result<(), EngineError> {
        let choice = self.strategies[seat].choose_draw(
            &self.players[seat],
            self.deck.discard_pile(),
            &mut self.rng,
        );
        match choice {
            DrawChoice::Stock => {
                let card = self.deck.draw(&mut self.rng)?;
                self.players[seat].hand.push(card);
            }
            DrawChoice::DiscardPile => {
                // Taking an empty pile is allowed and takes nothing.
                let pile = self.deck.take_discard_pile();
                self.players[seat].hand.extend(pile);
            }
        }
        debug!(
            player = %self.players[seat].name,
            ?choice,
            hand = self.players[seat].hand.len(),
            "draw phase"
        );
        Ok(())
    }

    fn meld_phases(&mut self, seat: usize) {
        let proposals = self.strategies[seat].propose_extensions(&self.players[seat], &mut self.rng);
        let attached = self.players[seat].apply_extensions(&proposals);

        let groups = self.strategies[seat].propose_melds(&self.players[seat], &mut self.rng);
        let mut laid = 0;
        for group in groups {
            if self.players[seat].lay_meld(&group) {
                laid += 1;
            }
        }
        debug!(
            player = %self.players[seat].name,
            attached,
            laid,
            hand = self.players[seat].hand.len(),
            melds = self.players[seat].melds.len(),
            "meld phases"
        );
    }

    fn discard_phase(&mut self, seat: usize) -> Result<TurnOutcome, EngineError> {
        let hand_len = self.players[seat].hand.len();
        let may_discard = hand_len > 1
            || (hand_len == 1
                && (self.players[seat].has_burraco() || !self.players[seat].secondary_deck_taken));

        if may_discard {
            let index = self.strategies[seat].choose_discard(&self.players[seat], &mut self.rng);
            // An out-of-range index degrades to the top hand card.
            let index = index.min(self.players[seat].hand.len() - 1);
            let card = self.players[seat].hand.remove(index);
            self.deck.discard(card);
            debug!(player = %self.players[seat].name, %card, "discard phase");

            let hand_empty = self.players[seat].hand.is_empty();
            let burraco = self.players[seat].has_burraco();
            let secondary_taken = self.players[seat].secondary_deck_taken;

            if hand_empty && burraco && secondary_taken {
                self.finish_round(seat, true);
                Ok(TurnOutcome::RoundOver { closed: true })
            } else if self.turn >= self.config.turn_limit {
                self.finish_round(seat, false);
                Ok(TurnOutcome::RoundOver { closed: false })
            } else {
                if hand_empty && !secondary_taken {
                    self.take_secondary_deck(seat);
                }
                self.advance_seat();
                Ok(TurnOutcome::Continue)
            }
        } else if hand_len == 0 && !self.players[seat].secondary_deck_taken {
            // No discard and no seat change: the same seat plays on.
            self.take_secondary_deck(seat);
            Ok(TurnOutcome::SecondaryPickup)
        } else {
            Err(EngineError::IllegalDiscardState {
                player: PlayerId::new(seat as u8),
                hand_len,
            })
        }
    }

    fn take_secondary_deck(&mut self, seat: usize) {
        let id = PlayerId::new(seat as u8);
        let pile = std::mem::take(self.secondary_decks.get_mut(id));
        debug!(player = %self.players[seat].name, cards = pile.len(), "secondary pile taken");
        self.players[seat].hand.extend(pile);
        self.players[seat].secondary_deck_taken = true;
    }

    fn advance_seat(&mut self) {
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        if self.current_player_index == 0 {
            for player in &mut self.players {
                player.turn += 1;
            }
            self.turn += 1;
        }
    }

    fn finish_round(&mut self, ender: usize, closed: bool) {
        self.round_over = true;
        for (i, player) in self.players.iter_mut().enumerate() {
            let id = PlayerId::new(i as u8);
            if i == ender && closed {
                player.score += 100;
            } else if !self.secondary_decks[id].is_empty() {
                player.score -= 100;
            }
            player.score += player.points();
        }
        info!(
            ender = %self.players[ender].name,
            closed,
            turns = self.turn + 1,
            round = self.round,
            "round over"
        );
    }

    /// `Some(winner)` once a score crosses the winning threshold or the
    /// round limit is reached; the highest score wins either way.
    fn evaluate_match_end(&self) -> Option<PlayerId> {
        let threshold_crossed = self
            .players
            .iter()
            .any(|player| player.score >= self.config.winning_score);
        if !threshold_crossed && self.round < self.config.round_limit {
            return None;
        }

        self.players
            .iter()
            .enumerate()
            .max_by_key(|(_, player)| player.score)
            .map(|(i, _)| PlayerId::new(i as u8))
    }

    fn setup_match(&mut self) {
        self.winner = None;
        self.round = 0;
        for player in &mut self.players {
            player.turn_history.clear();
        }
    }

    /// Archive the round's turn counts, clear hands and melds, rotate
    /// the first seat, and clear the per-round secondary flags.
    fn reset_round(&mut self) {
        self.initial_player_index = (self.initial_player_index + 1) % self.players.len();
        self.current_player_index = self.initial_player_index;
        self.turn = 0;
        self.round_over = false;

        for player in &mut self.players {
            player.hand.clear();
            player.melds.clear();
            player.turn_history.push(player.turn);
            player.turn = 0;
            player.round += 1;
            player.secondary_deck_taken = false;
        }
        for (_, pile) in self.secondary_decks.iter_mut() {
            pile.clear();
        }
    }

    /// Round reset plus score archiving, so the same table can play
    /// consecutive matches.
    fn reset_match(&mut self) {
        self.reset_round();
        for player in &mut self.players {
            player.score_history.push(player.score_per_turn());
            player.score = 0;
            player.round = 0;
        }
    }

    /// Every card the game can see: both piles, all hands, all melds,
    /// all secondary piles. Equals [`DECK_SIZE`] at every point of a
    /// round.
    #[must_use]
    pub fn card_census(&self) -> usize {
        let hands: usize = self.players.iter().map(|player| player.hand.len()).sum();
        let melds: usize = self
            .players
            .iter()
            .flat_map(|player| player.melds.iter())
            .map(Meld::len)
            .sum();
        let secondary: usize = self.secondary_decks.iter().map(|(_, pile)| pile.len()).sum();
        self.deck.draw_len() + self.deck.discard_len() + hands + melds + secondary
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    /// The seat about to act.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId::new(self.current_player_index as u8)
    }

    /// Shared turn counter, incremented once per full rotation.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Rounds completed in the current match.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.round_over
    }

    /// The winner of the most recently finished match.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Cards left in a seat's hidden secondary pile.
    #[must_use]
    pub fn secondary_deck_len(&self, id: PlayerId) -> usize {
        self.secondary_decks[id].len()
    }
}

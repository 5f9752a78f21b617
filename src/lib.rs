//! # burraco-engine
//!
//! A sequential rules engine for the card game Burraco, built to be
//! driven by external orchestration: AI training loops, human
//! sessions, tournament scripts.
//!
//! ## Design Principles
//!
//! 1. **The engine arbitrates, strategies propose**: player variants
//!    plug in behind the [`players::Strategy`] trait and return
//!    proposals (indices into their own hand and melds). Every
//!    proposal is validated by meld reclassification; illegal ones are
//!    dropped, so a malformed strategy degrades instead of corrupting
//!    a simulation run.
//!
//! 2. **Deterministic**: all randomness flows through a seeded,
//!    forkable [`core::GameRng`]. One seed fully determines a match.
//!
//! 3. **Single-threaded by construction**: a [`game::Game`] exclusively
//!    owns its deck, seats, and piles. Parallel simulation means many
//!    `Game` values, one per worker, never shared state.
//!
//! ## Modules
//!
//! - `cards`: suits, ranks, wildcards, point values
//! - `deck`: draw/discard piles, reshuffle-on-exhaustion
//! - `melds`: Set/Run classification, canonical ordering
//! - `search`: heuristic meld discovery over a hand
//! - `players`: the strategy seam, per-seat state, built-in strategies
//! - `game`: the turn state machine, rounds, matches, scoring
//! - `stats`: statistics sink seam for round/match boundary events
//! - `core`: seat identity and RNG
//! - `errors`: fatal error taxonomy

pub mod cards;
pub mod core;
pub mod deck;
pub mod errors;
pub mod game;
pub mod melds;
pub mod players;
pub mod search;
pub mod stats;

// Re-export commonly used types
pub use crate::cards::{card_points, Card, Rank, Suit};

pub use crate::core::{GameRng, PlayerId, PlayerMap};

pub use crate::deck::{Deck, DECK_SIZE};

pub use crate::errors::EngineError;

pub use crate::game::{Game, GameConfig, MatchOutcome, TurnOutcome};

pub use crate::melds::{rank_gap, Meld, MeldKind};

pub use crate::players::{
    DrawChoice, GreedyStrategy, MeldExtension, PlayerState, RandomStrategy, Strategy,
};

pub use crate::search::{find_all_melds, find_best_meld, find_runs, find_sets};

pub use crate::stats::{MatchStats, NullSink, StatsSink};

//! Engine error taxonomy.
//!
//! Only unrecoverable conditions surface here. Illegal meld proposals,
//! out-of-range indices, and other malformed strategy output are
//! absorbed at the phase that observes them ("no legal action taken")
//! so a broken strategy degrades a game instead of crashing a whole
//! simulation run.

use crate::core::PlayerId;
use thiserror::Error;

/// Fatal engine errors. Either the 108-card invariant was breached
/// upstream, or a strategy violated its turn contract in a way the
/// engine cannot paper over.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A draw was requested while both the draw and discard piles were
    /// empty. Cannot occur while all 108 cards are accounted for.
    #[error("draw requested with both draw and discard piles empty")]
    EmptyDeck,

    /// A turn reached the discard phase in a state that satisfies
    /// neither the discard gate nor the secondary-pile pickup fallback.
    #[error("{player} ended a turn holding {hand_len} cards with no legal discard")]
    IllegalDiscardState {
        player: PlayerId,
        hand_len: usize,
    },
}

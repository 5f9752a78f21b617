//! Simulation-scoped identity and randomness.
//!
//! - `PlayerId` / `PlayerMap`: seat identity and per-seat storage,
//!   scoped to one `Game` rather than to the process.
//! - `GameRng`: seeded, forkable RNG; every random decision in the
//!   engine flows through it so a seed fully determines a match.

pub mod player;
pub mod rng;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;

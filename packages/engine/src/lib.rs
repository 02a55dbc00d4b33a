//! Flora rules engine: a deterministic, pure state machine for a four-player
//! trick-taking card game with a bidding sub-game.
//!
//! The engine owns card identity and ownership, move legality, trick
//! resolution with suit/trump-aware ranking, special-card interrupts, bid
//! validation and scoring, and round/game lifecycle. It performs no I/O:
//! every operation in [`engine`] takes an aggregate, mutates it (or leaves it
//! untouched on error), and returns events for the collaborator to fan out.
//! Persistence, transport, and per-game serialization of calls are the
//! collaborator's concern.

pub mod bidding;
pub mod bids_types;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod special;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_props;

// Re-exports for ergonomics
pub use bids_types::{BidCategory, BidId, TrickCondition, WinCondition};
pub use cards_types::{Card, CardId, CardZone, Character, Suit};
pub use errors::{DomainError, NotFoundKind, ValidationKind};
pub use events::{GameEvent, ScopedEvent};
pub use rules::EngineConfig;
pub use state::{GamePhase, GameState, RoundPhase, Seat};

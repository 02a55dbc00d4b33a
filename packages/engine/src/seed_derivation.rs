//! RNG seed derivation utilities for deterministic game behavior.
//!
//! A game carries one base seed; every shuffle derives a unique-but-
//! deterministic sub-seed from it, so replaying the same aggregate always
//! produces the same deal and the same bid pools.

use crate::bids_types::BidCategory;

/// Derive a seed for dealing cards in a round.
///
/// Unique per (game, round) combination.
pub fn derive_dealing_seed(game_seed: i64, round_no: u8) -> u64 {
    // Cast i64 to u64 for RNG (sign doesn't matter for seed)
    let base = game_seed as u64;

    base.wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(1)
}

/// Derive a seed for shuffling one bid category deck in a round.
///
/// Unique per (game, round, category); different multipliers keep it apart
/// from the dealing seed.
pub fn derive_bid_deck_seed(game_seed: i64, round_no: u8, category: BidCategory) -> u64 {
    let base = game_seed as u64;

    base.wrapping_add((round_no as u64).wrapping_mul(10_000))
        .wrapping_add((category.index() as u64).wrapping_mul(100))
        .wrapping_add(2)
}

/// Fresh entropy for a new game's base seed. The only non-deterministic
/// code path in the crate; everything downstream derives from the result.
pub fn generate_game_seed() -> i64 {
    use rand::Rng;
    rand::rng().random::<i64>()
}

//! Fixed game constants and per-game configuration.

use serde::{Deserialize, Serialize};

use crate::bids_types::BidCategory;

/// Fixed seat count; 2..=4 of these may be occupied.
pub const MAX_SEATS: usize = 4;
pub const MIN_PLAYERS: usize = 2;

pub const TRICKS_PER_ROUND: u8 = 5;
/// One public plus four private cards per seat.
pub const HAND_SIZE: usize = 5;
pub const HIDDEN_CARDS: usize = 4;

/// Bids attach only to tricks 1..=3.
pub const BID_TRICKS: u8 = 3;
/// Bids drawn from each category deck per round.
pub const POOL_PER_CATEGORY: usize = 3;

pub const DEFAULT_WIN_THRESHOLD: i16 = 200;

/// Lose penalties by bid category and placement trick (1..=3).
///
/// The later a bid is placed the more is known about the round, so losing it
/// costs more. Supplied as configuration, not hardcoded in the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyTable {
    /// Indexed by [category][trick_no - 1].
    by_category: [[i16; BID_TRICKS as usize]; 3],
}

impl PenaltyTable {
    pub fn new(points: [i16; 3], set_collection: [i16; 3], tricks: [i16; 3]) -> Self {
        Self {
            by_category: [points, set_collection, tricks],
        }
    }

    pub fn on_lose(&self, category: BidCategory, trick_no: u8) -> i16 {
        debug_assert!((1..=BID_TRICKS).contains(&trick_no));
        let slot = (trick_no.clamp(1, BID_TRICKS) - 1) as usize;
        self.by_category[category.index()][slot]
    }
}

impl Default for PenaltyTable {
    fn default() -> Self {
        Self::new([10, 15, 20], [10, 15, 20], [10, 15, 20])
    }
}

/// Per-game tunables, carried inside the aggregate so the engine stays free
/// of environment access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cumulative score at which the game ends, checked after each round.
    pub win_threshold: i16,
    pub penalties: PenaltyTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            win_threshold: DEFAULT_WIN_THRESHOLD,
            penalties: PenaltyTable::default(),
        }
    }
}

//! Bid definitions: the fixed catalog, per-category decks, and per-round
//! placement state.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::cards_types::Suit;
use crate::deck::shuffle_with_seed;
use crate::errors::{DomainError, NotFoundKind};
use crate::rules::{BID_TRICKS, POOL_PER_CATEGORY};
use crate::seed_derivation::derive_bid_deck_seed;
use crate::state::Seat;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidCategory {
    Points,
    SetCollection,
    Tricks,
}

impl BidCategory {
    pub const fn index(self) -> usize {
        match self {
            BidCategory::Points => 0,
            BidCategory::SetCollection => 1,
            BidCategory::Tricks => 2,
        }
    }
}

/// Win/lose condition for a trick-count bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrickCondition {
    /// The seat must have won every listed trick position (1..=5).
    MustWin { positions: Vec<u8> },
    /// The seat must have won none of the listed trick positions.
    MustNotWin { positions: Vec<u8> },
    /// Total tricks won must fall within the inclusive range.
    CountRange { min: u8, max: u8 },
}

/// Category-specific win condition, matched exhaustively by the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WinCondition {
    Points { min: i16, max: i16 },
    SetCollection { win_suit: Suit, avoid_suit: Suit },
    Tricks { condition: TrickCondition },
}

impl WinCondition {
    pub fn category(&self) -> BidCategory {
        match self {
            WinCondition::Points { .. } => BidCategory::Points,
            WinCondition::SetCollection { .. } => BidCategory::SetCollection,
            WinCondition::Tricks { .. } => BidCategory::Tricks,
        }
    }
}

/// Index into the fixed catalog.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct BidId(pub u8);

/// Immutable bid definition from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidDef {
    pub id: BidId,
    pub name: Cow<'static, str>,
    pub value: i16,
    pub condition: WinCondition,
}

impl BidDef {
    pub fn category(&self) -> BidCategory {
        self.condition.category()
    }
}

/// One claimed slot on a bid: which seat placed it and what losing costs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub seat: Seat,
    pub on_lose: i16,
}

/// A catalog bid plus its per-round mutable state. The same instance cycles
/// across rounds; placements and winners reset when a new pool is dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidState {
    pub def: BidDef,
    /// Slot per placement trick (tricks 1..=3), one claiming seat each.
    pub placements: [Option<Placement>; BID_TRICKS as usize],
    /// Seats whose placement of this bid won, filled at round end.
    pub winners: Vec<Seat>,
}

impl BidState {
    pub fn new(def: BidDef) -> Self {
        Self {
            def,
            placements: [None; BID_TRICKS as usize],
            winners: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.placements = [None; BID_TRICKS as usize];
        self.winners.clear();
    }
}

/// The fixed, hard-coded catalog: 7 points bids, 6 set-collection bids,
/// 5 trick bids. Ids are assigned in listing order.
pub fn catalog() -> Vec<BidDef> {
    use TrickCondition::*;
    let conditions: Vec<(&'static str, i16, WinCondition)> = vec![
        // Points bids
        ("empty-handed", 40, WinCondition::Points { min: 0, max: 0 }),
        ("scraps", 30, WinCondition::Points { min: 1, max: 10 }),
        ("light haul", 10, WinCondition::Points { min: 11, max: 20 }),
        ("fair haul", 10, WinCondition::Points { min: 21, max: 30 }),
        ("full basket", 15, WinCondition::Points { min: 31, max: 40 }),
        ("heavy basket", 25, WinCondition::Points { min: 41, max: 55 }),
        ("hoard", 40, WinCondition::Points { min: 56, max: 85 }),
        // Set-collection bids
        (
            "acorns over leaves",
            10,
            WinCondition::SetCollection {
                win_suit: Suit::Acorns,
                avoid_suit: Suit::Leaves,
            },
        ),
        (
            "leaves over acorns",
            10,
            WinCondition::SetCollection {
                win_suit: Suit::Leaves,
                avoid_suit: Suit::Acorns,
            },
        ),
        (
            "berries over flowers",
            10,
            WinCondition::SetCollection {
                win_suit: Suit::Berries,
                avoid_suit: Suit::Flowers,
            },
        ),
        (
            "flowers over berries",
            10,
            WinCondition::SetCollection {
                win_suit: Suit::Flowers,
                avoid_suit: Suit::Berries,
            },
        ),
        (
            "acorns over berries",
            10,
            WinCondition::SetCollection {
                win_suit: Suit::Acorns,
                avoid_suit: Suit::Berries,
            },
        ),
        (
            "leaves over flowers",
            10,
            WinCondition::SetCollection {
                win_suit: Suit::Leaves,
                avoid_suit: Suit::Flowers,
            },
        ),
        // Trick bids
        (
            "take the opener",
            10,
            WinCondition::Tricks {
                condition: MustWin { positions: vec![1] },
            },
        ),
        (
            "take the closer",
            15,
            WinCondition::Tricks {
                condition: MustWin { positions: vec![5] },
            },
        ),
        (
            "lay low early",
            20,
            WinCondition::Tricks {
                condition: MustNotWin {
                    positions: vec![1, 2, 3],
                },
            },
        ),
        (
            "win nothing",
            30,
            WinCondition::Tricks {
                condition: CountRange { min: 0, max: 0 },
            },
        ),
        (
            "majority",
            25,
            WinCondition::Tricks {
                condition: CountRange { min: 3, max: 5 },
            },
        ),
    ];

    conditions
        .into_iter()
        .enumerate()
        .map(|(i, (name, value, condition))| BidDef {
            id: BidId(i as u8),
            name: Cow::Borrowed(name),
            value,
            condition,
        })
        .collect()
}

/// The three persistent per-category decks of bid ids. Reshuffled each round;
/// never replenished, so membership is fixed at game creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidDecks {
    decks: [Vec<BidId>; 3],
}

impl BidDecks {
    /// Partition the catalog into category decks.
    pub fn from_catalog(defs: &[BidDef]) -> Self {
        let mut decks: [Vec<BidId>; 3] = Default::default();
        for def in defs {
            decks[def.category().index()].push(def.id);
        }
        Self { decks }
    }

    pub fn deck(&self, category: BidCategory) -> &[BidId] {
        &self.decks[category.index()]
    }

    /// Shuffle each category deck independently and take its top 3, yielding
    /// the 9-bid pool for a round. The drawn bids stay in their decks.
    pub fn deal_pool(&mut self, game_seed: i64, round_no: u8) -> Vec<BidId> {
        let mut pool = Vec::with_capacity(3 * POOL_PER_CATEGORY);
        for category in [
            BidCategory::Points,
            BidCategory::SetCollection,
            BidCategory::Tricks,
        ] {
            let seed = derive_bid_deck_seed(game_seed, round_no, category);
            let deck = &mut self.decks[category.index()];
            shuffle_with_seed(deck, seed);
            pool.extend(deck.iter().take(POOL_PER_CATEGORY).copied());
        }
        pool
    }
}

/// Look up a bid's runtime state by id.
pub fn bid_state(bids: &[BidState], id: BidId) -> Result<&BidState, DomainError> {
    bids.get(id.0 as usize)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Bid, format!("No bid with id {}", id.0)))
}

pub fn bid_state_mut(bids: &mut [BidState], id: BidId) -> Result<&mut BidState, DomainError> {
    bids.get_mut(id.0 as usize)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Bid, format!("No bid with id {}", id.0)))
}

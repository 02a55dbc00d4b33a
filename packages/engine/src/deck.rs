//! The physical deck: 32 card records with owner/zone bookkeeping, plus
//! deterministic shuffling.

use crate::cards_types::{Card, CardId, CardZone, CHARACTERS, DECK_SIZE, SUITS};
use crate::errors::{DomainError, NotFoundKind};
use crate::state::Seat;

/// One card's identity plus its mutable per-round lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CardRecord {
    pub card: Card,
    pub owner: Option<Seat>,
    pub zone: CardZone,
}

/// Owns every card for the life of a game. The draw pile is an ordering over
/// ids; cards move between zones and are never created or destroyed after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Deck {
    records: Vec<CardRecord>,
    /// Shuffled draw order; the top of the pile is the last element.
    draw_pile: Vec<CardId>,
}

/// Simple deterministic RNG for shuffling.
///
/// Uses a SplitMix64-style generator for good statistical properties while
/// remaining fast and deterministic given a seed.
struct SimpleLcg {
    state: u64,
}

impl SimpleLcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        // SplitMix64: well-distributed 64-bit generator.
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Compute largest multiple of m that fits in u64 to avoid modulo bias.
        // Values >= limit are discarded using rejection sampling.
        let limit = u64::MAX - (u64::MAX % m);

        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using deterministic RNG.
pub(crate) fn shuffle_with_seed<T>(items: &mut [T], seed: u64) {
    let mut rng = SimpleLcg::new(seed);
    for i in (1..items.len()).rev() {
        let j = rng.next_range(i + 1);
        items.swap(i, j);
    }
}

impl Deck {
    /// Build the fixed 32-card deck in canonical order.
    pub fn new() -> Self {
        let mut records = Vec::with_capacity(DECK_SIZE);
        let mut draw_pile = Vec::with_capacity(DECK_SIZE);
        for suit in SUITS {
            for character in CHARACTERS {
                let card = Card::new(suit, character);
                draw_pile.push(card.id());
                records.push(CardRecord {
                    card,
                    owner: None,
                    zone: CardZone::InDeck,
                });
            }
        }
        Self { records, draw_pile }
    }

    /// Return every card to the draw pile and shuffle. Called at round setup;
    /// the same 32 cards cycle across rounds.
    pub fn reset_and_shuffle(&mut self, seed: u64) {
        for record in &mut self.records {
            record.owner = None;
            record.zone = CardZone::InDeck;
        }
        self.draw_pile = self.records.iter().map(|r| r.card.id()).collect();
        shuffle_with_seed(&mut self.draw_pile, seed);
    }

    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn record(&self, id: CardId) -> Result<&CardRecord, DomainError> {
        self.records.get(id.0 as usize).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Card, format!("No card record for id {}", id.0))
        })
    }

    pub fn record_mut(&mut self, id: CardId) -> Result<&mut CardRecord, DomainError> {
        self.records.get_mut(id.0 as usize).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Card, format!("No card record for id {}", id.0))
        })
    }

    pub fn card(&self, id: CardId) -> Result<Card, DomainError> {
        Ok(self.record(id)?.card)
    }

    /// Draw the top card into a seat's hand.
    pub fn draw_to_hand(&mut self, seat: Seat, zone: CardZone) -> Result<CardId, DomainError> {
        debug_assert!(zone.is_in_hand());
        let id = self
            .draw_pile
            .pop()
            .ok_or_else(|| DomainError::corrupt("Draw from empty deck"))?;
        let record = self.record_mut(id)?;
        record.owner = Some(seat);
        record.zone = zone;
        Ok(id)
    }

    /// Return a held card to the bottom of the draw pile (hidden-card swap).
    pub fn return_to_deck(&mut self, id: CardId) -> Result<(), DomainError> {
        let record = self.record_mut(id)?;
        record.owner = None;
        record.zone = CardZone::InDeck;
        self.draw_pile.insert(0, id);
        Ok(())
    }

    /// Ids of the cards a seat currently holds in hand, in stable card order.
    pub fn hand(&self, seat: Seat) -> Vec<CardId> {
        let mut cards: Vec<&CardRecord> = self
            .records
            .iter()
            .filter(|r| r.owner == Some(seat) && r.zone.is_in_hand())
            .collect();
        cards.sort_by_key(|r| r.card);
        cards.iter().map(|r| r.card.id()).collect()
    }

    pub fn hand_cards(&self, seat: Seat) -> Vec<Card> {
        self.hand(seat)
            .iter()
            .filter_map(|&id| self.card(id).ok())
            .collect()
    }

    /// Ids currently in a given zone.
    pub fn in_zone(&self, zone: CardZone) -> Vec<CardId> {
        self.records
            .iter()
            .filter(|r| r.zone == zone)
            .map(|r| r.card.id())
            .collect()
    }

    /// Defensive invariant check: zone bookkeeping must match the draw pile
    /// and every held card must have an owner. A failure here is a corrupt
    /// aggregate, not a gameplay error.
    pub fn check_integrity(&self) -> Result<(), DomainError> {
        if self.records.len() != DECK_SIZE {
            return Err(DomainError::corrupt(format!(
                "Deck has {} records, expected {DECK_SIZE}",
                self.records.len()
            )));
        }
        let in_deck = self
            .records
            .iter()
            .filter(|r| r.zone == CardZone::InDeck)
            .count();
        if in_deck != self.draw_pile.len() {
            return Err(DomainError::corrupt(format!(
                "Draw pile size {} does not match {in_deck} cards marked InDeck",
                self.draw_pile.len()
            )));
        }
        for record in &self.records {
            if record.zone.is_held() != record.owner.is_some() {
                return Err(DomainError::corrupt(format!(
                    "Card {:?} in zone {:?} has owner {:?}",
                    record.card, record.zone, record.owner
                )));
            }
        }
        Ok(())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

//! Core card-related types: Card, CardId, Suit, Character, CardZone

use crate::errors::{DomainError, NotFoundKind};

/// Flowers is the permanent trump suit; the other three are plain suits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Acorns,
    Leaves,
    Berries,
    Flowers,
}

pub const SUITS: [Suit; 4] = [Suit::Acorns, Suit::Leaves, Suit::Berries, Suit::Flowers];

impl Suit {
    pub const fn index(self) -> usize {
        match self {
            Suit::Acorns => 0,
            Suit::Leaves => 1,
            Suit::Berries => 2,
            Suit::Flowers => 3,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Character {
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Unter,
    Ober,
    Koenig,
}

pub const CHARACTERS: [Character; 8] = [
    Character::Six,
    Character::Seven,
    Character::Eight,
    Character::Nine,
    Character::Ten,
    Character::Unter,
    Character::Ober,
    Character::Koenig,
];

impl Character {
    pub const fn index(self) -> usize {
        match self {
            Character::Six => 0,
            Character::Seven => 1,
            Character::Eight => 2,
            Character::Nine => 3,
            Character::Ten => 4,
            Character::Unter => 5,
            Character::Ober => 6,
            Character::Koenig => 7,
        }
    }
}

/// Stable identity of a card within the 32-card deck.
///
/// Ids are dense (0..32): suit index * 8 + character index. Exactly one card
/// exists per (suit, character) pair for the life of a game; rounds move
/// cards between zones, they never recreate them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CardId(pub u8);

pub const DECK_SIZE: usize = 32;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub character: Character,
}

impl Card {
    pub const fn new(suit: Suit, character: Character) -> Self {
        Self { suit, character }
    }

    pub fn id(self) -> CardId {
        CardId((self.suit.index() * 8 + self.character.index()) as u8)
    }

    pub fn from_id(id: CardId) -> Result<Card, DomainError> {
        let raw = id.0 as usize;
        if raw >= DECK_SIZE {
            return Err(DomainError::not_found(
                NotFoundKind::Card,
                format!("No card with id {raw}"),
            ));
        }
        Ok(Card {
            suit: SUITS[raw / 8],
            character: CHARACTERS[raw % 8],
        })
    }
}

// Note: Ord on Card is only for stable hand sorting: suit order A<L<B<F then
// character order. Do not use for trick resolution; that goes through
// effective ranks in cards_logic.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.character.cmp(&other.character),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Lifecycle zone of a card within a round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardZone {
    InDeck,
    InHandVisible,
    InHandHidden,
    InTrick,
    InFinishedTrick,
    InDiscardPile,
}

impl CardZone {
    /// Zones in which a card must have an owner.
    pub fn is_held(self) -> bool {
        !matches!(self, CardZone::InDeck)
    }

    pub fn is_in_hand(self) -> bool {
        matches!(self, CardZone::InHandVisible | CardZone::InHandHidden)
    }
}

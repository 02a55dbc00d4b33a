//! Card game logic: points, dual ranks, special cards, comparing card strength

use super::cards_types::{Card, Character, Suit};

/// Flowers is trump for every round; there is no trump selection.
pub const TRUMP_SUIT: Suit = Suit::Flowers;

/// Side effect carried by a designated special card, detected when its trick
/// completes. StealCard has priority over PickNextLead.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    StealCard,
    PickNextLead,
}

pub fn is_trump(card: Card) -> bool {
    card.suit == TRUMP_SUIT
}

/// The two designated special cards: flowers-Six steals a card from the
/// completed trick, berries-Six picks the next trick's lead seat.
pub fn special_kind(card: Card) -> Option<SpecialKind> {
    match (card.suit, card.character) {
        (Suit::Flowers, Character::Six) => Some(SpecialKind::StealCard),
        (Suit::Berries, Character::Six) => Some(SpecialKind::PickNextLead),
        _ => None,
    }
}

/// Scoring value of a card. The berries-Unter is worth the most (11) while
/// ranking weakest off-suit; that tension is the heart of the game.
pub fn card_points(card: Card) -> i16 {
    match card.character {
        Character::Ten => 10,
        Character::Koenig => 4,
        Character::Ober => 3,
        Character::Unter => {
            if card.suit == Suit::Berries {
                11
            } else {
                2
            }
        }
        _ => 0,
    }
}

/// Base rank: the rank a card has when it is neither trump nor following the
/// lead suit, or its full trump rank for flowers.
///
/// Trump bands: minor trumps 11..=14 (Seven..Ten), the flowers-Six special at
/// 30, major trumps 31..=33 (Unter, Ober, Koenig). Every trump rank is
/// strictly above every non-trump effective rank.
pub fn base_rank(card: Card) -> u8 {
    if is_trump(card) {
        return match card.character {
            Character::Seven => 11,
            Character::Eight => 12,
            Character::Nine => 13,
            Character::Ten => 14,
            Character::Six => 30,
            Character::Unter => 31,
            Character::Ober => 32,
            Character::Koenig => 33,
        };
    }
    match (card.suit, card.character) {
        // The three weak-when-offsuit Unters.
        (Suit::Acorns, Character::Unter) => 2,
        (Suit::Leaves, Character::Unter) => 1,
        (Suit::Berries, Character::Unter) => 0,
        _ => 3,
    }
}

/// On-lead-suit rank for non-trump cards: a strict 3..=10 ladder
/// (Unter=3, Ober=4, Koenig=5, then Six..Ten at face value). Trump cards do
/// not define one; their base rank already applies everywhere.
pub fn lead_rank(card: Card) -> Option<u8> {
    if is_trump(card) {
        return None;
    }
    Some(match card.character {
        Character::Unter => 3,
        Character::Ober => 4,
        Character::Koenig => 5,
        Character::Six => 6,
        Character::Seven => 7,
        Character::Eight => 8,
        Character::Nine => 9,
        Character::Ten => 10,
    })
}

/// A card's comparable strength within a trick. `lead` is the trick's lead
/// suit (None when the trick was opened with trump).
pub fn effective_rank(card: Card, lead: Option<Suit>) -> u8 {
    if is_trump(card) {
        return base_rank(card);
    }
    match (lead, lead_rank(card)) {
        (Some(l), Some(r)) if l == card.suit => r,
        _ => base_rank(card),
    }
}

/// Whether a newly played card beats the incumbent best card.
///
/// Trump-over-plain is checked before ranks; among equal classes the rank
/// must be strictly greater, so the incumbent survives equals and an
/// off-suit plain card (rank <= 3) can never displace a lead-suit incumbent.
pub fn card_beats(new: Card, incumbent: Card, lead: Option<Suit>) -> bool {
    let new_trump = is_trump(new);
    let incumbent_trump = is_trump(incumbent);
    if new_trump && !incumbent_trump {
        return true;
    }
    if incumbent_trump && !new_trump {
        return false;
    }
    effective_rank(new, lead) > effective_rank(incumbent, lead)
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

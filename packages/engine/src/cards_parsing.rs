//! Card parsing and display using compact tokens (e.g., "7A", "UB")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Character, Suit};
use crate::errors::{DomainError, ValidationKind};

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let character_ch = match self.character {
            Character::Six => '6',
            Character::Seven => '7',
            Character::Eight => '8',
            Character::Nine => '9',
            Character::Ten => 'T',
            Character::Unter => 'U',
            Character::Ober => 'O',
            Character::Koenig => 'K',
        };
        let suit_ch = match self.suit {
            Suit::Acorns => 'A',
            Suit::Leaves => 'L',
            Suit::Berries => 'B',
            Suit::Flowers => 'F',
        };
        write!(f, "{character_ch}{suit_ch}")
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || {
            DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"))
        };
        if s.len() != 2 {
            return Err(parse_err());
        }
        let mut chars = s.chars();
        let character_ch = chars.next().ok_or_else(parse_err)?;
        let suit_ch = chars.next().ok_or_else(parse_err)?;
        let character = match character_ch {
            '6' => Character::Six,
            '7' => Character::Seven,
            '8' => Character::Eight,
            '9' => Character::Nine,
            'T' => Character::Ten,
            'U' => Character::Unter,
            'O' => Character::Ober,
            'K' => Character::Koenig,
            _ => return Err(parse_err()),
        };
        let suit = match suit_ch {
            'A' => Suit::Acorns,
            'L' => Suit::Leaves,
            'B' => Suit::Berries,
            'F' => Suit::Flowers,
            _ => return Err(parse_err()),
        };
        Ok(Card { suit, character })
    }
}

/// Non-panicking helper to parse card tokens (e.g., "7A", "KF") into Card
/// instances. Returns an error if any token is invalid.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

//! Serialization and deserialization for card types

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, CardId, Character, Suit};

// Suit serde
impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Suit::Acorns => "ACORNS",
            Suit::Leaves => "LEAVES",
            Suit::Berries => "BERRIES",
            Suit::Flowers => "FLOWERS",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "ACORNS" => Ok(Suit::Acorns),
            "LEAVES" => Ok(Suit::Leaves),
            "BERRIES" => Ok(Suit::Berries),
            "FLOWERS" => Ok(Suit::Flowers),
            _ => Err(serde::de::Error::custom(format!("Invalid suit: {s}"))),
        }
    }
}

// Character serde
impl Serialize for Character {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Character::Six => "SIX",
            Character::Seven => "SEVEN",
            Character::Eight => "EIGHT",
            Character::Nine => "NINE",
            Character::Ten => "TEN",
            Character::Unter => "UNTER",
            Character::Ober => "OBER",
            Character::Koenig => "KOENIG",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Character {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "SIX" => Ok(Character::Six),
            "SEVEN" => Ok(Character::Seven),
            "EIGHT" => Ok(Character::Eight),
            "NINE" => Ok(Character::Nine),
            "TEN" => Ok(Character::Ten),
            "UNTER" => Ok(Character::Unter),
            "OBER" => Ok(Character::Ober),
            "KOENIG" => Ok(Character::Koenig),
            _ => Err(serde::de::Error::custom(format!("Invalid character: {s}"))),
        }
    }
}

// Card serde (compact 2-character token like "7A", "UB")
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Card>()
            .map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

// CardId serde: plain number, matching the dense 0..32 identity.
impl Serialize for CardId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        if raw as usize >= super::cards_types::DECK_SIZE {
            return Err(serde::de::Error::custom(format!("Invalid card id: {raw}")));
        }
        Ok(CardId(raw))
    }
}

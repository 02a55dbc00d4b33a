//! Events emitted by engine operations.
//!
//! Each successful operation returns the events a collaborator should fan out
//! to clients. Most are broadcast; hand contents are scoped to one seat so
//! the transport layer never leaks hidden cards.

use serde::{Deserialize, Serialize};

use crate::bids_types::BidId;
use crate::cards_types::{Card, CardId, Suit};
use crate::scoring::BidResult;
use crate::state::{GamePhase, RoundPhase, Seat, StolenCard};

/// Who may see an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum EventScope {
    Broadcast,
    Seat { seat: Seat },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedEvent {
    #[serde(flatten)]
    pub scope: EventScope,
    pub event: GameEvent,
}

impl ScopedEvent {
    pub fn broadcast(event: GameEvent) -> Self {
        Self {
            scope: EventScope::Broadcast,
            event,
        }
    }

    pub fn to_seat(seat: Seat, event: GameEvent) -> Self {
        Self {
            scope: EventScope::Seat { seat },
            event,
        }
    }
}

/// Wire-facing event payloads, tagged for the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerJoined {
        seat: Seat,
    },
    PlayerLeft {
        seat: Seat,
        new_host: Seat,
    },
    GameStarted {
        turn_order: Vec<Seat>,
    },
    RoundStarted {
        round_no: u8,
        pool: Vec<BidId>,
    },
    /// Public card per seat, visible to everyone.
    PublicCardsDealt {
        cards: Vec<(Seat, Card)>,
    },
    /// One seat's full hand. Always seat-scoped.
    HandDealt {
        seat: Seat,
        cards: Vec<Card>,
    },
    /// One hidden card swapped back into the deck. Always seat-scoped.
    HiddenCardSwapped {
        seat: Seat,
        returned: Card,
        drawn: Card,
    },
    /// A seat committed its hand during the drawing phase.
    DrawingFinished {
        seat: Seat,
    },
    PlayingStarted {
        lead_seat: Seat,
    },
    TrickStarted {
        trick_no: u8,
        lead_seat: Seat,
    },
    BidPlaced {
        seat: Seat,
        bid: BidId,
        trick_no: u8,
    },
    CardPlayed {
        seat: Seat,
        card: Card,
        lead_suit: Option<Suit>,
    },
    TurnFinished {
        seat: Seat,
        next_seat: Seat,
    },
    SpecialActionRequested {
        kind: crate::cards_logic::SpecialKind,
        acting_seat: Seat,
    },
    NextLeadSelected {
        acting_seat: Seat,
        chosen_seat: Seat,
    },
    CardStolen {
        card: CardId,
        by: Seat,
        from: Seat,
    },
    TrickCompleted {
        trick_no: u8,
        winner: Seat,
        points: i16,
        stolen: Option<StolenCard>,
    },
    RoundEnded {
        round_no: u8,
        bid_results: Vec<BidResultView>,
        deltas: Vec<(Seat, i16)>,
        totals: Vec<(Seat, i16)>,
    },
    GameEnded {
        winner: Option<Seat>,
        totals: Vec<(Seat, i16)>,
    },
    PhaseChanged {
        game_phase: GamePhase,
        round_phase: RoundPhase,
    },
}

/// Serializable projection of a scored placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidResultView {
    pub bid: BidId,
    pub seat: Seat,
    pub trick_no: u8,
    pub won: bool,
    pub delta: i16,
}

impl From<BidResult> for BidResultView {
    fn from(r: BidResult) -> Self {
        Self {
            bid: r.bid,
            seat: r.seat,
            trick_no: r.trick_no,
            won: r.won,
            delta: r.delta,
        }
    }
}

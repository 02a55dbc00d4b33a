//! Per-seat projections of the aggregate.
//!
//! A snapshot contains everything one seat is allowed to see: public state,
//! its own hand, and mid-round bid outlooks. Other seats' hidden cards never
//! appear in it, so a collaborator can serialize a snapshot verbatim.

use serde::Serialize;

use crate::bidding::placements_for_seat;
use crate::bids_types::{bid_state, BidCategory, BidId};
use crate::cards_types::{Card, CardId, CardZone, Suit};
use crate::errors::DomainError;
use crate::scoring::{bid_outlook, BidOutlook};
use crate::state::{GamePhase, GameState, PendingAction, RoundPhase, Seat};
use crate::tricks::{playable_cards, TrickStatus};

/// One card in the viewer's own hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandCardView {
    pub id: CardId,
    pub card: Card,
    /// False for the publicly dealt card, true for the four private ones.
    pub hidden: bool,
}

/// The current trick as everyone sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickView {
    pub trick_no: u8,
    pub status: TrickStatus,
    pub lead_seat: Seat,
    pub lead_suit: Option<Suit>,
    pub plays: Vec<(Seat, Card)>,
    pub best: Option<Card>,
}

/// One claimed slot on a pool bid, with its mid-round prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementView {
    pub trick_no: u8,
    pub seat: Seat,
    pub outlook: BidOutlook,
}

/// One bid in the round's pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidView {
    pub id: BidId,
    pub name: String,
    pub category: BidCategory,
    pub value: i16,
    pub placements: Vec<PlacementView>,
}

/// Everything the given seat may see about the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub version: u64,
    pub game_phase: GamePhase,
    pub round_phase: RoundPhase,
    pub host: Seat,
    pub active_seats: Vec<Seat>,
    pub turn_order: Vec<Seat>,
    pub turn: Option<Seat>,
    pub round_no: u8,
    pub totals: Vec<(Seat, i16)>,
    /// Raw trick points per seat this round; trick play is public.
    pub round_points: Vec<(Seat, i16)>,
    pub pool: Vec<BidView>,
    /// Each seat's publicly dealt card.
    pub public_cards: Vec<(Seat, Card)>,
    pub trick: Option<TrickView>,
    pub pending_action: Option<PendingAction>,
    pub winner: Option<Seat>,
    /// The viewing seat's own cards.
    pub hand: Vec<HandCardView>,
    /// Ids the viewing seat could legally play right now.
    pub playable: Vec<CardId>,
    /// The viewing seat's own placements (bid, trick_no, on_lose).
    pub own_placements: Vec<(BidId, u8, i16)>,
}

/// Project the aggregate for one seat.
pub fn snapshot_for(state: &GameState, viewer: Seat) -> Result<GameSnapshot, DomainError> {
    let seats: Vec<Seat> = if state.turn_order.is_empty() {
        state.active_seats()
    } else {
        state.turn_order.clone()
    };

    let tricks_completed = state
        .trick_history
        .iter()
        .filter(|r| r.round_no == state.round.round_no)
        .count() as u8;

    let mut pool = Vec::with_capacity(state.round.pool.len());
    for &id in &state.round.pool {
        let bs = bid_state(&state.bids, id)?;
        let placements = bs
            .placements
            .iter()
            .enumerate()
            .filter_map(|(slot, p)| {
                p.as_ref().map(|p| PlacementView {
                    trick_no: slot as u8 + 1,
                    seat: p.seat,
                    outlook: bid_outlook(
                        &bs.def,
                        &state.round.scores[p.seat as usize],
                        tricks_completed,
                    ),
                })
            })
            .collect();
        pool.push(BidView {
            id,
            name: bs.def.name.clone().into_owned(),
            category: bs.def.category(),
            value: bs.def.value,
            placements,
        });
    }

    let mut public_cards = Vec::new();
    for &seat in &seats {
        for id in state.deck.hand(seat) {
            let record = state.deck.record(id)?;
            if record.zone == CardZone::InHandVisible {
                public_cards.push((seat, record.card));
            }
        }
    }

    let trick = state.round.trick.as_ref().map(|t| {
        let plays = t
            .plays
            .iter()
            .filter_map(|&(seat, id)| state.deck.card(id).ok().map(|c| (seat, c)))
            .collect();
        TrickView {
            trick_no: t.trick_no,
            status: t.status,
            lead_seat: t.lead_seat,
            lead_suit: t.lead_suit,
            plays,
            best: t.best.and_then(|id| state.deck.card(id).ok()),
        }
    });

    let mut hand = Vec::new();
    for id in state.deck.hand(viewer) {
        let record = state.deck.record(id)?;
        hand.push(HandCardView {
            id,
            card: record.card,
            hidden: record.zone == CardZone::InHandHidden,
        });
    }

    Ok(GameSnapshot {
        version: state.version,
        game_phase: state.phase,
        round_phase: state.round.phase,
        host: state.host,
        active_seats: state.active_seats(),
        turn_order: state.turn_order.clone(),
        turn: state.turn,
        round_no: state.round.round_no,
        totals: seats
            .iter()
            .map(|&s| (s, state.scores_total[s as usize]))
            .collect(),
        round_points: seats
            .iter()
            .map(|&s| (s, state.round.scores[s as usize].points))
            .collect(),
        pool,
        public_cards,
        trick,
        pending_action: state.round.pending_action,
        winner: state.winner,
        hand,
        playable: playable_cards(state, viewer),
        own_placements: placements_for_seat(state, viewer),
    })
}

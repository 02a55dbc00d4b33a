//! Bid placement validation.
//!
//! Bids attach to tricks 1..=3 while the matching trick is in progress. Each
//! bid has one slot per placement trick, and a seat may hold at most one bid
//! of a given category per trick slot.

use crate::bids_types::{bid_state, bid_state_mut, BidCategory, BidId};
use crate::errors::{DomainError, ValidationKind};
use crate::rules::BID_TRICKS;
use crate::state::{require_active, require_round_phase, GameState, RoundPhase, Seat};
use crate::tricks::TrickStatus;

/// Placement as recorded, returned so the caller can emit an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBid {
    pub bid: BidId,
    pub seat: Seat,
    pub trick_no: u8,
    pub on_lose: i16,
}

/// Validate and record a bid placement. No state changes on error.
pub fn place_bid(
    state: &mut GameState,
    seat: Seat,
    bid: BidId,
    trick_no: u8,
) -> Result<PlacedBid, DomainError> {
    require_active(state, seat)?;
    require_round_phase(state, RoundPhase::Playing)?;

    if trick_no == 0 || trick_no > BID_TRICKS {
        return Err(DomainError::validation(
            ValidationKind::BidNotAvailable,
            format!("Bids only attach to tricks 1..={BID_TRICKS}, got {trick_no}"),
        ));
    }

    let trick = state
        .round
        .trick
        .as_ref()
        .ok_or_else(|| DomainError::validation(ValidationKind::NoActiveTrick, "No active trick"))?;
    if trick.trick_no != trick_no || trick.status != TrickStatus::InProgress {
        return Err(DomainError::validation(
            ValidationKind::TrickNotInProgress,
            format!("Trick {trick_no} is not in progress"),
        ));
    }

    if !state.round.pool.contains(&bid) {
        return Err(DomainError::validation(
            ValidationKind::BidNotAvailable,
            format!("Bid {} is not in this round's pool", bid.0),
        ));
    }

    let category = bid_state(&state.bids, bid)?.def.category();
    let slot = (trick_no - 1) as usize;

    if bid_state(&state.bids, bid)?.placements[slot].is_some() {
        return Err(DomainError::validation(
            ValidationKind::BidSlotClaimed,
            format!("Bid {} already claimed for trick {trick_no}", bid.0),
        ));
    }
    if seat_holds_category_in_slot(state, seat, category, slot)? {
        return Err(DomainError::validation(
            ValidationKind::BidSlotClaimed,
            format!("Seat {seat} already placed a {category:?} bid on trick {trick_no}"),
        ));
    }

    let on_lose = state.config.penalties.on_lose(category, trick_no);
    bid_state_mut(&mut state.bids, bid)?.placements[slot] = Some(crate::bids_types::Placement {
        seat,
        on_lose,
    });

    Ok(PlacedBid {
        bid,
        seat,
        trick_no,
        on_lose,
    })
}

fn seat_holds_category_in_slot(
    state: &GameState,
    seat: Seat,
    category: BidCategory,
    slot: usize,
) -> Result<bool, DomainError> {
    for &id in &state.round.pool {
        let bs = bid_state(&state.bids, id)?;
        if bs.def.category() != category {
            continue;
        }
        if matches!(bs.placements[slot], Some(p) if p.seat == seat) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// All placements a seat holds in the current round's pool.
pub fn placements_for_seat(state: &GameState, seat: Seat) -> Vec<(BidId, u8, i16)> {
    let mut out = Vec::new();
    for &id in &state.round.pool {
        let Ok(bs) = bid_state(&state.bids, id) else {
            continue;
        };
        for (slot, placement) in bs.placements.iter().enumerate() {
            if let Some(p) = placement {
                if p.seat == seat {
                    out.push((id, slot as u8 + 1, p.on_lose));
                }
            }
        }
    }
    out
}

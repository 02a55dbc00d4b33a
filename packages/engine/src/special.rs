//! Special-card resolution.
//!
//! A completed trick containing a special card pauses in
//! `AwaitingSpecialAction` with the turn forced to the acting seat. The two
//! resolving operations here apply the chosen effect, clear the pending
//! action, and hand the trick back to finalization.

use crate::cards_logic::SpecialKind;
use crate::cards_types::CardId;
use crate::errors::{DomainError, ValidationKind};
use crate::state::{require_active, require_round_phase, GameState, RoundPhase, Seat};
use crate::tricks::{finalize_trick, TrickCompletion, TrickStatus};

/// Resolve a PickNextLead action: the next trick leads from `chosen`.
pub fn select_next_lead(
    state: &mut GameState,
    acting: Seat,
    chosen: Seat,
) -> Result<TrickCompletion, DomainError> {
    require_pending(state, acting, SpecialKind::PickNextLead)?;
    require_active(state, chosen).map_err(|_| {
        DomainError::validation(
            ValidationKind::InvalidSpecialAction,
            format!("Seat {chosen} is not an active player"),
        )
    })?;

    state.round.next_lead_override = Some(chosen);
    finalize_pending(state)
}

/// Resolve a StealCard action: one card played this trick transfers to the
/// acting seat instead of the trick winner.
pub fn steal_card(
    state: &mut GameState,
    acting: Seat,
    card_id: CardId,
) -> Result<TrickCompletion, DomainError> {
    require_pending(state, acting, SpecialKind::StealCard)?;
    let trick = state
        .round
        .trick
        .as_ref()
        .ok_or_else(|| DomainError::corrupt("Pending action without a trick"))?;
    if !trick.contains_card(card_id) {
        return Err(DomainError::validation(
            ValidationKind::InvalidSpecialAction,
            format!("Card {} was not played in this trick", card_id.0),
        ));
    }

    let trick = state
        .round
        .trick
        .as_mut()
        .ok_or_else(|| DomainError::corrupt("Pending action without a trick"))?;
    trick.stolen = Some((card_id, acting));
    finalize_pending(state)
}

fn require_pending(
    state: &GameState,
    acting: Seat,
    kind: SpecialKind,
) -> Result<(), DomainError> {
    require_round_phase(state, RoundPhase::Playing)?;
    let trick = state
        .round
        .trick
        .as_ref()
        .ok_or_else(|| DomainError::validation(ValidationKind::NoActiveTrick, "No active trick"))?;
    if trick.status != TrickStatus::AwaitingSpecialAction {
        return Err(DomainError::validation(
            ValidationKind::InvalidSpecialAction,
            "No special action pending",
        ));
    }
    let pending = state
        .round
        .pending_action
        .ok_or_else(|| DomainError::corrupt("AwaitingSpecialAction without pending action"))?;
    if pending.kind != kind {
        return Err(DomainError::validation(
            ValidationKind::InvalidSpecialAction,
            format!("Pending action is {:?}", pending.kind),
        ));
    }
    if pending.acting_seat != acting {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Pending action belongs to seat {}", pending.acting_seat),
        ));
    }
    Ok(())
}

fn finalize_pending(state: &mut GameState) -> Result<TrickCompletion, DomainError> {
    state.round.pending_action = None;
    finalize_trick(state)
}

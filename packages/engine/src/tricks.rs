//! Trick state machine: legality, best-card tracking, completion, and
//! finalization.
//!
//! All "first card of trick" / "lead suit" decisions live in [`play_card`];
//! nothing outside this module infers them from play counts.

use crate::cards_logic::{card_beats, card_points, hand_has_suit, is_trump, special_kind, SpecialKind};
use crate::cards_types::{Card, CardId, CardZone, Suit};
use crate::errors::{DomainError, ValidationKind};
use crate::rules::TRICKS_PER_ROUND;
use crate::state::{
    require_round_phase, require_turn, GameState, PendingAction, RoundPhase, Seat, StolenCard,
    TrickRecord,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrickStatus {
    InProgress,
    AwaitingSpecialAction,
    Resolve,
    Ended,
}

/// One trick in play. `lead_suit` is decided exactly once, by the first card:
/// it stays `None` for the whole trick when that card is trump.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trick {
    pub trick_no: u8,
    pub status: TrickStatus,
    pub lead_seat: Seat,
    pub lead_suit: Option<Suit>,
    /// Ordered plays (who, card id).
    pub plays: Vec<(Seat, CardId)>,
    /// Running best card, updated per play.
    pub best: Option<CardId>,
    /// Steal addendum applied before finalization.
    pub stolen: Option<(CardId, Seat)>,
}

impl Trick {
    fn new(trick_no: u8, lead_seat: Seat) -> Self {
        Self {
            trick_no,
            status: TrickStatus::InProgress,
            lead_seat,
            lead_suit: None,
            plays: Vec::with_capacity(4),
            best: None,
            stolen: None,
        }
    }

    pub fn has_played(&self, seat: Seat) -> bool {
        self.plays.iter().any(|&(s, _)| s == seat)
    }

    pub fn contains_card(&self, card: CardId) -> bool {
        self.plays.iter().any(|&(_, c)| c == card)
    }
}

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Whether this play completed the trick.
    pub trick_completed: bool,
    /// Special action now blocking finalization, if any.
    pub pending_special: Option<PendingAction>,
    /// Present when the trick finalized immediately (no special card).
    pub completion: Option<TrickCompletion>,
}

/// What finalizing a trick did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickCompletion {
    pub record: TrickRecord,
    /// Ordinal of the freshly started trick, if the round continues.
    pub next_trick_no: Option<u8>,
    /// True when this was trick 5 and the round moved to Scoring.
    pub round_scoring: bool,
}

/// Begin a trick with the given ordinal and lead seat.
pub fn start_trick(state: &mut GameState, trick_no: u8, lead_seat: Seat) -> Result<(), DomainError> {
    require_round_phase(state, RoundPhase::Playing)?;
    if trick_no == 0 || trick_no > TRICKS_PER_ROUND {
        return Err(DomainError::validation(
            ValidationKind::MaxTricksExceeded,
            format!("Trick {trick_no} outside 1..={TRICKS_PER_ROUND}"),
        ));
    }
    state.round.trick = Some(Trick::new(trick_no, lead_seat));
    state.round.awaiting_finish = false;
    state.turn = Some(lead_seat);
    Ok(())
}

/// Compute legal cards the seat may play, independent of turn enforcement.
///
/// Must follow the lead suit if able; a trump-led trick (lead `None`)
/// constrains nobody.
pub fn playable_cards(state: &GameState, who: Seat) -> Vec<CardId> {
    if state.round.phase != RoundPhase::Playing {
        return Vec::new();
    }
    let Some(trick) = state.round.trick.as_ref() else {
        return Vec::new();
    };
    if trick.status != TrickStatus::InProgress {
        return Vec::new();
    }

    let hand = state.deck.hand(who);
    let cards: Vec<Card> = state.deck.hand_cards(who);
    if let Some(lead) = trick.lead_suit {
        if hand_has_suit(&cards, lead) {
            return hand
                .into_iter()
                .zip(cards)
                .filter(|(_, c)| c.suit == lead)
                .map(|(id, _)| id)
                .collect();
        }
    }
    hand
}

/// Play a card into the current trick, enforcing turn, ownership,
/// suit-following, and phase. Validation happens before any mutation.
pub fn play_card(state: &mut GameState, who: Seat, card_id: CardId) -> Result<PlayOutcome, DomainError> {
    require_round_phase(state, RoundPhase::Playing)?;
    let trick = state
        .round
        .trick
        .as_ref()
        .ok_or_else(|| DomainError::validation(ValidationKind::NoActiveTrick, "No active trick"))?;
    if trick.status != TrickStatus::InProgress {
        return Err(DomainError::validation(
            ValidationKind::TrickNotInProgress,
            format!("Trick is {:?}", trick.status),
        ));
    }
    if state.round.awaiting_finish {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Previous play must be confirmed with finish_turn",
        ));
    }
    require_turn(state, who)?;

    let record = state.deck.record(card_id)?;
    if record.owner != Some(who) || !record.zone.is_in_hand() {
        return Err(DomainError::validation(
            ValidationKind::CardNotOwned,
            format!("Card {} is not in seat {who}'s hand", card_id.0),
        ));
    }
    let card = record.card;

    if !playable_cards(state, who).contains(&card_id) {
        return Err(DomainError::validation(
            ValidationKind::MustFollowSuit,
            "Must follow lead suit",
        ));
    }

    // All checks passed; mutate.
    {
        let record = state.deck.record_mut(card_id)?;
        record.zone = CardZone::InTrick;
    }
    let active = state.turn_order.len();
    let trick = state.round.trick.as_mut().ok_or_else(|| {
        DomainError::corrupt("Trick vanished mid-play")
    })?;

    // First card decides the lead suit, once. Trump establishes none.
    if trick.plays.is_empty() && !is_trump(card) {
        trick.lead_suit = Some(card.suit);
    }
    trick.plays.push((who, card_id));

    // Running best-card comparison.
    match trick.best {
        None => trick.best = Some(card_id),
        Some(best_id) => {
            let best = state.deck.card(best_id)?;
            let lead = state
                .round
                .trick
                .as_ref()
                .and_then(|t| t.lead_suit);
            if card_beats(card, best, lead) {
                let trick = state.round.trick.as_mut().ok_or_else(|| {
                    DomainError::corrupt("Trick vanished mid-play")
                })?;
                trick.best = Some(card_id);
            }
        }
    }

    let trick = state.round.trick.as_ref().ok_or_else(|| {
        DomainError::corrupt("Trick vanished mid-play")
    })?;
    let completed = trick.plays.len() == active;

    if !completed {
        state.round.awaiting_finish = true;
        return Ok(PlayOutcome {
            trick_completed: false,
            pending_special: None,
            completion: None,
        });
    }

    state.round.awaiting_finish = false;

    // Special-card detection at completion time, StealCard before
    // PickNextLead, exactly one honored.
    if let Some(pending) = detect_special(state)? {
        let trick = state.round.trick.as_mut().ok_or_else(|| {
            DomainError::corrupt("Trick vanished at completion")
        })?;
        trick.status = TrickStatus::AwaitingSpecialAction;
        for &(_, id) in trick.plays.clone().iter() {
            state.deck.record_mut(id)?.zone = CardZone::InFinishedTrick;
        }
        state.round.pending_action = Some(pending);
        state.turn = Some(pending.acting_seat);
        return Ok(PlayOutcome {
            trick_completed: true,
            pending_special: Some(pending),
            completion: None,
        });
    }

    let completion = finalize_trick(state)?;
    Ok(PlayOutcome {
        trick_completed: true,
        pending_special: None,
        completion: Some(completion),
    })
}

/// Advance the explicit turn pointer after a play that did not complete the
/// trick.
pub fn finish_turn(state: &mut GameState, who: Seat) -> Result<Seat, DomainError> {
    require_round_phase(state, RoundPhase::Playing)?;
    if !state.round.awaiting_finish {
        return Err(DomainError::validation(
            ValidationKind::InvalidPhase,
            "No play awaiting confirmation",
        ));
    }
    require_turn(state, who)?;
    let next = state.next_in_turn_order(who)?;
    state.turn = Some(next);
    state.round.awaiting_finish = false;
    Ok(next)
}

fn detect_special(state: &GameState) -> Result<Option<PendingAction>, DomainError> {
    let Some(trick) = state.round.trick.as_ref() else {
        return Ok(None);
    };
    let mut pick: Option<PendingAction> = None;
    for &(seat, id) in &trick.plays {
        match special_kind(state.deck.card(id)?) {
            Some(SpecialKind::StealCard) => {
                return Ok(Some(PendingAction {
                    kind: SpecialKind::StealCard,
                    acting_seat: seat,
                }));
            }
            Some(SpecialKind::PickNextLead) => {
                if pick.is_none() {
                    pick = Some(PendingAction {
                        kind: SpecialKind::PickNextLead,
                        acting_seat: seat,
                    });
                }
            }
            None => {}
        }
    }
    Ok(pick)
}

/// Finalize a completed trick: credit the winner, snapshot history, and
/// either start the next trick or move the round to Scoring.
pub(crate) fn finalize_trick(state: &mut GameState) -> Result<TrickCompletion, DomainError> {
    let trick = state
        .round
        .trick
        .as_mut()
        .ok_or_else(|| DomainError::corrupt("Finalize without a trick"))?;
    trick.status = TrickStatus::Resolve;

    let best_id = trick
        .best
        .ok_or_else(|| DomainError::corrupt("Completed trick has no best card"))?;
    let winner = trick
        .plays
        .iter()
        .find(|&&(_, id)| id == best_id)
        .map(|&(seat, _)| seat)
        .ok_or_else(|| DomainError::corrupt("Best card not among plays"))?;

    let trick_no = trick.trick_no;
    let lead_seat = trick.lead_seat;
    let lead_suit = trick.lead_suit;
    let plays = trick.plays.clone();
    let stolen_play = trick.stolen;
    trick.status = TrickStatus::Ended;

    // Split the trick's haul between the winner and, for one card, a thief.
    let mut winner_points: i16 = 0;
    let mut winner_counts = [0u8; 4];
    let mut stolen: Option<StolenCard> = None;
    let mut record_plays: Vec<(Seat, Card)> = Vec::with_capacity(plays.len());
    for &(seat, id) in &plays {
        let card = state.deck.card(id)?;
        record_plays.push((seat, card));
        let (receiver, is_stolen) = match stolen_play {
            Some((stolen_id, by)) if stolen_id == id => (by, true),
            _ => (winner, false),
        };
        if is_stolen {
            stolen = Some(StolenCard {
                card,
                by: receiver,
                from: winner,
            });
            let score = &mut state.round.scores[receiver as usize];
            score.points += card_points(card);
            score.suit_counts[card.suit.index()] += 1;
        } else {
            winner_points += card_points(card);
            winner_counts[card.suit.index()] += 1;
        }
        let rec = state.deck.record_mut(id)?;
        rec.owner = Some(receiver);
        rec.zone = CardZone::InDiscardPile;
    }

    {
        let score = &mut state.round.scores[winner as usize];
        score.points += winner_points;
        score.tricks_won.push(trick_no);
        for (i, &n) in winner_counts.iter().enumerate() {
            score.suit_counts[i] += n;
        }
    }

    let record = TrickRecord {
        round_no: state.round.round_no,
        trick_no,
        lead_seat,
        lead_suit,
        plays: record_plays,
        winner,
        points: winner_points,
        stolen,
    };
    state.trick_history.push(record.clone());
    state.round.pending_action = None;

    if trick_no < TRICKS_PER_ROUND {
        let lead = state.round.next_lead_override.take().unwrap_or(winner);
        let next_no = trick_no + 1;
        start_trick(state, next_no, lead)?;
        Ok(TrickCompletion {
            record,
            next_trick_no: Some(next_no),
            round_scoring: false,
        })
    } else {
        state.round.next_lead_override = None;
        state.round.trick = None;
        state.round.phase = RoundPhase::Scoring;
        state.turn = None;
        Ok(TrickCompletion {
            record,
            next_trick_no: None,
            round_scoring: true,
        })
    }
}

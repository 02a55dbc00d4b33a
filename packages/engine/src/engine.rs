//! Public engine operations.
//!
//! Every operation is a synchronous transformation: validate, mutate the
//! aggregate, bump its version, and return the events to fan out. A failed
//! call returns the error with the aggregate untouched, so the collaborator
//! can keep serving the unmodified value.

use tracing::{debug, info};

use crate::bidding;
use crate::bids_types::BidId;
use crate::cards_types::{CardId, CardZone};
use crate::errors::{DomainError, ValidationKind};
use crate::events::{BidResultView, GameEvent, ScopedEvent};
use crate::rules::{EngineConfig, HIDDEN_CARDS, MAX_SEATS, MIN_PLAYERS};
use crate::scoring;
use crate::seed_derivation::{derive_dealing_seed, generate_game_seed};
use crate::special;
use crate::state::{
    check_seat, require_active, require_game_phase, require_round_phase, GamePhase, GameState,
    RoundPhase, RoundState, Seat,
};
use crate::tricks::{self, TrickCompletion};

/// Build a fresh game with a random base seed.
pub fn create_game(host: Seat, config: EngineConfig) -> Result<GameState, DomainError> {
    create_game_with_seed(host, generate_game_seed(), config)
}

/// Build a fresh game with an explicit base seed, for deterministic replays.
pub fn create_game_with_seed(
    host: Seat,
    rng_seed: i64,
    config: EngineConfig,
) -> Result<GameState, DomainError> {
    let state = GameState::new(host, rng_seed, config)?;
    info!(host, "game created");
    Ok(state)
}

/// Seat a player during setup.
pub fn join_game(state: &mut GameState, seat: Seat) -> Result<Vec<ScopedEvent>, DomainError> {
    require_game_phase(state, GamePhase::Setup)?;
    check_seat(seat)?;
    if state.active_count() >= MAX_SEATS {
        return Err(DomainError::validation(
            ValidationKind::GameFull,
            "All seats are occupied",
        ));
    }
    if state.is_active(seat) {
        return Err(DomainError::validation(
            ValidationKind::SeatUnavailable,
            format!("Seat {seat} is already occupied"),
        ));
    }

    state.seats[seat as usize] = true;
    state.version += 1;
    debug!(seat, "player joined");
    Ok(vec![ScopedEvent::broadcast(GameEvent::PlayerJoined { seat })])
}

/// Remove a player during setup, reassigning the host seat if needed. An
/// empty game ends with no winner.
pub fn leave_game(state: &mut GameState, seat: Seat) -> Result<Vec<ScopedEvent>, DomainError> {
    require_game_phase(state, GamePhase::Setup)?;
    require_active(state, seat)?;

    state.seats[seat as usize] = false;
    let mut events = Vec::new();
    if let Some(&lowest) = state.active_seats().first() {
        if state.host == seat {
            state.host = lowest;
        }
        events.push(ScopedEvent::broadcast(GameEvent::PlayerLeft {
            seat,
            new_host: state.host,
        }));
    } else {
        state.phase = GamePhase::Ended;
        state.winner = None;
        events.push(ScopedEvent::broadcast(GameEvent::PlayerLeft {
            seat,
            new_host: state.host,
        }));
        events.push(ScopedEvent::broadcast(GameEvent::GameEnded {
            winner: None,
            totals: totals_view(state),
        }));
        info!("last player left; game ended");
    }
    state.version += 1;
    Ok(events)
}

/// Lock the turn order and move the game to playing. Only the host may
/// start, and at least two seats must be occupied.
pub fn start_game(state: &mut GameState, who: Seat) -> Result<Vec<ScopedEvent>, DomainError> {
    require_game_phase(state, GamePhase::Setup)?;
    if who != state.host {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Only the host may start the game",
        ));
    }
    if state.active_count() < MIN_PLAYERS {
        return Err(DomainError::validation_other(format!(
            "Need at least {MIN_PLAYERS} players to start"
        )));
    }

    state.turn_order = state.active_seats();
    state.phase = GamePhase::Playing;
    state.round = RoundState::empty(1);
    state.version += 1;
    info!(turn_order = ?state.turn_order, "game started");
    Ok(vec![
        ScopedEvent::broadcast(GameEvent::GameStarted {
            turn_order: state.turn_order.clone(),
        }),
        phase_event(state),
    ])
}

/// Full round setup: reset bid placements, reshuffle, deal the 9-bid pool,
/// then deal one public and four private cards per seat.
pub fn start_round(state: &mut GameState) -> Result<Vec<ScopedEvent>, DomainError> {
    require_game_phase(state, GamePhase::Playing)?;
    require_round_phase(state, RoundPhase::RoundSetup)?;

    let round_no = state.round.round_no;
    for bid in &mut state.bids {
        bid.reset();
    }
    state
        .deck
        .reset_and_shuffle(derive_dealing_seed(state.rng_seed, round_no));
    state.round.pool = state.bid_decks.deal_pool(state.rng_seed, round_no);

    let mut public = Vec::with_capacity(state.turn_order.len());
    for &seat in &state.turn_order.clone() {
        let id = state.deck.draw_to_hand(seat, CardZone::InHandVisible)?;
        public.push((seat, state.deck.card(id)?));
        for _ in 0..HIDDEN_CARDS {
            state.deck.draw_to_hand(seat, CardZone::InHandHidden)?;
        }
    }
    state.deck.check_integrity()?;
    state.round.phase = RoundPhase::PlayerDrawing;

    let mut events = vec![
        ScopedEvent::broadcast(GameEvent::RoundStarted {
            round_no,
            pool: state.round.pool.clone(),
        }),
        ScopedEvent::broadcast(GameEvent::PublicCardsDealt {
            cards: public,
        }),
    ];
    for &seat in &state.turn_order {
        events.push(ScopedEvent::to_seat(
            seat,
            GameEvent::HandDealt {
                seat,
                cards: state.deck.hand_cards(seat),
            },
        ));
    }
    state.version += 1;
    info!(round_no, "round started");
    Ok(events)
}

/// Exchange one hidden card for the top of the draw pile. Each seat may do
/// this once per round, before committing with [`finish_drawing`].
pub fn swap_hidden_card(
    state: &mut GameState,
    seat: Seat,
    card_id: CardId,
) -> Result<Vec<ScopedEvent>, DomainError> {
    require_round_phase(state, RoundPhase::PlayerDrawing)?;
    require_active(state, seat)?;
    if state.round.drawing_done[seat as usize] {
        return Err(DomainError::validation(
            ValidationKind::InvalidPhase,
            format!("Seat {seat} already committed its hand"),
        ));
    }
    if state.round.swapped[seat as usize] {
        return Err(DomainError::validation_other(format!(
            "Seat {seat} already used its swap this round"
        )));
    }
    let record = state.deck.record(card_id)?;
    if record.owner != Some(seat) || record.zone != CardZone::InHandHidden {
        return Err(DomainError::validation(
            ValidationKind::CardNotOwned,
            format!("Card {} is not a hidden card of seat {seat}", card_id.0),
        ));
    }
    let returned = record.card;

    state.deck.return_to_deck(card_id)?;
    let drawn_id = state.deck.draw_to_hand(seat, CardZone::InHandHidden)?;
    let drawn = state.deck.card(drawn_id)?;
    state.round.swapped[seat as usize] = true;
    state.version += 1;
    debug!(seat, "hidden card swapped");
    Ok(vec![ScopedEvent::to_seat(
        seat,
        GameEvent::HiddenCardSwapped {
            seat,
            returned,
            drawn,
        },
    )])
}

/// Commit a seat's hand. Once every active seat has committed, play begins
/// with the first trick of the round.
pub fn finish_drawing(state: &mut GameState, seat: Seat) -> Result<Vec<ScopedEvent>, DomainError> {
    require_round_phase(state, RoundPhase::PlayerDrawing)?;
    require_active(state, seat)?;
    if state.round.drawing_done[seat as usize] {
        return Err(DomainError::validation_other(format!(
            "Seat {seat} already finished drawing"
        )));
    }

    state.round.drawing_done[seat as usize] = true;
    let mut events = vec![ScopedEvent::broadcast(GameEvent::DrawingFinished { seat })];

    let all_done = state
        .turn_order
        .iter()
        .all(|&s| state.round.drawing_done[s as usize]);
    if all_done {
        let lead = state.round_lead(state.round.round_no)?;
        state.round.phase = RoundPhase::Playing;
        tricks::start_trick(state, 1, lead)?;
        events.push(ScopedEvent::broadcast(GameEvent::PlayingStarted {
            lead_seat: lead,
        }));
        events.push(ScopedEvent::broadcast(GameEvent::TrickStarted {
            trick_no: 1,
            lead_seat: lead,
        }));
        info!(round_no = state.round.round_no, lead, "all hands committed; play begins");
    }
    state.version += 1;
    Ok(events)
}

/// Place a bid on the trick currently in progress.
pub fn place_bid(
    state: &mut GameState,
    seat: Seat,
    bid: BidId,
    trick_no: u8,
) -> Result<Vec<ScopedEvent>, DomainError> {
    let placed = bidding::place_bid(state, seat, bid, trick_no)?;
    state.version += 1;
    debug!(seat, bid = placed.bid.0, trick_no, "bid placed");
    Ok(vec![ScopedEvent::broadcast(GameEvent::BidPlaced {
        seat,
        bid: placed.bid,
        trick_no,
    })])
}

/// Play a card into the current trick.
pub fn play_card(
    state: &mut GameState,
    seat: Seat,
    card_id: CardId,
) -> Result<Vec<ScopedEvent>, DomainError> {
    let card = state.deck.card(card_id)?;
    let outcome = tricks::play_card(state, seat, card_id)?;

    let lead_suit = match (&outcome.completion, state.round.trick.as_ref()) {
        (Some(c), _) => c.record.lead_suit,
        (None, Some(t)) => t.lead_suit,
        (None, None) => None,
    };
    let mut events = vec![ScopedEvent::broadcast(GameEvent::CardPlayed {
        seat,
        card,
        lead_suit,
    })];
    if let Some(pending) = outcome.pending_special {
        events.push(ScopedEvent::broadcast(GameEvent::SpecialActionRequested {
            kind: pending.kind,
            acting_seat: pending.acting_seat,
        }));
    }
    if let Some(completion) = outcome.completion {
        events.extend(completion_events(state, &completion));
    }
    state.version += 1;
    debug!(seat, card = %card, "card played");
    Ok(events)
}

/// Confirm a non-completing play and pass the turn on.
pub fn finish_turn(state: &mut GameState, seat: Seat) -> Result<Vec<ScopedEvent>, DomainError> {
    let next = tricks::finish_turn(state, seat)?;
    state.version += 1;
    Ok(vec![ScopedEvent::broadcast(GameEvent::TurnFinished {
        seat,
        next_seat: next,
    })])
}

/// Resolve a pending PickNextLead action.
pub fn select_next_lead(
    state: &mut GameState,
    seat: Seat,
    chosen: Seat,
) -> Result<Vec<ScopedEvent>, DomainError> {
    let completion = special::select_next_lead(state, seat, chosen)?;
    let mut events = vec![ScopedEvent::broadcast(GameEvent::NextLeadSelected {
        acting_seat: seat,
        chosen_seat: chosen,
    })];
    events.extend(completion_events(state, &completion));
    state.version += 1;
    debug!(seat, chosen, "next lead selected");
    Ok(events)
}

/// Resolve a pending StealCard action.
pub fn steal_card(
    state: &mut GameState,
    seat: Seat,
    card_id: CardId,
) -> Result<Vec<ScopedEvent>, DomainError> {
    let completion = special::steal_card(state, seat, card_id)?;
    let stolen = completion
        .record
        .stolen
        .ok_or_else(|| DomainError::corrupt("Steal resolved without a stolen record"))?;
    let mut events = vec![ScopedEvent::broadcast(GameEvent::CardStolen {
        card: card_id,
        by: stolen.by,
        from: stolen.from,
    })];
    events.extend(completion_events(state, &completion));
    state.version += 1;
    debug!(seat, card = card_id.0, "card stolen");
    Ok(events)
}

/// Score the round, fold deltas into the totals, and either end the game or
/// set up the next round.
pub fn finalize_round(state: &mut GameState) -> Result<Vec<ScopedEvent>, DomainError> {
    let summary = scoring::score_round(state)?;
    let round_no = summary.round_no;

    let mut events = vec![ScopedEvent::broadcast(GameEvent::RoundEnded {
        round_no,
        bid_results: summary
            .bid_results
            .iter()
            .map(|&r| BidResultView::from(r))
            .collect(),
        deltas: state
            .turn_order
            .iter()
            .map(|&s| (s, summary.deltas[s as usize]))
            .collect(),
        totals: totals_view(state),
    })];

    if let Some(winner) = game_winner(state) {
        state.phase = GamePhase::Ended;
        state.winner = Some(winner);
        events.push(ScopedEvent::broadcast(GameEvent::GameEnded {
            winner: Some(winner),
            totals: totals_view(state),
        }));
        info!(round_no, winner, "threshold reached; game ended");
    } else {
        state.round = RoundState::empty(round_no + 1);
        events.push(phase_event(state));
        info!(round_no, "round finalized");
    }
    state.version += 1;
    Ok(events)
}

/// Explicitly end the game with no winner. Host only.
pub fn end_game(state: &mut GameState, who: Seat) -> Result<Vec<ScopedEvent>, DomainError> {
    if who != state.host {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            "Only the host may end the game",
        ));
    }
    if state.phase == GamePhase::Ended {
        return Err(DomainError::validation(
            ValidationKind::InvalidPhase,
            "Game already ended",
        ));
    }

    state.phase = GamePhase::Ended;
    state.winner = None;
    state.version += 1;
    info!("game ended by host");
    Ok(vec![ScopedEvent::broadcast(GameEvent::GameEnded {
        winner: None,
        totals: totals_view(state),
    })])
}

/// Winner once any seat crosses the threshold: highest cumulative score,
/// lowest seat number breaking remaining ties.
fn game_winner(state: &GameState) -> Option<Seat> {
    scoring::threshold_winner(state)?;
    state
        .turn_order
        .iter()
        .copied()
        .max_by_key(|&s| (state.scores_total[s as usize], std::cmp::Reverse(s)))
}

fn completion_events(state: &GameState, completion: &TrickCompletion) -> Vec<ScopedEvent> {
    let record = &completion.record;
    let mut events = vec![ScopedEvent::broadcast(GameEvent::TrickCompleted {
        trick_no: record.trick_no,
        winner: record.winner,
        points: record.points,
        stolen: record.stolen,
    })];
    if let Some(next_no) = completion.next_trick_no {
        if let Some(trick) = state.round.trick.as_ref() {
            events.push(ScopedEvent::broadcast(GameEvent::TrickStarted {
                trick_no: next_no,
                lead_seat: trick.lead_seat,
            }));
        }
    }
    if completion.round_scoring {
        events.push(phase_event(state));
    }
    events
}

fn phase_event(state: &GameState) -> ScopedEvent {
    ScopedEvent::broadcast(GameEvent::PhaseChanged {
        game_phase: state.phase,
        round_phase: state.round.phase,
    })
}

fn totals_view(state: &GameState) -> Vec<(Seat, i16)> {
    let seats: Vec<Seat> = if state.turn_order.is_empty() {
        state.active_seats()
    } else {
        state.turn_order.clone()
    };
    seats
        .into_iter()
        .map(|s| (s, state.scores_total[s as usize]))
        .collect()
}

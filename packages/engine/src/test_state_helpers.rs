//! Shared builders for engine tests: canned games and scripted hands.

use crate::cards_types::{Card, CardId, CardZone, DECK_SIZE};
use crate::engine;
use crate::events::ScopedEvent;
use crate::rules::EngineConfig;
use crate::state::{GameState, Seat};
use crate::tricks;

/// Four seated players, game started, round 1 in RoundSetup.
pub(crate) fn full_game(seed: i64) -> GameState {
    game_with_players(seed, 4)
}

pub(crate) fn game_with_players(seed: i64, players: u8) -> GameState {
    let mut state = engine::create_game_with_seed(0, seed, EngineConfig::default()).unwrap();
    for seat in 1..players {
        engine::join_game(&mut state, seat).unwrap();
    }
    engine::start_game(&mut state, 0).unwrap();
    state
}

/// Game with round 1 dealt, still in PlayerDrawing.
pub(crate) fn dealt_game(seed: i64) -> GameState {
    let mut state = full_game(seed);
    engine::start_round(&mut state).unwrap();
    state
}

/// Game with all hands committed; trick 1 in progress, seat 0 leading.
pub(crate) fn playing_game(seed: i64) -> GameState {
    playing_game_with(seed, 4)
}

pub(crate) fn playing_game_with(seed: i64, players: u8) -> GameState {
    let mut state = game_with_players(seed, players);
    engine::start_round(&mut state).unwrap();
    for seat in state.turn_order.clone() {
        engine::finish_drawing(&mut state, seat).unwrap();
    }
    state
}

/// Replace every hand with an exact scripted layout. The first token of each
/// hand becomes the visible card, the rest hidden. Cards not listed go back
/// to the deck zone.
pub(crate) fn rig_hands(state: &mut GameState, hands: &[(Seat, &[&str])]) {
    for raw in 0..DECK_SIZE as u8 {
        let record = state.deck.record_mut(CardId(raw)).unwrap();
        record.owner = None;
        record.zone = CardZone::InDeck;
    }
    for &(seat, tokens) in hands {
        for (i, token) in tokens.iter().enumerate() {
            let card: Card = token.parse().unwrap();
            let record = state.deck.record_mut(card.id()).unwrap();
            record.owner = Some(seat);
            record.zone = if i == 0 {
                CardZone::InHandVisible
            } else {
                CardZone::InHandHidden
            };
        }
    }
}

/// Playing-phase game with scripted hands and a fresh trick led by `lead`.
pub(crate) fn scripted_game(hands: &[(Seat, &[&str])], lead: Seat) -> GameState {
    scripted_game_at_trick(hands, lead, 1)
}

pub(crate) fn scripted_game_at_trick(
    hands: &[(Seat, &[&str])],
    lead: Seat,
    trick_no: u8,
) -> GameState {
    let players = hands.len() as u8;
    let mut state = playing_game_with(42 + players as i64, players);
    rig_hands(&mut state, hands);
    tricks::start_trick(&mut state, trick_no, lead).unwrap();
    state
}

pub(crate) fn card_id(token: &str) -> CardId {
    token.parse::<Card>().unwrap().id()
}

/// Play a card and, if the trick did not complete, confirm the turn.
pub(crate) fn play_and_pass(state: &mut GameState, seat: Seat, token: &str) -> Vec<ScopedEvent> {
    let mut events = engine::play_card(state, seat, card_id(token)).unwrap();
    if state.round.awaiting_finish {
        events.extend(engine::finish_turn(state, seat).unwrap());
    }
    events
}

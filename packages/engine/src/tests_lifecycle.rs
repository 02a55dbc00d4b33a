//! Game and round lifecycle tests: seating, dealing, drawing, scoring,
//! threshold detection.

use crate::bids_types::{bid_state, bid_state_mut, Placement, WinCondition};
use crate::cards_types::CardZone;
use crate::engine;
use crate::errors::ValidationKind;
use crate::events::GameEvent;
use crate::rules::EngineConfig;
use crate::snapshot::snapshot_for;
use crate::state::{GamePhase, RoundPhase};
use crate::test_state_helpers::{dealt_game, full_game, game_with_players, playing_game};

#[test]
fn joining_fills_seats_until_full() {
    let mut state = engine::create_game_with_seed(0, 1, EngineConfig::default()).unwrap();
    assert_eq!(state.active_seats(), vec![0]);

    engine::join_game(&mut state, 2).unwrap();
    assert_eq!(state.active_seats(), vec![0, 2]);

    let err = engine::join_game(&mut state, 2).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::SeatUnavailable));

    engine::join_game(&mut state, 1).unwrap();
    engine::join_game(&mut state, 3).unwrap();
    let err = engine::join_game(&mut state, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::GameFull));
}

#[test]
fn leaving_reassigns_the_host() {
    let mut state = engine::create_game_with_seed(1, 2, EngineConfig::default()).unwrap();
    engine::join_game(&mut state, 0).unwrap();
    engine::join_game(&mut state, 3).unwrap();

    let events = engine::leave_game(&mut state, 1).unwrap();
    assert_eq!(state.host, 0);
    assert!(matches!(
        events[0].event,
        GameEvent::PlayerLeft { seat: 1, new_host: 0 }
    ));
}

#[test]
fn last_player_leaving_ends_the_game() {
    let mut state = engine::create_game_with_seed(0, 3, EngineConfig::default()).unwrap();
    let events = engine::leave_game(&mut state, 0).unwrap();
    assert_eq!(state.phase, GamePhase::Ended);
    assert_eq!(state.winner, None);
    assert!(events
        .iter()
        .any(|e| matches!(e.event, GameEvent::GameEnded { .. })));
}

#[test]
fn only_the_host_starts_with_enough_players() {
    let mut state = engine::create_game_with_seed(0, 4, EngineConfig::default()).unwrap();
    assert!(engine::start_game(&mut state, 0).is_err()); // alone

    engine::join_game(&mut state, 1).unwrap();
    let err = engine::start_game(&mut state, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));

    engine::start_game(&mut state, 0).unwrap();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.turn_order, vec![0, 1]);

    // No seat changes once playing.
    assert!(engine::join_game(&mut state, 2).is_err());
    assert!(engine::leave_game(&mut state, 1).is_err());
}

#[test]
fn round_setup_deals_cards_and_pool() {
    let state = dealt_game(99);
    assert_eq!(state.round.phase, RoundPhase::PlayerDrawing);
    assert_eq!(state.deck.remaining(), 12);
    assert_eq!(state.round.pool.len(), 9);

    for seat in 0..4 {
        let hand = state.deck.hand(seat);
        assert_eq!(hand.len(), 5);
        let visible = hand
            .iter()
            .filter(|&&id| state.deck.record(id).unwrap().zone == CardZone::InHandVisible)
            .count();
        assert_eq!(visible, 1, "seat {seat}");
    }
}

#[test]
fn deal_is_deterministic_per_seed_and_round() {
    let a = dealt_game(1234);
    let b = dealt_game(1234);
    for seat in 0..4 {
        assert_eq!(a.deck.hand(seat), b.deck.hand(seat));
    }
    assert_eq!(a.round.pool, b.round.pool);

    let c = dealt_game(4321);
    assert!((0..4).any(|s| a.deck.hand(s) != c.deck.hand(s)) || a.round.pool != c.round.pool);
}

#[test]
fn hidden_card_swap_is_once_per_round() {
    let mut state = dealt_game(5);
    let hidden = state
        .deck
        .hand(0)
        .into_iter()
        .find(|&id| state.deck.record(id).unwrap().zone == CardZone::InHandHidden)
        .unwrap();

    let events = engine::swap_hidden_card(&mut state, 0, hidden).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(state.deck.hand(0).len(), 5);
    assert_eq!(state.deck.remaining(), 12);
    assert!(state.round.swapped[0]);

    let second = state
        .deck
        .hand(0)
        .into_iter()
        .find(|&id| state.deck.record(id).unwrap().zone == CardZone::InHandHidden)
        .unwrap();
    assert!(engine::swap_hidden_card(&mut state, 0, second).is_err());
}

#[test]
fn visible_card_cannot_be_swapped() {
    let mut state = dealt_game(6);
    let visible = state
        .deck
        .hand(0)
        .into_iter()
        .find(|&id| state.deck.record(id).unwrap().zone == CardZone::InHandVisible)
        .unwrap();
    let err = engine::swap_hidden_card(&mut state, 0, visible).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CardNotOwned));
}

#[test]
fn committed_seats_stop_drawing_and_play_begins_when_all_commit() {
    let mut state = dealt_game(8);
    engine::finish_drawing(&mut state, 0).unwrap();
    assert!(engine::finish_drawing(&mut state, 0).is_err());

    let hidden = state
        .deck
        .hand(0)
        .into_iter()
        .find(|&id| state.deck.record(id).unwrap().zone == CardZone::InHandHidden)
        .unwrap();
    assert!(engine::swap_hidden_card(&mut state, 0, hidden).is_err());

    for seat in 1..4 {
        engine::finish_drawing(&mut state, seat).unwrap();
    }
    assert_eq!(state.round.phase, RoundPhase::Playing);
    let trick = state.round.trick.as_ref().unwrap();
    assert_eq!(trick.trick_no, 1);
    assert_eq!(trick.lead_seat, 0);
    assert_eq!(state.turn, Some(0));
}

#[test]
fn round_lead_rotates_with_round_number() {
    let state = full_game(11);
    assert_eq!(state.round_lead(1).unwrap(), 0);
    assert_eq!(state.round_lead(2).unwrap(), 1);
    assert_eq!(state.round_lead(5).unwrap(), 0);

    let three = game_with_players(11, 3);
    assert_eq!(three.round_lead(4).unwrap(), 0);
}

#[test]
fn seats_without_bids_score_raw_trick_points() {
    let mut state = playing_game(21);
    state.round.trick = None;
    state.round.phase = RoundPhase::Scoring;
    state.round.scores[0].points = 30;
    state.round.scores[3].points = 55;

    let events = engine::finalize_round(&mut state).unwrap();
    assert_eq!(state.scores_total, [30, 0, 0, 55]);
    assert_eq!(state.round.round_no, 2);
    assert_eq!(state.round.phase, RoundPhase::RoundSetup);
    assert!(matches!(events[0].event, GameEvent::RoundEnded { .. }));
}

#[test]
fn placed_bids_replace_raw_points_and_mark_winners() {
    let mut state = playing_game(22);
    state.round.trick = None;
    state.round.phase = RoundPhase::Scoring;

    // Claim the first points bid in the pool for seat 1 and make it a win.
    let bid = state.round.pool[0];
    let def = bid_state(&state.bids, bid).unwrap().def.clone();
    let WinCondition::Points { min, .. } = def.condition else {
        panic!("pool slot 0 must be a points bid");
    };
    bid_state_mut(&mut state.bids, bid).unwrap().placements[0] =
        Some(Placement { seat: 1, on_lose: 10 });
    state.round.scores[1].points = min;

    engine::finalize_round(&mut state).unwrap();
    // Bid value replaces raw points for the bidding seat.
    assert_eq!(state.scores_total[1], def.value);
    assert_eq!(bid_state(&state.bids, bid).unwrap().winners, vec![1]);
}

#[test]
fn next_round_resets_pool_and_placements() {
    let mut state = playing_game(23);
    let bid = state.round.pool[0];
    bid_state_mut(&mut state.bids, bid).unwrap().placements[0] =
        Some(Placement { seat: 0, on_lose: 10 });

    state.round.trick = None;
    state.round.phase = RoundPhase::Scoring;
    engine::finalize_round(&mut state).unwrap();
    engine::start_round(&mut state).unwrap();

    assert_eq!(state.round.round_no, 2);
    assert_eq!(state.round.pool.len(), 9);
    for bs in &state.bids {
        assert!(bs.placements.iter().all(|p| p.is_none()));
        assert!(bs.winners.is_empty());
    }
    assert_eq!(state.deck.remaining(), 12);
}

#[test]
fn threshold_crossing_ends_the_game() {
    let mut state = playing_game(24);
    state.scores_total[1] = 195;
    state.round.trick = None;
    state.round.phase = RoundPhase::Scoring;
    state.round.scores[1].points = 10;

    let events = engine::finalize_round(&mut state).unwrap();
    assert_eq!(state.phase, GamePhase::Ended);
    assert_eq!(state.winner, Some(1));
    assert!(events
        .iter()
        .any(|e| matches!(e.event, GameEvent::GameEnded { winner: Some(1), .. })));
}

#[test]
fn simultaneous_crossings_pick_highest_then_lowest_seat() {
    let mut state = playing_game(25);
    state.scores_total[1] = 195;
    state.scores_total[2] = 200;
    state.round.trick = None;
    state.round.phase = RoundPhase::Scoring;
    state.round.scores[1].points = 10; // 205
    state.round.scores[2].points = 15; // 215

    engine::finalize_round(&mut state).unwrap();
    assert_eq!(state.winner, Some(2));

    // Equal totals break toward the lower seat.
    let mut tied = playing_game(26);
    tied.scores_total[1] = 200;
    tied.scores_total[3] = 200;
    tied.round.trick = None;
    tied.round.phase = RoundPhase::Scoring;
    engine::finalize_round(&mut tied).unwrap();
    assert_eq!(tied.winner, Some(1));
}

#[test]
fn host_may_end_the_game_early() {
    let mut state = playing_game(27);
    let err = engine::end_game(&mut state, 2).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));

    engine::end_game(&mut state, 0).unwrap();
    assert_eq!(state.phase, GamePhase::Ended);
    assert_eq!(state.winner, None);
    assert!(engine::end_game(&mut state, 0).is_err());
}

#[test]
fn versions_bump_once_per_successful_operation() {
    let mut state = engine::create_game_with_seed(0, 31, EngineConfig::default()).unwrap();
    assert_eq!(state.version, 0);
    engine::join_game(&mut state, 1).unwrap();
    assert_eq!(state.version, 1);
    engine::join_game(&mut state, 1).unwrap_err();
    assert_eq!(state.version, 1);
    engine::start_game(&mut state, 0).unwrap();
    assert_eq!(state.version, 2);
    engine::start_round(&mut state).unwrap();
    assert_eq!(state.version, 3);
}

#[test]
fn snapshots_expose_only_the_viewers_hand() {
    let state = dealt_game(41);
    let snap = snapshot_for(&state, 2).unwrap();
    assert_eq!(snap.hand.len(), 5);
    assert_eq!(snap.hand.iter().filter(|c| !c.hidden).count(), 1);
    // One public card per seat; nothing else about other hands.
    assert_eq!(snap.public_cards.len(), 4);
    assert_eq!(snap.pool.len(), 9);
    assert!(snap.playable.is_empty()); // still drawing
    assert_eq!(snap.version, state.version);
}

#[test]
fn hand_deal_events_are_seat_scoped() {
    let mut state = full_game(42);
    let events = engine::start_round(&mut state).unwrap();
    for ev in &events {
        match &ev.event {
            GameEvent::HandDealt { seat, cards } => {
                assert_eq!(cards.len(), 5);
                assert!(matches!(
                    ev.scope,
                    crate::events::EventScope::Seat { seat: s } if s == *seat
                ));
            }
            _ => assert!(matches!(ev.scope, crate::events::EventScope::Broadcast)),
        }
    }
}

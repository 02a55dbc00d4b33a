//! Bid placement validation tests.

use crate::bids_types::{bid_state, BidCategory, BidId};
use crate::engine;
use crate::errors::ValidationKind;
use crate::state::{GameState, Seat};
use crate::test_state_helpers::{dealt_game, play_and_pass, scripted_game};

fn hands() -> Vec<(Seat, &'static [&'static str])> {
    vec![
        (0, &["7A", "6A", "8B", "9B", "9L"] as &[_]),
        (1, &["TA", "8A", "7L", "6L", "TB"]),
        (2, &["9F", "7F", "8F", "KB", "OB"]),
        (3, &["8L", "KL", "OL", "7B", "TL"]),
    ]
}

fn pool_bid(state: &GameState, category: BidCategory, nth: usize) -> BidId {
    state
        .round
        .pool
        .iter()
        .copied()
        .filter(|&id| {
            bid_state(&state.bids, id).unwrap().def.category() == category
        })
        .nth(nth)
        .unwrap()
}

fn off_pool_bid(state: &GameState) -> BidId {
    (0..state.bids.len() as u8)
        .map(BidId)
        .find(|id| !state.round.pool.contains(id))
        .unwrap()
}

#[test]
fn placement_records_seat_and_penalty() {
    let mut state = scripted_game(&hands(), 0);
    let bid = pool_bid(&state, BidCategory::Points, 0);

    let events = engine::place_bid(&mut state, 2, bid, 1).unwrap();
    assert_eq!(events.len(), 1);

    let placement = bid_state(&state.bids, bid).unwrap().placements[0].unwrap();
    assert_eq!(placement.seat, 2);
    assert_eq!(placement.on_lose, 10); // default table, trick 1
}

#[test]
fn bids_only_attach_to_first_three_tricks() {
    let mut state = scripted_game(&hands(), 0);
    let bid = pool_bid(&state, BidCategory::Points, 0);
    let err = engine::place_bid(&mut state, 0, bid, 4).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::BidNotAvailable));
}

#[test]
fn trick_number_must_match_the_trick_in_progress() {
    let mut state = scripted_game(&hands(), 0);
    let bid = pool_bid(&state, BidCategory::Tricks, 0);
    let err = engine::place_bid(&mut state, 0, bid, 2).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::TrickNotInProgress)
    );
}

#[test]
fn bid_must_come_from_the_round_pool() {
    let mut state = scripted_game(&hands(), 0);
    let outside = off_pool_bid(&state);
    let err = engine::place_bid(&mut state, 0, outside, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::BidNotAvailable));
}

#[test]
fn claimed_slot_rejects_a_second_seat() {
    let mut state = scripted_game(&hands(), 0);
    let bid = pool_bid(&state, BidCategory::SetCollection, 0);
    engine::place_bid(&mut state, 0, bid, 1).unwrap();

    let err = engine::place_bid(&mut state, 1, bid, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::BidSlotClaimed));
}

#[test]
fn one_bid_per_category_per_slot_per_seat() {
    let mut state = scripted_game(&hands(), 0);
    let first = pool_bid(&state, BidCategory::Points, 0);
    let second = pool_bid(&state, BidCategory::Points, 1);
    engine::place_bid(&mut state, 0, first, 1).unwrap();

    let err = engine::place_bid(&mut state, 0, second, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::BidSlotClaimed));

    // A different seat may still take the other points bid on this trick.
    engine::place_bid(&mut state, 1, second, 1).unwrap();
    // And the same seat may take a different category.
    let tricks = pool_bid(&state, BidCategory::Tricks, 0);
    engine::place_bid(&mut state, 0, tricks, 1).unwrap();
}

#[test]
fn later_tricks_carry_higher_penalties() {
    let mut state = scripted_game(&hands(), 0);
    play_and_pass(&mut state, 0, "7A");
    play_and_pass(&mut state, 1, "TA");
    play_and_pass(&mut state, 2, "9F");
    play_and_pass(&mut state, 3, "8L");

    // Trick 2 is now in progress.
    let bid = pool_bid(&state, BidCategory::Points, 0);
    engine::place_bid(&mut state, 3, bid, 2).unwrap();
    let placement = bid_state(&state.bids, bid).unwrap().placements[1].unwrap();
    assert_eq!(placement.on_lose, 15); // default table, trick 2
}

#[test]
fn no_bids_outside_the_playing_phase() {
    let mut state = dealt_game(7);
    let bid = state.round.pool[0];
    let err = engine::place_bid(&mut state, 0, bid, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidPhase));
}

#[test]
fn inactive_seats_cannot_bid() {
    let mut state = scripted_game(&hands(), 0);
    let bid = state.round.pool[0];
    // Four-seat game; seat indexes past the table are invalid.
    let err = engine::place_bid(&mut state, 4, bid, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidSeat));
}

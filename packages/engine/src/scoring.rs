//! Round-end bid evaluation and score accumulation.
//!
//! Every placed bid is evaluated against the placing seat's round score. A
//! seat that placed nothing falls back to its raw trick points for the round.

use crate::bids_types::{bid_state, bid_state_mut, BidDef, BidId, TrickCondition, WinCondition};
use crate::errors::DomainError;
use crate::rules::{MAX_SEATS, TRICKS_PER_ROUND};
use crate::state::{require_round_phase, GameState, RoundPhase, Seat, SeatScore};

/// Outcome of one placed bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidResult {
    pub bid: BidId,
    pub seat: Seat,
    pub trick_no: u8,
    pub won: bool,
    pub delta: i16,
}

/// Everything the scoring phase produced for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub round_no: u8,
    pub bid_results: Vec<BidResult>,
    /// Per-seat score change this round.
    pub deltas: [i16; MAX_SEATS],
    /// Cumulative totals after applying the deltas.
    pub totals: [i16; MAX_SEATS],
}

/// Mid-round prediction of a bid's fate, for display only. Scoring ignores
/// this and evaluates at round end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidOutlook {
    Won,
    Lost,
    Open,
}

/// Evaluate one bid for one seat's round score. Returns (won, score delta).
pub fn evaluate_bid(def: &BidDef, on_lose: i16, score: &SeatScore) -> (bool, i16) {
    match &def.condition {
        WinCondition::Points { min, max } => {
            let won = (*min..=*max).contains(&score.points);
            if won {
                (true, def.value)
            } else {
                (false, -on_lose)
            }
        }
        WinCondition::SetCollection {
            win_suit,
            avoid_suit,
        } => {
            let win_count = score.suit_counts[win_suit.index()] as i16;
            let avoid_count = score.suit_counts[avoid_suit.index()] as i16;
            let net = win_count * def.value - avoid_count * on_lose;
            if win_count >= 1 {
                (true, net)
            } else if (-9..=9).contains(&net) {
                // A loss must sting; near-zero nets floor at -10.
                (false, -10)
            } else {
                (false, net)
            }
        }
        WinCondition::Tricks { condition } => {
            let won = trick_condition_met(condition, &score.tricks_won);
            if won {
                (true, def.value)
            } else {
                (false, -on_lose)
            }
        }
    }
}

fn trick_condition_met(condition: &TrickCondition, tricks_won: &[u8]) -> bool {
    match condition {
        TrickCondition::MustWin { positions } => {
            positions.iter().all(|p| tricks_won.contains(p))
        }
        TrickCondition::MustNotWin { positions } => {
            positions.iter().all(|p| !tricks_won.contains(p))
        }
        TrickCondition::CountRange { min, max } => {
            let n = tricks_won.len() as u8;
            (*min..=*max).contains(&n)
        }
    }
}

/// Predict a trick bid's fate given how many tricks have completed so far.
/// Points and set-collection bids stay Open until the round is scored.
pub fn bid_outlook(def: &BidDef, score: &SeatScore, tricks_completed: u8) -> BidOutlook {
    let WinCondition::Tricks { condition } = &def.condition else {
        return BidOutlook::Open;
    };
    let won: &[u8] = &score.tricks_won;
    match condition {
        TrickCondition::MustWin { positions } => {
            if positions
                .iter()
                .any(|&p| p <= tricks_completed && !won.contains(&p))
            {
                BidOutlook::Lost
            } else if positions.iter().all(|&p| p <= tricks_completed) {
                BidOutlook::Won
            } else {
                BidOutlook::Open
            }
        }
        TrickCondition::MustNotWin { positions } => {
            if positions
                .iter()
                .any(|&p| p <= tricks_completed && won.contains(&p))
            {
                BidOutlook::Lost
            } else if positions.iter().all(|&p| p <= tricks_completed) {
                BidOutlook::Won
            } else {
                BidOutlook::Open
            }
        }
        TrickCondition::CountRange { min, max } => {
            let n = won.len() as u8;
            let remaining = TRICKS_PER_ROUND - tricks_completed;
            if n > *max || n + remaining < *min {
                BidOutlook::Lost
            } else if n >= *min && n + remaining <= *max {
                BidOutlook::Won
            } else {
                BidOutlook::Open
            }
        }
    }
}

/// Evaluate every placement in the round's pool, mark bid winners, and fold
/// the resulting deltas into the cumulative totals.
pub fn score_round(state: &mut GameState) -> Result<RoundSummary, DomainError> {
    require_round_phase(state, RoundPhase::Scoring)?;

    let mut bid_results = Vec::new();
    let mut deltas = [0i16; MAX_SEATS];
    let mut placed = [false; MAX_SEATS];

    for &id in &state.round.pool.clone() {
        let bs = bid_state(&state.bids, id)?;
        let def = bs.def.clone();
        let placements = bs.placements;
        for (slot, placement) in placements.iter().enumerate() {
            let Some(p) = placement else { continue };
            let score = &state.round.scores[p.seat as usize];
            let (won, delta) = evaluate_bid(&def, p.on_lose, score);
            placed[p.seat as usize] = true;
            deltas[p.seat as usize] += delta;
            if won {
                bid_state_mut(&mut state.bids, id)?.winners.push(p.seat);
            }
            bid_results.push(BidResult {
                bid: id,
                seat: p.seat,
                trick_no: slot as u8 + 1,
                won,
                delta,
            });
        }
    }

    for seat in state.turn_order.clone() {
        if !placed[seat as usize] {
            deltas[seat as usize] = state.round.scores[seat as usize].points;
        }
        state.scores_total[seat as usize] += deltas[seat as usize];
    }

    Ok(RoundSummary {
        round_no: state.round.round_no,
        bid_results,
        deltas,
        totals: state.scores_total,
    })
}

/// First seat in seat order whose cumulative score reached the threshold.
pub fn threshold_winner(state: &GameState) -> Option<Seat> {
    (0..MAX_SEATS as Seat)
        .filter(|&s| state.is_active(s))
        .find(|&s| state.scores_total[s as usize] >= state.config.win_threshold)
}

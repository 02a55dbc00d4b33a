//! The game aggregate: seats, phases, round state, and shared seat math.
//!
//! Every engine operation is a pure transformation over [`GameState`]; the
//! collaborator owns loading, persisting, and serializing access per game id.

use serde::{Deserialize, Serialize};

use crate::bids_types::{catalog, BidDecks, BidId, BidState};
use crate::cards_logic::SpecialKind;
use crate::cards_types::{Card, CardId, Suit};
use crate::deck::Deck;
use crate::errors::{DomainError, ValidationKind};
use crate::rules::{EngineConfig, MAX_SEATS};
use crate::tricks::Trick;

pub type Seat = u8; // 0..=3

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Seats may join and leave.
    Setup,
    /// Turn order locked; rounds in progress.
    Playing,
    /// Terminal.
    Ended,
}

/// Phases within one round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    RoundSetup,
    PlayerDrawing,
    Playing,
    Scoring,
}

/// Pending special-card choice blocking a trick from finalizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: SpecialKind,
    pub acting_seat: Seat,
}

/// Per-seat score accumulated within one round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeatScore {
    /// Raw trick points collected.
    pub points: i16,
    /// Ordinals (1..=5) of the tricks this seat won.
    pub tricks_won: Vec<u8>,
    /// Cards collected per suit, indexed by `Suit::index()`.
    pub suit_counts: [u8; 4],
}

/// Immutable snapshot of a completed trick, appended to the game history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickRecord {
    pub round_no: u8,
    pub trick_no: u8,
    pub lead_seat: Seat,
    pub lead_suit: Option<Suit>,
    pub plays: Vec<(Seat, Card)>,
    pub winner: Seat,
    pub points: i16,
    /// Set when a StealCard action moved one played card away from the winner.
    pub stolen: Option<StolenCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StolenCard {
    pub card: Card,
    pub by: Seat,
    pub from: Seat,
}

/// Per-round container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// 1-based round number.
    pub round_no: u8,
    pub phase: RoundPhase,
    /// The trick currently in progress or awaiting finalization.
    pub trick: Option<Trick>,
    pub scores: [SeatScore; MAX_SEATS],
    /// The 9-bid pool dealt for this round (3 per category).
    pub pool: Vec<BidId>,
    /// Seats that committed their hand during PlayerDrawing.
    pub drawing_done: [bool; MAX_SEATS],
    /// Seats that used their one hidden-card swap this round.
    pub swapped: [bool; MAX_SEATS],
    /// Lead override for the next trick, set by a PickNextLead action.
    pub next_lead_override: Option<Seat>,
    pub pending_action: Option<PendingAction>,
    /// Set after a non-completing play; cleared by `finish_turn`.
    pub awaiting_finish: bool,
}

impl RoundState {
    pub fn empty(round_no: u8) -> Self {
        Self {
            round_no,
            phase: RoundPhase::RoundSetup,
            trick: None,
            scores: Default::default(),
            pool: Vec::new(),
            drawing_done: [false; MAX_SEATS],
            swapped: [false; MAX_SEATS],
            next_lead_override: None,
            pending_action: None,
            awaiting_finish: false,
        }
    }
}

/// Entire game aggregate, sufficient for every engine operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Monotonic version for collaborator optimistic locking; bumped once per
    /// successful mutating operation.
    pub version: u64,
    pub phase: GamePhase,
    pub host: Seat,
    /// Occupancy per fixed seat.
    pub seats: [bool; MAX_SEATS],
    /// Locked at game start; ascending seat order of the seats then occupied.
    pub turn_order: Vec<Seat>,
    /// Seat expected to act, when someone is.
    pub turn: Option<Seat>,
    pub deck: Deck,
    pub bid_decks: BidDecks,
    /// Runtime state for every catalog bid, indexed by `BidId`.
    pub bids: Vec<BidState>,
    pub round: RoundState,
    /// Append-only history of completed tricks across rounds.
    pub trick_history: Vec<TrickRecord>,
    /// Cumulative scores across rounds.
    pub scores_total: [i16; MAX_SEATS],
    /// Winning seat once the game has ended with a result.
    pub winner: Option<Seat>,
    pub config: EngineConfig,
    /// Base seed; all shuffles derive deterministic sub-seeds from it.
    pub rng_seed: i64,
}

impl GameState {
    /// Fresh aggregate in Setup with only the host seated.
    pub fn new(host: Seat, rng_seed: i64, config: EngineConfig) -> Result<Self, DomainError> {
        check_seat(host)?;
        let defs = catalog();
        let bid_decks = BidDecks::from_catalog(&defs);
        let bids = defs.into_iter().map(BidState::new).collect();
        let mut seats = [false; MAX_SEATS];
        seats[host as usize] = true;
        Ok(Self {
            version: 0,
            phase: GamePhase::Setup,
            host,
            seats,
            turn_order: Vec::new(),
            turn: None,
            deck: Deck::new(),
            bid_decks,
            bids,
            round: RoundState::empty(1),
            trick_history: Vec::new(),
            scores_total: [0; MAX_SEATS],
            winner: None,
            config,
            rng_seed,
        })
    }

    pub fn active_seats(&self) -> Vec<Seat> {
        (0..MAX_SEATS as Seat)
            .filter(|&s| self.seats[s as usize])
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|&&s| s).count()
    }

    pub fn is_active(&self, seat: Seat) -> bool {
        (seat as usize) < MAX_SEATS && self.seats[seat as usize]
    }

    /// Next seat clockwise in the locked turn order.
    pub fn next_in_turn_order(&self, seat: Seat) -> Result<Seat, DomainError> {
        let pos = self
            .turn_order
            .iter()
            .position(|&s| s == seat)
            .ok_or_else(|| {
                DomainError::corrupt(format!("Seat {seat} missing from turn order"))
            })?;
        Ok(self.turn_order[(pos + 1) % self.turn_order.len()])
    }

    /// Lead seat for the first trick of a round: rotates through the turn
    /// order by round number.
    pub fn round_lead(&self, round_no: u8) -> Result<Seat, DomainError> {
        if self.turn_order.is_empty() {
            return Err(DomainError::corrupt("Turn order not locked"));
        }
        let idx = (round_no.saturating_sub(1) as usize) % self.turn_order.len();
        Ok(self.turn_order[idx])
    }

    pub fn hand(&self, seat: Seat) -> Vec<CardId> {
        self.deck.hand(seat)
    }
}

pub fn check_seat(seat: Seat) -> Result<(), DomainError> {
    if (seat as usize) >= MAX_SEATS {
        return Err(DomainError::validation(
            ValidationKind::InvalidSeat,
            format!("Seat {seat} out of range"),
        ));
    }
    Ok(())
}

pub fn require_game_phase(state: &GameState, phase: GamePhase) -> Result<(), DomainError> {
    if state.phase != phase {
        return Err(DomainError::validation(
            ValidationKind::InvalidPhase,
            format!("Requires game phase {phase:?}, current {:?}", state.phase),
        ));
    }
    Ok(())
}

pub fn require_round_phase(state: &GameState, phase: RoundPhase) -> Result<(), DomainError> {
    if state.round.phase != phase {
        return Err(DomainError::validation(
            ValidationKind::InvalidPhase,
            format!(
                "Requires round phase {phase:?}, current {:?}",
                state.round.phase
            ),
        ));
    }
    Ok(())
}

pub fn require_turn(state: &GameState, who: Seat) -> Result<(), DomainError> {
    match state.turn {
        Some(turn) if turn == who => Ok(()),
        _ => Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Not seat {who}'s turn"),
        )),
    }
}

pub fn require_active(state: &GameState, seat: Seat) -> Result<(), DomainError> {
    check_seat(seat)?;
    if !state.is_active(seat) {
        return Err(DomainError::validation(
            ValidationKind::SeatUnavailable,
            format!("Seat {seat} is not an active player"),
        ));
    }
    Ok(())
}

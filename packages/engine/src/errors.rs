//! Domain-level error type for the rules engine.
//!
//! This error type is transport- and storage-agnostic. Every fallible engine
//! operation validates before mutating, so a returned error means the
//! aggregate is unchanged and the collaborator may keep serving it as-is.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failure kinds returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidPhase,
    OutOfTurn,
    CardNotOwned,
    MustFollowSuit,
    NoActiveTrick,
    TrickNotInProgress,
    MaxTricksExceeded,
    BidNotAvailable,
    BidSlotClaimed,
    InvalidSpecialAction,
    SeatUnavailable,
    GameFull,
    InvalidSeat,
    ParseCard,
    Other(String),
}

/// Domain-level not found entities (minimal set; extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Card,
    Bid,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Aggregate invariant violation detected defensively. This is a
    /// programming-contract breach, never a normal gameplay outcome.
    Corrupt(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Corrupt(d) => write!(f, "corrupt aggregate: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn corrupt(detail: impl Into<String>) -> Self {
        Self::Corrupt(detail.into())
    }

    /// Validation kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }
}

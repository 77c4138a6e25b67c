//! Error taxonomy for bracket building and result entry.
//!
//! Every failure is a local validation failure: the bracket passed in is
//! left exactly as it was.

use thiserror::Error;

use crate::types::{Format, MatchRef};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Too few distinct teams for the format, or a team id seeded twice.
    #[error("{format} needs at least {required} distinct teams, found {found}")]
    InsufficientTeams {
        format: Format,
        required: usize,
        found: usize,
    },

    /// A real team tried to use the bye sentinel id.
    #[error("team id `BYE` is reserved for byes")]
    ReservedTeamId,

    /// The reference points outside the bracket's shape.
    #[error("no such match: {at}")]
    InvalidMatchReference { at: MatchRef },

    /// The match exists but cannot take this result.
    #[error("cannot record result for {at}: {reason}")]
    InvalidResult { at: MatchRef, reason: ResultIssue },
}

/// Why a match refused a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResultIssue {
    #[error("both team slots must be filled")]
    MissingTeam,
    #[error("match is already decided")]
    AlreadyDecided,
    #[error("scores are tied")]
    TiedScore,
    #[error("bye matches resolve automatically")]
    ByeMatch,
}

/// Returned when a format name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bracket format `{0}` (expected single-elimination or double-elimination)")]
pub struct UnknownFormat(pub String);

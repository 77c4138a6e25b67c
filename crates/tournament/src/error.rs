//! Errors raised by tournament records and the store.

use bracket_core::BracketError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("tournament {0} not found")]
    NotFound(u64),

    #[error("registration is closed: the bracket has already been generated")]
    RegistrationClosed,

    #[error("registration closed at {deadline}")]
    RegistrationDeadlinePassed { deadline: DateTime<Utc> },

    #[error("registration is open until {deadline}; draw the bracket after it closes")]
    RegistrationStillOpen { deadline: DateTime<Utc> },

    #[error("tournament is full ({max} teams)")]
    TournamentFull { max: usize },

    #[error("team `{0}` is already registered")]
    DuplicateTeam(String),

    #[error("bracket has not been generated yet")]
    BracketNotGenerated,

    #[error("bracket already generated; reset it first")]
    BracketAlreadyGenerated,

    #[error("invalid tournament settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

//! Bracket engine for elimination tournaments
//!
//! This crate provides the pure core of a tournament tracker:
//! - Building a seeded single- or double-elimination bracket from a team list
//! - Advancing winners and routing losers as results are entered
//! - Deriving final standings
//!
//! # Usage
//!
//! ```
//! use bracket_core::{build_bracket_seeded, derive_standings, Format, MatchRef, TeamRef};
//!
//! let teams = vec![TeamRef::new("a", "Alpha"), TeamRef::new("b", "Bravo")];
//! let mut bracket = build_bracket_seeded(&teams, Format::SingleElimination, 7).unwrap();
//! bracket.apply_result(MatchRef::rounds(0, 0), 2, 1).unwrap();
//! assert_eq!(derive_standings(&bracket).len(), 2);
//! ```
//!
//! No I/O happens here. Callers own the bracket value, persist it after
//! every change, and serialize result submissions for a tournament.

pub mod advance;
pub mod bracket;
pub mod builder;
pub mod error;
pub mod standings;
pub mod types;

pub use advance::apply_result;
pub use bracket::Bracket;
pub use builder::{bracket_size, build_bracket, build_bracket_seeded, lower_round_size};
pub use error::{BracketError, ResultIssue, UnknownFormat};
pub use standings::{derive_standings, Place, Standing};
pub use types::*;

//! The bracket itself and read-only queries over it.

use serde::{Deserialize, Serialize};

use crate::types::{Match, MatchRef, Round, TeamRef};

/// Full elimination structure for one tournament.
///
/// The shape (number of rounds and matches) is fixed when the bracket is
/// built; only match contents change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "kebab-case")]
pub enum Bracket {
    SingleElimination {
        rounds: Vec<Round>,
    },
    DoubleElimination {
        upper: Vec<Round>,
        lower: Vec<Round>,
        grand_final: Match,
    },
}

impl Bracket {
    /// Look up a match. Returns `None` if the reference does not fit this
    /// bracket's format or shape.
    pub fn match_at(&self, at: MatchRef) -> Option<&Match> {
        match (self, at) {
            (Bracket::SingleElimination { rounds }, MatchRef::Rounds { round, index }) => {
                rounds.get(round)?.matches.get(index)
            }
            (Bracket::DoubleElimination { upper, .. }, MatchRef::Upper { round, index }) => {
                upper.get(round)?.matches.get(index)
            }
            (Bracket::DoubleElimination { lower, .. }, MatchRef::Lower { round, index }) => {
                lower.get(round)?.matches.get(index)
            }
            (Bracket::DoubleElimination { grand_final, .. }, MatchRef::GrandFinal) => {
                Some(grand_final)
            }
            _ => None,
        }
    }

    pub(crate) fn match_at_mut(&mut self, at: MatchRef) -> Option<&mut Match> {
        match (self, at) {
            (Bracket::SingleElimination { rounds }, MatchRef::Rounds { round, index }) => {
                rounds.get_mut(round)?.matches.get_mut(index)
            }
            (Bracket::DoubleElimination { upper, .. }, MatchRef::Upper { round, index }) => {
                upper.get_mut(round)?.matches.get_mut(index)
            }
            (Bracket::DoubleElimination { lower, .. }, MatchRef::Lower { round, index }) => {
                lower.get_mut(round)?.matches.get_mut(index)
            }
            (Bracket::DoubleElimination { grand_final, .. }, MatchRef::GrandFinal) => {
                Some(grand_final)
            }
            _ => None,
        }
    }

    /// Every match with its reference, in section, round, match order.
    pub fn matches(&self) -> Vec<(MatchRef, &Match)> {
        fn section<'a>(
            rounds: &'a [Round],
            make: fn(usize, usize) -> MatchRef,
            out: &mut Vec<(MatchRef, &'a Match)>,
        ) {
            for (r, round) in rounds.iter().enumerate() {
                for (i, m) in round.matches.iter().enumerate() {
                    out.push((make(r, i), m));
                }
            }
        }

        let mut out = Vec::new();
        match self {
            Bracket::SingleElimination { rounds } => section(rounds, MatchRef::rounds, &mut out),
            Bracket::DoubleElimination {
                upper,
                lower,
                grand_final,
            } => {
                section(upper, MatchRef::upper, &mut out);
                section(lower, MatchRef::lower, &mut out);
                out.push((MatchRef::GrandFinal, grand_final));
            }
        }
        out
    }

    /// Matches waiting for a score: both slots hold real teams and no result
    /// has been entered.
    pub fn pending_matches(&self) -> Vec<MatchRef> {
        self.matches()
            .into_iter()
            .filter(|(_, m)| m.is_playable())
            .map(|(at, _)| at)
            .collect()
    }

    /// The match whose result ends the tournament.
    pub fn final_match(&self) -> Option<&Match> {
        match self {
            Bracket::SingleElimination { rounds } => rounds.last()?.matches.first(),
            Bracket::DoubleElimination { grand_final, .. } => Some(grand_final),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.final_match().is_some_and(Match::is_decided)
    }

    pub fn champion(&self) -> Option<&TeamRef> {
        self.final_match()?.winner()
    }
}

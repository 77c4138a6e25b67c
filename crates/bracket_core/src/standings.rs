//! Final placements derived from a finished bracket.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bracket::Bracket;
use crate::types::TeamRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Place {
    First,
    Second,
    Third,
    /// Shared by both losing semifinalists of a single-elimination bracket.
    ThirdFourth,
}

impl Place {
    pub fn label(self) -> &'static str {
        match self {
            Place::First => "1st Place",
            Place::Second => "2nd Place",
            Place::Third => "3rd Place",
            Place::ThirdFourth => "3rd/4th Place",
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the final standings. Tied places carry several teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub place: Place,
    pub teams: Vec<TeamRef>,
}

impl Standing {
    fn single(place: Place, team: &TeamRef) -> Self {
        Self {
            place,
            teams: vec![team.clone()],
        }
    }

    /// Team names, tied teams joined with " & ".
    pub fn team_names(&self) -> String {
        self.teams
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

/// Placements for a finished bracket, best first. Empty until the deciding
/// match has a result.
pub fn derive_standings(bracket: &Bracket) -> Vec<Standing> {
    let Some(last) = bracket.final_match().filter(|m| m.is_decided()) else {
        return Vec::new();
    };

    let mut standings = Vec::new();
    if let Some(champion) = last.winner() {
        standings.push(Standing::single(Place::First, champion));
    }
    if let Some(runner_up) = last.loser() {
        standings.push(Standing::single(Place::Second, runner_up));
    }

    match bracket {
        Bracket::SingleElimination { rounds } => {
            let semi_losers: Vec<TeamRef> = rounds
                .len()
                .checked_sub(2)
                .and_then(|i| rounds.get(i))
                .map(|semis| {
                    semis
                        .matches
                        .iter()
                        .filter_map(|m| m.loser())
                        .filter(|t| !t.is_bye())
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            if semi_losers.len() == 2 {
                standings.push(Standing {
                    place: Place::ThirdFourth,
                    teams: semi_losers,
                });
            }
        }
        Bracket::DoubleElimination { lower, .. } => {
            let third = lower
                .last()
                .and_then(|r| r.matches.first())
                .and_then(|m| m.loser())
                .filter(|t| !t.is_bye());
            if let Some(third) = third {
                standings.push(Standing::single(Place::Third, third));
            }
        }
    }

    standings
}

#[cfg(test)]
#[path = "standings_tests.rs"]
mod standings_tests;

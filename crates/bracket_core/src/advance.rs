//! Advancement engine: decide a match, then route its winner and loser.
//!
//! Routing rules, with `j` the index of the decided match:
//! - winners move to match `j / 2` of the next round in the same section,
//!   top slot for even `j`, bottom slot for odd `j`;
//! - the upper (or only) bracket's final sends its winner to the grand final
//!   top slot, the lower bracket's final to the bottom slot;
//! - upper round 1 losers pair up in the lower seed round at `j / 2`;
//! - later upper losers drop into lower round `2r - 1` at `j`, bottom slot;
//! - lower seed and advance-round winners enter the following drop round at
//!   the same index, top slot; drop-round winners consolidate at `j / 2`.

use tracing::{debug, info, warn};

use crate::bracket::Bracket;
use crate::error::BracketError;
use crate::types::{MatchRef, Slot, TeamRef};

/// Record a result and move both teams on. See [`Bracket::apply_result`].
pub fn apply_result(
    bracket: &mut Bracket,
    at: MatchRef,
    score1: u32,
    score2: u32,
) -> Result<(), BracketError> {
    bracket.apply_result(at, score1, score2)
}

impl Bracket {
    /// Record the scores for the match at `at` and route both teams.
    ///
    /// The match must hold two real teams, be undecided, and the scores must
    /// differ. On error nothing in the bracket changes.
    pub fn apply_result(
        &mut self,
        at: MatchRef,
        score1: u32,
        score2: u32,
    ) -> Result<(), BracketError> {
        let m = self
            .match_at_mut(at)
            .ok_or(BracketError::InvalidMatchReference { at })?;
        m.check_result(score1, score2)
            .map_err(|reason| BracketError::InvalidResult { at, reason })?;
        m.decide(score1, score2);
        debug!(%at, score1, score2, winner = ?m.winner_id, "result recorded");

        self.route(at);
        Ok(())
    }

    /// Auto-decide a bye match and route its winner.
    pub(crate) fn settle_bye(&mut self, at: MatchRef) {
        let resolved = self.match_at_mut(at).is_some_and(|m| m.resolve_bye());
        if resolved {
            debug!(%at, "bye resolved");
            self.route(at);
        }
    }

    fn route(&mut self, at: MatchRef) {
        let Some(decided) = self.match_at(at) else {
            return;
        };
        let (Some(winner), Some(loser)) = (decided.winner().cloned(), decided.loser().cloned())
        else {
            return;
        };

        match at {
            MatchRef::Rounds { round, index } => {
                let next = MatchRef::rounds(round + 1, index / 2);
                if self.match_at(next).is_some() {
                    self.place(next, Slot::for_index(index), winner);
                } else {
                    info!(champion = %winner.name, "single-elimination bracket complete");
                }
            }
            MatchRef::Upper { round, index } => {
                let next = MatchRef::upper(round + 1, index / 2);
                if self.match_at(next).is_some() {
                    self.place(next, Slot::for_index(index), winner);
                } else {
                    self.place(MatchRef::GrandFinal, Slot::Team1, winner);
                }

                if !loser.is_bye() {
                    let (drop, slot) = if round == 0 {
                        (MatchRef::lower(0, index / 2), Slot::for_index(index))
                    } else {
                        (MatchRef::lower(2 * round - 1, index), Slot::Team2)
                    };
                    self.place(drop, slot, loser);
                }
            }
            MatchRef::Lower { round, index } => {
                let (next, slot) = if round % 2 == 0 {
                    (MatchRef::lower(round + 1, index), Slot::Team1)
                } else {
                    (MatchRef::lower(round + 1, index / 2), Slot::for_index(index))
                };
                if self.match_at(next).is_some() {
                    self.place(next, slot, winner);
                } else {
                    self.place(MatchRef::GrandFinal, Slot::Team2, winner);
                }
            }
            MatchRef::GrandFinal => {
                info!(champion = %winner.name, "double-elimination bracket complete");
            }
        }
    }

    fn place(&mut self, at: MatchRef, slot: Slot, team: TeamRef) {
        let Some(m) = self.match_at_mut(at) else {
            warn!(%at, team = %team.name, "routing target missing from bracket");
            return;
        };
        debug!(%at, ?slot, team = %team.name, "team placed");
        *m.team_mut(slot) = Some(team);

        if let MatchRef::Lower { .. } = at {
            self.settle_walkover(at, slot.other());
        }
    }

    /// A lower match whose open slot can never be filled goes to the team
    /// already in it.
    fn settle_walkover(&mut self, at: MatchRef, open: Slot) {
        let MatchRef::Lower { round, index } = at else {
            return;
        };
        if !self.lower_slot_unreachable(round, index, open) {
            return;
        }
        if let Some(m) = self.match_at_mut(at) {
            if m.is_decided() || m.team(open).is_some() {
                return;
            }
            *m.team_mut(open) = Some(TeamRef::bye());
        }
        debug!(%at, "walkover");
        self.settle_bye(at);
    }

    /// True if no team can ever reach this lower-bracket slot.
    ///
    /// Only seed slots fed by an upper round 1 bye, and drop-round top slots
    /// fed by an empty seed match, qualify.
    fn lower_slot_unreachable(&self, round: usize, index: usize, slot: Slot) -> bool {
        let Bracket::DoubleElimination { upper, .. } = self else {
            return false;
        };
        match (round, slot) {
            (0, _) => {
                let feeder = 2 * index + usize::from(slot == Slot::Team2);
                upper
                    .first()
                    .and_then(|r| r.matches.get(feeder))
                    .map_or(true, |m| m.has_bye())
            }
            (1, Slot::Team1) => {
                self.lower_slot_unreachable(0, index, Slot::Team1)
                    && self.lower_slot_unreachable(0, index, Slot::Team2)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "advance_tests.rs"]
mod advance_tests;

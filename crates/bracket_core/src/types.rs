//! Shared bracket types: team snapshots, matches, rounds and match references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ResultIssue, UnknownFormat};

/// Id reserved for the bye placeholder.
pub const BYE_ID: &str = "BYE";

// =============================================================================
// Teams
// =============================================================================

/// Snapshot of a team's identity, copied into a bracket slot.
///
/// Brackets never point back into the roster, so editing a registered team
/// after the bracket exists does not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl TeamRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: None,
        }
    }

    /// The bye placeholder.
    pub fn bye() -> Self {
        Self::new(BYE_ID, BYE_ID)
    }

    pub fn is_bye(&self) -> bool {
        self.id == BYE_ID
    }
}

/// Anything that can be entered into a bracket.
///
/// Registration records implement this so the builder can take them directly
/// and copy out only the fields a bracket slot needs.
pub trait Entrant {
    fn team_ref(&self) -> TeamRef;
}

impl Entrant for TeamRef {
    fn team_ref(&self) -> TeamRef {
        self.clone()
    }
}

impl<T: Entrant + ?Sized> Entrant for &T {
    fn team_ref(&self) -> TeamRef {
        (**self).team_ref()
    }
}

// =============================================================================
// Format
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    SingleElimination,
    DoubleElimination,
}

impl Format {
    /// Smallest field the format can be built for.
    pub fn min_teams(self) -> usize {
        match self {
            Format::SingleElimination => 2,
            Format::DoubleElimination => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Format::SingleElimination => "single-elimination",
            Format::DoubleElimination => "double-elimination",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "single-elimination" | "single" | "se" => Ok(Format::SingleElimination),
            "double-elimination" | "double" | "de" => Ok(Format::DoubleElimination),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

// =============================================================================
// Matches and rounds
// =============================================================================

/// One of the two team positions in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Team1,
    Team2,
}

impl Slot {
    /// Slot fed by the match at `index` of the previous round: even indices
    /// take the top slot, odd ones the bottom.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Slot::Team1
        } else {
            Slot::Team2
        }
    }

    pub fn other(self) -> Self {
        match self {
            Slot::Team1 => Slot::Team2,
            Slot::Team2 => Slot::Team1,
        }
    }
}

/// A single contest between two slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub team1: Option<TeamRef>,
    pub team2: Option<TeamRef>,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub winner_id: Option<String>,
    pub loser_id: Option<String>,
}

impl Match {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            team1: None,
            team2: None,
            score1: None,
            score2: None,
            winner_id: None,
            loser_id: None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner_id.is_some()
    }

    /// True if either slot holds the bye placeholder.
    pub fn has_bye(&self) -> bool {
        self.teams().any(TeamRef::is_bye)
    }

    /// Both slots hold real teams and no result is in yet.
    pub fn is_playable(&self) -> bool {
        self.team1.is_some() && self.team2.is_some() && !self.has_bye() && !self.is_decided()
    }

    pub fn team(&self, slot: Slot) -> Option<&TeamRef> {
        match slot {
            Slot::Team1 => self.team1.as_ref(),
            Slot::Team2 => self.team2.as_ref(),
        }
    }

    pub(crate) fn team_mut(&mut self, slot: Slot) -> &mut Option<TeamRef> {
        match slot {
            Slot::Team1 => &mut self.team1,
            Slot::Team2 => &mut self.team2,
        }
    }

    /// Filled slots, top first.
    pub fn teams(&self) -> impl Iterator<Item = &TeamRef> {
        self.team1.iter().chain(self.team2.iter())
    }

    pub fn winner(&self) -> Option<&TeamRef> {
        let id = self.winner_id.as_deref()?;
        self.teams().find(|t| t.id == id)
    }

    pub fn loser(&self) -> Option<&TeamRef> {
        let id = self.loser_id.as_deref()?;
        self.teams().find(|t| t.id == id)
    }

    /// Check whether a human-entered score may decide this match.
    pub fn check_result(&self, score1: u32, score2: u32) -> Result<(), ResultIssue> {
        if self.is_decided() {
            return Err(ResultIssue::AlreadyDecided);
        }
        if self.team1.is_none() || self.team2.is_none() {
            return Err(ResultIssue::MissingTeam);
        }
        if self.has_bye() {
            return Err(ResultIssue::ByeMatch);
        }
        if score1 == score2 {
            return Err(ResultIssue::TiedScore);
        }
        Ok(())
    }

    /// Record a validated result. Callers must run `check_result` first.
    pub(crate) fn decide(&mut self, score1: u32, score2: u32) {
        let (winner, loser) = if score1 > score2 {
            (&self.team1, &self.team2)
        } else {
            (&self.team2, &self.team1)
        };
        let winner_id = winner.as_ref().map(|t| t.id.clone());
        let loser_id = loser.as_ref().map(|t| t.id.clone());

        self.score1 = Some(score1);
        self.score2 = Some(score2);
        self.winner_id = winner_id;
        self.loser_id = loser_id;
    }

    /// Decide a match against the bye placeholder in favour of the real team.
    ///
    /// Returns false if this is not an undecided bye match with exactly one
    /// real team.
    pub(crate) fn resolve_bye(&mut self) -> bool {
        if self.is_decided() {
            return false;
        }
        let (Some(t1), Some(t2)) = (&self.team1, &self.team2) else {
            return false;
        };
        let (winner, loser) = match (t1.is_bye(), t2.is_bye()) {
            (false, true) => (t1.id.clone(), t2.id.clone()),
            (true, false) => (t2.id.clone(), t1.id.clone()),
            _ => return false,
        };
        self.winner_id = Some(winner);
        self.loser_id = Some(loser);
        true
    }
}

/// An ordered list of matches sharing a stage label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub title: String,
    pub matches: Vec<Match>,
}

impl Round {
    pub fn new(title: impl Into<String>, matches: Vec<Match>) -> Self {
        Self {
            title: title.into(),
            matches,
        }
    }

    /// Round of `count` empty matches with ids `{prefix}_m{i}`.
    pub fn skeleton(title: impl Into<String>, prefix: &str, count: usize) -> Self {
        let matches = (0..count)
            .map(|i| Match::new(format!("{prefix}_m{i}")))
            .collect();
        Self::new(title, matches)
    }
}

// =============================================================================
// Match references
// =============================================================================

/// Address of one match inside a bracket. Round and match indices are
/// 0-based.
///
/// `Rounds` addresses single-elimination brackets; `Upper`, `Lower` and
/// `GrandFinal` address double-elimination brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "kebab-case")]
pub enum MatchRef {
    Rounds { round: usize, index: usize },
    Upper { round: usize, index: usize },
    Lower { round: usize, index: usize },
    GrandFinal,
}

impl MatchRef {
    pub fn rounds(round: usize, index: usize) -> Self {
        MatchRef::Rounds { round, index }
    }

    pub fn upper(round: usize, index: usize) -> Self {
        MatchRef::Upper { round, index }
    }

    pub fn lower(round: usize, index: usize) -> Self {
        MatchRef::Lower { round, index }
    }
}

impl fmt::Display for MatchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MatchRef::Rounds { round, index } => {
                write!(f, "round {} match {}", round + 1, index + 1)
            }
            MatchRef::Upper { round, index } => {
                write!(f, "upper round {} match {}", round + 1, index + 1)
            }
            MatchRef::Lower { round, index } => {
                write!(f, "lower round {} match {}", round + 1, index + 1)
            }
            MatchRef::GrandFinal => f.write_str("grand final"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_match() -> Match {
        let mut m = Match::new("r1_m0");
        m.team1 = Some(TeamRef::new("a", "Alpha"));
        m.team2 = Some(TeamRef::new("b", "Bravo"));
        m
    }

    #[test]
    fn test_decide_picks_higher_score() {
        let mut m = ready_match();
        m.decide(1, 3);
        assert_eq!(m.winner_id.as_deref(), Some("b"));
        assert_eq!(m.loser_id.as_deref(), Some("a"));
        assert_eq!(m.winner().map(|t| t.name.as_str()), Some("Bravo"));
        assert_eq!((m.score1, m.score2), (Some(1), Some(3)));
    }

    #[test]
    fn test_check_result_rejections() {
        let mut m = ready_match();
        assert_eq!(m.check_result(2, 2), Err(ResultIssue::TiedScore));

        m.team2 = None;
        assert_eq!(m.check_result(2, 0), Err(ResultIssue::MissingTeam));

        let mut m = ready_match();
        m.decide(2, 0);
        assert_eq!(m.check_result(3, 0), Err(ResultIssue::AlreadyDecided));
    }

    #[test]
    fn test_resolve_bye_favours_real_team() {
        let mut m = Match::new("r1_m0");
        m.team1 = Some(TeamRef::bye());
        m.team2 = Some(TeamRef::new("a", "Alpha"));
        assert!(m.resolve_bye());
        assert_eq!(m.winner_id.as_deref(), Some("a"));
        assert_eq!(m.loser_id.as_deref(), Some(BYE_ID));
        assert!(m.score1.is_none());
        assert!(!m.resolve_bye());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("double".parse::<Format>(), Ok(Format::DoubleElimination));
        assert_eq!(
            "Single Elimination".parse::<Format>(),
            Ok(Format::SingleElimination)
        );
        assert!("swiss".parse::<Format>().is_err());
    }

    #[test]
    fn test_slot_parity() {
        assert_eq!(Slot::for_index(0), Slot::Team1);
        assert_eq!(Slot::for_index(3), Slot::Team2);
        assert_eq!(Slot::Team1.other(), Slot::Team2);
    }
}

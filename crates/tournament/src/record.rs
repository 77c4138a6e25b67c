//! Tournament records: settings, registered teams and the bracket they own.

use bracket_core::{
    build_bracket, derive_standings, Bracket, Entrant, Format, MatchRef, Standing, TeamRef,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::TournamentError;

/// A registered team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captain: Option<String>,
}

impl Entrant for Team {
    fn team_ref(&self) -> TeamRef {
        TeamRef {
            id: self.id.clone(),
            name: self.name.clone(),
            logo: self.logo.clone(),
        }
    }
}

/// Where a tournament is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Teams can still register; no bracket yet
    Registration,
    Ongoing,
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Registration => "registration",
            Status::Ongoing => "ongoing",
            Status::Completed => "completed",
        })
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "registration" | "open" => Ok(Status::Registration),
            "ongoing" => Ok(Status::Ongoing),
            "completed" | "complete" | "done" => Ok(Status::Completed),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

fn default_team_size() -> u32 {
    1
}

/// One tournament and everything it owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub format: Format,
    pub max_teams: usize,
    /// Players per team, shown as `NvN`
    #[serde(default = "default_team_size")]
    pub team_size: u32,
    /// Registration closes at this instant. Unset keeps it open until the draw.
    #[serde(default)]
    pub reg_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub teams: Vec<Team>,
    /// Present once the draw has been made
    pub bracket: Option<Bracket>,
}

impl Tournament {
    pub fn new(
        id: u64,
        name: &str,
        format: Format,
        max_teams: usize,
    ) -> Result<Self, TournamentError> {
        if name.trim().is_empty() {
            return Err(TournamentError::InvalidSettings(
                "name must not be empty".to_string(),
            ));
        }
        if max_teams < format.min_teams() {
            return Err(TournamentError::InvalidSettings(format!(
                "{} requires room for at least {} teams",
                format,
                format.min_teams()
            )));
        }

        Ok(Self {
            id,
            name: name.trim().to_string(),
            description: None,
            format,
            max_teams,
            team_size: default_team_size(),
            reg_deadline: None,
            start_date: None,
            created_by: None,
            teams: Vec::new(),
            bracket: None,
        })
    }

    pub fn status(&self) -> Status {
        match &self.bracket {
            None => Status::Registration,
            Some(b) if b.is_complete() => Status::Completed,
            Some(_) => Status::Ongoing,
        }
    }

    /// Set the registration deadline and start date. The tournament must
    /// start after registration closes.
    pub fn set_schedule(
        &mut self,
        reg_deadline: DateTime<Utc>,
        start_date: DateTime<Utc>,
    ) -> Result<(), TournamentError> {
        if start_date <= reg_deadline {
            return Err(TournamentError::InvalidSettings(
                "start date must be after the registration deadline".to_string(),
            ));
        }
        self.reg_deadline = Some(reg_deadline);
        self.start_date = Some(start_date);
        Ok(())
    }

    pub fn set_team_size(&mut self, team_size: u32) -> Result<(), TournamentError> {
        if team_size == 0 {
            return Err(TournamentError::InvalidSettings(
                "team size must be at least 1".to_string(),
            ));
        }
        self.team_size = team_size;
        Ok(())
    }

    /// Teams may join until the bracket exists, the deadline passes or the
    /// field is full
    pub fn can_register(&self) -> bool {
        self.check_registration(Utc::now()).is_ok()
    }

    fn check_registration(&self, now: DateTime<Utc>) -> Result<(), TournamentError> {
        if self.bracket.is_some() {
            return Err(TournamentError::RegistrationClosed);
        }
        if let Some(deadline) = self.reg_deadline.filter(|d| now >= *d) {
            return Err(TournamentError::RegistrationDeadlinePassed { deadline });
        }
        if self.teams.len() >= self.max_teams {
            return Err(TournamentError::TournamentFull {
                max: self.max_teams,
            });
        }
        Ok(())
    }

    /// Register a team and return its record
    pub fn register_team(
        &mut self,
        name: &str,
        logo: Option<String>,
        captain: Option<String>,
    ) -> Result<&Team, TournamentError> {
        if let Err(e) = self.check_registration(Utc::now()) {
            warn!(tournament = self.id, team = name, error = %e, "registration rejected");
            return Err(e);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidSettings(
                "team name must not be empty".to_string(),
            ));
        }
        if self.teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateTeam(name.to_string()));
        }

        self.teams.push(Team {
            id: format!("team_{}", self.teams.len() + 1),
            name: name.to_string(),
            logo,
            captain,
        });
        info!(tournament = self.id, team = name, "team registered");
        Ok(&self.teams[self.teams.len() - 1])
    }

    /// Draw the bracket from the registered teams
    pub fn generate_bracket<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&Bracket, TournamentError> {
        if self.bracket.is_some() {
            return Err(TournamentError::BracketAlreadyGenerated);
        }
        if let Some(deadline) = self.reg_deadline.filter(|d| Utc::now() <= *d) {
            return Err(TournamentError::RegistrationStillOpen { deadline });
        }
        let bracket = build_bracket(&self.teams, self.format, rng)?;
        info!(tournament = self.id, teams = self.teams.len(), "bracket generated");
        Ok(self.bracket.insert(bracket))
    }

    /// Enter a score and advance the bracket
    pub fn report_result(
        &mut self,
        at: MatchRef,
        score1: u32,
        score2: u32,
    ) -> Result<(), TournamentError> {
        let bracket = self
            .bracket
            .as_mut()
            .ok_or(TournamentError::BracketNotGenerated)?;
        bracket.apply_result(at, score1, score2)?;
        if bracket.is_complete() {
            info!(tournament = self.id, "tournament completed");
        }
        Ok(())
    }

    /// Throw the bracket away. Registered teams stay.
    pub fn reset_bracket(&mut self) {
        if self.bracket.take().is_some() {
            info!(tournament = self.id, "bracket reset");
        }
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.bracket.as_ref().map(derive_standings).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;

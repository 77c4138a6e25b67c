//! Tournament storage
//!
//! The store is an ordinary value owned by whoever drives the tracker. It is
//! loaded, handed to the code that needs it, and saved back as JSON.

use bracket_core::Format;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::TournamentError;
use crate::record::{Status, Tournament};

/// All known tournaments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentStore {
    /// Id handed to the next created tournament
    next_id: u64,
    tournaments: Vec<Tournament>,
}

/// Criteria for listing tournaments. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TournamentFilter {
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    pub format: Option<Format>,
    pub status: Option<Status>,
    pub created_by: Option<String>,
}

impl TournamentFilter {
    pub fn matches(&self, t: &Tournament) -> bool {
        let name_ok = self
            .search
            .as_ref()
            .map_or(true, |q| t.name.to_lowercase().contains(&q.to_lowercase()));
        let format_ok = self.format.map_or(true, |f| t.format == f);
        let status_ok = self.status.map_or(true, |s| t.status() == s);
        let owner_ok = self
            .created_by
            .as_ref()
            .map_or(true, |u| t.created_by.as_ref() == Some(u));
        name_ok && format_ok && status_ok && owner_ok
    }
}

impl Default for TournamentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TournamentStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            tournaments: Vec::new(),
        }
    }

    /// Create a tournament with the next free id
    pub fn create(
        &mut self,
        name: &str,
        format: Format,
        max_teams: usize,
    ) -> Result<&mut Tournament, TournamentError> {
        let tournament = Tournament::new(self.next_id, name, format, max_teams)?;
        self.next_id += 1;
        self.tournaments.push(tournament);
        let idx = self.tournaments.len() - 1;
        Ok(&mut self.tournaments[idx])
    }

    pub fn get(&self, id: u64) -> Result<&Tournament, TournamentError> {
        self.tournaments
            .iter()
            .find(|t| t.id == id)
            .ok_or(TournamentError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: u64) -> Result<&mut Tournament, TournamentError> {
        self.tournaments
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TournamentError::NotFound(id))
    }

    pub fn remove(&mut self, id: u64) -> Result<Tournament, TournamentError> {
        let idx = self
            .tournaments
            .iter()
            .position(|t| t.id == id)
            .ok_or(TournamentError::NotFound(id))?;
        Ok(self.tournaments.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tournament> {
        self.tournaments.iter()
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    pub fn filter<'a>(&'a self, filter: &'a TournamentFilter) -> impl Iterator<Item = &'a Tournament> {
        self.tournaments.iter().filter(move |t| filter.matches(t))
    }

    /// Load the store from a JSON file. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        if !path.exists() {
            debug!(path = %path.display(), "no store file, starting empty");
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| TournamentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| TournamentError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the store to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), TournamentError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| TournamentError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| TournamentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), tournaments = self.len(), "store saved");
        Ok(())
    }
}

//! Tournament tracker
//!
//! This crate wraps the bracket engine with everything needed to run
//! tournaments from the command line:
//! - Tournament records with team registration and lifecycle status
//! - A JSON-backed store with filtering
//! - Plain-text reports
//!
//! # Usage
//!
//! ```bash
//! # Create a double-elimination tournament and register teams
//! cargo run -p tournament -- create "Spring Cup" --format double --max-teams 8
//! cargo run -p tournament -- register 1 "Red Foxes" --captain Ana
//!
//! # Draw the bracket and enter a score
//! cargo run -p tournament -- generate 1 --seed 42
//! cargo run -p tournament -- score 1 upper 1 1 3 1
//! ```

pub mod args;
pub mod config;
mod error;
mod record;
pub mod report;
mod store;

pub use config::{load_config, Config, ConfigError};
pub use error::TournamentError;
pub use record::{Status, Team, Tournament};
pub use store::{TournamentFilter, TournamentStore};

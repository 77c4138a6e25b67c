//! Bracket construction: shuffle, pad with byes, lay out round skeletons.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::bracket::Bracket;
use crate::error::BracketError;
use crate::types::{Entrant, Format, Match, MatchRef, Round, TeamRef};

/// Smallest power of two that holds `teams` entrants.
pub fn bracket_size(teams: usize) -> usize {
    teams.max(1).next_power_of_two()
}

/// Number of matches in lower round `i` (0-based) of a double-elimination
/// bracket of the given size.
pub fn lower_round_size(size: usize, i: usize) -> usize {
    (size >> (i / 2 + 2)).max(1)
}

/// Build a bracket from registered teams.
///
/// Teams are seeded by a uniform shuffle drawn from `rng`. Round 1 pads the
/// field with byes up to the next power of two, and every bye is resolved
/// before this returns.
pub fn build_bracket<E, R>(teams: &[E], format: Format, rng: &mut R) -> Result<Bracket, BracketError>
where
    E: Entrant,
    R: Rng + ?Sized,
{
    let mut seeds: Vec<TeamRef> = teams.iter().map(|t| t.team_ref()).collect();
    validate_field(&seeds, format)?;

    seeds.shuffle(rng);

    let size = bracket_size(seeds.len());
    let byes = size - seeds.len();
    let depth = size.trailing_zeros() as usize;
    debug!(teams = seeds.len(), size, byes, %format, "laying out bracket");

    let mut bracket = match format {
        Format::SingleElimination => {
            let mut rounds = vec![Round::new(
                single_title(1, depth),
                first_round("r1", &seeds, byes),
            )];
            for r in 2..=depth {
                rounds.push(Round::skeleton(
                    single_title(r, depth),
                    &format!("r{r}"),
                    size >> r,
                ));
            }
            Bracket::SingleElimination { rounds }
        }
        Format::DoubleElimination => {
            let mut upper = vec![Round::new("Upper Round 1", first_round("ur1", &seeds, byes))];
            for r in 2..=depth {
                upper.push(Round::skeleton(
                    format!("Upper Round {r}"),
                    &format!("ur{r}"),
                    size >> r,
                ));
            }
            let lower = (0..2 * (depth - 1))
                .map(|i| {
                    Round::skeleton(
                        format!("Lower Round {}", i + 1),
                        &format!("lr{}", i + 1),
                        lower_round_size(size, i),
                    )
                })
                .collect();
            Bracket::DoubleElimination {
                upper,
                lower,
                grand_final: Match::new("gf_m1"),
            }
        }
    };

    let first = match format {
        Format::SingleElimination => MatchRef::rounds,
        Format::DoubleElimination => MatchRef::upper,
    };
    for index in 0..byes {
        bracket.settle_bye(first(0, index));
    }

    info!(teams = seeds.len(), size, byes, %format, "bracket built");
    Ok(bracket)
}

/// [`build_bracket`] with a seeded generator, for reproducible draws.
pub fn build_bracket_seeded<E: Entrant>(
    teams: &[E],
    format: Format,
    seed: u64,
) -> Result<Bracket, BracketError> {
    let mut rng = StdRng::seed_from_u64(seed);
    build_bracket(teams, format, &mut rng)
}

fn validate_field(seeds: &[TeamRef], format: Format) -> Result<(), BracketError> {
    if seeds.iter().any(TeamRef::is_bye) {
        return Err(BracketError::ReservedTeamId);
    }

    // A repeated id counts once; every entry must be distinct to seed
    let distinct = seeds
        .iter()
        .map(|t| t.id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let required = format.min_teams().max(seeds.len());
    if distinct < required {
        return Err(BracketError::InsufficientTeams {
            format,
            required,
            found: distinct,
        });
    }
    Ok(())
}

/// Round 1: the first `byes` matches pair a team with the bye placeholder,
/// the rest pair two teams, consuming `seeds` in order.
fn first_round(prefix: &str, seeds: &[TeamRef], byes: usize) -> Vec<Match> {
    let size = bracket_size(seeds.len());
    let mut queue = seeds.iter().cloned();
    (0..size / 2)
        .map(|i| {
            let mut m = Match::new(format!("{prefix}_m{i}"));
            m.team1 = queue.next();
            m.team2 = if i < byes {
                Some(TeamRef::bye())
            } else {
                queue.next()
            };
            m
        })
        .collect()
}

fn single_title(round: usize, depth: usize) -> String {
    match depth - round {
        0 => "Finals".to_string(),
        1 => "Semi-Finals".to_string(),
        _ => format!("Round {round}"),
    }
}

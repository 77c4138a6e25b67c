//! Command-line parsing helpers shared by the binary.
//!
//! Rounds and matches are 1-based on the command line and 0-based in
//! [`MatchRef`].

use anyhow::{anyhow, bail, Context, Result};
use bracket_core::MatchRef;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::str::FromStr;

/// Parse `<section> [round match]` from the front of `args`, returning the
/// reference and the remaining arguments.
///
/// Sections: `rounds`, `upper`, `lower` (followed by round and match
/// numbers) or `grand-final` / `gf`.
pub fn parse_match_ref(args: &[String]) -> Result<(MatchRef, &[String])> {
    let section = args
        .first()
        .ok_or_else(|| anyhow!("missing match section"))?
        .to_lowercase();

    let make: fn(usize, usize) -> MatchRef = match section.as_str() {
        "grand-final" | "grandfinal" | "gf" => return Ok((MatchRef::GrandFinal, &args[1..])),
        "rounds" | "round" | "r" => MatchRef::rounds,
        "upper" | "u" => MatchRef::upper,
        "lower" | "l" => MatchRef::lower,
        other => bail!("unknown section `{other}` (expected rounds, upper, lower or grand-final)"),
    };

    if args.len() < 3 {
        bail!("{section} needs a round and a match number");
    }
    let round = one_based(&args[1], "round")?;
    let index = one_based(&args[2], "match")?;
    Ok((make(round, index), &args[3..]))
}

/// Command-line form of a match reference, the inverse of [`parse_match_ref`].
pub fn format_match_ref(at: MatchRef) -> String {
    match at {
        MatchRef::Rounds { round, index } => format!("rounds {} {}", round + 1, index + 1),
        MatchRef::Upper { round, index } => format!("upper {} {}", round + 1, index + 1),
        MatchRef::Lower { round, index } => format!("lower {} {}", round + 1, index + 1),
        MatchRef::GrandFinal => "grand-final".to_string(),
    }
}

/// Parse two scores.
pub fn parse_scores(args: &[String]) -> Result<(u32, u32)> {
    match args {
        [s1, s2, ..] => Ok((parse_number(s1, "score")?, parse_number(s2, "score")?)),
        _ => bail!("expected two scores"),
    }
}

pub fn parse_number<T>(value: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("invalid {what}: `{value}`"))
}

fn one_based(value: &str, what: &str) -> Result<usize> {
    let n: usize = parse_number(value, what)?;
    n.checked_sub(1)
        .ok_or_else(|| anyhow!("{what} numbers start at 1"))
}

/// Parse a date as RFC 3339, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`.
/// Dates without an offset are taken as UTC; a bare date means midnight.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("invalid date: `{value}` (expected YYYY-MM-DD [HH:MM])"))
}

/// Positional argument at `index`, refusing anything that looks like a flag.
pub fn positional<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str> {
    match args.get(index) {
        Some(a) if !a.starts_with("--") => Ok(a.as_str()),
        _ => bail!("missing {what}"),
    }
}

/// Value following `--flag`, if present.
pub fn flag_value<'a>(args: &'a [String], names: &[&str]) -> Option<&'a str> {
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

//! Plain-text tournament report

use bracket_core::{Bracket, Match, Round};

use crate::args::format_match_ref;
use crate::record::Tournament;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Generate a text report: settings, teams, bracket progress and standings
pub fn render(t: &Tournament) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== Tournament #{}: {} ===\n\n", t.id, t.name));
    report.push_str(&format!(
        "Format: {} | Teams: {}/{} | Status: {}\n",
        t.format,
        t.teams.len(),
        t.max_teams,
        t.status()
    ));
    report.push_str(&format!("Team size: {0}v{0}\n", t.team_size));
    if let Some(deadline) = t.reg_deadline {
        report.push_str(&format!(
            "Registration deadline: {}\n",
            deadline.format(DATE_FORMAT)
        ));
    }
    if let Some(start) = t.start_date {
        report.push_str(&format!("Starts: {}\n", start.format(DATE_FORMAT)));
    }
    if t.bracket.is_none() {
        let state = if t.can_register() { "open" } else { "closed" };
        report.push_str(&format!("Registration: {}\n", state));
    }
    if let Some(by) = &t.created_by {
        report.push_str(&format!("Created by: {}\n", by));
    }
    report.push_str(&format!(
        "{}\n\n",
        t.description.as_deref().unwrap_or("No description provided.")
    ));

    report.push_str("Teams:\n");
    if t.teams.is_empty() {
        report.push_str("  No teams registered yet.\n");
    }
    for team in &t.teams {
        match &team.captain {
            Some(captain) => report.push_str(&format!(
                "  {:<10} {} (Captain: {})\n",
                team.id, team.name, captain
            )),
            None => report.push_str(&format!("  {:<10} {}\n", team.id, team.name)),
        }
    }
    report.push('\n');

    let Some(bracket) = &t.bracket else {
        report.push_str("Bracket not generated yet.\n");
        return report;
    };

    match bracket {
        Bracket::SingleElimination { rounds } => push_rounds(&mut report, rounds),
        Bracket::DoubleElimination {
            upper,
            lower,
            grand_final,
        } => {
            report.push_str("--- Upper Bracket ---\n");
            push_rounds(&mut report, upper);
            report.push_str("--- Lower Bracket ---\n");
            push_rounds(&mut report, lower);
            report.push_str("--- Grand Final ---\n");
            report.push_str(&match_line(grand_final));
            report.push('\n');
        }
    }

    let pending = bracket.pending_matches();
    if !pending.is_empty() {
        report.push_str("Ready to score:\n");
        for at in pending {
            report.push_str(&format!("  {:<16} ({})\n", format_match_ref(at), at));
        }
        report.push('\n');
    }

    report.push_str(&render_standings(t));
    report
}

/// Standings section only
pub fn render_standings(t: &Tournament) -> String {
    let standings = t.standings();
    if standings.is_empty() {
        return "Standings will be available after the tournament concludes.\n".to_string();
    }
    let mut out = String::from("Standings:\n");
    for s in standings {
        out.push_str(&format!("  {}: {}\n", s.place, s.team_names()));
    }
    out
}

fn push_rounds(report: &mut String, rounds: &[Round]) {
    for round in rounds {
        report.push_str(&format!("[{}]\n", round.title));
        for m in &round.matches {
            report.push_str(&match_line(m));
        }
    }
    report.push('\n');
}

fn match_line(m: &Match) -> String {
    let name = |slot: &Option<bracket_core::TeamRef>| {
        slot.as_ref()
            .map_or("TBD".to_string(), |t| t.name.clone())
    };
    let score = |s: Option<u32>| s.map_or("-".to_string(), |v| v.to_string());
    let marker = |slot: &Option<bracket_core::TeamRef>| {
        let won = slot
            .as_ref()
            .zip(m.winner_id.as_ref())
            .is_some_and(|(t, w)| &t.id == w);
        if won {
            "*"
        } else {
            " "
        }
    };

    format!(
        "  {:<8} {}{:<20} {:>3} - {:<3} {}{}\n",
        m.id,
        marker(&m.team1),
        name(&m.team1),
        score(m.score1),
        score(m.score2),
        marker(&m.team2),
        name(&m.team2)
    )
}

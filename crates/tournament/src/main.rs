//! Tournament CLI
//!
//! Create tournaments, register teams, draw brackets and enter scores.

use anyhow::{anyhow, bail, Context, Result};
use bracket_core::Format;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use tournament::args::{
    flag_value, format_match_ref, parse_datetime, parse_match_ref, parse_number, parse_scores,
    positional,
};
use tournament::{
    load_config, report, Config, Status, Tournament, TournamentError, TournamentFilter,
    TournamentStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Tournament Bracket Tracker");
    println!();
    println!("Usage:");
    println!("  tournament create <name> [--format F] [--max-teams N] [--team-size N]");
    println!("                    [--deadline DATE --start DATE] [--description D] [--by USER]");
    println!("  tournament register <id> <team> [--logo URL] [--captain NAME]");
    println!("  tournament generate <id> [--seed N]");
    println!("  tournament score <id> <section> [round match] <score1> <score2>");
    println!("  tournament show <id>");
    println!("  tournament standings <id>");
    println!("  tournament reset <id>");
    println!("  tournament delete <id>");
    println!("  tournament list [--format F] [--status S] [--search Q] [--by USER]");
    println!();
    println!("Dates: YYYY-MM-DD, \"YYYY-MM-DD HH:MM\" (UTC) or RFC 3339");
    println!();
    println!("Formats:");
    println!("  single        - Single elimination (2+ teams)");
    println!("  double        - Double elimination (4+ teams)");
    println!();
    println!("Sections:");
    println!("  rounds R M    - Single-elimination match M of round R");
    println!("  upper R M     - Upper bracket match");
    println!("  lower R M     - Lower bracket match");
    println!("  grand-final   - Grand final");
    println!();
    println!("Examples:");
    println!("  tournament create \"Spring Cup\" --format double --max-teams 8 \\");
    println!("      --deadline 2026-05-01 --start \"2026-05-03 18:00\"");
    println!("  tournament score 1 upper 1 2 3 1");
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn tournament_id(args: &[String]) -> Result<u64> {
    let raw = args.first().ok_or_else(|| anyhow!("missing tournament id"))?;
    parse_number(raw, "tournament id")
}

fn create(store: &mut TournamentStore, config: &Config, args: &[String]) -> Result<()> {
    let name = positional(args, 0, "tournament name")?;
    let format = match flag_value(args, &["--format", "-f"]) {
        Some(f) => f.parse::<Format>()?,
        None => config.default_format,
    };
    let max_teams = match flag_value(args, &["--max-teams", "-m"]) {
        Some(n) => parse_number(n, "max teams")?,
        None => config.default_max_teams,
    };
    let team_size = flag_value(args, &["--team-size"])
        .map(|n| parse_number::<u32>(n, "team size"))
        .transpose()?;
    let schedule = match (
        flag_value(args, &["--deadline"]),
        flag_value(args, &["--start"]),
    ) {
        (Some(deadline), Some(start)) => Some((parse_datetime(deadline)?, parse_datetime(start)?)),
        (None, None) => None,
        _ => bail!("--deadline and --start must be given together"),
    };

    // a failed command is never saved, so a rejected setting discards the record
    let t = store.create(name, format, max_teams)?;
    apply_settings(t, team_size, schedule)?;

    t.description = flag_value(args, &["--description", "-d"]).map(str::to_string);
    t.created_by = flag_value(args, &["--by"]).map(str::to_string);
    println!("Created tournament #{}: {} ({}, up to {} teams)", t.id, t.name, t.format, t.max_teams);
    Ok(())
}

fn apply_settings(
    t: &mut Tournament,
    team_size: Option<u32>,
    schedule: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> Result<(), TournamentError> {
    if let Some(size) = team_size {
        t.set_team_size(size)?;
    }
    if let Some((deadline, start)) = schedule {
        t.set_schedule(deadline, start)?;
    }
    Ok(())
}

fn register(store: &mut TournamentStore, args: &[String]) -> Result<()> {
    let id = tournament_id(args)?;
    let name = positional(args, 1, "team name")?;
    let logo = flag_value(args, &["--logo"]).map(str::to_string);
    let captain = flag_value(args, &["--captain", "-c"]).map(str::to_string);

    let t = store.get_mut(id)?;
    let team = t.register_team(name, logo, captain)?;
    println!("Registered {} as {}", team.name, team.id);
    Ok(())
}

fn generate(store: &mut TournamentStore, config: &Config, args: &[String]) -> Result<()> {
    let id = tournament_id(args)?;
    let seed = match flag_value(args, &["--seed", "-s"]) {
        Some(s) => Some(parse_number::<u64>(s, "seed")?),
        None => config.seed,
    };

    let t = store.get_mut(id)?;
    match seed {
        Some(seed) => t.generate_bracket(&mut StdRng::seed_from_u64(seed))?,
        None => t.generate_bracket(&mut rand::thread_rng())?,
    };
    println!("Bracket generated for {} teams.", t.teams.len());
    print_pending(t);
    Ok(())
}

fn score(store: &mut TournamentStore, args: &[String]) -> Result<()> {
    let id = tournament_id(args)?;
    let (at, rest) = parse_match_ref(&args[1..])?;
    let (score1, score2) = parse_scores(rest)?;

    let t = store.get_mut(id)?;
    t.report_result(at, score1, score2)
        .with_context(|| format!("could not record {}", at))?;
    println!("Recorded {}: {} - {}", at, score1, score2);
    if t.status() == Status::Completed {
        println!();
        print!("{}", report::render_standings(t));
    } else {
        print_pending(t);
    }
    Ok(())
}

fn print_pending(t: &Tournament) {
    let Some(bracket) = &t.bracket else { return };
    let pending = bracket.pending_matches();
    if pending.is_empty() {
        return;
    }
    println!("Ready to score:");
    for at in pending {
        if let Some(m) = bracket.match_at(at) {
            let names: Vec<_> = m.teams().map(|team| team.name.as_str()).collect();
            println!("  {:<16} {}", format_match_ref(at), names.join(" vs "));
        }
    }
}

fn list(store: &TournamentStore, args: &[String]) -> Result<()> {
    let filter = TournamentFilter {
        search: flag_value(args, &["--search", "-q"]).map(str::to_string),
        format: flag_value(args, &["--format", "-f"])
            .map(str::parse::<Format>)
            .transpose()?,
        status: flag_value(args, &["--status"])
            .map(|s| s.parse::<Status>().map_err(|e| anyhow!(e)))
            .transpose()?,
        created_by: flag_value(args, &["--by"]).map(str::to_string),
    };

    let mut shown = 0;
    for t in store.filter(&filter) {
        println!(
            "#{:<4} {:<24} {:<20} {:>2}/{:<2} {}",
            t.id,
            t.name,
            t.format,
            t.teams.len(),
            t.max_teams,
            t.status()
        );
        shown += 1;
    }
    if shown == 0 {
        println!("No tournaments found.");
    }
    Ok(())
}

/// Run one command. Returns whether the store changed.
fn run(command: &str, args: &[String], store: &mut TournamentStore, config: &Config) -> Result<bool> {
    match command {
        "create" | "new" => create(store, config, args)?,
        "register" | "join" => register(store, args)?,
        "generate" | "draw" => generate(store, config, args)?,
        "score" | "report" => score(store, args)?,
        "show" => {
            print!("{}", report::render(store.get(tournament_id(args)?)?));
            return Ok(false);
        }
        "standings" => {
            print!("{}", report::render_standings(store.get(tournament_id(args)?)?));
            return Ok(false);
        }
        "reset" => {
            let t = store.get_mut(tournament_id(args)?)?;
            t.reset_bracket();
            println!("Bracket reset for {}. Teams kept: {}", t.name, t.teams.len());
        }
        "delete" | "rm" => {
            let t = store.remove(tournament_id(args)?)?;
            println!("Deleted tournament #{}: {}", t.id, t.name);
        }
        "list" | "ls" => {
            list(store, args)?;
            return Ok(false);
        }
        other => bail!("unknown command: {other}"),
    }
    Ok(true)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || matches!(args[1].as_str(), "help" | "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    let config = load_config()?;
    init_tracing(&config);

    let mut store = TournamentStore::load(&config.store_path)?;
    if run(&args[1], &args[2..], &mut store, &config)? {
        store.save(&config.store_path)?;
        info!(path = %config.store_path.display(), "store updated");
    }
    Ok(())
}

//! End-to-end tournament flow through the store, records and reports.

use bracket_core::{Format, Place};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament::args::{parse_match_ref, parse_scores};
use tournament::{report, Status, TournamentError, TournamentFilter, TournamentStore};

fn args(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

/// Score every playable match until the bracket is finished, team1 always winning.
fn play_out(store: &mut TournamentStore, id: u64) -> usize {
    let mut played = 0;
    loop {
        let t = store.get_mut(id).unwrap();
        let Some(at) = t.bracket.as_ref().unwrap().pending_matches().first().copied() else {
            return played;
        };
        t.report_result(at, 2, 1).unwrap();
        played += 1;
    }
}

#[test]
fn test_double_elimination_tournament_end_to_end() {
    let mut store = TournamentStore::new();
    let id = {
        let t = store.create("Summer Major", Format::DoubleElimination, 8).unwrap();
        t.created_by = Some("organiser".into());
        for name in ["Red", "Blue", "Green", "Gold", "Silver", "Black"] {
            t.register_team(name, None, Some(format!("{name} captain"))).unwrap();
        }
        t.id
    };

    store
        .get_mut(id)
        .unwrap()
        .generate_bracket(&mut StdRng::seed_from_u64(2024))
        .unwrap();
    assert_eq!(store.get(id).unwrap().status(), Status::Ongoing);

    let played = play_out(&mut store, id);
    assert_eq!(played, 2 * 6 - 2);

    let t = store.get(id).unwrap();
    assert_eq!(t.status(), Status::Completed);
    let standings = t.standings();
    let places: Vec<_> = standings.iter().map(|s| s.place).collect();
    assert_eq!(places, vec![Place::First, Place::Second, Place::Third]);

    let champion = t.bracket.as_ref().unwrap().champion().unwrap().name.clone();
    let text = report::render(t);
    assert!(text.contains(&format!("1st Place: {champion}")));
    assert!(text.contains("Created by: organiser"));
}

#[test]
fn test_single_elimination_via_cli_arguments() {
    let mut store = TournamentStore::new();
    let id = {
        let t = store.create("Club Night", Format::SingleElimination, 4).unwrap();
        for name in ["North", "South", "East", "West"] {
            t.register_team(name, None, None).unwrap();
        }
        t.generate_bracket(&mut StdRng::seed_from_u64(11)).unwrap();
        t.id
    };

    for line in ["rounds 1 1 3 0", "rounds 1 2 1 2", "rounds 2 1 4 4"] {
        let a = args(line);
        let (at, rest) = parse_match_ref(&a).unwrap();
        let (s1, s2) = parse_scores(rest).unwrap();
        let result = store.get_mut(id).unwrap().report_result(at, s1, s2);
        if s1 == s2 {
            assert!(matches!(result, Err(TournamentError::Bracket(_))));
        } else {
            result.unwrap();
        }
    }
    assert_eq!(store.get(id).unwrap().status(), Status::Ongoing);

    let a = args("rounds 2 1 1 0");
    let (at, rest) = parse_match_ref(&a).unwrap();
    let (s1, s2) = parse_scores(rest).unwrap();
    store.get_mut(id).unwrap().report_result(at, s1, s2).unwrap();

    let t = store.get(id).unwrap();
    assert_eq!(t.status(), Status::Completed);
    let standings = t.standings();
    assert_eq!(standings.len(), 3);
    assert_eq!(standings[2].place, Place::ThirdFourth);
    assert_eq!(standings[2].teams.len(), 2);
}

#[test]
fn test_store_persists_progress() {
    let path = std::env::temp_dir().join("tournament_flow_test_persist.json");
    let _ = std::fs::remove_file(&path);

    let mut store = TournamentStore::load(&path).unwrap();
    let id = {
        let t = store.create("Persisted Cup", Format::DoubleElimination, 4).unwrap();
        for name in ["A", "B", "C", "D"] {
            t.register_team(name, None, None).unwrap();
        }
        t.generate_bracket(&mut StdRng::seed_from_u64(3)).unwrap();
        t.id
    };
    let first = store.get(id).unwrap().bracket.as_ref().unwrap().pending_matches()[0];
    store.get_mut(id).unwrap().report_result(first, 5, 2).unwrap();
    store.save(&path).unwrap();

    let mut reloaded = TournamentStore::load(&path).unwrap();
    let before = store.get(id).unwrap().bracket.clone();
    assert_eq!(reloaded.get(id).unwrap().bracket, before);

    let remaining = play_out(&mut reloaded, id);
    assert_eq!(remaining, 5);
    assert_eq!(reloaded.get(id).unwrap().status(), Status::Completed);

    let completed = TournamentFilter {
        status: Some(Status::Completed),
        ..Default::default()
    };
    assert_eq!(reloaded.filter(&completed).count(), 1);

    reloaded.get_mut(id).unwrap().reset_bracket();
    assert_eq!(reloaded.get(id).unwrap().status(), Status::Registration);

    let _ = std::fs::remove_file(&path);
}

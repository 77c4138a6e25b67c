use super::*;
use crate::builder::build_bracket_seeded;
use crate::error::ResultIssue;
use crate::types::{Format, Match};

fn teams(n: usize) -> Vec<TeamRef> {
    (0..n)
        .map(|i| TeamRef::new(format!("t{i}"), format!("Team {i}")))
        .collect()
}

fn slot_id(m: &Match, slot: Slot) -> Option<&str> {
    m.team(slot).map(|t| t.id.as_str())
}

fn at(bracket: &Bracket, at: MatchRef) -> &Match {
    bracket.match_at(at).expect("match exists")
}

/// Ids of (team1, team2) of a match.
fn pair(bracket: &Bracket, r: MatchRef) -> (String, String) {
    let m = at(bracket, r);
    (
        m.team1.as_ref().expect("team1").id.clone(),
        m.team2.as_ref().expect("team2").id.clone(),
    )
}

#[test]
fn test_four_team_double_elimination_walkthrough() {
    let mut bracket = build_bracket_seeded(&teams(4), Format::DoubleElimination, 11).unwrap();
    let (a, b) = pair(&bracket, MatchRef::upper(0, 0));
    let (c, d) = pair(&bracket, MatchRef::upper(0, 1));

    bracket.apply_result(MatchRef::upper(0, 0), 2, 0).unwrap();
    bracket.apply_result(MatchRef::upper(0, 1), 2, 0).unwrap();

    let upper_final = at(&bracket, MatchRef::upper(1, 0));
    assert_eq!(slot_id(upper_final, Slot::Team1), Some(a.as_str()));
    assert_eq!(slot_id(upper_final, Slot::Team2), Some(c.as_str()));

    let seed = at(&bracket, MatchRef::lower(0, 0));
    assert_eq!(slot_id(seed, Slot::Team1), Some(b.as_str()));
    assert_eq!(slot_id(seed, Slot::Team2), Some(d.as_str()));

    bracket.apply_result(MatchRef::lower(0, 0), 2, 1).unwrap();
    let lower_final = at(&bracket, MatchRef::lower(1, 0));
    assert_eq!(slot_id(lower_final, Slot::Team1), Some(b.as_str()));
    assert_eq!(lower_final.team2, None);

    bracket.apply_result(MatchRef::upper(1, 0), 3, 1).unwrap();
    let lower_final = at(&bracket, MatchRef::lower(1, 0));
    assert_eq!(slot_id(lower_final, Slot::Team2), Some(c.as_str()));
    let gf = at(&bracket, MatchRef::GrandFinal);
    assert_eq!(slot_id(gf, Slot::Team1), Some(a.as_str()));
    assert_eq!(gf.team2, None);

    bracket.apply_result(MatchRef::lower(1, 0), 2, 0).unwrap();
    let gf = at(&bracket, MatchRef::GrandFinal);
    assert_eq!(slot_id(gf, Slot::Team2), Some(b.as_str()));

    bracket.apply_result(MatchRef::GrandFinal, 1, 3).unwrap();
    assert!(bracket.is_complete());
    assert_eq!(bracket.champion().map(|t| t.id.as_str()), Some(b.as_str()));
    assert!(bracket.pending_matches().is_empty());
}

#[test]
fn test_single_elimination_winner_slots() {
    let mut bracket = build_bracket_seeded(&teams(8), Format::SingleElimination, 3).unwrap();
    let mut winners = Vec::new();
    for i in 0..4 {
        let (t1, t2) = pair(&bracket, MatchRef::rounds(0, i));
        // Alternate which side wins.
        if i % 2 == 0 {
            bracket.apply_result(MatchRef::rounds(0, i), 1, 0).unwrap();
            winners.push(t1);
        } else {
            bracket.apply_result(MatchRef::rounds(0, i), 0, 1).unwrap();
            winners.push(t2);
        }
    }

    assert_eq!(pair(&bracket, MatchRef::rounds(1, 0)), (winners[0].clone(), winners[1].clone()));
    assert_eq!(pair(&bracket, MatchRef::rounds(1, 1)), (winners[2].clone(), winners[3].clone()));
    assert!(at(&bracket, MatchRef::rounds(2, 0)).team1.is_none());

    bracket.apply_result(MatchRef::rounds(1, 1), 4, 2).unwrap();
    let last = at(&bracket, MatchRef::rounds(2, 0));
    assert_eq!(last.team1, None);
    assert_eq!(slot_id(last, Slot::Team2), Some(winners[2].as_str()));
}

#[test]
fn test_rejects_invalid_results() {
    let mut bracket = build_bracket_seeded(&teams(5), Format::SingleElimination, 9).unwrap();

    // Round 1 match 0 is a bye and decided at build.
    let err = bracket.apply_result(MatchRef::rounds(0, 0), 1, 0).unwrap_err();
    assert_eq!(
        err,
        BracketError::InvalidResult {
            at: MatchRef::rounds(0, 0),
            reason: ResultIssue::AlreadyDecided,
        }
    );

    let err = bracket.apply_result(MatchRef::rounds(0, 3), 2, 2).unwrap_err();
    assert!(matches!(
        err,
        BracketError::InvalidResult { reason: ResultIssue::TiedScore, .. }
    ));

    // Finals has no teams yet.
    let err = bracket.apply_result(MatchRef::rounds(2, 0), 2, 1).unwrap_err();
    assert!(matches!(
        err,
        BracketError::InvalidResult { reason: ResultIssue::MissingTeam, .. }
    ));

    bracket.apply_result(MatchRef::rounds(0, 3), 2, 1).unwrap();
    let err = bracket.apply_result(MatchRef::rounds(0, 3), 2, 1).unwrap_err();
    assert!(matches!(
        err,
        BracketError::InvalidResult { reason: ResultIssue::AlreadyDecided, .. }
    ));
}

#[test]
fn test_invalid_match_reference() {
    let mut single = build_bracket_seeded(&teams(4), Format::SingleElimination, 1).unwrap();
    for bad in [
        MatchRef::upper(0, 0),
        MatchRef::lower(0, 0),
        MatchRef::GrandFinal,
        MatchRef::rounds(0, 2),
        MatchRef::rounds(2, 0),
    ] {
        assert_eq!(
            single.apply_result(bad, 1, 0),
            Err(BracketError::InvalidMatchReference { at: bad })
        );
    }

    let mut double = build_bracket_seeded(&teams(4), Format::DoubleElimination, 1).unwrap();
    for bad in [MatchRef::rounds(0, 0), MatchRef::lower(2, 0), MatchRef::upper(0, 5)] {
        assert_eq!(
            double.apply_result(bad, 1, 0),
            Err(BracketError::InvalidMatchReference { at: bad })
        );
    }
}

#[test]
fn test_failed_result_leaves_bracket_untouched() {
    let mut bracket = build_bracket_seeded(&teams(8), Format::DoubleElimination, 5).unwrap();
    let before = bracket.clone();

    assert!(bracket.apply_result(MatchRef::upper(0, 0), 3, 3).is_err());
    assert!(bracket.apply_result(MatchRef::upper(1, 0), 3, 1).is_err());
    assert!(bracket.apply_result(MatchRef::upper(9, 0), 3, 1).is_err());
    assert_eq!(bracket, before);
}

#[test]
fn test_upper_round_one_losers_pair_in_seed_round() {
    let mut bracket = build_bracket_seeded(&teams(8), Format::DoubleElimination, 21).unwrap();
    let mut losers = Vec::new();
    for i in 0..4 {
        let (_, t2) = pair(&bracket, MatchRef::upper(0, i));
        bracket.apply_result(MatchRef::upper(0, i), 2, 0).unwrap();
        losers.push(t2);
    }

    assert_eq!(pair(&bracket, MatchRef::lower(0, 0)), (losers[0].clone(), losers[1].clone()));
    assert_eq!(pair(&bracket, MatchRef::lower(0, 1)), (losers[2].clone(), losers[3].clone()));
}

#[test]
fn test_later_upper_losers_drop_at_same_index() {
    let mut bracket = build_bracket_seeded(&teams(8), Format::DoubleElimination, 21).unwrap();
    for i in 0..4 {
        bracket.apply_result(MatchRef::upper(0, i), 2, 0).unwrap();
    }

    let (first_loser, _) = pair(&bracket, MatchRef::upper(1, 0));
    let (second_loser, _) = pair(&bracket, MatchRef::upper(1, 1));
    bracket.apply_result(MatchRef::upper(1, 0), 0, 2).unwrap();
    bracket.apply_result(MatchRef::upper(1, 1), 0, 2).unwrap();

    let drop0 = at(&bracket, MatchRef::lower(1, 0));
    let drop1 = at(&bracket, MatchRef::lower(1, 1));
    assert_eq!(slot_id(drop0, Slot::Team2), Some(first_loser.as_str()));
    assert_eq!(slot_id(drop1, Slot::Team2), Some(second_loser.as_str()));
    assert_eq!(drop0.team1, None);
    assert_eq!(drop1.team1, None);

    // Upper final loser lands in the last lower round.
    let (_, upper_final_loser) = pair(&bracket, MatchRef::upper(2, 0));
    bracket.apply_result(MatchRef::upper(2, 0), 5, 1).unwrap();
    let lower_final = at(&bracket, MatchRef::lower(3, 0));
    assert_eq!(slot_id(lower_final, Slot::Team2), Some(upper_final_loser.as_str()));
}

#[test]
fn test_lower_winners_fill_drop_then_consolidate() {
    let mut bracket = build_bracket_seeded(&teams(8), Format::DoubleElimination, 2).unwrap();
    for i in 0..4 {
        bracket.apply_result(MatchRef::upper(0, i), 2, 0).unwrap();
    }

    let (seed0_winner, _) = pair(&bracket, MatchRef::lower(0, 0));
    let (_, seed1_winner) = pair(&bracket, MatchRef::lower(0, 1));
    bracket.apply_result(MatchRef::lower(0, 0), 2, 1).unwrap();
    bracket.apply_result(MatchRef::lower(0, 1), 1, 2).unwrap();

    // Seed winners take the top slot of the drop round at the same index.
    assert_eq!(slot_id(at(&bracket, MatchRef::lower(1, 0)), Slot::Team1), Some(seed0_winner.as_str()));
    assert_eq!(slot_id(at(&bracket, MatchRef::lower(1, 1)), Slot::Team1), Some(seed1_winner.as_str()));

    bracket.apply_result(MatchRef::upper(1, 0), 2, 0).unwrap();
    bracket.apply_result(MatchRef::upper(1, 1), 2, 0).unwrap();
    bracket.apply_result(MatchRef::lower(1, 0), 3, 0).unwrap();
    bracket.apply_result(MatchRef::lower(1, 1), 0, 3).unwrap();

    let (_, drop1_dropped) = pair(&bracket, MatchRef::lower(1, 1));
    let advance = at(&bracket, MatchRef::lower(2, 0));
    assert_eq!(slot_id(advance, Slot::Team1), Some(seed0_winner.as_str()));
    assert_eq!(slot_id(advance, Slot::Team2), Some(drop1_dropped.as_str()));
}

#[test]
fn test_upper_byes_never_enter_lower_bracket() {
    // 6 teams: upper round 1 matches 0 and 1 are byes.
    let mut bracket = build_bracket_seeded(&teams(6), Format::DoubleElimination, 4).unwrap();
    let seed0 = at(&bracket, MatchRef::lower(0, 0));
    assert!(seed0.team1.is_none() && seed0.team2.is_none());

    bracket.apply_result(MatchRef::upper(0, 2), 1, 0).unwrap();
    bracket.apply_result(MatchRef::upper(0, 3), 1, 0).unwrap();
    assert!(at(&bracket, MatchRef::lower(0, 1)).is_playable());
    let seed0 = at(&bracket, MatchRef::lower(0, 0));
    assert!(seed0.team1.is_none() && seed0.team2.is_none());
}

#[test]
fn test_walkover_when_seed_match_is_empty() {
    let mut bracket = build_bracket_seeded(&teams(6), Format::DoubleElimination, 4).unwrap();
    let (_, dropped) = pair(&bracket, MatchRef::upper(1, 0));
    bracket.apply_result(MatchRef::upper(1, 0), 1, 0).unwrap();

    let drop0 = at(&bracket, MatchRef::lower(1, 0));
    assert!(drop0.is_decided());
    assert!(drop0.team1.as_ref().is_some_and(TeamRef::is_bye));
    assert_eq!(drop0.winner_id.as_deref(), Some(dropped.as_str()));
    assert_eq!(
        slot_id(at(&bracket, MatchRef::lower(2, 0)), Slot::Team1),
        Some(dropped.as_str())
    );
}

#[test]
fn test_walkover_when_one_seed_feeder_is_a_bye() {
    // 5 teams: only upper round 1 match 3 has two real teams.
    let mut bracket = build_bracket_seeded(&teams(5), Format::DoubleElimination, 8).unwrap();
    let (_, loser) = pair(&bracket, MatchRef::upper(0, 3));
    bracket.apply_result(MatchRef::upper(0, 3), 4, 0).unwrap();

    let seed1 = at(&bracket, MatchRef::lower(0, 1));
    assert!(seed1.is_decided());
    assert_eq!(seed1.winner_id.as_deref(), Some(loser.as_str()));
    assert_eq!(
        slot_id(at(&bracket, MatchRef::lower(1, 1)), Slot::Team1),
        Some(loser.as_str())
    );
    assert!(!at(&bracket, MatchRef::lower(1, 1)).is_decided());
}

#[test]
fn test_free_function_matches_method() {
    let mut via_fn = build_bracket_seeded(&teams(4), Format::SingleElimination, 6).unwrap();
    let mut via_method = via_fn.clone();
    apply_result(&mut via_fn, MatchRef::rounds(0, 1), 3, 1).unwrap();
    via_method.apply_result(MatchRef::rounds(0, 1), 3, 1).unwrap();
    assert_eq!(via_fn, via_method);
}

//! BDD scenarios for the ranking engine and season windows.

use chrono::{DateTime, TimeZone, Utc};
use seasonboard_core::{
    current_season, find_season, missions_in_season, rank, Aggregator, Completion, Mission,
    MissionId, MissionRef, RankedSolver, Season, SeasonAddressing, SeasonId, SeasonPartitioner,
    TP_TEAM,
};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn team(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn season(id: u64, name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Season {
    Season {
        id: SeasonId(id),
        name: name.into(),
        start,
        end,
        missions_start: at(2023, 1, 1),
        missions_end: at(2023, 6, 30),
        whitelist: Default::default(),
        notes: None,
    }
}

#[test]
fn bdd_scenario_team_and_efm_completions_rank_lead_first() {
    // GIVEN a two-person completion of mission 1 and an unassisted run of mission 2
    let completions = vec![
        Completion::new(1, team(&["A", "B"]), MissionRef::new(1)),
        Completion::new(2, team(&["A"]), MissionRef::new(2)),
    ];

    // WHEN the completions are ranked
    let ranking = rank(&completions);

    // THEN A has two distinct clears, one as defuser and one as EFM
    assert_eq!(
        ranking.entries[0],
        RankedSolver {
            name: "A".into(),
            distinct: 2,
            defuser: 1,
            expert: 0,
            efm: 1
        }
    );
    // AND B has one clear as expert
    assert_eq!(
        ranking.entries[1],
        RankedSolver {
            name: "B".into(),
            distinct: 1,
            defuser: 0,
            expert: 1,
            efm: 0
        }
    );
    assert_eq!(ranking.len(), 2);
}

#[test]
fn bdd_scenario_variant_missions_count_once() {
    // GIVEN two missions sharing variant 5, each cleared once by C
    let completions = vec![
        Completion::new(1, team(&["C"]), MissionRef::new(10).with_variant(5)),
        Completion::new(2, team(&["C"]), MissionRef::new(11).with_variant(5)),
    ];

    // WHEN ranked
    let ranking = rank(&completions);

    // THEN C has a single distinct clear
    assert_eq!(ranking.get("C").unwrap().distinct, 1);
}

#[test]
fn bdd_scenario_whitelisted_mission_joins_season() {
    // GIVEN a season whose mission window is the first half of 2023, whitelisting 99
    let mut s = season(1, "S1", at(2023, 1, 1), at(2023, 12, 31));
    s.whitelist.insert(MissionId(99));

    // AND mission 99 was added in 2022
    let missions = vec![
        Mission::new(99, "Backdated", at(2022, 1, 1)),
        Mission::new(5, "In window", at(2023, 3, 1)),
        Mission::new(6, "Outside", at(2023, 9, 1)),
    ];

    // WHEN the season's missions are listed
    let ids = missions_in_season(&missions, &s);

    // THEN mission 99 is included, first because it is oldest
    assert_eq!(ids, vec![MissionId(99), MissionId(5)]);
}

#[test]
fn bdd_scenario_overlapping_seasons_resolve_to_newest() {
    // GIVEN seasons 3 and 7 that both run today
    let now = at(2023, 5, 1);
    let seasons = vec![
        season(3, "Old", at(2023, 1, 1), at(2023, 12, 31)),
        season(7, "New", at(2023, 4, 1), at(2023, 6, 1)),
    ];

    // WHEN the current season is resolved
    let current = current_season(&seasons, now).unwrap();

    // THEN the newer season wins
    assert_eq!(current.id, SeasonId(7));
}

#[test]
fn bdd_scenario_unknown_season_is_not_found() {
    // GIVEN one season
    let seasons = vec![season(1, "S1", at(2023, 1, 1), at(2023, 12, 31))];

    // WHEN an unknown season is requested
    let err = find_season(&seasons, "Nope").unwrap_err();

    // THEN the lookup fails instead of yielding an empty leaderboard
    assert!(err.is_not_found());
}

#[test]
fn bdd_scenario_season_leaderboard_excludes_other_completions() {
    // GIVEN one mission inside and one outside the season window
    let missions = vec![
        Mission::new(1, "Inside", at(2023, 2, 1)),
        Mission::new(2, "Outside", at(2023, 8, 1)),
    ];
    let s = season(1, "S1", at(2023, 1, 1), at(2023, 12, 31));

    // AND completions of both, plus a placeholder test run and an unverified run
    let completions = vec![
        Completion::new(1, team(&["A", "B"]), MissionRef::new(1)),
        Completion::new(2, team(&["Z"]), MissionRef::new(2)),
        Completion::new(3, team(&["A", TP_TEAM]), MissionRef::new(1)),
        Completion::new(4, team(&["Q"]), MissionRef::new(1)).verified(false),
    ];

    // WHEN the season leaderboard is built by mission eligibility
    let partitioner = SeasonPartitioner::new(&missions, SeasonAddressing::Derived);
    let ranking = partitioner.leaderboard(&Aggregator::default(), &s, &completions);

    // THEN only A and B appear
    let names: Vec<&str> = ranking.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(ranking.report.placeholder, 1);
    assert_eq!(ranking.report.unverified, 1);
}

#[test]
fn bdd_scenario_malformed_completion_does_not_poison_board() {
    // GIVEN a valid completion and one with an empty team
    let completions = vec![
        Completion::new(1, team(&["A"]), MissionRef::new(1)).solo(true),
        Completion::new(2, vec![], MissionRef::new(2)),
    ];

    // WHEN ranked
    let ranking = rank(&completions);

    // THEN the valid completion is scored (solo run counts as defuser)
    assert_eq!(ranking.get("A").unwrap().defuser, 1);
    // AND the malformed one is reported
    assert_eq!(ranking.report.rejected.len(), 1);
    assert!(ranking.report.rejected[0].error.contains("empty team"));
}

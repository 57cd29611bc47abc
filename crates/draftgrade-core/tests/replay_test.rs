// Integration tests for draft grading.
//
// These drive the public API end to end: loading the fixture files (which
// carry stray NUL bytes), building the position index, replaying the draft
// and rendering the report.

use std::path::{Path, PathBuf};

use draftgrade_core::grade_files;
use draftgrade_core::index::PositionIndex;
use draftgrade_core::input::picks::load_picks;
use draftgrade_core::input::players::load_players;
use draftgrade_core::position::PositionOrder;
use draftgrade_core::replay::{replay, DraftReplay, PickOutcome, ProjectionLookup, SkipReason};
use draftgrade_core::report::{write_report, OutputFormat, ReportOptions};

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn fixture_index() -> PositionIndex {
    let order = PositionOrder::default();
    let players = load_players(&fixture("player_stats.tsv"), &order).expect("players should load");
    PositionIndex::build(players, &order)
}

fn render(options: &ReportOptions) -> String {
    let report = grade_files(
        &fixture("player_stats.tsv"),
        &fixture("draftresults.csv"),
        &PositionOrder::default(),
    )
    .expect("fixtures should grade");
    let mut out = Vec::new();
    write_report(&mut out, &report, options).expect("report should render");
    String::from_utf8(out).expect("report is UTF-8")
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn fixture_index_groups_and_sorts() {
    let index = fixture_index();
    assert_eq!(index.len(), 9);
    assert_eq!(index.positions(), &["TE", "RB", "WR", "QB"]);

    let rb: Vec<&str> = index
        .bucket("RB")
        .iter()
        .map(|p| p.full_name.as_str())
        .collect();
    assert_eq!(rb, vec!["Christian McCaffrey", "Bijan Robinson", "Breece Hall"]);

    // "QB,TE" resolves to TE, which precedes QB in the canonical order.
    let te: Vec<&str> = index
        .bucket("TE")
        .iter()
        .map(|p| p.full_name.as_str())
        .collect();
    assert_eq!(te, vec!["Travis Kelce", "Taysom Hill"]);
}

#[test]
fn draft_file_with_nul_bytes_loads_in_order() {
    let picks = load_picks(&fixture("draftresults.csv"), &PositionOrder::default())
        .expect("picks should load");
    assert_eq!(picks.len(), 9);
    let numbers: Vec<u32> = picks.iter().map(|p| p.pick).collect();
    assert_eq!(numbers, (1..=9).collect::<Vec<_>>());
    assert_eq!(picks[7].position, "TE");
    assert_eq!(picks[8].round, 3);
}

// ===========================================================================
// Replay
// ===========================================================================

#[test]
fn text_report_matches_expected_output() {
    let expected = std::fs::read_to_string(fixture("expected_report.txt")).unwrap();
    assert_eq!(render(&ReportOptions::default()), expected);
}

#[test]
fn replay_statistics_account_for_every_pick() {
    let order = PositionOrder::default();
    let picks = load_picks(&fixture("draftresults.csv"), &order).unwrap();
    let report = replay(fixture_index(), &picks);

    assert_eq!(report.stats.scored, 8);
    assert_eq!(report.stats.skipped_empty_pool, 1);
    assert_eq!(report.stats.scored + report.stats.skipped_empty_pool, picks.len());
    assert_eq!(report.stats.missing_projections, 1);
    assert_eq!(report.stats.best_picks, 5);
    assert_eq!(report.stats.best_picks_without_runner_up, 2);

    assert!(approx_eq(report.ratings.get("Alice").unwrap(), 75.0));
    assert!(approx_eq(report.ratings.get("Bob").unwrap(), -319.5));
    assert!(approx_eq(report.ratings.get("Carol").unwrap(), 15.0));
}

#[test]
fn manager_totals_equal_sum_of_their_comparisons() {
    let order = PositionOrder::default();
    let picks = load_picks(&fixture("draftresults.csv"), &order).unwrap();
    let report = replay(fixture_index(), &picks);

    for (manager, total) in report.ratings.iter() {
        let sum: f64 = report
            .comparisons
            .iter()
            .filter(|c| c.manager == manager)
            .map(|c| c.point_difference)
            .sum();
        assert!(approx_eq(total, sum), "{manager}: {total} != {sum}");
    }
}

#[test]
fn replay_is_repeatable_on_fresh_index() {
    let order = PositionOrder::default();
    let picks = load_picks(&fixture("draftresults.csv"), &order).unwrap();
    let index = fixture_index();

    let first = replay(index.clone(), &picks);
    let second = replay(index, &picks);
    assert_eq!(first, second);
}

#[test]
fn case_mismatch_finds_points_but_keeps_player_available() {
    let order = PositionOrder::default();
    let picks = load_picks(&fixture("draftresults.csv"), &order).unwrap();
    let mut engine = DraftReplay::new(fixture_index());

    engine.apply(&picks[0]);
    engine.apply(&picks[1]);
    let outcome = engine.apply(&picks[2]);
    match outcome {
        PickOutcome::Scored(c) => {
            assert_eq!(c.player, "christian mccaffrey");
            assert_eq!(c.picked, ProjectionLookup::Found(300.0));
            assert!(!c.was_best_pick);
            assert!(approx_eq(c.point_difference, 0.0));
        }
        other => panic!("expected a scored pick, got {other:?}"),
    }
    // Availability is keyed on the exact name, so the player stays on the board.
    assert_eq!(
        engine.remaining().best("RB").map(|p| p.full_name.as_str()),
        Some("Christian McCaffrey")
    );
}

#[test]
fn pick_at_position_with_no_players_is_skipped() {
    let order = PositionOrder::default();
    let picks = load_picks(&fixture("draftresults.csv"), &order).unwrap();
    let mut engine = DraftReplay::new(fixture_index());

    let kicker = picks.iter().find(|p| p.position == "K").unwrap();
    assert_eq!(
        engine.apply(kicker),
        PickOutcome::Skipped(SkipReason::EmptyPositionPool)
    );
    assert!(engine.ratings().get("Alice").is_none());
}

// ===========================================================================
// Output
// ===========================================================================

#[test]
fn json_report_carries_all_sections() {
    let options = ReportOptions {
        format: OutputFormat::Json,
        summary: true,
    };
    let text = render(&options);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["comparisons"].as_array().unwrap().len(), 8);
    assert_eq!(value["ratings"].as_array().unwrap().len(), 3);
    assert_eq!(value["ratings"][1]["manager"], "Bob");
    assert_eq!(value["stats"]["skipped_empty_pool"], 1);
    assert_eq!(value["comparisons"][4]["picked"]["kind"], "missing");
}

#[test]
fn malformed_player_file_aborts() {
    let tmp = std::env::temp_dir().join("draftgrade_integration_malformed");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();
    let players = tmp.join("players.tsv");
    std::fs::write(
        &players,
        "player_key\tfull_name\tposition\tteam\tpoints\nk1\tJosh Allen\tQB\tBuf\n",
    )
    .unwrap();

    let result = grade_files(&players, &fixture("draftresults.csv"), &PositionOrder::default());
    assert!(result.is_err());

    let _ = std::fs::remove_dir_all(&tmp);
}

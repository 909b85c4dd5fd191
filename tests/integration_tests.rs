// Integration tests for the skater comparison tool.
//
// These tests exercise the full system end-to-end using the library crate's
// public API: dataset loading from the shipped season file, the comparison
// session (lookup, normalization, slot management), dictionary expansion
// through the derived view, and the suggestion dropdown.

use std::path::Path;

use skater_compare::compare::CompareSession;
use skater_compare::config::{NormalizationConfig, PlusMinusRange};
use skater_compare::dataset::{Dataset, Stat};
use skater_compare::dictionary::Dictionaries;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Path to the shipped season dataset (cargo test runs from the crate root).
const SEASON_CSV: &str = "data/regular-season-skaters.csv";

/// The default normalization caps -- single source of truth for these tests.
fn normalization() -> NormalizationConfig {
    NormalizationConfig {
        radar_max: 130.0,
        points: 130.0,
        goals: 60.0,
        assists: 90.0,
        points_per_game: 2.0,
        even_strength_points: 90.0,
        power_play_points: 50.0,
        penalty_minutes: 70.0,
        plus_minus: PlusMinusRange {
            min: -40.0,
            max: 40.0,
        },
    }
}

/// The shipped dictionaries, parsed straight from defaults/.
fn dictionaries() -> Dictionaries {
    let text = std::fs::read_to_string("defaults/dictionaries.toml")
        .expect("defaults/dictionaries.toml should exist");
    toml::from_str(&text).expect("dictionaries.toml should parse")
}

/// Build a session over the shipped season dataset.
fn season_session() -> CompareSession {
    let dataset = Dataset::from_path(Path::new(SEASON_CSV)).expect("season CSV should load");
    CompareSession::new(dataset, normalization(), dictionaries(), 100)
}

// ===========================================================================
// Dataset loading
// ===========================================================================

#[test]
fn season_dataset_loads_with_all_rows() {
    let dataset = Dataset::from_path(Path::new(SEASON_CSV)).unwrap();
    assert_eq!(dataset.len(), 35);
    // Dataset order is scoring order; the leader comes first.
    assert_eq!(dataset.records()[0].name, "Nikita Kucherov");
}

#[test]
fn season_lookup_is_case_insensitive() {
    let dataset = Dataset::from_path(Path::new(SEASON_CSV)).unwrap();
    let lower = dataset.lookup("sidney crosby").expect("lowercase lookup");
    let exact = dataset.lookup("Sidney Crosby").expect("exact lookup");
    assert_eq!(lower.name, exact.name);
    assert_eq!(lower.team, "PIT");
}

#[test]
fn season_lookup_not_found_is_none() {
    let dataset = Dataset::from_path(Path::new(SEASON_CSV)).unwrap();
    assert!(dataset.lookup("").is_none());
    assert!(dataset.lookup("nonexistent player").is_none());
}

// ===========================================================================
// Session: startup and derivation
// ===========================================================================

#[test]
fn session_autofills_top_two_scorers() {
    let session = season_session();
    assert_eq!(session.selection.name(1), Some("Nikita Kucherov"));
    assert_eq!(session.selection.name(2), Some("Nathan MacKinnon"));

    let view = session.derive();
    assert_eq!(view.slots.len(), 2);
    assert_eq!(view.slots[0].player_name, "Nikita Kucherov");
}

#[test]
fn derived_radar_values_follow_the_caps() {
    let mut session = season_session();
    session.selection.set_name(1, "Nathan MacKinnon");
    let view = session.derive();
    let mackinnon = &view.slots[0];

    // 140 points exceeds the 130 cap and clamps to the full radius.
    assert!((mackinnon.radar[0] - 130.0).abs() < 1e-9);
    // Goals: 51 of a 60 cap.
    assert!((mackinnon.radar[1] - 51.0 / 60.0 * 130.0).abs() < 1e-9);
    // Plus/Minus: +35 in the -40..+40 domain.
    assert!((mackinnon.radar[3] - (35.0 + 40.0) / 80.0 * 130.0).abs() < 1e-9);

    for v in mackinnon.radar {
        assert!((0.0..=130.0).contains(&v));
    }
}

#[test]
fn unresolved_slot_is_omitted_never_fatal() {
    let mut session = season_session();
    session.selection.set_name(2, "No Such Skater");
    let view = session.derive();
    assert_eq!(view.slots.len(), 1);
    assert_eq!(view.slots[0].number, 1);
}

#[test]
fn dictionary_expansion_flows_into_the_view() {
    let mut session = season_session();
    session.selection.set_name(1, "Sam Reinhart");
    let view = session.derive();
    let reinhart = &view.slots[0];

    assert_eq!(reinhart.team, "FLA");
    assert_eq!(reinhart.team_full, "Florida Panthers");
    assert_eq!(reinhart.position, "C/R");
    assert_eq!(reinhart.position_full, "Center, Right Wing");
}

// ===========================================================================
// Session: slot management end to end
// ===========================================================================

#[test]
fn full_add_fill_remove_flow() {
    let mut session = season_session();

    // Grow to four players.
    assert!(session.selection.can_add());
    assert_eq!(session.selection.add_slot(), Some(3));
    assert_eq!(session.selection.add_slot(), Some(4));
    assert_eq!(session.selection.add_slot(), None);
    assert!(!session.selection.can_add());

    session.selection.set_name(3, "sidney crosby");
    session.selection.set_name(4, "Cale Makar");
    let view = session.derive();
    assert_eq!(view.slots.len(), 4);
    assert_eq!(view.slots[2].player_name, "Sidney Crosby");

    // Remove slot 3; slot 4 renumbers down and keeps its player.
    session.selection.remove_slot(3);
    let view = session.derive();
    assert_eq!(view.slots.len(), 3);
    assert_eq!(view.slots[2].number, 3);
    assert_eq!(view.slots[2].player_name, "Cale Makar");
    assert!(session.selection.can_add());

    // Removing a slot that no longer exists is a no-op.
    session.selection.remove_slot(4);
    assert_eq!(session.derive().slots.len(), 3);
}

#[test]
fn stable_ids_survive_renumbering_through_the_view() {
    let mut session = season_session();
    session.selection.add_slot();
    session.selection.add_slot();
    session.selection.set_name(4, "Quinn Hughes");
    let hughes_id = session.selection.id_of(4).unwrap();

    session.selection.remove_slot(3);
    let view = session.derive();
    let hughes = view
        .slots
        .iter()
        .find(|s| s.player_name == "Quinn Hughes")
        .expect("Hughes still resolved");
    assert_eq!(hughes.number, 3);
    assert_eq!(hughes.id, hughes_id);
}

// ===========================================================================
// Suggestions
// ===========================================================================

#[test]
fn suggestions_list_and_filter() {
    let session = season_session();

    let all = session.suggestions("");
    assert_eq!(all.len(), 35);
    assert_eq!(all[0].rank, 1);
    assert_eq!(all[0].name, "Nikita Kucherov");

    let hits = session.suggestions("tkachuk");
    let names: Vec<&str> = hits.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Matthew Tkachuk", "Brady Tkachuk"]);

    assert!(session.suggestions("zamboni driver").is_empty());
}

#[test]
fn suggestions_respect_the_dropdown_limit() {
    let dataset = Dataset::from_path(Path::new(SEASON_CSV)).unwrap();
    let session = CompareSession::new(dataset, normalization(), dictionaries(), 10);
    assert_eq!(session.suggestions("").len(), 10);
    // Players ranked past the limit are not offered.
    assert!(session.suggestions("Connor Bedard").is_empty());
}

// ===========================================================================
// Missing-data handling
// ===========================================================================

#[test]
fn missing_cells_normalize_to_zero_and_stay_in_range() {
    let csv = "\
Player,Team,Pos,GP,P,G,A,+/-,P/GP,EVP,PPP,PIM
Ghost Skater,TOR,C,10,,,,,,,,";
    let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
    let session = CompareSession::new(dataset, normalization(), dictionaries(), 100);

    let view = session.derive();
    assert_eq!(view.slots.len(), 1);
    let ghost = &view.slots[0];

    for (i, stat) in Stat::ALL.iter().enumerate() {
        assert_eq!(ghost.stats.get(*stat), None);
        if *stat == Stat::PlusMinus {
            // Zero +/- sits at the middle of the -40..+40 domain.
            assert!((ghost.radar[i] - 65.0).abs() < 1e-9);
        } else {
            assert!(ghost.radar[i].abs() < 1e-9);
        }
    }
}

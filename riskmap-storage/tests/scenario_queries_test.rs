//! Scenario and selection query tests — uniqueness, replace-all,
//! cascade deletes.

use riskmap_core::types::{CapabilitySelection, ControlSelection};
use riskmap_storage::connection::pragmas::apply_pragmas;
use riskmap_storage::migrations;
use riskmap_storage::queries::scenarios::{self, ScenarioWriteOutcome};
use riskmap_storage::queries::selections;
use rusqlite::Connection;

fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    apply_pragmas(&conn).unwrap();
    migrations::run_migrations(&conn).unwrap();
    conn
}

fn insert(conn: &Connection, user_id: i64, name: &str, is_default: bool) -> i64 {
    match scenarios::insert_scenario(conn, user_id, name, is_default).unwrap() {
        ScenarioWriteOutcome::Ok(id) => id,
        ScenarioWriteOutcome::DuplicateName => panic!("unexpected duplicate for {name}"),
    }
}

#[test]
fn insert_and_get_round_trip() {
    let conn = test_connection();
    let id = insert(&conn, 7, "baseline", true);

    let scenario = scenarios::get_scenario(&conn, id).unwrap().unwrap();
    assert_eq!(scenario.scenario_id, id);
    assert_eq!(scenario.user_id, 7);
    assert_eq!(scenario.scenario_name, "baseline");
    assert!(scenario.is_default);
    assert!(scenario.created_at > 0);

    assert_eq!(scenarios::get_owner(&conn, id).unwrap(), Some(7));
    assert!(scenarios::get_scenario(&conn, 9999).unwrap().is_none());
    assert!(scenarios::get_owner(&conn, 9999).unwrap().is_none());
}

#[test]
fn duplicate_name_is_reported_not_raised() {
    let conn = test_connection();
    insert(&conn, 1, "baseline", false);

    let outcome = scenarios::insert_scenario(&conn, 1, "baseline", false).unwrap();
    assert!(matches!(outcome, ScenarioWriteOutcome::DuplicateName));

    // Same name for a different user is fine.
    let outcome = scenarios::insert_scenario(&conn, 2, "baseline", false).unwrap();
    assert!(matches!(outcome, ScenarioWriteOutcome::Ok(_)));
}

#[test]
fn rename_onto_existing_name_is_a_duplicate() {
    let conn = test_connection();
    insert(&conn, 1, "first", false);
    let second = insert(&conn, 1, "second", false);

    let outcome = scenarios::update_scenario(&conn, second, "first", false).unwrap();
    assert!(matches!(outcome, ScenarioWriteOutcome::DuplicateName));
}

#[test]
fn unset_defaults_clears_only_that_user() {
    let conn = test_connection();
    let a = insert(&conn, 1, "a", true);
    let b = insert(&conn, 2, "b", true);

    let cleared = scenarios::unset_defaults(&conn, 1).unwrap();
    assert_eq!(cleared, 1);

    assert!(!scenarios::get_scenario(&conn, a).unwrap().unwrap().is_default);
    assert!(scenarios::get_scenario(&conn, b).unwrap().unwrap().is_default);
}

#[test]
fn list_orders_default_first_then_recency() {
    let conn = test_connection();
    let a = insert(&conn, 1, "older", false);
    let b = insert(&conn, 1, "newer", false);
    let c = insert(&conn, 1, "the default", true);

    // Force distinct timestamps; unixepoch() has 1s resolution.
    conn.execute(
        "UPDATE capability_scenarios SET updated_at = 100 WHERE scenario_id = ?1",
        [a],
    )
    .unwrap();
    conn.execute(
        "UPDATE capability_scenarios SET updated_at = 200 WHERE scenario_id = ?1",
        [b],
    )
    .unwrap();
    conn.execute(
        "UPDATE capability_scenarios SET updated_at = 50 WHERE scenario_id = ?1",
        [c],
    )
    .unwrap();

    let listed = scenarios::list_by_user(&conn, 1).unwrap();
    let ids: Vec<i64> = listed.iter().map(|s| s.scenario_id).collect();
    assert_eq!(ids, vec![c, b, a]);
}

#[test]
fn replace_all_swaps_the_entire_selection_set() {
    let conn = test_connection();
    let id = insert(&conn, 1, "swap", false);

    let first = vec![CapabilitySelection {
        capability_id: "CAP_A".to_string(),
        is_active: true,
    }];
    assert_eq!(
        selections::replace_capability_selections(&conn, id, &first).unwrap(),
        1
    );

    let second = vec![CapabilitySelection {
        capability_id: "CAP_B".to_string(),
        is_active: true,
    }];
    assert_eq!(
        selections::replace_capability_selections(&conn, id, &second).unwrap(),
        1
    );

    let stored = selections::capability_selections(&conn, id).unwrap();
    assert_eq!(stored, second, "CAP_A must be gone, not merged");
}

#[test]
fn replace_with_empty_list_clears_selections() {
    let conn = test_connection();
    let id = insert(&conn, 1, "clear", false);

    let initial = vec![ControlSelection {
        control_id: "C1".to_string(),
        is_active: true,
    }];
    selections::replace_control_selections(&conn, id, &initial).unwrap();
    selections::replace_control_selections(&conn, id, &[]).unwrap();

    assert!(selections::control_selections(&conn, id).unwrap().is_empty());
}

#[test]
fn inactive_flags_round_trip() {
    let conn = test_connection();
    let id = insert(&conn, 1, "flags", false);

    let saved = vec![
        ControlSelection {
            control_id: "C1".to_string(),
            is_active: true,
        },
        ControlSelection {
            control_id: "C2".to_string(),
            is_active: false,
        },
    ];
    selections::replace_control_selections(&conn, id, &saved).unwrap();

    let mut stored = selections::control_selections(&conn, id).unwrap();
    stored.sort_by(|a, b| a.control_id.cmp(&b.control_id));
    assert_eq!(stored, saved);
}

#[test]
fn deleting_a_scenario_cascades_to_selections() {
    let conn = test_connection();
    let id = insert(&conn, 1, "cascade", false);

    selections::replace_capability_selections(
        &conn,
        id,
        &[CapabilitySelection {
            capability_id: "CAP_A".to_string(),
            is_active: true,
        }],
    )
    .unwrap();
    selections::replace_control_selections(
        &conn,
        id,
        &[ControlSelection {
            control_id: "C1".to_string(),
            is_active: true,
        }],
    )
    .unwrap();

    assert_eq!(scenarios::delete_scenario(&conn, id).unwrap(), 1);

    let cap_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM capability_selections", [], |row| {
            row.get(0)
        })
        .unwrap();
    let ctrl_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM control_selections", [], |row| row.get(0))
        .unwrap();
    assert_eq!(cap_rows, 0);
    assert_eq!(ctrl_rows, 0);
}

#[test]
fn touch_updated_at_bumps_timestamp() {
    let conn = test_connection();
    let id = insert(&conn, 1, "touched", false);

    conn.execute(
        "UPDATE capability_scenarios SET updated_at = 1 WHERE scenario_id = ?1",
        [id],
    )
    .unwrap();
    scenarios::touch_updated_at(&conn, id).unwrap();

    let scenario = scenarios::get_scenario(&conn, id).unwrap().unwrap();
    assert!(scenario.updated_at > 1);
}

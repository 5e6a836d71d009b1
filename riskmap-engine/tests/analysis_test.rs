//! Coverage analyzer tests.
//!
//! Fixture: risks R1 requires {C1,C2}, R2 requires {C3}, R3 requires
//! nothing; capabilities CAP1 -> {C1}, CAP2 -> {C2,C3}.

use std::collections::HashSet;
use std::sync::Arc;

use riskmap_core::errors::StorageError;
use riskmap_engine::analysis::{AnalysisRequest, CoverageAnalyzer};
use riskmap_storage::{DatabaseManager, SqliteMappingStore};

fn fixture() -> CoverageAnalyzer<SqliteMappingStore> {
    let db = Arc::new(DatabaseManager::open_in_memory().unwrap());
    db.with_writer(|conn| {
        conn.execute_batch(
            "
            INSERT INTO risks (risk_id, risk_title, risk_description) VALUES
                ('R1', 'Two-control risk', 'Needs C1 and C2'),
                ('R2', 'One-control risk', 'Needs C3'),
                ('R3', 'Unmapped risk', 'No controls mapped');
            INSERT INTO controls (control_id, control_description) VALUES
                ('C1', 'First control'),
                ('C2', 'Second control'),
                ('C3', 'Third control');
            INSERT INTO capabilities (capability_id, capability_name) VALUES
                ('CAP1', 'Capability One'),
                ('CAP2', 'Capability Two');
            INSERT INTO capability_control_mapping (capability_id, control_id) VALUES
                ('CAP1', 'C1'),
                ('CAP2', 'C2'),
                ('CAP2', 'C3');
            INSERT INTO risk_control_mapping (risk_id, control_id) VALUES
                ('R1', 'C1'),
                ('R1', 'C2'),
                ('R2', 'C3');
            ",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
    })
    .unwrap();

    CoverageAnalyzer::new(SqliteMappingStore::new(db))
}

fn request(capability_ids: &[&str], control_ids: Option<&[&str]>) -> AnalysisRequest {
    AnalysisRequest {
        capability_ids: capability_ids.iter().map(|s| s.to_string()).collect(),
        control_ids: control_ids.map(|ids| ids.iter().map(|s| s.to_string()).collect()),
    }
}

#[test]
fn concrete_scenario_with_cap1_active() {
    let analyzer = fixture();
    let report = analyzer.analyze(&request(&["CAP1"], None)).unwrap();

    assert_eq!(report.total_controls, 3);
    assert_eq!(report.controls_in_capabilities, 3);
    assert_eq!(report.active_controls, 1);
    assert_eq!(report.total_risks, 3);
    assert_eq!(report.active_risks, 0);
    assert_eq!(report.partially_covered_risks, 1);
    assert_eq!(report.exposed_risks, 2);

    // R1 is partial: C1 active of {C1, C2}.
    let partial = &report.partially_covered_risks_list[0];
    assert_eq!(partial.risk_id, "R1");
    assert_eq!(partial.active_controls, vec!["C1"]);
    assert_eq!(partial.inactive_controls, vec!["C2"]);
    assert_eq!(partial.total_controls_required, 2);

    let exposed_ids: HashSet<&str> = report
        .exposed_risks_list
        .iter()
        .map(|e| e.risk_id.as_str())
        .collect();
    assert_eq!(exposed_ids, HashSet::from(["R2", "R3"]));
}

#[test]
fn all_capabilities_cover_every_mapped_risk() {
    let analyzer = fixture();
    let report = analyzer.analyze(&request(&["CAP1", "CAP2"], None)).unwrap();

    assert_eq!(report.active_controls, 3);
    assert_eq!(report.active_risks, 2);
    assert_eq!(report.partially_covered_risks, 0);
    assert_eq!(report.exposed_risks, 1);

    // The unmapped risk stays exposed no matter what is active.
    let exposed = &report.exposed_risks_list[0];
    assert_eq!(exposed.risk_id, "R3");
    assert!(exposed.required_controls.is_empty());
}

#[test]
fn empty_capability_set_exposes_everything() {
    let analyzer = fixture();
    let report = analyzer.analyze(&request(&[], None)).unwrap();

    assert_eq!(report.active_controls, 0);
    assert_eq!(report.active_risks, 0);
    assert_eq!(report.partially_covered_risks, 0);
    assert_eq!(report.exposed_risks, report.total_risks);
    assert!(report.active_controls_list.is_empty());
}

#[test]
fn control_override_narrows_the_active_set() {
    let analyzer = fixture();
    let report = analyzer
        .analyze(&request(&["CAP1", "CAP2"], Some(&["C1"])))
        .unwrap();

    // C2 and C3 are suppressed even though their capabilities are active.
    assert_eq!(report.active_controls, 1);
    assert_eq!(report.partially_covered_risks, 1);
    assert_eq!(report.exposed_risks, 2);
    assert_eq!(report.active_controls_list.len(), 1);
    assert_eq!(report.active_controls_list[0].control_id, "C1");
}

#[test]
fn empty_control_override_yields_zero_active_controls() {
    let analyzer = fixture();
    let report = analyzer.analyze(&request(&["CAP1", "CAP2"], Some(&[]))).unwrap();

    assert_eq!(report.active_controls, 0);
    assert_eq!(report.exposed_risks, report.total_risks);
}

#[test]
fn override_ignores_controls_outside_active_capabilities() {
    let analyzer = fixture();
    // C3 belongs to CAP2, which is not active; GHOST does not exist.
    let report = analyzer
        .analyze(&request(&["CAP1"], Some(&["C1", "C3", "GHOST"])))
        .unwrap();

    assert_eq!(report.active_controls, 1);
    assert_eq!(report.active_controls_list[0].control_id, "C1");
}

#[test]
fn unknown_capability_ids_degrade_to_zero_report() {
    let analyzer = fixture();
    let report = analyzer.analyze(&request(&["GHOST"], None)).unwrap();

    assert_eq!(report.active_controls, 0);
    assert_eq!(report.exposed_risks, report.total_risks);
}

#[test]
fn active_control_entries_name_contributing_capabilities() {
    let analyzer = fixture();
    let report = analyzer.analyze(&request(&["CAP2"], None)).unwrap();

    let c2 = report
        .active_controls_list
        .iter()
        .find(|e| e.control_id == "C2")
        .unwrap();
    assert_eq!(c2.capability_names, vec!["Capability Two"]);
    assert_eq!(c2.control_description.as_deref(), Some("Second control"));
}

#[test]
fn classification_is_exclusive_and_exhaustive() {
    let analyzer = fixture();
    let report = analyzer.analyze(&request(&["CAP1"], None)).unwrap();

    assert_eq!(
        report.active_risks + report.partially_covered_risks + report.exposed_risks,
        report.total_risks
    );

    let partial_ids: HashSet<&str> = report
        .partially_covered_risks_list
        .iter()
        .map(|e| e.risk_id.as_str())
        .collect();
    let exposed_ids: HashSet<&str> = report
        .exposed_risks_list
        .iter()
        .map(|e| e.risk_id.as_str())
        .collect();
    assert!(partial_ids.is_disjoint(&exposed_ids));
    assert_eq!(
        partial_ids.len() + exposed_ids.len(),
        (report.partially_covered_risks + report.exposed_risks) as usize
    );
}

#[test]
fn identical_inputs_produce_identical_reports() {
    let analyzer = fixture();
    let req = request(&["CAP1", "CAP2"], Some(&["C1", "C3"]));

    let first = analyzer.analyze(&req).unwrap();
    let second = analyzer.analyze(&req).unwrap();

    assert_eq!(first.active_risks, second.active_risks);
    assert_eq!(first.partially_covered_risks, second.partially_covered_risks);
    assert_eq!(first.exposed_risks, second.exposed_risks);
    assert_eq!(first.active_controls, second.active_controls);

    // List ordering is unspecified: compare as sets.
    let exposed = |r: &riskmap_engine::CoverageReport| -> HashSet<String> {
        r.exposed_risks_list
            .iter()
            .map(|e| e.risk_id.clone())
            .collect()
    };
    assert_eq!(exposed(&first), exposed(&second));
}

#[test]
fn missing_display_fields_fall_back_to_placeholders() {
    let db = Arc::new(DatabaseManager::open_in_memory().unwrap());
    db.with_writer(|conn| {
        conn.execute_batch(
            "INSERT INTO risks (risk_id, risk_title, risk_description)
             VALUES ('R1', NULL, NULL);",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
    })
    .unwrap();
    let analyzer = CoverageAnalyzer::new(SqliteMappingStore::new(db));

    let report = analyzer.analyze(&request(&[], None)).unwrap();
    let exposed = &report.exposed_risks_list[0];
    assert_eq!(exposed.risk_title, "No title");
    assert_eq!(exposed.risk_description, "No description");
}

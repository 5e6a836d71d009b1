//! V002: Scenario schema — scenarios plus capability/control selections.
//!
//! Selections are owned exclusively by their scenario: cascade deletes
//! (foreign_keys pragma is ON for every connection) remove them with
//! the scenario row, and saves replace the whole set per scenario.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS capability_scenarios (
    scenario_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    scenario_name TEXT NOT NULL,
    is_default INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL DEFAULT (unixepoch()),
    updated_at INTEGER NOT NULL DEFAULT (unixepoch()),
    UNIQUE(user_id, scenario_name)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_scenarios_user
    ON capability_scenarios(user_id);

CREATE TABLE IF NOT EXISTS capability_selections (
    scenario_id INTEGER NOT NULL
        REFERENCES capability_scenarios(scenario_id) ON DELETE CASCADE,
    capability_id TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    UNIQUE(scenario_id, capability_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_capability_selections_scenario
    ON capability_selections(scenario_id);

CREATE TABLE IF NOT EXISTS control_selections (
    scenario_id INTEGER NOT NULL
        REFERENCES capability_scenarios(scenario_id) ON DELETE CASCADE,
    control_id TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    UNIQUE(scenario_id, control_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_control_selections_scenario
    ON control_selections(scenario_id);
"#;

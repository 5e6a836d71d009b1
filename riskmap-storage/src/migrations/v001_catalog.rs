//! V001: Catalog schema — risks, controls, capabilities, mappings.
//!
//! These tables are populated by the external ETL collaborator; this
//! core only reads them. Referential integrity between catalog tables
//! is the ETL's responsibility — unknown ids simply resolve to empty
//! query results.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS risks (
    risk_id TEXT PRIMARY KEY,
    risk_title TEXT,
    risk_description TEXT
) STRICT;

CREATE TABLE IF NOT EXISTS controls (
    control_id TEXT PRIMARY KEY,
    control_title TEXT,
    control_description TEXT,
    security_function TEXT
) STRICT;

CREATE TABLE IF NOT EXISTS capabilities (
    capability_id TEXT PRIMARY KEY,
    capability_name TEXT NOT NULL,
    capability_type TEXT,
    capability_domain TEXT,
    capability_definition TEXT
) STRICT;

-- Many-to-many: which controls a capability groups.
CREATE TABLE IF NOT EXISTS capability_control_mapping (
    capability_id TEXT NOT NULL,
    control_id TEXT NOT NULL,
    PRIMARY KEY (capability_id, control_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_ccm_control
    ON capability_control_mapping(control_id);

-- Many-to-many: which controls a risk requires. A risk with no rows
-- here has no required controls and is always classified exposed.
CREATE TABLE IF NOT EXISTS risk_control_mapping (
    risk_id TEXT NOT NULL,
    control_id TEXT NOT NULL,
    PRIMARY KEY (risk_id, control_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_rcm_control
    ON risk_control_mapping(control_id);
"#;

//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create all tables.
///
/// `reports` deliberately has no unique constraint on
/// `(user_id, year, month)`. One authoritative report per key is kept by
/// invalidating before re-materializing, and reads take the newest row.
pub const CREATE_TABLES: &str = r#"
-- Cost records
CREATE TABLE IF NOT EXISTS costs (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    day INTEGER NOT NULL,
    description TEXT NOT NULL,
    category TEXT NOT NULL,
    sum REAL NOT NULL
);

-- Materialized monthly reports
CREATE TABLE IF NOT EXISTS reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    details TEXT NOT NULL,
    materialized_at TEXT NOT NULL
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_costs_user_period ON costs(user_id, year, month);
CREATE INDEX IF NOT EXISTS idx_reports_user_period ON reports(user_id, year, month);
"#;

// Cost queries
pub const SELECT_NEXT_COST_ID: &str = r#"
SELECT COALESCE(MAX(id), 0) + 1
FROM costs
"#;

pub const INSERT_COST: &str = r#"
INSERT INTO costs (id, user_id, year, month, day, description, category, sum)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SELECT_COSTS_BY_PERIOD: &str = r#"
SELECT id, user_id, year, month, day, description, category, sum
FROM costs
WHERE user_id = ?1 AND year = ?2 AND month = ?3
ORDER BY id ASC
"#;

pub const DELETE_ALL_COSTS: &str = r#"
DELETE FROM costs
"#;

// Report queries
pub const SELECT_REPORT_BY_PERIOD: &str = r#"
SELECT user_id, year, month, details, materialized_at
FROM reports
WHERE user_id = ?1 AND year = ?2 AND month = ?3
ORDER BY id DESC
LIMIT 1
"#;

pub const INSERT_REPORT: &str = r#"
INSERT INTO reports (user_id, year, month, details, materialized_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const DELETE_REPORTS_BY_PERIOD: &str = r#"
DELETE FROM reports
WHERE user_id = ?1 AND year = ?2 AND month = ?3
"#;

pub const DELETE_ALL_REPORTS: &str = r#"
DELETE FROM reports
"#;

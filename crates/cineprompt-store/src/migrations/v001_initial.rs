//! v001 -- Initial schema creation.
//!
//! Every ledger is a JSON document stored under a string key, mirroring the
//! layout of a browser-style local storage area.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key        TEXT PRIMARY KEY NOT NULL,   -- ledger name, e.g. `users`, `favorites_<email>`
    value      TEXT NOT NULL,               -- JSON document
    updated_at TEXT NOT NULL                -- RFC-3339
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}

//! Row types and queries for the health-check database.
//!
//! The schema is owned by the checker that writes the database; this crate
//! only reads it:
//!
//! ```text
//! url(url_id INTEGER PK, alias TEXT, url TEXT)
//! results(result_id INTEGER PK, url_id INTEGER FK, success INTEGER 0/1, date_time_stamp TEXT)
//! ```

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

/// A monitored URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Primary key of the `url` table.
    pub id: i64,
    /// Short display name.
    pub alias: String,
    /// The URL being checked.
    pub url: String,
}

impl Target {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("url_id")?,
            alias: row.get("alias")?,
            url: row.get("url")?,
        })
    }
}

/// One recorded health check, joined with its target's alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Primary key of the `results` table.
    pub id: i64,
    /// The target this check belongs to.
    pub target_id: i64,
    /// Whether the check succeeded.
    pub success: bool,
    /// Timestamp text as stored by the checker.
    pub timestamp: String,
    /// Alias of the target, from the `url` table.
    pub alias: String,
}

impl CheckResult {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("result_id")?,
            target_id: row.get("url_id")?,
            success: row.get("success")?,
            timestamp: row.get("date_time_stamp")?,
            alias: row.get("alias")?,
        })
    }
}

/// All targets, ascending by id.
pub fn select_targets(conn: &Connection) -> rusqlite::Result<Vec<Target>> {
    let mut stmt = conn.prepare("SELECT url_id, alias, url FROM url ORDER BY url_id")?;
    let rows = stmt.query_map([], Target::from_row)?;
    rows.collect()
}

/// A single target by id.
pub fn select_target(conn: &Connection, target_id: i64) -> rusqlite::Result<Option<Target>> {
    conn.query_row(
        "SELECT url_id, alias, url FROM url WHERE url_id = ?1",
        params![target_id],
        Target::from_row,
    )
    .optional()
}

/// Most recent results first, optionally restricted to one target.
pub fn select_recent_results(
    conn: &Connection,
    limit: usize,
    target_id: Option<i64>,
) -> rusqlite::Result<Vec<CheckResult>> {
    let mut stmt = conn.prepare(
        "SELECT r.result_id, r.url_id, r.success, r.date_time_stamp, u.alias
         FROM results r
         JOIN url u ON r.url_id = u.url_id
         WHERE ?1 IS NULL OR r.url_id = ?1
         ORDER BY r.date_time_stamp DESC, r.result_id DESC
         LIMIT ?2",
    )?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt.query_map(params![target_id, limit], CheckResult::from_row)?;
    rows.collect()
}

/// Total and successful check counts over the whole `results` table.
pub fn select_result_counts(conn: &Connection) -> rusqlite::Result<(u64, u64)> {
    conn.query_row(
        "SELECT COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN success = 1 THEN 1 ELSE 0 END), 0) AS successful
         FROM results",
        [],
        |row| {
            let total: i64 = row.get("total")?;
            let successful: i64 = row.get("successful")?;
            Ok((total.max(0) as u64, successful.max(0) as u64))
        },
    )
}

/// Names of the tables in the database, checked when opening.
pub fn select_table_names(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>("name"))?;
    rows.collect()
}

/// Create the schema and insert fixture rows. Test support only.
#[cfg(test)]
pub(crate) mod fixture {
    use rusqlite::{params, Connection};

    pub const SCHEMA: &str = "
        CREATE TABLE url (url_id INTEGER PRIMARY KEY, alias TEXT NOT NULL, url TEXT NOT NULL);
        CREATE TABLE results (
            result_id INTEGER PRIMARY KEY,
            url_id INTEGER NOT NULL REFERENCES url(url_id),
            success INTEGER NOT NULL,
            date_time_stamp TEXT NOT NULL
        );
    ";

    pub fn create(conn: &Connection) {
        conn.execute_batch(SCHEMA).unwrap();
    }

    pub fn add_target(conn: &Connection, id: i64, alias: &str, url: &str) {
        conn.execute(
            "INSERT INTO url (url_id, alias, url) VALUES (?1, ?2, ?3)",
            params![id, alias, url],
        )
        .unwrap();
    }

    pub fn add_result(conn: &Connection, target_id: i64, success: bool, stamp: &str) {
        conn.execute(
            "INSERT INTO results (url_id, success, date_time_stamp) VALUES (?1, ?2, ?3)",
            params![target_id, success as i64, stamp],
        )
        .unwrap();
    }

    /// The three-check scenario for target `(1, "API", "https://api.example.com")`.
    pub fn api_scenario(conn: &Connection) {
        create(conn);
        add_target(conn, 1, "API", "https://api.example.com");
        add_result(conn, 1, true, "2024-01-01T00:00");
        add_result(conn, 1, false, "2024-01-01T00:05");
        add_result(conn, 1, true, "2024-01-01T00:10");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        fixture::api_scenario(&conn);
        conn
    }

    #[test]
    fn test_select_targets_ordered_by_id() {
        let conn = scenario();
        fixture::add_target(&conn, 5, "Web", "https://www.example.com");
        fixture::add_target(&conn, 3, "Docs", "https://docs.example.com");

        let ids: Vec<i64> = select_targets(&conn).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_select_recent_results_newest_first() {
        let conn = scenario();
        let results = select_recent_results(&conn, 100, None).unwrap();

        let stamps: Vec<&str> = results.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(
            stamps,
            vec!["2024-01-01T00:10", "2024-01-01T00:05", "2024-01-01T00:00"]
        );
        assert!(results.iter().all(|r| r.alias == "API"));
        assert!(results[0].success);
        assert!(!results[1].success);
    }

    #[test]
    fn test_select_recent_results_limit_and_filter() {
        let conn = scenario();
        fixture::add_target(&conn, 2, "Web", "https://www.example.com");
        fixture::add_result(&conn, 2, false, "2024-01-01T00:20");

        let limited = select_recent_results(&conn, 2, None).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].alias, "Web");

        let only_api = select_recent_results(&conn, 100, Some(1)).unwrap();
        assert_eq!(only_api.len(), 3);
        assert!(only_api.iter().all(|r| r.target_id == 1));

        assert!(select_recent_results(&conn, 100, Some(99)).unwrap().is_empty());
    }

    #[test]
    fn test_select_result_counts() {
        let conn = scenario();
        assert_eq!(select_result_counts(&conn).unwrap(), (3, 2));

        let empty = Connection::open_in_memory().unwrap();
        fixture::create(&empty);
        assert_eq!(select_result_counts(&empty).unwrap(), (0, 0));
    }

    #[test]
    fn test_select_target_found_and_missing() {
        let conn = scenario();
        assert_eq!(
            select_target(&conn, 1).unwrap(),
            Some(Target {
                id: 1,
                alias: "API".to_string(),
                url: "https://api.example.com".to_string(),
            })
        );
        assert_eq!(select_target(&conn, 99).unwrap(), None);
    }

    #[test]
    fn test_select_table_names() {
        let conn = scenario();
        assert_eq!(select_table_names(&conn).unwrap(), vec!["results", "url"]);
    }
}

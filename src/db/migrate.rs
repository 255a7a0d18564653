use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Legacy column names written by the first releases, mapped to the current ones.
const LEGACY_COLUMNS: [(&str, &str); 3] = [
    ("uuid", "external_id"),
    ("stundenlohn", "hourly_rate"),
    ("verdienst", "earnings"),
];

const MIGRATION_RENAME_LEGACY: &str = "20240301_0002_rename_legacy_columns";
const MIGRATION_END_TIME_INDEX: &str = "20240301_0003_index_end_time";

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `work_sessions` table exists.
fn work_sessions_table_exists(conn: &Connection) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='work_sessions'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn work_sessions_columns(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info('work_sessions')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

/// Create the `work_sessions` table with the current schema.
fn create_work_sessions_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS work_sessions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            external_id  TEXT UNIQUE NOT NULL,
            title        TEXT NOT NULL CHECK(length(trim(title)) > 0),
            description  TEXT,
            start_time   TEXT NOT NULL,
            end_time     TEXT,
            difference   INTEGER,
            hourly_rate  REAL,
            earnings     REAL,
            created_by   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_work_sessions_end_time ON work_sessions(end_time);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now', 'localtime'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Rename the columns of a table created by the first releases
/// (`uuid`, `stundenlohn`, `verdienst`).
fn migrate_legacy_columns(conn: &Connection) -> AppResult<()> {
    let cols = work_sessions_columns(conn)?;
    let pending: Vec<(&str, &str)> = LEGACY_COLUMNS
        .iter()
        .copied()
        .filter(|(old, _)| cols.iter().any(|c| c == old))
        .collect();

    if pending.is_empty() {
        return Ok(());
    }

    warning("Legacy work_sessions schema detected, renaming columns...");

    let mut sql = String::from("BEGIN;\n");
    for (old, new) in &pending {
        sql.push_str(&format!(
            "ALTER TABLE work_sessions RENAME COLUMN {old} TO {new};\n"
        ));
    }
    sql.push_str("COMMIT;");

    if let Err(e) = conn.execute_batch(&sql) {
        let _ = conn.execute_batch("ROLLBACK;");
        return Err(AppError::Migration(format!(
            "failed to rename legacy columns: {}",
            e
        )));
    }

    let renamed: Vec<String> = pending
        .iter()
        .map(|(old, new)| format!("{old}→{new}"))
        .collect();
    mark_applied(conn, MIGRATION_RENAME_LEGACY, &renamed.join(", "))?;

    success(format!(
        "Migration applied: {} ({})",
        MIGRATION_RENAME_LEGACY,
        renamed.join(", ")
    ));
    Ok(())
}

fn migrate_end_time_index(conn: &Connection) -> AppResult<()> {
    if migration_applied(conn, MIGRATION_END_TIME_INDEX)? {
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_work_sessions_end_time ON work_sessions(end_time);",
    )?;
    mark_applied(
        conn,
        MIGRATION_END_TIME_INDEX,
        "Added index on work_sessions.end_time",
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called every time a store is opened, so each step is idempotent.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Fresh database: current schema, nothing else to do
    if !work_sessions_table_exists(conn)? {
        create_work_sessions_table(conn)?;
        mark_applied(conn, MIGRATION_END_TIME_INDEX, "Created work_sessions table")?;
        return Ok(());
    }

    // 3) Existing database: upgrade in place
    migrate_legacy_columns(conn)?;
    migrate_end_time_index(conn)?;

    Ok(())
}

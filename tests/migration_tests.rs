mod common;
use common::{setup_test_db, tt};
use predicates::str::contains;
use rusqlite::Connection;
use tasktracker::db::DbPool;
use tasktracker::db::log::load_log;

/// Table layout written by the first releases.
fn create_legacy_db(db_path: &str) {
    let conn = Connection::open(db_path).expect("open db");
    conn.execute_batch(
        r#"
        CREATE TABLE work_sessions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid         TEXT UNIQUE NOT NULL,
            title        TEXT NOT NULL,
            description  TEXT,
            start_time   TEXT NOT NULL,
            end_time     TEXT,
            difference   INTEGER,
            stundenlohn  REAL,
            verdienst    REAL,
            created_by   TEXT NOT NULL
        );

        INSERT INTO work_sessions
            (uuid, title, description, start_time, end_time, difference, stundenlohn, verdienst, created_by)
        VALUES
            ('11111111-1111-4111-8111-111111111111', 'Legacy job', NULL,
             '2023-05-02 08:00:00', '2023-05-02 12:00:00', 14400, 15.0, 60.0, 'old-laptop'),
            ('22222222-2222-4222-8222-222222222222', 'Minute precision', 'typed by hand',
             '2023-05-03 09:00', '2023-05-03 09:30', 1800, 20.0, 10.0, 'old-laptop');
        "#,
    )
    .expect("create legacy schema");
}

fn columns(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info('work_sessions')").unwrap();
    stmt.query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .map(Result::unwrap)
        .collect()
}

#[test]
fn legacy_columns_are_renamed_and_rows_kept() {
    let db_path = setup_test_db("migration_legacy_columns");
    create_legacy_db(&db_path);

    let pool = DbPool::open(&db_path).expect("open and migrate");
    let cols = columns(&pool.conn);
    for c in ["external_id", "hourly_rate", "earnings"] {
        assert!(cols.iter().any(|x| x == c), "missing column {c}");
    }
    for c in ["uuid", "stundenlohn", "verdienst"] {
        assert!(!cols.iter().any(|x| x == c), "legacy column {c} still present");
    }

    let s = pool.get_session(1).unwrap();
    assert_eq!(s.external_id, "11111111-1111-4111-8111-111111111111");
    assert_eq!(s.hourly_rate, 15.0);
    assert_eq!(s.earnings, 60.0);
    assert_eq!(s.description, "");
}

#[test]
fn minute_precision_rows_are_readable() {
    let db_path = setup_test_db("migration_minute_precision");
    create_legacy_db(&db_path);

    let pool = DbPool::open(&db_path).unwrap();
    let s = pool.get_session(2).unwrap();
    assert_eq!(s.start_str(), "2023-05-03 09:00:00");
    assert_eq!(s.end_str(), "2023-05-03 09:30:00");
    assert_eq!(s.duration_secs, 1800);
}

#[test]
fn migrations_are_recorded_once() {
    let db_path = setup_test_db("migration_recorded_once");
    create_legacy_db(&db_path);

    let count_applied = |pool: &DbPool| {
        load_log(&pool.conn)
            .unwrap()
            .into_iter()
            .filter(|e| e.operation == "migration_applied")
            .count()
    };

    let first = DbPool::open(&db_path).unwrap();
    let applied = count_applied(&first);
    assert_eq!(applied, 2);
    drop(first);

    let second = DbPool::open(&db_path).unwrap();
    assert_eq!(count_applied(&second), applied);
}

#[test]
fn fresh_database_gets_current_schema() {
    let db_path = setup_test_db("migration_fresh");
    let pool = DbPool::open(&db_path).unwrap();

    let cols = columns(&pool.conn);
    assert_eq!(
        cols,
        vec![
            "id",
            "external_id",
            "title",
            "description",
            "start_time",
            "end_time",
            "difference",
            "hourly_rate",
            "earnings",
            "created_by"
        ]
    );
    assert_eq!(pool.count_sessions().unwrap(), 0);
}

#[test]
fn missing_database_directory_is_store_unavailable() {
    let mut path = std::env::temp_dir();
    path.push("tasktracker_no_such_dir");
    path.push("nested");
    path.push("db.sqlite");

    let err = DbPool::open(&path.to_string_lossy()).err().expect("open must fail");
    assert!(matches!(
        err,
        tasktracker::errors::AppError::StoreUnavailable(_)
    ));
}

#[test]
fn db_migrate_command_upgrades_legacy_file() {
    let db_path = setup_test_db("migration_cli");
    create_legacy_db(&db_path);

    tt().args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migration completed"));

    tt().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Legacy job"))
        .stdout(contains("Minute precision"));
}

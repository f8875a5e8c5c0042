//! DB tests: table provisioning, duplicate-ignoring inserts, chunking, dry-run and store selection.

use homee_csv_to_mysql::engine::{
    Dialect, DryRunStore, SensorStore, SqliteStore, open_store, records_to_batch,
};
use homee_csv_to_mysql::{Opts, Target};

fn readings(n: usize) -> Vec<Vec<String>> {
    (0..n)
        .map(|i| {
            vec![
                format!(
                    "2024-01-15 {:02}:{:02}:{:02}",
                    i / 3600,
                    (i / 60) % 60,
                    i % 60
                ),
                format!("{}.{:02}", 20 + i % 5, i % 100),
            ]
        })
        .collect()
}

fn count(store: &SqliteStore, table: &str) -> i64 {
    store
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .unwrap()
}

fn table_exists(store: &SqliteStore, table: &str) -> bool {
    store
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |r| r.get::<_, i64>(0),
        )
        .unwrap()
        == 1
}

#[test]
fn test_ensure_table_is_idempotent() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.ensure_table("kitchen_temp").unwrap();
    store.ensure_table("kitchen_temp").unwrap();
    assert!(table_exists(&store, "kitchen_temp"));

    let mut stmt = store
        .connection()
        .prepare("SELECT name, pk FROM pragma_table_info('kitchen_temp') ORDER BY cid")
        .unwrap();
    let cols: Vec<(String, i64)> = stmt
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(
        cols,
        vec![("homee_ts".to_string(), 1), ("val".to_string(), 0)]
    );
}

#[test]
fn test_ensure_table_propagates_errors() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    assert!(store.ensure_table("not a table").is_err());
}

#[test]
fn test_insert_batch_counts_inserted_rows() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.ensure_table("kitchen_temp").unwrap();
    let batch = records_to_batch("kitchen_temp", &readings(3));
    assert_eq!(store.insert_batch(&batch).unwrap(), Some(3));
    assert_eq!(count(&store, "kitchen_temp"), 3);

    let val: f64 = store
        .connection()
        .query_row(
            "SELECT val FROM kitchen_temp WHERE homee_ts = '2024-01-15 00:00:01'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!((val - 21.01).abs() < 1e-9);
}

#[test]
fn test_insert_batch_ignores_duplicates() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.ensure_table("kitchen_temp").unwrap();
    let batch = records_to_batch("kitchen_temp", &readings(5));
    assert_eq!(store.insert_batch(&batch).unwrap(), Some(5));
    assert_eq!(store.insert_batch(&batch).unwrap(), Some(0));
    assert_eq!(count(&store, "kitchen_temp"), 5);

    // Overlapping batch: only the new timestamps land.
    let batch = records_to_batch("kitchen_temp", &readings(8));
    assert_eq!(store.insert_batch(&batch).unwrap(), Some(3));
    assert_eq!(count(&store, "kitchen_temp"), 8);
}

#[test]
fn test_insert_batch_larger_than_one_chunk() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.ensure_table("meter").unwrap();
    let batch = records_to_batch("meter", &readings(2500));
    assert_eq!(batch.chunks().count(), 3);
    assert_eq!(store.insert_batch(&batch).unwrap(), Some(2500));
    assert_eq!(count(&store, "meter"), 2500);
}

#[test]
fn test_insert_batch_missing_table_fails() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let batch = records_to_batch("nowhere", &readings(1));
    assert!(store.insert_batch(&batch).is_err());
}

#[test]
fn test_sqlite_file_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("homee.db");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.ensure_table("kitchen_temp").unwrap();
        let batch = records_to_batch("kitchen_temp", &readings(4));
        store.insert_batch(&batch).unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(count(&store, "kitchen_temp"), 4);
}

#[test]
fn test_dry_run_store_records_statements() {
    let mut store = DryRunStore::new(Dialect::MySql);
    store.ensure_table("kitchen_temp").unwrap();
    let batch = records_to_batch("kitchen_temp", &readings(2));
    assert_eq!(store.insert_batch(&batch).unwrap(), None);
    assert_eq!(store.statements.len(), 2);
    assert!(store.statements[0].starts_with("CREATE TABLE IF NOT EXISTS kitchen_temp"));
    assert_eq!(
        store.statements[1],
        "INSERT IGNORE INTO kitchen_temp (homee_ts, val) VALUES \
        ('2024-01-15 00:00:00', 20.00),('2024-01-15 00:00:01', 21.01)"
    );
}

#[test]
fn test_open_store_requires_target() {
    let err = open_store(&Opts::default()).err().unwrap();
    assert!(err.to_string().contains("no database configured"));
}

#[test]
fn test_open_store_dry_run_never_connects() {
    let opts = Opts {
        target: Some(Target::MySql("u:p@tcp(unreachable.invalid:3306)/homee".into())),
        dry_run: true,
        ..Default::default()
    };
    let store = open_store(&opts).unwrap();
    assert_eq!(store.dialect(), Dialect::MySql);

    let opts = Opts {
        dry_run: true,
        target: Some(Target::Sqlite("unused.db".into())),
        ..Default::default()
    };
    assert_eq!(open_store(&opts).unwrap().dialect(), Dialect::Sqlite);
}

#[test]
fn test_open_store_rejects_empty_dsn() {
    let opts = Opts {
        target: Some(Target::MySql(String::new())),
        ..Default::default()
    };
    assert!(open_store(&opts).is_err());
}

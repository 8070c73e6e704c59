//! Tests for column mapping against a real store
//!
//! These check the read-everything-then-write ordering by wrapping the
//! connection in a store that records each read and write.

use rusqlite::Connection;
use sqlframe::column_mapper::{map_column, map_column_with, ColumnMap};
use sqlframe::{GlueError, Store, Value};

use crate::helpers::{fetch_all, Event, RecordingStore};

const MAP: ColumnMap<'static> = ColumnMap {
    table: "t",
    primary_key: "id",
    filter: "1",
    source: "src",
    destination: "dst",
};

fn seeded(rows: &[(i64, i64)]) -> RecordingStore {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_sql("CREATE TABLE t (id INTEGER PRIMARY KEY, src INTEGER, dst INTEGER);")
        .unwrap();
    for (id, src) in rows {
        conn.execute_sql(&format!("INSERT INTO t(id, src) VALUES ({id}, {src});"))
            .unwrap();
    }
    RecordingStore::new(conn)
}

fn times_ten(value: Value) -> Value {
    match value {
        Value::Integer(i) => Value::Integer(i * 10),
        other => other,
    }
}

#[test]
fn test_map_statements_and_results() {
    let mut store = seeded(&[(1, 2), (2, 3)]);
    let updated = map_column(&mut store, MAP, times_ten).unwrap();
    assert_eq!(updated, 2);

    let events = store.events();
    assert_eq!(
        events[0],
        Event::Query("SELECT id, src FROM t WHERE 1;".to_string())
    );
    let writes: Vec<&Event> = events
        .iter()
        .filter(|e| matches!(e, Event::Execute(_)))
        .collect();
    assert_eq!(
        writes,
        vec![
            &Event::Execute("UPDATE t SET dst = 20 WHERE id = 1;".to_string()),
            &Event::Execute("UPDATE t SET dst = 30 WHERE id = 2;".to_string()),
        ]
    );

    assert_eq!(
        fetch_all(&mut store.inner, "SELECT id, dst FROM t ORDER BY id;"),
        vec![
            vec![Value::Integer(1), Value::Integer(20)],
            vec![Value::Integer(2), Value::Integer(30)],
        ]
    );
}

#[test]
fn test_all_reads_finish_before_any_write() {
    let mut store = seeded(&[(1, 2), (2, 3), (3, 4)]);
    let log = store.log.clone();

    let err = map_column_with(&mut store, MAP, |value| {
        log.borrow_mut().push(Event::Transform(value.clone()));
        match value {
            Value::Integer(4) => Err("refusing the third row"),
            other => Ok(times_ten(other)),
        }
    })
    .unwrap_err();
    assert!(matches!(err, GlueError::Transform { .. }));

    let events = store.events();
    let scan_done = events.iter().position(|e| *e == Event::QueryDone).unwrap();
    let first_transform = events
        .iter()
        .position(|e| matches!(e, Event::Transform(_)))
        .unwrap();
    let first_write = events
        .iter()
        .position(|e| matches!(e, Event::Execute(_)))
        .unwrap();

    let rows_read = events[..scan_done]
        .iter()
        .filter(|e| matches!(e, Event::RowRead(_)))
        .count();
    assert_eq!(rows_read, 3, "every row is buffered before the scan closes");
    assert!(scan_done < first_transform);
    assert!(scan_done < first_write);
    assert!(!events[scan_done..]
        .iter()
        .any(|e| matches!(e, Event::RowRead(_))));

    // transform and write alternate per buffered row until the failure
    let tail: Vec<&Event> = events[scan_done + 1..].iter().collect();
    assert!(matches!(tail[0], Event::Transform(Value::Integer(2))));
    assert!(matches!(tail[1], Event::Execute(_)));
    assert!(matches!(tail[2], Event::Transform(Value::Integer(3))));
    assert!(matches!(tail[3], Event::Execute(_)));
    assert!(matches!(tail[4], Event::Transform(Value::Integer(4))));
    assert_eq!(tail.len(), 5);

    assert_eq!(
        fetch_all(&mut store.inner, "SELECT dst FROM t ORDER BY id;"),
        vec![
            vec![Value::Integer(20)],
            vec![Value::Integer(30)],
            vec![Value::Null],
        ]
    );
}

#[test]
fn test_text_key_gives_broken_where_clause() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_sql("CREATE TABLE t (code TEXT PRIMARY KEY, src INTEGER, dst INTEGER);")
        .unwrap();
    conn.execute_sql("INSERT INTO t(code, src) VALUES ('abc', 1);")
        .unwrap();

    let map = ColumnMap {
        primary_key: "code",
        ..MAP
    };
    // `code = abc` names a column that does not exist
    let err = map_column(&mut conn, map, times_ten).unwrap_err();
    assert!(matches!(err, GlueError::StoreError(_)));
}

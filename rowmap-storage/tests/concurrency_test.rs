//! Initialisation under concurrent first use, and retry after engine failure.
//!
//! A counting engine wraps `SqliteEngine` so the tests can assert how often
//! the gateway issues DDL and structural probes.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use tempfile::TempDir;

use rowmap_core::config::StorageConfig;
use rowmap_core::errors::{MappingError, StorageError};
use rowmap_core::impl_record;
use rowmap_core::traits::ISqlEngine;
use rowmap_core::types::{PageWindow, Predicate, RowValues, StoredRow};
use rowmap_storage::{QueryOptions, SqliteEngine, TableGateway};

#[derive(Debug, Default, Clone, PartialEq)]
struct Event {
    seq: Option<i64>,
    label: Option<String>,
}

impl_record!(Event {
    seq: i64,
    label: String,
});

/// Delegates to SQLite and counts schema traffic. Optionally fails the first
/// DDL statement with `DbBusy`.
struct CountingEngine {
    inner: SqliteEngine,
    ddl_calls: AtomicUsize,
    probe_calls: AtomicUsize,
    fail_next_ddl: AtomicBool,
}

impl CountingEngine {
    fn new(inner: SqliteEngine) -> Self {
        Self {
            inner,
            ddl_calls: AtomicUsize::new(0),
            probe_calls: AtomicUsize::new(0),
            fail_next_ddl: AtomicBool::new(false),
        }
    }
}

impl ISqlEngine for CountingEngine {
    fn execute_ddl(&self, sql: &str) -> Result<(), StorageError> {
        self.ddl_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_ddl.swap(false, Ordering::SeqCst) {
            return Err(StorageError::DbBusy);
        }
        self.inner.execute_ddl(sql)
    }

    fn describe_columns(&self, table: &str) -> Result<Vec<String>, StorageError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.describe_columns(table)
    }

    fn insert(&self, table: &str, values: &RowValues) -> Result<i64, StorageError> {
        self.inner.insert(table, values)
    }

    fn update(
        &self,
        table: &str,
        values: &RowValues,
        predicate: &Predicate,
    ) -> Result<usize, StorageError> {
        self.inner.update(table, values, predicate)
    }

    fn delete(&self, table: &str, predicate: &Predicate) -> Result<usize, StorageError> {
        self.inner.delete(table, predicate)
    }

    fn query(
        &self,
        table: &str,
        predicate: &Predicate,
        order_by: Option<&str>,
        window: Option<PageWindow>,
        visitor: &mut dyn FnMut(StoredRow),
    ) -> Result<usize, StorageError> {
        self.inner.query(table, predicate, order_by, window, visitor)
    }
}

fn temp_engine() -> (TempDir, Arc<CountingEngine>) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("events.db");
    let sqlite = SqliteEngine::open(&db_path, &StorageConfig::default()).unwrap();
    (dir, Arc::new(CountingEngine::new(sqlite)))
}

#[test]
fn concurrent_first_use_initialises_once() {
    let (_dir, engine) = temp_engine();
    let gateway = Arc::new(TableGateway::<Event>::new(engine.clone()));
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let gw = Arc::clone(&gateway);
            let bar = Arc::clone(&barrier);
            std::thread::spawn(move || {
                bar.wait();
                let event = Event {
                    seq: Some(i),
                    label: Some(format!("t{i}")),
                };
                gw.insert(&event).unwrap();
            })
        })
        .collect();

    for h in handles {
        assert!(h.join().is_ok(), "insert thread panicked");
    }

    assert_eq!(gateway.mapping_builds(), 1);
    assert_eq!(engine.ddl_calls.load(Ordering::SeqCst), 1);
    assert_eq!(engine.probe_calls.load(Ordering::SeqCst), 1);

    let all = gateway
        .query_with(
            &Event::default(),
            &QueryOptions::default().window(PageWindow::first_page(100)),
        )
        .unwrap();
    assert_eq!(all.len(), 16);
}

#[test]
fn mixed_operations_after_initialisation_do_not_reprobe() {
    let (_dir, engine) = temp_engine();
    let gateway = Arc::new(TableGateway::<Event>::new(engine.clone()));
    let barrier = Arc::new(Barrier::new(12));

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let gw = Arc::clone(&gateway);
            let bar = Arc::clone(&barrier);
            std::thread::spawn(move || {
                bar.wait();
                let event = Event {
                    seq: Some(i % 3),
                    label: None,
                };
                match i % 3 {
                    0 => {
                        gw.insert(&event).unwrap();
                    }
                    1 => {
                        gw.query(&event).unwrap();
                    }
                    2 => {
                        gw.delete(&event).unwrap();
                    }
                    _ => unreachable!(),
                }
            })
        })
        .collect();

    for h in handles {
        assert!(h.join().is_ok(), "Thread panicked, possible deadlock");
    }
    assert_eq!(gateway.mapping_builds(), 1);
    assert_eq!(engine.probe_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn engine_failure_during_init_is_retried() {
    let (_dir, engine) = temp_engine();
    engine.fail_next_ddl.store(true, Ordering::SeqCst);
    let gateway = TableGateway::<Event>::new(engine.clone());

    let err = gateway.insert(&Event::default()).unwrap_err();
    assert_eq!(err, MappingError::Storage(StorageError::DbBusy));
    assert!(!err.is_fatal());
    assert!(!gateway.is_initialized());
    assert_eq!(gateway.mapping_builds(), 0);

    // Second attempt reaches the real engine and succeeds.
    gateway
        .insert(&Event {
            seq: Some(1),
            label: Some("retry".into()),
        })
        .unwrap();
    assert!(gateway.is_initialized());
    assert_eq!(gateway.mapping_builds(), 1);
    assert_eq!(engine.ddl_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn gateways_sharing_an_engine_each_build_their_own_mapping() {
    let (_dir, engine) = temp_engine();
    let first = TableGateway::<Event>::new(engine.clone());
    let second = TableGateway::<Event>::new(engine.clone());

    first.insert(&Event::default()).unwrap();
    second.insert(&Event::default()).unwrap();
    first.insert(&Event::default()).unwrap();

    assert_eq!(first.mapping_builds(), 1);
    assert_eq!(second.mapping_builds(), 1);
    assert_eq!(engine.ddl_calls.load(Ordering::SeqCst), 2);
}

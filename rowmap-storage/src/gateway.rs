//! `TableGateway`: insert/update/delete/query for one record type.
//!
//! The first operation synthesizes and runs the `CREATE TABLE`, then probes the
//! live table to build the column mapping. Both happen exactly once per gateway,
//! serialized across threads; afterwards the mapping is read lock-free.
//!
//! Schema failures (unsupported kind, bad identifier, duplicate or, in strict
//! mode, unmapped column) poison the gateway: every later call returns the same
//! error. Engine failures during initialisation are not remembered, so the
//! next call tries again.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{debug, info, warn};

use rowmap_core::config::MapperConfig;
use rowmap_core::descriptor::TypeDescriptor;
use rowmap_core::errors::{MappingError, StorageError};
use rowmap_core::traits::{ISqlEngine, Record};
use rowmap_core::types::PageWindow;

use crate::mapping::ColumnMapping;
use crate::{codec, predicate, schema};

/// Ordering and paging for a query. `None` fields add no clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Raw `ORDER BY` body, e.g. `"name DESC"`. Passed to the engine verbatim.
    pub order_by: Option<String>,
    pub window: Option<PageWindow>,
}

impl QueryOptions {
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn window(mut self, window: PageWindow) -> Self {
        self.window = Some(window);
        self
    }
}

/// A row that could not be decoded. The rest of the query is unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// Position of the row in the cursor, starting at zero.
    pub row_index: usize,
    pub error: MappingError,
}

/// Decoded records plus the rows that were skipped.
#[derive(Debug)]
pub struct QueryOutcome<R> {
    pub records: Vec<R>,
    pub skipped: Vec<RowFailure>,
}

pub struct TableGateway<R: Record> {
    engine: Arc<dyn ISqlEngine>,
    descriptor: TypeDescriptor,
    config: MapperConfig,
    mapping: OnceLock<ColumnMapping>,
    fatal: OnceLock<MappingError>,
    init_lock: Mutex<()>,
    builds: AtomicUsize,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> TableGateway<R> {
    /// Bind `R` to `engine` with default mapper settings.
    pub fn new(engine: Arc<dyn ISqlEngine>) -> Self {
        Self::with_config(engine, MapperConfig::default())
    }

    pub fn with_config(engine: Arc<dyn ISqlEngine>, config: MapperConfig) -> Self {
        Self {
            engine,
            descriptor: R::descriptor(),
            config,
            mapping: OnceLock::new(),
            fatal: OnceLock::new(),
            init_lock: Mutex::new(()),
            builds: AtomicUsize::new(0),
            _record: PhantomData,
        }
    }

    pub fn table_name(&self) -> &str {
        self.descriptor.table_name()
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn is_initialized(&self) -> bool {
        self.mapping.get().is_some()
    }

    /// How many times the column mapping has been built (0 or 1).
    pub fn mapping_builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// The cached column mapping, initialising the table first if needed.
    pub fn column_mapping(&self) -> Result<&ColumnMapping, MappingError> {
        self.ensure_initialized()
    }

    /// Insert `record`'s populated fields. Returns the generated row id.
    pub fn insert(&self, record: &R) -> Result<i64, MappingError> {
        let mapping = self.ensure_initialized()?;
        let values = codec::encode(record, mapping);
        Ok(self.engine.insert(self.table_name(), &values)?)
    }

    /// Set `new_values`' populated fields on every row matching `filter`.
    pub fn update(&self, new_values: &R, filter: &R) -> Result<usize, MappingError> {
        let mapping = self.ensure_initialized()?;
        let values = codec::encode(new_values, mapping);
        let predicate = predicate::build(filter, mapping);
        Ok(self.engine.update(self.table_name(), &values, &predicate)?)
    }

    /// Delete every row matching `filter`.
    pub fn delete(&self, filter: &R) -> Result<usize, MappingError> {
        let mapping = self.ensure_initialized()?;
        let predicate = predicate::build(filter, mapping);
        Ok(self.engine.delete(self.table_name(), &predicate)?)
    }

    /// Query with the configured default window (offset 1, limit 100 unless
    /// overridden) and engine ordering.
    pub fn query(&self, filter: &R) -> Result<Vec<R>, MappingError> {
        let options = QueryOptions {
            order_by: None,
            window: Some(self.config.default_window()),
        };
        self.query_with(filter, &options)
    }

    /// Query with explicit ordering and paging. Rows that fail to decode are
    /// logged and left out.
    pub fn query_with(&self, filter: &R, options: &QueryOptions) -> Result<Vec<R>, MappingError> {
        let outcome = self.query_detailed(filter, options)?;
        for failure in &outcome.skipped {
            warn!(
                table = %self.table_name(),
                row = failure.row_index,
                error = %failure.error,
                "skipped row that failed to decode"
            );
        }
        Ok(outcome.records)
    }

    /// Query and return decode failures alongside the records.
    pub fn query_detailed(
        &self,
        filter: &R,
        options: &QueryOptions,
    ) -> Result<QueryOutcome<R>, MappingError> {
        let mapping = self.ensure_initialized()?;
        let predicate = predicate::build(filter, mapping);
        let mut records = Vec::new();
        let mut skipped = Vec::new();
        let mut row_index = 0;
        self.engine.query(
            self.table_name(),
            &predicate,
            options.order_by.as_deref(),
            options.window,
            &mut |row| {
                match codec::decode::<R>(&row, mapping) {
                    Ok(record) => records.push(record),
                    Err(error) => skipped.push(RowFailure { row_index, error }),
                }
                row_index += 1;
            },
        )?;
        Ok(QueryOutcome { records, skipped })
    }

    fn ensure_initialized(&self) -> Result<&ColumnMapping, MappingError> {
        if let Some(mapping) = self.mapping.get() {
            return Ok(mapping);
        }
        if let Some(err) = self.fatal.get() {
            return Err(err.clone());
        }

        let _guard = self.init_lock.lock().map_err(|e| StorageError::LockPoisoned {
            resource: format!("{} init: {e}", self.table_name()),
        })?;
        // Another thread may have finished while we waited.
        if let Some(mapping) = self.mapping.get() {
            return Ok(mapping);
        }
        if let Some(err) = self.fatal.get() {
            return Err(err.clone());
        }

        match self.initialize() {
            Ok(mapping) => Ok(self.mapping.get_or_init(|| mapping)),
            Err(err) => {
                if err.is_fatal() {
                    let _ = self.fatal.set(err.clone());
                }
                Err(err)
            }
        }
    }

    fn initialize(&self) -> Result<ColumnMapping, MappingError> {
        let ddl = schema::synthesize(&self.descriptor)?;
        debug!(table = %self.table_name(), ddl = %ddl, "synthesized schema");
        self.engine.execute_ddl(&ddl)?;

        let mapping = ColumnMapping::probe(
            self.engine.as_ref(),
            &self.descriptor,
            self.config.effective_strict_columns(),
        )?;
        self.builds.fetch_add(1, Ordering::SeqCst);
        info!(
            table = %self.table_name(),
            record = %self.descriptor.type_name(),
            columns = mapping.len(),
            "table gateway initialized"
        );
        Ok(mapping)
    }
}

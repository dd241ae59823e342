//! In-process record store.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{RecordStore, Row, StoreResult, Table};

/// Tables held in memory. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<HashMap<Table, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn read_all(&self, table: Table) -> StoreResult<Vec<Row>> {
        Ok(self
            .tables
            .borrow()
            .get(&table)
            .cloned()
            .unwrap_or_default())
    }

    fn write_all(&self, table: Table, rows: &[Row]) -> StoreResult<()> {
        self.tables.borrow_mut().insert(table, rows.to_vec());
        Ok(())
    }
}

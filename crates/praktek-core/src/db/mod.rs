//! Record store layer.
//!
//! The engine sees flat per-entity tables of string fields: it reads a whole
//! table, works on a typed copy, and writes the whole table back.

mod memory;
mod records;
mod schema;
mod seed;

pub use memory::*;
pub use records::*;
pub use schema::*;
pub use seed::*;

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use thiserror::Error;
use tracing::debug;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Malformed {table} row {row}: field '{field}' {reason}")]
    Malformed {
        table: &'static str,
        row: usize,
        field: String,
        reason: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One persisted record: column name to raw value.
pub type Row = BTreeMap<String, String>;

/// The flat tables kept by the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Doctors,
    Patients,
    Schedules,
    Registrations,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Doctors,
        Table::Patients,
        Table::Schedules,
        Table::Registrations,
    ];

    /// Table name in the backing store.
    pub fn name(self) -> &'static str {
        match self {
            Table::Doctors => "doctors",
            Table::Patients => "patients",
            Table::Schedules => "schedules",
            Table::Registrations => "registrations",
        }
    }

    /// Column names, in persisted order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Doctors => &["id", "name", "specialty", "username"],
            Table::Patients => &["id", "name", "username", "contact"],
            Table::Schedules => &["id", "doctor_id", "day", "start_time", "end_time", "quota"],
            Table::Registrations => &[
                "id",
                "patient_id",
                "schedule_id",
                "date",
                "status",
                "queue_number",
            ],
        }
    }
}

/// Durable home of the clinic tables.
///
/// `write_all` replaces the whole table: after it returns either every row
/// was written or the previous contents are still in place.
pub trait RecordStore {
    /// Read every row of `table` in stored order.
    fn read_all(&self, table: Table) -> StoreResult<Vec<Row>>;

    /// Replace the contents of `table` with `rows`.
    fn write_all(&self, table: Table, rows: &[Row]) -> StoreResult<()>;
}

/// SQLite file holding the four clinic tables.
///
/// Each table keeps a `position` column so rows come back in the order the
/// front desk wrote them.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the clinic file at `path`, creating missing tables.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::with_schema(Connection::open(path)?)
    }

    /// Scratch database that disappears on drop.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_schema(Connection::open_in_memory()?)
    }

    fn with_schema(conn: Connection) -> StoreResult<Self> {
        // Every statement is IF NOT EXISTS, so reopening an existing file is safe
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Underlying connection, for inspecting or hand-editing rows outside
    /// the [`RecordStore`] interface.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl RecordStore for Database {
    fn read_all(&self, table: Table) -> StoreResult<Vec<Row>> {
        let columns = table.columns();
        let sql = format!(
            "SELECT {} FROM {} ORDER BY position",
            columns.join(", "),
            table.name()
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt.query_map([], |sql_row| {
            let mut row = Row::new();
            for (i, column) in columns.iter().enumerate() {
                row.insert(column.to_string(), sql_row.get::<_, String>(i)?);
            }
            Ok(row)
        })?;

        let rows = rows.collect::<Result<Vec<_>, _>>()?;
        debug!(table = table.name(), rows = rows.len(), "read table");
        Ok(rows)
    }

    fn write_all(&self, table: Table, rows: &[Row]) -> StoreResult<()> {
        let columns = table.columns();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let insert = format!(
            "INSERT INTO {} (position, {}) VALUES (?{}, {})",
            table.name(),
            columns.join(", "),
            columns.len() + 1,
            placeholders.join(", ")
        );

        // Dropping the transaction without commit rolls the delete back.
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(&format!("DELETE FROM {}", table.name()), [])?;
        {
            let mut stmt = tx.prepare(&insert)?;
            for (position, row) in rows.iter().enumerate() {
                let mut values = Vec::with_capacity(columns.len() + 1);
                for column in columns {
                    let value = row.get(*column).ok_or_else(|| StoreError::Malformed {
                        table: table.name(),
                        row: position,
                        field: column.to_string(),
                        reason: "is missing".into(),
                    })?;
                    values.push(Value::Text(value.clone()));
                }
                values.push(Value::Integer(position as i64));
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;

        debug!(table = table.name(), rows = rows.len(), "replaced table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(table: Table, values: &[&str]) -> Row {
        table
            .columns()
            .iter()
            .zip(values)
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        for table in Table::ALL {
            assert!(tables.contains(&table.name().to_string()));
        }
    }

    #[test]
    fn test_write_then_read_keeps_order() {
        let db = Database::open_in_memory().unwrap();
        let rows = vec![
            row(Table::Doctors, &["D002", "Dr. Budi", "Gigi", "drbudi"]),
            row(Table::Doctors, &["D001", "Dr. Andi", "Umum", "drandi"]),
        ];

        db.write_all(Table::Doctors, &rows).unwrap();
        assert_eq!(db.read_all(Table::Doctors).unwrap(), rows);

        // Second write replaces rather than appends
        db.write_all(Table::Doctors, &rows[..1]).unwrap();
        assert_eq!(db.read_all(Table::Doctors).unwrap(), rows[..1].to_vec());
    }

    #[test]
    fn test_failed_write_leaves_table_intact() {
        let db = Database::open_in_memory().unwrap();
        let original = vec![row(Table::Patients, &["P001", "Pasien Test", "pasien", "08123456789"])];
        db.write_all(Table::Patients, &original).unwrap();

        let mut broken = row(Table::Patients, &["P002", "Siti", "siti", "08987654321"]);
        broken.remove("contact");
        let result = db.write_all(Table::Patients, &[original[0].clone(), broken]);

        assert!(matches!(result, Err(StoreError::Malformed { row: 1, .. })));
        assert_eq!(db.read_all(Table::Patients).unwrap(), original);
    }

    #[test]
    fn test_empty_write_clears_table() {
        let db = Database::open_in_memory().unwrap();
        db.write_all(
            Table::Doctors,
            &[row(Table::Doctors, &["D001", "Dr. Andi", "Umum", "drandi"])],
        )
        .unwrap();

        db.write_all(Table::Doctors, &[]).unwrap();
        assert!(db.read_all(Table::Doctors).unwrap().is_empty());
    }
}

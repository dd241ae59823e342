//! Typed records over the flat tables.
//!
//! Rows are parsed here once; the rest of the crate only sees typed models.

use chrono::NaiveDate;

use super::{RecordStore, Row, StoreError, StoreResult, Table};
use crate::models::{
    format_clock_time, parse_clock_time, Doctor, Patient, Registration, RegistrationStatus,
    Schedule, Weekday, DATE_FORMAT, MAX_QUOTA,
};

/// A model persisted as one row of a [`Table`].
pub trait Record: Sized {
    const TABLE: Table;

    /// Flatten into string fields.
    fn to_row(&self) -> Row;

    /// Parse a stored row. `index` is the row's position, used in errors.
    fn from_row(row: &Row, index: usize) -> StoreResult<Self>;
}

/// Load and parse every record of `T`'s table.
pub fn load<T: Record>(store: &dyn RecordStore) -> StoreResult<Vec<T>> {
    store
        .read_all(T::TABLE)?
        .iter()
        .enumerate()
        .map(|(index, row)| T::from_row(row, index))
        .collect()
}

/// Replace `T`'s table with `records`.
pub fn save<T: Record>(store: &dyn RecordStore, records: &[T]) -> StoreResult<()> {
    let rows: Vec<Row> = records.iter().map(T::to_row).collect();
    store.write_all(T::TABLE, &rows)
}

/// Field accessor that reports where a row went wrong.
struct Fields<'a> {
    table: Table,
    row: &'a Row,
    index: usize,
}

impl<'a> Fields<'a> {
    fn new(table: Table, row: &'a Row, index: usize) -> Self {
        Self { table, row, index }
    }

    fn malformed(&self, field: &str, reason: impl Into<String>) -> StoreError {
        StoreError::Malformed {
            table: self.table.name(),
            row: self.index,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    fn text(&self, field: &str) -> StoreResult<String> {
        self.row
            .get(field)
            .cloned()
            .ok_or_else(|| self.malformed(field, "is missing"))
    }

    fn parse<T>(&self, field: &str, parse: impl FnOnce(&str) -> Option<T>) -> StoreResult<T> {
        let raw = self.text(field)?;
        parse(&raw).ok_or_else(|| self.malformed(field, format!("has unparsable value '{}'", raw)))
    }
}

fn row_of<const N: usize>(table: Table, values: [String; N]) -> Row {
    table
        .columns()
        .iter()
        .map(|c| c.to_string())
        .zip(values)
        .collect()
}

impl Record for Doctor {
    const TABLE: Table = Table::Doctors;

    fn to_row(&self) -> Row {
        row_of(
            Self::TABLE,
            [
                self.id.clone(),
                self.name.clone(),
                self.specialty.clone(),
                self.username.clone(),
            ],
        )
    }

    fn from_row(row: &Row, index: usize) -> StoreResult<Self> {
        let f = Fields::new(Self::TABLE, row, index);
        Ok(Doctor {
            id: f.text("id")?,
            name: f.text("name")?,
            specialty: f.text("specialty")?,
            username: f.text("username")?,
        })
    }
}

impl Record for Patient {
    const TABLE: Table = Table::Patients;

    fn to_row(&self) -> Row {
        row_of(
            Self::TABLE,
            [
                self.id.clone(),
                self.name.clone(),
                self.username.clone(),
                self.contact.clone(),
            ],
        )
    }

    fn from_row(row: &Row, index: usize) -> StoreResult<Self> {
        let f = Fields::new(Self::TABLE, row, index);
        Ok(Patient {
            id: f.text("id")?,
            name: f.text("name")?,
            username: f.text("username")?,
            contact: f.text("contact")?,
        })
    }
}

impl Record for Schedule {
    const TABLE: Table = Table::Schedules;

    fn to_row(&self) -> Row {
        row_of(
            Self::TABLE,
            [
                self.id.clone(),
                self.doctor_id.clone(),
                self.day.name().to_string(),
                format_clock_time(self.start),
                format_clock_time(self.end),
                self.quota.to_string(),
            ],
        )
    }

    fn from_row(row: &Row, index: usize) -> StoreResult<Self> {
        let f = Fields::new(Self::TABLE, row, index);
        Ok(Schedule {
            id: f.text("id")?,
            doctor_id: f.text("doctor_id")?,
            day: f.parse("day", Weekday::parse)?,
            start: f.parse("start_time", parse_clock_time)?,
            end: f.parse("end_time", parse_clock_time)?,
            quota: f.parse("quota", |raw| {
                raw.trim().parse().ok().filter(|q| (1..=MAX_QUOTA).contains(q))
            })?,
        })
    }
}

impl Record for Registration {
    const TABLE: Table = Table::Registrations;

    fn to_row(&self) -> Row {
        row_of(
            Self::TABLE,
            [
                self.id.clone(),
                self.patient_id.clone(),
                self.schedule_id.clone(),
                self.date.format(DATE_FORMAT).to_string(),
                self.status.as_str().to_string(),
                self.queue_number.to_string(),
            ],
        )
    }

    fn from_row(row: &Row, index: usize) -> StoreResult<Self> {
        let f = Fields::new(Self::TABLE, row, index);
        Ok(Registration {
            id: f.text("id")?,
            patient_id: f.text("patient_id")?,
            schedule_id: f.text("schedule_id")?,
            date: f.parse("date", |raw| NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok())?,
            status: f.parse("status", RegistrationStatus::parse)?,
            queue_number: f.parse("queue_number", |raw| raw.trim().parse().ok())?,
        })
    }
}

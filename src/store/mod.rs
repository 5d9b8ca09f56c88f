//! Appointment storage.
//!
//! The report talks to storage only through [`AppointmentStore`]; the
//! bundled implementation is [`SqliteStore`].

mod schema;
mod sqlite;

pub use schema::SCHEMA;
pub use sqlite::SqliteStore;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::model::AppointmentRow;
use crate::sql::{lit_str, table_col, Expr, ExprExt, Params, Query};

/// Reference doctype of notification rows that belong to an appointment.
pub const APPOINTMENT_DOCTYPE: &str = "Appointment";
pub const REMINDER_NOTIFICATION_TYPE: &str = "Appointment Reminder";
pub const REMINDER_NOTIFICATION_MEDIUM: &str = "SMS";

/// Restricts `notification_count` rows (under `alias`) to SMS appointment
/// reminders.
pub fn is_sms_reminder(alias: &str) -> Expr {
    table_col(alias, "reference_doctype")
        .eq(lit_str(APPOINTMENT_DOCTYPE))
        .and(table_col(alias, "notification_type").eq(lit_str(REMINDER_NOTIFICATION_TYPE)))
        .and(table_col(alias, "notification_medium").eq(lit_str(REMINDER_NOTIFICATION_MEDIUM)))
}

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database not found: {} (create it with `init-db`)", .0.display())]
    NotFound(PathBuf),

    #[error("query references parameter '{0}' but no value was bound")]
    UnboundParam(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to appointments and the records they link to.
pub trait AppointmentStore {
    /// Execute an appointment query, binding every placeholder it references
    /// from `params`.
    fn fetch_appointments(&self, query: &Query, params: &Params)
        -> StoreResult<Vec<AppointmentRow>>;

    /// Project linked to each of the given appointments, keyed by appointment.
    ///
    /// Appointments without a project are absent from the map.
    fn projects_for_appointments(
        &self,
        appointments: &[String],
    ) -> StoreResult<HashMap<String, String>>;

    /// Nested-set `(lft, rgt)` bounds of a sales person, if it exists.
    fn sales_person_range(&self, name: &str) -> StoreResult<Option<(i64, i64)>>;

    /// Submitted appointments on `date` that still need an SMS reminder:
    /// status in `statuses`, a mobile number on file and no reminder sent.
    fn appointments_due_for_reminder(
        &self,
        date: NaiveDate,
        statuses: &[String],
    ) -> StoreResult<HashSet<String>>;
}

impl<S: AppointmentStore + ?Sized> AppointmentStore for &S {
    fn fetch_appointments(
        &self,
        query: &Query,
        params: &Params,
    ) -> StoreResult<Vec<AppointmentRow>> {
        (**self).fetch_appointments(query, params)
    }

    fn projects_for_appointments(
        &self,
        appointments: &[String],
    ) -> StoreResult<HashMap<String, String>> {
        (**self).projects_for_appointments(appointments)
    }

    fn sales_person_range(&self, name: &str) -> StoreResult<Option<(i64, i64)>> {
        (**self).sales_person_range(name)
    }

    fn appointments_due_for_reminder(
        &self,
        date: NaiveDate,
        statuses: &[String],
    ) -> StoreResult<HashSet<String>> {
        (**self).appointments_due_for_reminder(date, statuses)
    }
}

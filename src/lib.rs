//! # Appointment Sheet
//!
//! A CRM report listing scheduled appointments with their project, contact
//! and reminder state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Filters (JSON / CLI)                   │
//! │  (company, date range, appointment type, sales person)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [report::predicate]
//! ┌─────────────────────────────────────────────────────────┐
//! │             SQL Query + bound Params (sql)               │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [store]
//! ┌─────────────────────────────────────────────────────────┐
//! │                   AppointmentRow list                    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [projects, reminder, format]
//! ┌─────────────────────────────────────────────────────────┐
//! │              ReportOutput (columns + rows)               │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod model;
pub mod reminder;
pub mod report;
pub mod sql;
pub mod store;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::model::{AppointmentRow, ColumnDef, FieldType, Filters, ReportOutput};
    pub use crate::reminder::{NoReminders, ReminderService, ScheduledReminders};
    pub use crate::report::{execute, AppointmentSheet, Predicate, ReportError, ReportResult};
    pub use crate::sql::{Dialect, Params, Query};
    pub use crate::store::{AppointmentStore, SqliteStore};
}

// Also export at crate root for convenience
pub use model::{Filters, ReportOutput};
pub use report::{execute, AppointmentSheet, ReportError};

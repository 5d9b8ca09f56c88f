//! The appointment sheet report.
//!
//! A run goes through these phases:
//!
//! 1. Resolve filters (absent dates become today) into [`Predicate`]s
//! 2. Fetch submitted appointments with their latest SMS reminder
//! 3. Attach linked projects in one batch lookup
//! 4. Work out pending reminder send times and the reminder text
//! 5. Fill in contact, item and formatted date fields
//!
//! The result is the fixed [`columns`] layout plus one row per appointment.

mod columns;
mod error;
pub mod format;
mod predicate;
mod sheet;

pub use columns::columns;
pub use error::{ReportError, ReportResult};
pub use predicate::{build_appointment_query, predicates, Predicate};
pub use sheet::{appointment_query, AppointmentSheet};

use crate::model::{Filters, ReportOutput};
use crate::reminder::ReminderService;
use crate::store::AppointmentStore;

/// Run the sheet for filters given as a JSON object.
///
/// An empty or whitespace-only string means no filters.
pub fn execute<S, R>(store: S, reminders: R, filters: &str) -> ReportResult<ReportOutput>
where
    S: AppointmentStore,
    R: ReminderService,
{
    let filters = if filters.trim().is_empty() {
        Filters::default()
    } else {
        Filters::from_json(filters)?
    };
    AppointmentSheet::new(store, reminders).run(&filters)
}

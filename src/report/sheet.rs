//! The appointment sheet run.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use super::columns::columns;
use super::error::{ReportError, ReportResult};
use super::format::{contact_number, format_datetime, format_time, non_empty, reminder_text};
use super::predicate::{build_appointment_query, predicates};
use crate::model::{AppointmentRow, Filters, ReportOutput};
use crate::reminder::ReminderService;
use crate::sql::{Params, Query};
use crate::store::AppointmentStore;

/// Builds the appointment sheet from a store and a reminder schedule.
pub struct AppointmentSheet<S, R> {
    store: S,
    reminders: R,
}

impl<S: AppointmentStore, R: ReminderService> AppointmentSheet<S, R> {
    pub fn new(store: S, reminders: R) -> Self {
        Self { store, reminders }
    }

    /// Run the report as of the local wall clock.
    pub fn run(&self, filters: &Filters) -> ReportResult<ReportOutput> {
        self.run_at(filters, Local::now().naive_local())
    }

    /// Run the report as of `now`.
    ///
    /// `now` supplies the default date range and decides which appointments
    /// are still in the future for reminder scheduling.
    pub fn run_at(&self, filters: &Filters, now: NaiveDateTime) -> ReportResult<ReportOutput> {
        let (query, params) = self.query_for(filters, now.date())?;

        let mut rows = self.store.fetch_appointments(&query, &params)?;
        info!(rows = rows.len(), "fetched appointments");

        self.attach_projects(&mut rows)?;
        self.attach_reminders(&mut rows, now)?;
        for row in &mut rows {
            finish_row(row);
        }

        Ok(ReportOutput {
            columns: columns(),
            rows,
        })
    }

    /// The appointment query and its bound values for `filters`.
    ///
    /// Resolves the sales person filter against the hierarchy, so an unknown
    /// sales person is reported here.
    pub fn query_for(&self, filters: &Filters, today: NaiveDate) -> ReportResult<(Query, Params)> {
        appointment_query(filters, today, || Ok(&self.store))
    }

    fn attach_projects(&self, rows: &mut [AppointmentRow]) -> ReportResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let names: Vec<String> = rows.iter().map(|r| r.appointment.clone()).collect();
        let projects = self.store.projects_for_appointments(&names)?;
        debug!(projects = projects.len(), "linked projects");

        for row in rows.iter_mut() {
            row.project = projects.get(&row.appointment).cloned();
        }
        Ok(())
    }

    fn attach_reminders(&self, rows: &mut [AppointmentRow], now: NaiveDateTime) -> ReportResult<()> {
        if !self.reminders.automated_reminders_enabled() {
            debug!("automated reminders disabled");
        } else {
            let pending: BTreeSet<NaiveDate> = rows
                .iter()
                .filter(|r| r.scheduled_dt > now && r.last_sent_dt.is_none())
                .map(|r| r.scheduled_date)
                .collect();

            for appointment_date in pending {
                let reminder_date = self.reminders.reminder_date_for(appointment_date)?;
                let send_at = self.reminders.scheduled_send_time(reminder_date)?;
                let batch = self.reminders.appointments_for_reminder(reminder_date)?;
                debug!(
                    %appointment_date,
                    %reminder_date,
                    batch = batch.len(),
                    "reminder batch"
                );

                for row in rows.iter_mut() {
                    if batch.contains(&row.appointment) {
                        row.scheduled_reminder_dt = Some(send_at);
                    }
                }
            }
        }

        for row in rows.iter_mut() {
            row.reminder = reminder_text(row.last_sent_dt, row.scheduled_reminder_dt);
        }
        Ok(())
    }
}

/// The appointment query and its bound values for `filters`.
///
/// `hierarchy` is only called when a sales person filter is set; it supplies
/// the store that sales person is looked up in.
pub fn appointment_query<S, F>(
    filters: &Filters,
    today: NaiveDate,
    hierarchy: F,
) -> ReportResult<(Query, Params)>
where
    S: AppointmentStore,
    F: FnOnce() -> ReportResult<S>,
{
    let resolved = filters.resolve(today);

    let range = match &resolved.sales_person {
        Some(name) => Some(
            hierarchy()?
                .sales_person_range(name)?
                .ok_or_else(|| ReportError::UnknownSalesPerson(name.clone()))?,
        ),
        None => None,
    };

    let (query, params) = build_appointment_query(&predicates(&resolved, range));
    debug!(
        from_date = %resolved.from_date,
        to_date = %resolved.to_date,
        params = params.len(),
        "built appointment query"
    );
    Ok((query, params))
}

/// Derived contact, item and display fields.
fn finish_row(row: &mut AppointmentRow) {
    row.contact_number = contact_number(row.contact_mobile.as_deref(), row.contact_phone.as_deref());

    if non_empty(row.applies_to_variant_of_name.as_deref()).is_none() {
        row.applies_to_variant_of_name = row.applies_to_item_name.clone();
    }

    row.scheduled_dt_fmt = Some(format_datetime(row.scheduled_dt));
    row.scheduled_time_fmt = Some(format_time(row.scheduled_time));
    row.confirmation_dt_fmt = row.confirmation_dt.map(format_datetime);
}

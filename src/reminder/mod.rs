//! Automated appointment reminders.
//!
//! The report only asks *when* a pending reminder will go out; sending is
//! handled elsewhere. [`ScheduledReminders`] derives the schedule from
//! [`ReminderSettings`] and the appointment store.

use std::collections::HashSet;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::{ReminderSettings, SettingsError};
use crate::store::{AppointmentStore, StoreError};

/// Errors raised while computing a reminder schedule.
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error("reminder store lookup failed: {0}")]
    Store(#[from] StoreError),

    #[error("invalid reminder settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("reminder date for {0} is out of range")]
    DateOutOfRange(NaiveDate),
}

pub type ReminderResult<T> = Result<T, ReminderError>;

/// Source of reminder schedule information.
pub trait ReminderService {
    /// Whether automated reminders are sent at all.
    fn automated_reminders_enabled(&self) -> bool;

    /// Date on which the reminder for an appointment on `appointment_date`
    /// is sent.
    fn reminder_date_for(&self, appointment_date: NaiveDate) -> ReminderResult<NaiveDate>;

    /// When the reminder batch for `reminder_date` goes out.
    fn scheduled_send_time(&self, reminder_date: NaiveDate) -> ReminderResult<NaiveDateTime>;

    /// Appointments included in the batch sent on `reminder_date`.
    fn appointments_for_reminder(&self, reminder_date: NaiveDate)
        -> ReminderResult<HashSet<String>>;
}

impl<R: ReminderService + ?Sized> ReminderService for &R {
    fn automated_reminders_enabled(&self) -> bool {
        (**self).automated_reminders_enabled()
    }

    fn reminder_date_for(&self, appointment_date: NaiveDate) -> ReminderResult<NaiveDate> {
        (**self).reminder_date_for(appointment_date)
    }

    fn scheduled_send_time(&self, reminder_date: NaiveDate) -> ReminderResult<NaiveDateTime> {
        (**self).scheduled_send_time(reminder_date)
    }

    fn appointments_for_reminder(
        &self,
        reminder_date: NaiveDate,
    ) -> ReminderResult<HashSet<String>> {
        (**self).appointments_for_reminder(reminder_date)
    }
}

/// Reminders switched off: every query reports nothing scheduled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReminders;

impl ReminderService for NoReminders {
    fn automated_reminders_enabled(&self) -> bool {
        false
    }

    fn reminder_date_for(&self, appointment_date: NaiveDate) -> ReminderResult<NaiveDate> {
        Ok(appointment_date)
    }

    fn scheduled_send_time(&self, reminder_date: NaiveDate) -> ReminderResult<NaiveDateTime> {
        Ok(reminder_date.and_time(NaiveTime::MIN))
    }

    fn appointments_for_reminder(
        &self,
        _reminder_date: NaiveDate,
    ) -> ReminderResult<HashSet<String>> {
        Ok(HashSet::new())
    }
}

/// Daily SMS batch: reminders go out `lead_days` before the appointment at
/// a fixed time of day.
#[derive(Debug, Clone)]
pub struct ScheduledReminders<S> {
    store: S,
    enabled: bool,
    lead_days: u32,
    send_time: NaiveTime,
    statuses: Vec<String>,
}

impl<S: AppointmentStore> ScheduledReminders<S> {
    pub fn new(store: S, lead_days: u32, send_time: NaiveTime, statuses: Vec<String>) -> Self {
        Self {
            store,
            enabled: true,
            lead_days,
            send_time,
            statuses,
        }
    }

    /// Build from the `[reminders]` settings table.
    pub fn from_settings(store: S, settings: &ReminderSettings) -> ReminderResult<Self> {
        Ok(Self::new(
            store,
            settings.lead_days,
            settings.send_time()?,
            settings.remindable_statuses.clone(),
        )
        .with_enabled(settings.enabled))
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl<S: AppointmentStore> ReminderService for ScheduledReminders<S> {
    fn automated_reminders_enabled(&self) -> bool {
        self.enabled
    }

    fn reminder_date_for(&self, appointment_date: NaiveDate) -> ReminderResult<NaiveDate> {
        appointment_date
            .checked_sub_days(Days::new(self.lead_days.into()))
            .ok_or(ReminderError::DateOutOfRange(appointment_date))
    }

    fn scheduled_send_time(&self, reminder_date: NaiveDate) -> ReminderResult<NaiveDateTime> {
        Ok(reminder_date.and_time(self.send_time))
    }

    fn appointments_for_reminder(
        &self,
        reminder_date: NaiveDate,
    ) -> ReminderResult<HashSet<String>> {
        let appointment_date = reminder_date
            .checked_add_days(Days::new(self.lead_days.into()))
            .ok_or(ReminderError::DateOutOfRange(reminder_date))?;
        Ok(self
            .store
            .appointments_due_for_reminder(appointment_date, &self.statuses)?)
    }
}

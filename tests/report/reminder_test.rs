mod fixtures;

use std::cell::RefCell;
use std::collections::HashSet;

use appointment_sheet::config::ReminderSettings;
use appointment_sheet::model::{AppointmentRow, Filters};
use appointment_sheet::reminder::{ReminderResult, ReminderService, ScheduledReminders};
use appointment_sheet::report::AppointmentSheet;
use chrono::{Days, NaiveDate, NaiveDateTime};
use fixtures::{appointment, at, date, notification, store};

/// Reminder service with a fixed batch that records the dates it is asked about.
struct FixedBatch {
    enabled: bool,
    send_at: NaiveDateTime,
    batch: HashSet<String>,
    asked: RefCell<Vec<NaiveDate>>,
}

impl FixedBatch {
    fn new(send_at: NaiveDateTime, batch: &[&str]) -> Self {
        Self {
            enabled: true,
            send_at,
            batch: batch.iter().map(|s| s.to_string()).collect(),
            asked: RefCell::new(Vec::new()),
        }
    }

    fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl ReminderService for FixedBatch {
    fn automated_reminders_enabled(&self) -> bool {
        self.enabled
    }

    fn reminder_date_for(&self, appointment_date: NaiveDate) -> ReminderResult<NaiveDate> {
        self.asked.borrow_mut().push(appointment_date);
        Ok(appointment_date - Days::new(1))
    }

    fn scheduled_send_time(&self, _reminder_date: NaiveDate) -> ReminderResult<NaiveDateTime> {
        Ok(self.send_at)
    }

    fn appointments_for_reminder(
        &self,
        _reminder_date: NaiveDate,
    ) -> ReminderResult<HashSet<String>> {
        Ok(self.batch.clone())
    }
}

fn march() -> Filters {
    Filters::new()
        .with_from_date(date(2024, 3, 1))
        .with_to_date(date(2024, 3, 31))
}

fn reminder_of<'a>(rows: &'a [AppointmentRow], name: &str) -> Option<&'a str> {
    rows.iter()
        .find(|r| r.appointment == name)
        .and_then(|r| r.reminder.as_deref())
}

#[test]
fn test_scheduled_reminder_for_pending_appointment() {
    let store = store();
    appointment(&store, "APT-1", "2024-03-20 10:00:00", &[]);
    appointment(&store, "APT-2", "2024-03-20 11:00:00", &[]);

    let reminders = FixedBatch::new(at(2024, 3, 19, 9, 0), &["APT-1"]);
    let sheet = AppointmentSheet::new(&store, reminders);
    let rows = sheet.run_at(&march(), at(2024, 3, 15, 12, 0)).unwrap().rows;

    assert_eq!(
        reminder_of(&rows, "APT-1"),
        Some("Scheduled: 19/03/2024, 09:00 AM")
    );
    assert_eq!(rows[0].scheduled_reminder_dt, Some(at(2024, 3, 19, 9, 0)));
    assert_eq!(reminder_of(&rows, "APT-2"), None);
}

#[test]
fn test_last_sent_wins_over_scheduled() {
    let store = store();
    appointment(&store, "APT-1", "2024-03-20 10:00:00", &[]);
    notification(&store, "APT-1", "SMS", "2024-03-14 09:00:00");

    let reminders = FixedBatch::new(at(2024, 3, 19, 9, 0), &["APT-1"]);
    let rows = AppointmentSheet::new(&store, reminders)
        .run_at(&march(), at(2024, 3, 15, 12, 0))
        .unwrap()
        .rows;

    assert_eq!(
        reminder_of(&rows, "APT-1"),
        Some("Last Sent: 14/03/2024, 09:00 AM")
    );
}

#[test]
fn test_only_future_unsent_dates_are_scheduled() {
    let store = store();
    appointment(&store, "APT-PAST", "2024-03-10 10:00:00", &[]);
    appointment(&store, "APT-EARLIER-TODAY", "2024-03-15 09:00:00", &[]);
    appointment(&store, "APT-SENT", "2024-03-18 10:00:00", &[]);
    appointment(&store, "APT-A", "2024-03-20 10:00:00", &[]);
    appointment(&store, "APT-B", "2024-03-20 15:00:00", &[]);
    appointment(&store, "APT-C", "2024-03-22 10:00:00", &[]);
    notification(&store, "APT-SENT", "SMS", "2024-03-14 09:00:00");

    let reminders = FixedBatch::new(at(2024, 3, 19, 9, 0), &[]);
    let sheet = AppointmentSheet::new(&store, &reminders);
    sheet.run_at(&march(), at(2024, 3, 15, 12, 0)).unwrap();

    assert_eq!(
        *reminders.asked.borrow(),
        vec![date(2024, 3, 20), date(2024, 3, 22)]
    );
}

#[test]
fn test_disabled_reminders_still_show_last_sent() {
    let store = store();
    appointment(&store, "APT-1", "2024-03-20 10:00:00", &[]);
    appointment(&store, "APT-2", "2024-03-21 10:00:00", &[]);
    notification(&store, "APT-2", "SMS", "2024-03-14 09:00:00");

    let reminders = FixedBatch::new(at(2024, 3, 19, 9, 0), &["APT-1"]).disabled();
    let sheet = AppointmentSheet::new(&store, &reminders);
    let rows = sheet.run_at(&march(), at(2024, 3, 15, 12, 0)).unwrap().rows;

    assert!(reminders.asked.borrow().is_empty());
    assert_eq!(reminder_of(&rows, "APT-1"), None);
    assert_eq!(
        reminder_of(&rows, "APT-2"),
        Some("Last Sent: 14/03/2024, 09:00 AM")
    );
}

#[test]
fn test_scheduled_reminders_from_settings() {
    let store = store();
    appointment(
        &store,
        "APT-OPEN",
        "2024-03-16 10:00:00",
        &[("status", "Open"), ("contact_mobile", "0300-1234567")],
    );
    appointment(
        &store,
        "APT-CANCELLED",
        "2024-03-16 11:00:00",
        &[("status", "Cancelled"), ("contact_mobile", "0300-7654321")],
    );
    appointment(
        &store,
        "APT-NO-MOBILE",
        "2024-03-16 12:00:00",
        &[("status", "Open"), ("contact_phone", "042-111")],
    );

    let settings = ReminderSettings {
        enabled: true,
        lead_days: 1,
        send_time: "09:00".into(),
        remindable_statuses: vec!["Open".into(), "Confirmed".into()],
    };
    let reminders = ScheduledReminders::from_settings(&store, &settings).unwrap();
    let rows = AppointmentSheet::new(&store, reminders)
        .run_at(&march(), at(2024, 3, 14, 12, 0))
        .unwrap()
        .rows;

    assert_eq!(
        reminder_of(&rows, "APT-OPEN"),
        Some("Scheduled: 15/03/2024, 09:00 AM")
    );
    assert_eq!(reminder_of(&rows, "APT-CANCELLED"), None);
    assert_eq!(reminder_of(&rows, "APT-NO-MOBILE"), None);
}

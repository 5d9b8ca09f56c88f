#![allow(dead_code)]

use appointment_sheet::store::SqliteStore;
use chrono::{NaiveDate, NaiveDateTime};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

pub fn store() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

/// Insert a submitted appointment scheduled at `scheduled` (`YYYY-MM-DD HH:MM:SS`).
///
/// `fields` sets or overrides any other column, e.g. `("docstatus", "0")`.
pub fn appointment(store: &SqliteStore, name: &str, scheduled: &str, fields: &[(&str, &str)]) {
    let mut columns: Vec<(String, String)> = vec![
        ("name".into(), name.into()),
        ("docstatus".into(), "1".into()),
        ("scheduled_dt".into(), scheduled.into()),
        ("scheduled_date".into(), scheduled[..10].into()),
        ("creation".into(), "2023-12-01 00:00:00".into()),
    ];
    for (column, value) in fields {
        match columns.iter_mut().find(|(c, _)| c == column) {
            Some((_, existing)) => *existing = value.to_string(),
            None => columns.push((column.to_string(), value.to_string())),
        }
    }

    let names: Vec<&str> = columns.iter().map(|(c, _)| c.as_str()).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO appointment ({}) VALUES ({})",
        names.join(", "),
        placeholders
    );
    store
        .connection()
        .execute(
            &sql,
            rusqlite::params_from_iter(columns.iter().map(|(_, v)| v.as_str())),
        )
        .unwrap();
}

/// Record a notification sent for an appointment.
pub fn notification(store: &SqliteStore, appointment: &str, medium: &str, last_sent: &str) {
    store
        .connection()
        .execute(
            "INSERT INTO notification_count
                 (reference_doctype, reference_name, notification_type, notification_medium, count, last_sent_dt)
             VALUES ('Appointment', ?1, 'Appointment Reminder', ?2, 1, ?3)",
            rusqlite::params![appointment, medium, last_sent],
        )
        .unwrap();
}

pub fn project(store: &SqliteStore, name: &str, appointment: &str) {
    store
        .connection()
        .execute(
            "INSERT INTO project (name, appointment) VALUES (?1, ?2)",
            rusqlite::params![name, appointment],
        )
        .unwrap();
}

/// Sales team tree:
///
/// ```text
/// All Sales (1, 10)
/// ├── North (2, 5)
/// │   └── North East (3, 4)
/// └── South (6, 9)
///     └── South West (7, 8)
/// ```
pub fn sales_team(store: &SqliteStore) {
    store
        .connection()
        .execute_batch(
            "INSERT INTO sales_person (name, parent_sales_person, lft, rgt) VALUES ('All Sales', NULL, 1, 10);
             INSERT INTO sales_person (name, parent_sales_person, lft, rgt) VALUES ('North', 'All Sales', 2, 5);
             INSERT INTO sales_person (name, parent_sales_person, lft, rgt) VALUES ('North East', 'North', 3, 4);
             INSERT INTO sales_person (name, parent_sales_person, lft, rgt) VALUES ('South', 'All Sales', 6, 9);
             INSERT INTO sales_person (name, parent_sales_person, lft, rgt) VALUES ('South West', 'South', 7, 8);",
        )
        .unwrap();
}

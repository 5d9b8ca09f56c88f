mod fixtures;

use appointment_sheet::model::Filters;
use appointment_sheet::reminder::NoReminders;
use appointment_sheet::report::{execute, AppointmentSheet, ReportError};
use appointment_sheet::store::SqliteStore;
use fixtures::{appointment, at, date, notification, project, sales_team, store};

fn names(store: &SqliteStore, filters: &Filters) -> Vec<String> {
    AppointmentSheet::new(store, NoReminders)
        .run_at(filters, at(2024, 3, 15, 12, 0))
        .unwrap()
        .rows
        .into_iter()
        .map(|r| r.appointment)
        .collect()
}

fn january() -> Filters {
    Filters::new()
        .with_from_date(date(2024, 1, 1))
        .with_to_date(date(2024, 1, 31))
}

#[test]
fn test_january_demos_in_schedule_order() {
    let store = store();
    appointment(&store, "APT-010", "2024-01-10 10:00:00", &[("appointment_type", "Demo")]);
    appointment(
        &store,
        "APT-005B",
        "2024-01-05 15:00:00",
        &[("appointment_type", "Demo"), ("creation", "2023-12-20 00:00:00")],
    );
    appointment(
        &store,
        "APT-005A",
        "2024-01-05 15:00:00",
        &[("appointment_type", "Demo"), ("creation", "2023-12-10 00:00:00")],
    );
    appointment(&store, "APT-007", "2024-01-07 09:00:00", &[("appointment_type", "Test Drive")]);
    appointment(&store, "APT-FEB", "2024-02-01 09:00:00", &[("appointment_type", "Demo")]);
    appointment(&store, "APT-DEC", "2023-12-31 23:00:00", &[("appointment_type", "Demo")]);
    appointment(
        &store,
        "APT-DRAFT",
        "2024-01-20 09:00:00",
        &[("appointment_type", "Demo"), ("docstatus", "0")],
    );

    let filters = january().with_appointment_type("Demo");
    assert_eq!(names(&store, &filters), vec!["APT-005A", "APT-005B", "APT-010"]);
}

#[test]
fn test_date_range_is_inclusive() {
    let store = store();
    appointment(&store, "APT-FIRST", "2024-01-01 00:00:00", &[]);
    appointment(&store, "APT-LAST", "2024-01-31 23:59:00", &[]);
    appointment(&store, "APT-AFTER", "2024-02-01 00:00:00", &[]);

    assert_eq!(names(&store, &january()), vec!["APT-FIRST", "APT-LAST"]);
}

#[test]
fn test_shown_date_is_the_filtered_date() {
    let store = store();
    appointment(
        &store,
        "APT-LATE",
        "2024-01-09 23:30:00",
        &[("scheduled_date", "2024-01-10")],
    );

    let filters = Filters::new()
        .with_from_date(date(2024, 1, 10))
        .with_to_date(date(2024, 1, 10));
    let rows = AppointmentSheet::new(&store, NoReminders)
        .run_at(&filters, at(2024, 3, 15, 12, 0))
        .unwrap()
        .rows;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].scheduled_date, date(2024, 1, 10));
    assert_eq!(rows[0].display_value("scheduled_date").as_deref(), Some("10/01/2024"));
}

#[test]
fn test_dates_default_to_today() {
    let store = store();
    appointment(&store, "APT-TODAY", "2024-03-15 16:00:00", &[]);
    appointment(&store, "APT-TOMORROW", "2024-03-16 09:00:00", &[]);

    assert_eq!(names(&store, &Filters::new()), vec!["APT-TODAY"]);
}

#[test]
fn test_inverted_range_is_empty() {
    let store = store();
    appointment(&store, "APT-1", "2024-01-15 10:00:00", &[]);

    let filters = Filters::new()
        .with_from_date(date(2024, 1, 31))
        .with_to_date(date(2024, 1, 1));
    assert!(names(&store, &filters).is_empty());
}

#[test]
fn test_company_filter() {
    let store = store();
    appointment(&store, "APT-ACME", "2024-01-15 10:00:00", &[("company", "Acme")]);
    appointment(&store, "APT-GLOBEX", "2024-01-15 11:00:00", &[("company", "Globex")]);

    assert_eq!(names(&store, &january().with_company("Acme")), vec!["APT-ACME"]);
    assert_eq!(names(&store, &january().with_company("")).len(), 2);
}

#[test]
fn test_company_matched_exactly_as_given() {
    let store = store();
    appointment(&store, "APT-PADDED", "2024-01-15 10:00:00", &[("company", "Acme ")]);
    appointment(&store, "APT-PLAIN", "2024-01-15 11:00:00", &[("company", "Acme")]);

    assert_eq!(names(&store, &january().with_company("Acme ")), vec!["APT-PADDED"]);
    assert_eq!(names(&store, &january().with_company("Acme")), vec!["APT-PLAIN"]);
}

#[test]
fn test_sales_person_includes_descendants() {
    let store = store();
    sales_team(&store);
    appointment(&store, "APT-N", "2024-01-10 10:00:00", &[("sales_person", "North")]);
    appointment(&store, "APT-NE", "2024-01-11 10:00:00", &[("sales_person", "North East")]);
    appointment(&store, "APT-S", "2024-01-12 10:00:00", &[("sales_person", "South")]);
    appointment(&store, "APT-SW", "2024-01-13 10:00:00", &[("sales_person", "South West")]);
    appointment(&store, "APT-NONE", "2024-01-14 10:00:00", &[]);

    assert_eq!(
        names(&store, &january().with_sales_person("North")),
        vec!["APT-N", "APT-NE"]
    );
    assert_eq!(
        names(&store, &january().with_sales_person("South West")),
        vec!["APT-SW"]
    );
    assert_eq!(
        names(&store, &january().with_sales_person("All Sales")).len(),
        4
    );
}

#[test]
fn test_unknown_sales_person() {
    let store = store();
    sales_team(&store);

    let result = AppointmentSheet::new(&store, NoReminders)
        .run_at(&january().with_sales_person("East"), at(2024, 3, 15, 12, 0));
    assert!(matches!(result, Err(ReportError::UnknownSalesPerson(name)) if name == "East"));
}

#[test]
fn test_projects_attached_when_linked() {
    let store = store();
    appointment(&store, "APT-1", "2024-01-10 10:00:00", &[]);
    appointment(&store, "APT-2", "2024-01-11 10:00:00", &[]);
    project(&store, "PROJ-0001", "APT-1");

    let report = AppointmentSheet::new(&store, NoReminders)
        .run_at(&january(), at(2024, 3, 15, 12, 0))
        .unwrap();

    assert_eq!(report.rows[0].project.as_deref(), Some("PROJ-0001"));
    assert_eq!(report.rows[1].project, None);
}

#[test]
fn test_latest_sms_reminder_per_appointment() {
    let store = store();
    appointment(&store, "APT-1", "2024-01-10 10:00:00", &[]);
    appointment(&store, "APT-2", "2024-01-11 10:00:00", &[]);
    notification(&store, "APT-1", "SMS", "2024-01-08 09:00:00");
    notification(&store, "APT-1", "SMS", "2024-01-09 09:00:00");
    notification(&store, "APT-2", "Email", "2024-01-10 09:00:00");

    let report = AppointmentSheet::new(&store, NoReminders)
        .run_at(&january(), at(2024, 3, 15, 12, 0))
        .unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].last_sent_dt, Some(at(2024, 1, 9, 9, 0)));
    assert_eq!(
        report.rows[0].reminder.as_deref(),
        Some("Last Sent: 09/01/2024, 09:00 AM")
    );
    assert_eq!(report.rows[1].last_sent_dt, None);
    assert_eq!(report.rows[1].reminder, None);
}

#[test]
fn test_display_fields() {
    let store = store();
    appointment(
        &store,
        "APT-1",
        "2024-01-10 14:30:00",
        &[
            ("contact_mobile", "0300-1234567"),
            ("contact_phone", "042-111"),
            ("applies_to_item", "CIVIC-RS-WHT"),
            ("applies_to_item_name", "Civic RS White"),
            ("applies_to_variant_of_name", "Civic RS"),
            ("confirmation_dt", "2024-01-09 18:05:00"),
        ],
    );
    appointment(
        &store,
        "APT-2",
        "2024-01-11 09:00:00",
        &[
            ("contact_phone", "042-222"),
            ("applies_to_item", "CITY-1.5"),
            ("applies_to_item_name", "City 1.5"),
        ],
    );
    appointment(&store, "APT-3", "2024-01-12 09:00:00", &[]);

    let rows = AppointmentSheet::new(&store, NoReminders)
        .run_at(&january(), at(2024, 3, 15, 12, 0))
        .unwrap()
        .rows;

    assert_eq!(rows[0].contact_number.as_deref(), Some("0300-1234567"));
    assert_eq!(rows[0].applies_to_variant_of_name.as_deref(), Some("Civic RS"));
    assert_eq!(rows[0].scheduled_dt_fmt.as_deref(), Some("10/01/2024, 02:30 PM"));
    assert_eq!(rows[0].scheduled_time_fmt.as_deref(), Some("02:30 PM"));
    assert_eq!(
        rows[0].confirmation_dt_fmt.as_deref(),
        Some("09/01/2024, 06:05 PM")
    );

    assert_eq!(rows[1].contact_number.as_deref(), Some("042-222"));
    assert_eq!(rows[1].applies_to_variant_of_name.as_deref(), Some("City 1.5"));
    assert_eq!(rows[1].confirmation_dt_fmt, None);

    assert_eq!(rows[2].contact_number, None);
    assert_eq!(rows[2].applies_to_variant_of_name, None);
}

#[test]
fn test_empty_result_keeps_columns() {
    let store = store();

    let report = AppointmentSheet::new(&store, NoReminders)
        .run_at(&january(), at(2024, 3, 15, 12, 0))
        .unwrap();

    assert!(report.rows.is_empty());
    assert_eq!(report.columns.len(), 16);
    assert_eq!(report.columns[0].fieldname, "appointment");
}

#[test]
fn test_execute_with_json_filters() {
    let store = store();
    appointment(&store, "APT-1", "2024-01-10 10:00:00", &[("appointment_type", "Demo")]);
    appointment(&store, "APT-2", "2024-01-11 10:00:00", &[("appointment_type", "Service")]);

    let report = execute(
        &store,
        NoReminders,
        r#"{"from_date": "2024-01-01", "to_date": "2024-01-31", "appointment_type": "Demo"}"#,
    )
    .unwrap();
    assert_eq!(report.rows.len(), 1);

    assert!(matches!(
        execute(&store, NoReminders, r#"{"from_date": "yesterday"}"#),
        Err(ReportError::Json(_))
    ));
}

#[test]
fn test_output_serializes_rows_by_fieldname() {
    let store = store();
    appointment(
        &store,
        "APT-1",
        "2024-01-10 10:00:00",
        &[("party_name", "CUST-0001"), ("appointment_for", "Customer")],
    );

    let report = AppointmentSheet::new(&store, NoReminders)
        .run_at(&january(), at(2024, 3, 15, 12, 0))
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let row = &json["rows"][0];
    assert_eq!(row["appointment"], "APT-1");
    assert_eq!(row["party_name"], "CUST-0001");
    assert_eq!(row["scheduled_date"], "2024-01-10");
    assert_eq!(row["scheduled_time_fmt"], "10:00 AM");
    assert_eq!(json["columns"][3]["fieldtype"], "Dynamic Link");
}

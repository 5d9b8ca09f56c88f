//! The sheet's column layout.

use crate::model::ColumnDef;

const COLUMNS: [ColumnDef; 16] = [
    ColumnDef::link("Appointment", "appointment", "Appointment", 100),
    ColumnDef::date("Date", "scheduled_date", 80),
    ColumnDef::data("Time", "scheduled_time_fmt", 70),
    ColumnDef::dynamic_link("Party", "party_name", "appointment_for", 80),
    ColumnDef::data("Customer Name", "customer_name", 150),
    ColumnDef::data("Contact #", "contact_number", 100),
    ColumnDef::data("Item", "applies_to_variant_of_name", 120),
    ColumnDef::link("Item Code", "applies_to_item", "Item", 120),
    ColumnDef::data("Voice of Customer", "voice_of_customer", 200),
    ColumnDef::link("Sales Person", "sales_person", "Sales Person", 120),
    ColumnDef::data("Remarks", "remarks", 200).editable(),
    ColumnDef::data("Status", "status", 70),
    ColumnDef::link("Project", "project", "Project", 100),
    ColumnDef::data("Source", "appointment_source", 100),
    ColumnDef::data("Reminder", "reminder", 200),
    ColumnDef::data("Confirmation Time", "confirmation_dt_fmt", 140),
];

/// Columns in display order.
pub fn columns() -> Vec<ColumnDef> {
    COLUMNS.to_vec()
}

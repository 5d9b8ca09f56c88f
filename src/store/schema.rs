//! Table layout read by [`SqliteStore`](super::SqliteStore).
//!
//! Timestamps are ISO-8601 text (`YYYY-MM-DD HH:MM:SS`), dates `YYYY-MM-DD`.

/// DDL for every table the report reads.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS appointment (
    name TEXT PRIMARY KEY,
    docstatus INTEGER NOT NULL DEFAULT 0,
    company TEXT,
    appointment_type TEXT,
    appointment_source TEXT,
    sales_person TEXT,
    voice_of_customer TEXT,
    remarks TEXT,
    scheduled_dt TEXT NOT NULL,
    scheduled_date TEXT NOT NULL,
    appointment_duration INTEGER,
    end_dt TEXT,
    appointment_for TEXT,
    party_name TEXT,
    customer_name TEXT,
    contact_display TEXT,
    contact_mobile TEXT,
    contact_phone TEXT,
    contact_email TEXT,
    applies_to_variant_of TEXT,
    applies_to_variant_of_name TEXT,
    applies_to_item TEXT,
    applies_to_item_name TEXT,
    confirmation_dt TEXT,
    status TEXT,
    creation TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_appointment_scheduled_date
    ON appointment (scheduled_date);

CREATE TABLE IF NOT EXISTS notification_count (
    reference_doctype TEXT NOT NULL,
    reference_name TEXT NOT NULL,
    notification_type TEXT NOT NULL,
    notification_medium TEXT NOT NULL,
    count INTEGER NOT NULL DEFAULT 0,
    last_sent_dt TEXT
);

CREATE INDEX IF NOT EXISTS idx_notification_count_reference
    ON notification_count (reference_doctype, reference_name);

CREATE TABLE IF NOT EXISTS project (
    name TEXT PRIMARY KEY,
    appointment TEXT
);

CREATE TABLE IF NOT EXISTS sales_person (
    name TEXT PRIMARY KEY,
    parent_sales_person TEXT,
    lft INTEGER NOT NULL,
    rgt INTEGER NOT NULL
);
";

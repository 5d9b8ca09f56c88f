//! One appointment sheet row.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// A flattened appointment with its joined and derived fields.
///
/// Field names are the keys the report renderer looks up, so they double as
/// the `fieldname` of the column schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentRow {
    pub appointment: String,
    pub appointment_type: Option<String>,
    pub appointment_source: Option<String>,
    pub sales_person: Option<String>,

    pub voice_of_customer: Option<String>,
    pub remarks: Option<String>,

    pub scheduled_dt: NaiveDateTime,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    /// Minutes.
    pub appointment_duration: Option<i64>,
    pub end_dt: Option<NaiveDateTime>,

    pub appointment_for: Option<String>,
    pub party_name: Option<String>,
    pub customer_name: Option<String>,

    pub contact_display: Option<String>,
    pub contact_mobile: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,

    pub applies_to_variant_of: Option<String>,
    pub applies_to_variant_of_name: Option<String>,
    pub applies_to_item: Option<String>,
    pub applies_to_item_name: Option<String>,

    pub last_sent_dt: Option<NaiveDateTime>,
    pub confirmation_dt: Option<NaiveDateTime>,
    pub status: Option<String>,

    // Enrichment
    pub project: Option<String>,
    pub scheduled_reminder_dt: Option<NaiveDateTime>,

    // Display
    pub reminder: Option<String>,
    pub contact_number: Option<String>,
    pub scheduled_dt_fmt: Option<String>,
    pub scheduled_time_fmt: Option<String>,
    pub confirmation_dt_fmt: Option<String>,
}

impl AppointmentRow {
    /// A row with only its identity and schedule set.
    ///
    /// `scheduled_date` starts as the date of `scheduled_dt`; the store
    /// overwrites it with the stored date column.
    pub fn new(appointment: &str, scheduled_dt: NaiveDateTime) -> Self {
        Self {
            appointment: appointment.into(),
            appointment_type: None,
            appointment_source: None,
            sales_person: None,
            voice_of_customer: None,
            remarks: None,
            scheduled_dt,
            scheduled_date: scheduled_dt.date(),
            scheduled_time: scheduled_dt.time(),
            appointment_duration: None,
            end_dt: None,
            appointment_for: None,
            party_name: None,
            customer_name: None,
            contact_display: None,
            contact_mobile: None,
            contact_phone: None,
            contact_email: None,
            applies_to_variant_of: None,
            applies_to_variant_of_name: None,
            applies_to_item: None,
            applies_to_item_name: None,
            last_sent_dt: None,
            confirmation_dt: None,
            status: None,
            project: None,
            scheduled_reminder_dt: None,
            reminder: None,
            contact_number: None,
            scheduled_dt_fmt: None,
            scheduled_time_fmt: None,
            confirmation_dt_fmt: None,
        }
    }

    /// Value of a display column, formatted for plain-text output.
    ///
    /// Returns `None` for unknown field names and for unset values.
    pub fn display_value(&self, fieldname: &str) -> Option<String> {
        let text = |v: &Option<String>| v.clone();
        match fieldname {
            "appointment" => Some(self.appointment.clone()),
            "appointment_type" => text(&self.appointment_type),
            "appointment_source" => text(&self.appointment_source),
            "sales_person" => text(&self.sales_person),
            "voice_of_customer" => text(&self.voice_of_customer),
            "remarks" => text(&self.remarks),
            "scheduled_date" => Some(self.scheduled_date.format("%d/%m/%Y").to_string()),
            "scheduled_time_fmt" => text(&self.scheduled_time_fmt),
            "scheduled_dt_fmt" => text(&self.scheduled_dt_fmt),
            "appointment_for" => text(&self.appointment_for),
            "party_name" => text(&self.party_name),
            "customer_name" => text(&self.customer_name),
            "contact_number" => text(&self.contact_number),
            "applies_to_variant_of_name" => text(&self.applies_to_variant_of_name),
            "applies_to_item" => text(&self.applies_to_item),
            "status" => text(&self.status),
            "project" => text(&self.project),
            "reminder" => text(&self.reminder),
            "confirmation_dt_fmt" => text(&self.confirmation_dt_fmt),
            _ => None,
        }
    }
}

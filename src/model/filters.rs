//! Report filters as supplied by the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional report filters.
///
/// Blank strings count as absent, matching how the reporting UI sends
/// cleared filter fields. Other values are used exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_person: Option<String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse filters from a JSON object such as
    /// `{"from_date": "2024-01-01", "appointment_type": "Demo"}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_from_date(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    pub fn with_to_date(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    pub fn with_appointment_type(mut self, appointment_type: &str) -> Self {
        self.appointment_type = Some(appointment_type.into());
        self
    }

    pub fn with_sales_person(mut self, sales_person: &str) -> Self {
        self.sales_person = Some(sales_person.into());
        self
    }

    /// Fill in absent dates with `today` and drop blank text values.
    pub fn resolve(&self, today: NaiveDate) -> ResolvedFilters {
        ResolvedFilters {
            company: present(&self.company),
            from_date: self.from_date.unwrap_or(today),
            to_date: self.to_date.unwrap_or(today),
            appointment_type: present(&self.appointment_type),
            sales_person: present(&self.sales_person),
        }
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

/// Filters after defaulting; the date range is always bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilters {
    pub company: Option<String>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub appointment_type: Option<String>,
    pub sales_person: Option<String>,
}

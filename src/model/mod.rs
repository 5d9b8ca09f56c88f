//! Report data types: filters in, columns and rows out.

mod column;
mod filters;
mod row;

pub use column::{ColumnDef, FieldType};
pub use filters::{Filters, ResolvedFilters};
pub use row::AppointmentRow;

use serde::Serialize;

/// The report result: a fixed column schema plus the rows it describes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOutput {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<AppointmentRow>,
}

impl ReportOutput {
    pub fn into_parts(self) -> (Vec<ColumnDef>, Vec<AppointmentRow>) {
        (self.columns, self.rows)
    }
}

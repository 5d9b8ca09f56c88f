//! Column descriptors consumed by the tabular report renderer.

use serde::Serialize;

/// How the renderer displays a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// Link to a record of the entity named in `options`.
    Link,
    /// Link whose entity type is read from the row field named in `options`.
    #[serde(rename = "Dynamic Link")]
    DynamicLink,
    Date,
    Data,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Link => "Link",
            FieldType::DynamicLink => "Dynamic Link",
            FieldType::Date => "Date",
            FieldType::Data => "Data",
        }
    }
}

/// One column of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub label: &'static str,
    pub fieldname: &'static str,
    pub fieldtype: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static str>,
    pub width: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub editable: bool,
}

impl ColumnDef {
    pub const fn data(label: &'static str, fieldname: &'static str, width: u32) -> Self {
        Self {
            label,
            fieldname,
            fieldtype: FieldType::Data,
            options: None,
            width,
            editable: false,
        }
    }

    pub const fn date(label: &'static str, fieldname: &'static str, width: u32) -> Self {
        Self {
            label,
            fieldname,
            fieldtype: FieldType::Date,
            options: None,
            width,
            editable: false,
        }
    }

    pub const fn link(
        label: &'static str,
        fieldname: &'static str,
        target: &'static str,
        width: u32,
    ) -> Self {
        Self {
            label,
            fieldname,
            fieldtype: FieldType::Link,
            options: Some(target),
            width,
            editable: false,
        }
    }

    /// `type_field` names the row field holding the linked entity type.
    pub const fn dynamic_link(
        label: &'static str,
        fieldname: &'static str,
        type_field: &'static str,
        width: u32,
    ) -> Self {
        Self {
            label,
            fieldname,
            fieldtype: FieldType::DynamicLink,
            options: Some(type_field),
            width,
            editable: false,
        }
    }

    pub const fn editable(mut self) -> Self {
        self.editable = true;
        self
    }
}

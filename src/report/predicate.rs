//! Optional report conditions and the appointment query they narrow.

use chrono::NaiveDate;

use crate::model::ResolvedFilters;
use crate::sql::{
    lit_int, max, param, table_col, Expr, ExprExt, OrderByExpr, Params, Query, SelectExpr,
    TableRef,
};
use crate::store::is_sms_reminder;

/// Alias of the `appointment` table in the report query.
const APPOINTMENT: &str = "a";
/// Alias of the `notification_count` table in the report query.
const NOTIFICATION: &str = "n";

/// Appointment columns selected under their own name.
const APPOINTMENT_FIELDS: &[&str] = &[
    "appointment_type",
    "appointment_source",
    "sales_person",
    "voice_of_customer",
    "remarks",
    "scheduled_dt",
    "scheduled_date",
    "appointment_duration",
    "end_dt",
    "appointment_for",
    "party_name",
    "customer_name",
    "contact_display",
    "contact_mobile",
    "contact_phone",
    "contact_email",
    "applies_to_variant_of",
    "applies_to_variant_of_name",
    "applies_to_item",
    "applies_to_item_name",
];

/// One optional condition on the appointment query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Company(String),
    /// Scheduled on or after the date.
    FromDate(NaiveDate),
    /// Scheduled on or before the date.
    ToDate(NaiveDate),
    AppointmentType(String),
    /// Assigned to a sales person inside the nested-set range `[lft, rgt]`.
    SalesPersonWithin { lft: i64, rgt: i64 },
}

impl Predicate {
    /// The condition, referring to its values through bind parameters.
    pub fn to_expr(&self) -> Expr {
        let a = |column: &str| table_col(APPOINTMENT, column);
        match self {
            Predicate::Company(_) => a("company").eq(param("company")),
            Predicate::FromDate(_) => a("scheduled_date").gte(param("from_date")),
            Predicate::ToDate(_) => a("scheduled_date").lte(param("to_date")),
            Predicate::AppointmentType(_) => a("appointment_type").eq(param("appointment_type")),
            Predicate::SalesPersonWithin { .. } => {
                let subtree = Query::new()
                    .select(vec![table_col("sp", "name").alias("name")])
                    .from(TableRef::new("sales_person").with_alias("sp"))
                    .filter(table_col("sp", "lft").gte(param("lft")))
                    .filter(table_col("sp", "rgt").lte(param("rgt")));
                a("sales_person").in_subquery(subtree)
            }
        }
    }

    /// Bind the values the condition refers to.
    pub fn bind(&self, params: &mut Params) {
        match self {
            Predicate::Company(company) => {
                params.bind("company", company.as_str());
            }
            Predicate::FromDate(date) => {
                params.bind("from_date", *date);
            }
            Predicate::ToDate(date) => {
                params.bind("to_date", *date);
            }
            Predicate::AppointmentType(appointment_type) => {
                params.bind("appointment_type", appointment_type.as_str());
            }
            Predicate::SalesPersonWithin { lft, rgt } => {
                params.bind("lft", *lft).bind("rgt", *rgt);
            }
        }
    }
}

/// Conditions for a set of filters, in a fixed order.
///
/// `sales_person_range` is the resolved hierarchy range of
/// `filters.sales_person`; it is ignored when no sales person is set.
pub fn predicates(
    filters: &ResolvedFilters,
    sales_person_range: Option<(i64, i64)>,
) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if let Some(company) = &filters.company {
        predicates.push(Predicate::Company(company.clone()));
    }
    predicates.push(Predicate::FromDate(filters.from_date));
    predicates.push(Predicate::ToDate(filters.to_date));
    if let Some(appointment_type) = &filters.appointment_type {
        predicates.push(Predicate::AppointmentType(appointment_type.clone()));
    }
    if let (Some(_), Some((lft, rgt))) = (&filters.sales_person, sales_person_range) {
        predicates.push(Predicate::SalesPersonWithin { lft, rgt });
    }

    predicates
}

/// The appointment sheet query narrowed by `predicates`, with their values.
///
/// Selects submitted appointments with the latest SMS reminder sent for
/// each, ordered by schedule then creation.
pub fn build_appointment_query(predicates: &[Predicate]) -> (Query, Params) {
    let a = |column: &str| table_col(APPOINTMENT, column);
    let n = |column: &str| table_col(NOTIFICATION, column);

    let mut select: Vec<SelectExpr> = vec![a("name").alias("appointment")];
    select.extend(APPOINTMENT_FIELDS.iter().map(|field| a(field).alias(field)));
    select.push(max(n("last_sent_dt")).alias("last_sent_dt"));
    select.push(a("confirmation_dt").alias("confirmation_dt"));
    select.push(a("status").alias("status"));

    let mut query = Query::new()
        .select(select)
        .from(TableRef::new("appointment").with_alias(APPOINTMENT))
        .left_join(
            TableRef::new("notification_count").with_alias(NOTIFICATION),
            n("reference_name")
                .eq(a("name"))
                .and(is_sms_reminder(NOTIFICATION)),
        )
        .filter(a("docstatus").eq(lit_int(1)));

    let mut params = Params::new();
    for predicate in predicates {
        query = query.filter(predicate.to_expr());
        predicate.bind(&mut params);
    }

    let query = query.group_by(vec![a("name")]).order_by(vec![
        OrderByExpr::asc(a("scheduled_dt")),
        OrderByExpr::asc(a("creation")),
    ]);

    (query, params)
}

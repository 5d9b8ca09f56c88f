//! SQLite-backed appointment store.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::types::ToSql;
use rusqlite::{Connection, OpenFlags, Row};
use tracing::debug;

use super::{is_sms_reminder, AppointmentStore, StoreError, StoreResult, SCHEMA};
use crate::model::AppointmentRow;
use crate::sql::{
    col, lit_int, lit_str, param, table_col, Dialect, ExprExt, OrderByExpr, Params, Query, TableRef,
};

/// Appointment store over a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open a database file that must already exist.
    ///
    /// Unlike [`SqliteStore::open`] this never creates a file.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database with the schema already created.
    pub fn open_in_memory() -> StoreResult<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create any missing tables and indexes.
    pub fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// The underlying connection, for loading data.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn select<T, F>(&self, query: &Query, params: &Params, map: F) -> StoreResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = query.to_sql(Dialect::Sqlite);
        let keys = query.param_names();
        let mut bindings: Vec<(String, &dyn ToSql)> = Vec::with_capacity(keys.len());
        for name in keys {
            let value = params
                .get(&name)
                .ok_or_else(|| StoreError::UnboundParam(name.clone()))?;
            bindings.push((format!(":{name}"), value as &dyn ToSql));
        }
        let named: Vec<(&str, &dyn ToSql)> =
            bindings.iter().map(|(k, v)| (k.as_str(), *v)).collect();

        debug!(sql = %sql, params = named.len(), "executing query");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(named.as_slice(), map)?
            .collect::<Result<Vec<T>, _>>()?;
        Ok(rows)
    }
}

fn map_appointment(row: &Row<'_>) -> rusqlite::Result<AppointmentRow> {
    let name: String = row.get("appointment")?;
    let mut appt = AppointmentRow::new(&name, row.get("scheduled_dt")?);
    appt.scheduled_date = row.get("scheduled_date")?;

    appt.appointment_type = row.get("appointment_type")?;
    appt.appointment_source = row.get("appointment_source")?;
    appt.sales_person = row.get("sales_person")?;
    appt.voice_of_customer = row.get("voice_of_customer")?;
    appt.remarks = row.get("remarks")?;
    appt.appointment_duration = row.get("appointment_duration")?;
    appt.end_dt = row.get("end_dt")?;
    appt.appointment_for = row.get("appointment_for")?;
    appt.party_name = row.get("party_name")?;
    appt.customer_name = row.get("customer_name")?;
    appt.contact_display = row.get("contact_display")?;
    appt.contact_mobile = row.get("contact_mobile")?;
    appt.contact_phone = row.get("contact_phone")?;
    appt.contact_email = row.get("contact_email")?;
    appt.applies_to_variant_of = row.get("applies_to_variant_of")?;
    appt.applies_to_variant_of_name = row.get("applies_to_variant_of_name")?;
    appt.applies_to_item = row.get("applies_to_item")?;
    appt.applies_to_item_name = row.get("applies_to_item_name")?;
    appt.last_sent_dt = row.get("last_sent_dt")?;
    appt.confirmation_dt = row.get("confirmation_dt")?;
    appt.status = row.get("status")?;

    Ok(appt)
}

impl AppointmentStore for SqliteStore {
    fn fetch_appointments(
        &self,
        query: &Query,
        params: &Params,
    ) -> StoreResult<Vec<AppointmentRow>> {
        self.select(query, params, map_appointment)
    }

    fn projects_for_appointments(
        &self,
        appointments: &[String],
    ) -> StoreResult<HashMap<String, String>> {
        if appointments.is_empty() {
            return Ok(HashMap::new());
        }

        let mut params = Params::new();
        let mut placeholders = Vec::with_capacity(appointments.len());
        for (i, name) in appointments.iter().enumerate() {
            let key = format!("appointment_{i}");
            params.bind(&key, name.as_str());
            placeholders.push(param(&key));
        }

        let query = Query::new()
            .select(vec![
                col("appointment").alias("appointment"),
                col("name").alias("project"),
            ])
            .from(TableRef::new("project"))
            .filter(col("appointment").in_list(placeholders))
            .order_by(vec![OrderByExpr::asc(col("name"))]);

        let pairs = self.select(&query, &params, |row| {
            Ok((row.get::<_, String>("appointment")?, row.get::<_, String>("project")?))
        })?;

        let mut projects = HashMap::with_capacity(pairs.len());
        for (appointment, project) in pairs {
            projects.entry(appointment).or_insert(project);
        }
        Ok(projects)
    }

    fn sales_person_range(&self, name: &str) -> StoreResult<Option<(i64, i64)>> {
        let query = Query::new()
            .select(vec![col("lft").alias("lft"), col("rgt").alias("rgt")])
            .from(TableRef::new("sales_person"))
            .filter(col("name").eq(param("name")))
            .limit(1);

        let mut params = Params::new();
        params.bind("name", name);

        let ranges = self.select(&query, &params, |row| {
            Ok((row.get::<_, i64>("lft")?, row.get::<_, i64>("rgt")?))
        })?;
        Ok(ranges.into_iter().next())
    }

    fn appointments_due_for_reminder(
        &self,
        date: NaiveDate,
        statuses: &[String],
    ) -> StoreResult<HashSet<String>> {
        let mut params = Params::new();
        params.bind("scheduled_date", date);

        let mut status_values = Vec::with_capacity(statuses.len());
        for (i, status) in statuses.iter().enumerate() {
            let key = format!("status_{i}");
            params.bind(&key, status.as_str());
            status_values.push(param(&key));
        }

        let already_sent = Query::new()
            .select(vec![table_col("n", "reference_name").alias("reference_name")])
            .from(TableRef::new("notification_count").with_alias("n"))
            .filter(is_sms_reminder("n"))
            .filter(table_col("n", "last_sent_dt").is_not_null());

        let query = Query::new()
            .select(vec![table_col("a", "name").alias("appointment")])
            .from(TableRef::new("appointment").with_alias("a"))
            .filter(table_col("a", "docstatus").eq(lit_int(1)))
            .filter(table_col("a", "scheduled_date").eq(param("scheduled_date")))
            .filter(table_col("a", "status").in_list(status_values))
            .filter(table_col("a", "contact_mobile").is_not_null())
            .filter(table_col("a", "contact_mobile").ne(lit_str("")))
            .filter(table_col("a", "name").not_in_subquery(already_sent));

        let names = self.select(&query, &params, |row| row.get::<_, String>("appointment"))?;
        Ok(names.into_iter().collect())
    }
}

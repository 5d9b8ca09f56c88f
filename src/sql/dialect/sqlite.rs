//! SQLite SQL dialect.
//!
//! SQLite features:
//! - ANSI identifier quoting (`"`)
//! - Booleans stored as integers (1/0)
//! - Named bind parameters (`:name`), bound by name through rusqlite

use super::helpers;
use super::SqlDialect;

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn format_placeholder(&self, name: &str, _position: usize) -> String {
        helpers::placeholder_named(name)
    }
}

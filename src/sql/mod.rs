//! SQL generation module.
//!
//! This module provides a type-safe SQL builder for the report queries.
//! It includes:
//!
//! - [`query`] - SELECT query builder
//! - [`expr`] - Expression AST and builder DSL
//! - [`params`] - Named bind parameter values
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod dialect;
pub mod expr;
pub mod params;
pub mod query;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use expr::{
    col, lit_int, lit_str, max, param, table_col, BinaryOperator, Expr, ExprExt, Literal,
};
pub use params::{ParamValue, Params};
pub use query::{Join, OrderByExpr, Query, SelectExpr, TableRef};
pub use token::{Token, TokenStream};

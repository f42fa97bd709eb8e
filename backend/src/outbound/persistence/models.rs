//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{count_history, count_table};

/// Insertable struct for creating the singleton counter row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = count_table)]
pub(crate) struct NewCounterRow {
    pub id: i32,
    pub count_number: i32,
}

/// Row struct for reading from the count_history table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = count_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HistoryRow {
    pub id: i32,
    pub count_value: i32,
    pub action: String,
    pub recorded_at: DateTime<Utc>,
}

/// Insertable struct for appending an audit entry. The timestamp is assigned
/// by the database default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = count_history)]
pub(crate) struct NewHistoryRow<'a> {
    pub count_value: i32,
    pub action: &'a str,
}

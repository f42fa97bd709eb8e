//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! suite pulls these helpers in with `mod support;`.

pub mod cluster_skip;
pub mod pg_embed;

use backend::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};

pub use cluster_skip::handle_cluster_setup_failure;
use pg_embed::shared_cluster;

/// Render a `postgres` error with its SQLSTATE and message.
///
/// `postgres::Error`'s `Display` often collapses database errors to a bare
/// `db error`, which hides the cause in CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Provision an empty temporary database on the shared cluster. The database
/// is dropped when the returned guard goes out of scope.
pub fn empty_database() -> Result<TemporaryDatabase, String> {
    shared_cluster()?
        .create_temporary_database()
        .map_err(|err| err.to_string())
}

/// Provision a temporary database and apply the embedded migrations.
pub fn fresh_database() -> Result<TemporaryDatabase, String> {
    let database = empty_database()?;
    run_pending_migrations(database.url()).map_err(|err| err.to_string())?;
    Ok(database)
}

/// Execute raw SQL against `url`, used to arrange edge-case fixtures.
pub fn execute_sql(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}

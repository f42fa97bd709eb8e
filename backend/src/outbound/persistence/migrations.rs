//! Embedded schema migrations.
//!
//! The server applies pending migrations before accepting traffic and the
//! `init-db` binary runs the same set, so both paths converge on one schema.
//! Tables left by deployments that predate these migrations are kept and
//! upgraded in place: naive timestamps become `timestamptz`, nullable columns
//! become `NOT NULL`, and the existing counter row moves to the singleton key.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled into the binary from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be established.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to run migrations: {message}")]
    Run { message: String },
    /// The blocking migration task did not complete.
    #[error("migration task did not complete: {message}")]
    Join { message: String },
}

/// Apply pending migrations on a dedicated synchronous connection.
///
/// Returns the number of migrations applied by this call.
///
/// # Errors
///
/// Returns [`MigrationError`] when connecting or applying a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Run {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}

/// Async wrapper running [`run_pending_migrations`] on the blocking pool.
///
/// # Errors
///
/// Returns [`MigrationError`] when migrations fail or the task is cancelled.
///
/// # Examples
///
/// ```rust,no_run
/// use backend::outbound::persistence::apply_migrations;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let applied = apply_migrations("postgres://localhost/atelier_db".to_owned()).await?;
/// println!("applied {applied} migrations");
/// # Ok(())
/// # }
/// ```
pub async fn apply_migrations(database_url: String) -> Result<usize, MigrationError> {
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::Join {
            message: err.to_string(),
        })?
}

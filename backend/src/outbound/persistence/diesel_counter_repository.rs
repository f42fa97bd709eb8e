//! PostgreSQL-backed `CounterRepository` implementation using Diesel ORM.
//!
//! The counter lives in a single row pinned to `id = 1`. Mutations run as one
//! transaction: create the row if absent, update it with a single
//! `UPDATE ... RETURNING`, then append the history entry. A failure at any
//! step rolls the whole mutation back.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::{debug, warn};

use crate::domain::ports::{CounterRepository, CounterRepositoryError, EnsureOutcome};
use crate::domain::{Counter, CounterAction, CounterEffect, HistoryEntry, HistoryLimit};

use super::models::{HistoryRow, NewCounterRow, NewHistoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::{count_history, count_table};

/// Primary key of the singleton counter row.
const COUNTER_ID: i32 = 1;

/// Diesel-backed implementation of the [`CounterRepository`] port.
#[derive(Clone)]
pub struct DieselCounterRepository {
    pool: DbPool,
}

impl DieselCounterRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use backend::outbound::persistence::{DbPool, DieselCounterRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/atelier_db")).await?;
    /// let repository = DieselCounterRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CounterRepositoryError {
    CounterRepositoryError::connection(error.into_message())
}

fn is_out_of_range(message: &str) -> bool {
    message.to_lowercase().contains("out of range")
}

/// Map Diesel errors to counter repository errors.
fn map_diesel_error(error: DieselError) -> CounterRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CounterRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) if is_out_of_range(info.message()) => {
            CounterRepositoryError::out_of_range(info.message())
        }
        DieselError::NotFound => CounterRepositoryError::query("counter row not found"),
        DieselError::QueryBuilderError(_) => CounterRepositoryError::query("database query error"),
        _ => CounterRepositoryError::query("database error"),
    }
}

fn row_to_entry(row: HistoryRow) -> HistoryEntry {
    HistoryEntry {
        id: row.id,
        count_value: row.count_value,
        action: row.action,
        timestamp: row.recorded_at,
    }
}

/// Insert the singleton row at zero unless it exists. Returns whether this
/// call created it.
async fn insert_if_absent(conn: &mut AsyncPgConnection) -> QueryResult<bool> {
    let inserted = diesel::insert_into(count_table::table)
        .values(&NewCounterRow {
            id: COUNTER_ID,
            count_number: 0,
        })
        .on_conflict(count_table::id)
        .do_nothing()
        .execute(conn)
        .await?;
    Ok(inserted > 0)
}

async fn apply_effect(conn: &mut AsyncPgConnection, effect: CounterEffect) -> QueryResult<i32> {
    let target = count_table::table.find(COUNTER_ID);
    match effect {
        CounterEffect::Add(delta) => {
            diesel::update(target)
                .set(count_table::count_number.eq(count_table::count_number + delta))
                .returning(count_table::count_number)
                .get_result(conn)
                .await
        }
        CounterEffect::Reset => {
            diesel::update(target)
                .set(count_table::count_number.eq(0))
                .returning(count_table::count_number)
                .get_result(conn)
                .await
        }
    }
}

#[async_trait]
impl CounterRepository for DieselCounterRepository {
    async fn ensure(&self) -> Result<EnsureOutcome, CounterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let created = insert_if_absent(&mut conn).await.map_err(map_diesel_error)?;
        let value: i32 = count_table::table
            .find(COUNTER_ID)
            .select(count_table::count_number)
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let counter = Counter::new(value);
        if created {
            debug!("created counter row");
            Ok(EnsureOutcome::Created(counter))
        } else {
            Ok(EnsureOutcome::Existing(counter))
        }
    }

    async fn apply(&self, action: CounterAction) -> Result<HistoryEntry, CounterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let label = action.label();

        let row = conn
            .transaction::<_, DieselError, _>(move |conn| {
                async move {
                    insert_if_absent(conn).await?;
                    let count_value = apply_effect(conn, action.effect()).await?;
                    diesel::insert_into(count_history::table)
                        .values(&NewHistoryRow {
                            count_value,
                            action: &label,
                        })
                        .returning(HistoryRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| {
                let mapped = map_diesel_error(err);
                if matches!(mapped, CounterRepositoryError::OutOfRange { .. }) {
                    warn!(%action, "counter mutation rejected as out of range");
                }
                mapped
            })?;

        Ok(row_to_entry(row))
    }

    async fn history(
        &self,
        limit: Option<HistoryLimit>,
    ) -> Result<Vec<HistoryEntry>, CounterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = count_history::table
            .select(HistoryRow::as_select())
            .order((count_history::recorded_at.desc(), count_history::id.desc()))
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(i64::from(limit.get()));
        }

        let rows: Vec<HistoryRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_entry).collect())
    }
}

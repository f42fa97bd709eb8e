//! Counter domain service.
//!
//! Implements the driving ports on top of a [`CounterRepository`], mapping
//! repository failures onto transport-agnostic domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CounterCommand, CounterQuery, CounterRepository, CounterRepositoryError,
};
use crate::domain::{Counter, CounterAction, Error, HistoryEntry, HistoryLimit};

/// Counter service implementing [`CounterCommand`] and [`CounterQuery`].
#[derive(Clone)]
pub struct CounterService<R> {
    repository: Arc<R>,
}

impl<R> CounterService<R> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: CounterRepositoryError) -> Error {
    match error {
        CounterRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("counter repository unavailable: {message}"))
        }
        CounterRepositoryError::Query { message } => {
            Error::internal(format!("counter repository error: {message}"))
        }
        CounterRepositoryError::OutOfRange { message } => {
            Error::invalid_request("counter value would leave the supported range").with_details(
                json!({
                    "code": "counter_out_of_range",
                    "reason": message,
                }),
            )
        }
    }
}

#[async_trait]
impl<R> CounterCommand for CounterService<R>
where
    R: CounterRepository,
{
    async fn apply(&self, action: CounterAction) -> Result<Counter, Error> {
        let entry = self
            .repository
            .apply(action)
            .await
            .map_err(map_repository_error)?;
        info!(
            action = %entry.action,
            count = entry.count_value,
            history_id = entry.id,
            "counter updated"
        );
        Ok(Counter::new(entry.count_value))
    }
}

#[async_trait]
impl<R> CounterQuery for CounterService<R>
where
    R: CounterRepository,
{
    async fn current(&self) -> Result<Counter, Error> {
        self.repository
            .ensure()
            .await
            .map(|outcome| outcome.counter())
            .map_err(map_repository_error)
    }

    async fn history(&self, limit: Option<HistoryLimit>) -> Result<Vec<HistoryEntry>, Error> {
        self.repository
            .history(limit)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "counter_service_tests.rs"]
mod tests;

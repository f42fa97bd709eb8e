//! Driven port for counter persistence.
//!
//! The [`CounterRepository`] trait owns the singleton counter row and the
//! append-only history table. Implementations must apply a mutation and its
//! audit entry atomically: either both are durable or neither is.

use async_trait::async_trait;

use crate::domain::{Counter, CounterAction, HistoryEntry, HistoryLimit};

use super::define_port_error;

define_port_error! {
    /// Errors raised by counter repository adapters.
    pub enum CounterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "counter repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "counter repository query failed: {message}",
        /// The mutation would push the counter outside the storable range.
        OutOfRange { message: String } =>
            "counter value out of range: {message}",
    }
}

/// Result of making sure the singleton counter row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The row was absent and has been created with value zero.
    Created(Counter),
    /// The row already existed.
    Existing(Counter),
}

impl EnsureOutcome {
    /// The counter regardless of whether it was just created.
    #[must_use]
    pub const fn counter(self) -> Counter {
        match self {
            Self::Created(counter) | Self::Existing(counter) => counter,
        }
    }
}

/// Port for counter storage and its audit trail.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Create the singleton row with value zero unless it already exists.
    ///
    /// Concurrent callers must converge on a single row.
    async fn ensure(&self) -> Result<EnsureOutcome, CounterRepositoryError>;

    /// Apply `action` to the counter and append the matching history entry.
    ///
    /// Creates the singleton row first when absent. Returns the appended
    /// entry, whose `count_value` is the counter value after the action.
    async fn apply(&self, action: CounterAction) -> Result<HistoryEntry, CounterRepositoryError>;

    /// List history entries, most recent first, optionally capped at `limit`.
    async fn history(
        &self,
        limit: Option<HistoryLimit>,
    ) -> Result<Vec<HistoryEntry>, CounterRepositoryError>;
}
